use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode, Screen};
use crate::editor::EditorMode;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    Refresh,
    OpenEditor,
    ToggleTheme,
    ToggleMusic,
    FontIncrease,
    FontDecrease,
    ShowHelp,
    // Editor
    EditRow,
    DeleteRow,
    AddItem,
    AddSubsection,
    AddSection,
    PrevDate,
    NextDate,
    Save,
    LoadLatest,
    Back,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if let Screen::UpdateRequired { .. } = app.screen {
        return handle_update_required(key);
    }

    if matches!(app.mode, Mode::Help) {
        // Any key exits help
        return Action::ExitMode;
    }

    match &app.editor {
        Some(editor) if app.screen == Screen::Editor => match editor.mode() {
            EditorMode::Editing { .. } => handle_input_mode(key),
            EditorMode::ConfirmDelete(_)
            | EditorMode::ConfirmSave
            | EditorMode::ConfirmLoad
            | EditorMode::ConfirmExit => handle_confirm_mode(key),
            EditorMode::Normal => handle_editor_mode(key, app),
        },
        _ => handle_main_mode(key, app),
    }
}

fn handle_shared(key: KeyEvent, app: &App) -> Option<Action> {
    let action = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::PageDown, _) => Action::ScrollHalfPageDown,
        (KeyCode::PageUp, _) => Action::ScrollHalfPageUp,
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::ToggleTheme,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMusic,
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => Action::FontIncrease,
        (KeyCode::Char('-'), KeyModifiers::NONE) => Action::FontDecrease,
        (KeyCode::Char('?'), _) => Action::ShowHelp,
        _ => return None,
    };
    Some(action)
}

fn handle_main_mode(key: KeyEvent, app: &App) -> Action {
    if let Some(action) = handle_shared(key, app) {
        return action;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::OpenEditor,
        _ => Action::None,
    }
}

fn handle_editor_mode(key: KeyEvent, app: &App) -> Action {
    // Ctrl+S before the shared table so it is not read as a plain 's'
    if let (KeyCode::Char('s'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Save;
    }
    if let Some(action) = handle_shared(key, app) {
        return action;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::Back,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Enter, _) | (KeyCode::Char('i'), KeyModifiers::NONE) => Action::EditRow,
        (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => Action::DeleteRow,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::AddItem,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::AddSubsection,
        (KeyCode::Char('S'), _) => Action::AddSection,
        (KeyCode::Char('['), _) => Action::PrevDate,
        (KeyCode::Char(']'), _) => Action::NextDate,
        (KeyCode::Char('w'), KeyModifiers::NONE) => Action::Save,
        (KeyCode::Char('L'), _) => Action::LoadLatest,
        _ => Action::None,
    }
}

fn handle_input_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

fn handle_update_required(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}
