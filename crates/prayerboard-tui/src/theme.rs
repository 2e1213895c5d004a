use prayerboard_core::prefs::ThemeMode;
use ratatui::style::Color;

/// Runtime theme with the app's palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,

    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub placeholder: Color,

    // Semantic colors
    pub primary: Color,
    pub border: Color,
    pub selection: Color,
    pub error: Color,
    pub disabled: Color,
    pub success: Color,
    pub progress_fg: Color,
    pub progress_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg0: Color::Rgb(0x17, 0x17, 0x17),
            bg1: Color::Rgb(0x26, 0x26, 0x26),
            bg2: Color::Rgb(0x40, 0x40, 0x40),
            fg0: Color::Rgb(0xff, 0xff, 0xff),
            fg1: Color::Rgb(0xd4, 0xd4, 0xd4),
            placeholder: Color::Rgb(0x9c, 0xa3, 0xaf),
            primary: Color::Rgb(0xfc, 0xd3, 0x4d),
            border: Color::Rgb(0x52, 0x52, 0x52),
            selection: Color::Rgb(0x40, 0x40, 0x40),
            error: Color::Rgb(0xef, 0x44, 0x44),
            disabled: Color::Rgb(0x73, 0x73, 0x73),
            success: Color::Rgb(0x86, 0xef, 0xac),
            progress_fg: Color::Rgb(0xfc, 0xd3, 0x4d),
            progress_bg: Color::Rgb(0x40, 0x40, 0x40),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg0: Color::Rgb(0xff, 0xff, 0xff),
            bg1: Color::Rgb(0xf5, 0xf5, 0xf5),
            bg2: Color::Rgb(0xe5, 0xe5, 0xe5),
            fg0: Color::Rgb(0x00, 0x00, 0x00),
            fg1: Color::Rgb(0x37, 0x41, 0x51),
            placeholder: Color::Rgb(0x6b, 0x72, 0x80),
            primary: Color::Rgb(0x4b, 0x55, 0x63),
            border: Color::Rgb(0x9c, 0xa3, 0xaf),
            selection: Color::Rgb(0xe5, 0xe5, 0xe5),
            error: Color::Rgb(0xdc, 0x26, 0x26),
            disabled: Color::Rgb(0x9c, 0xa3, 0xaf),
            success: Color::Rgb(0x16, 0xa3, 0x4a),
            progress_fg: Color::Rgb(0x4b, 0x55, 0x63),
            progress_bg: Color::Rgb(0xd4, 0xd4, 0xd4),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_color_per_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Dark).primary, Color::Rgb(0xfc, 0xd3, 0x4d));
        assert_eq!(Theme::for_mode(ThemeMode::Light).primary, Color::Rgb(0x4b, 0x55, 0x63));
        assert_eq!(Theme::default().mode, ThemeMode::Dark);
    }
}
