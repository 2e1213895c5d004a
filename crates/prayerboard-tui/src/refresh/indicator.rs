//! Geometry of the circular refresh indicator, plus its terminal glyphs

use crate::motion::timing::interpolate_clamped;

/// Diameter of the ring
pub const INDICATOR_SIZE: f64 = 24.0;
pub const STROKE_WIDTH: f64 = 2.5;
/// Space between the ring and the top of the content
pub const INDICATOR_GAP: f64 = 8.0;
/// Dash and gap lengths of the loading pattern
pub const LOADING_DASH: f64 = 6.0;
pub const LOADING_GAP: f64 = 8.0;
/// Pull distance over which the indicator fades in
pub const FADE_IN_DISTANCE: f64 = 10.0;

const PROGRESS_GLYPHS: [char; 5] = ['○', '◔', '◑', '◕', '●'];
const SPINNER_GLYPHS: [char; 4] = ['◜', '◝', '◞', '◟'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashPattern {
    /// One dash as long as the circumference; the offset hides the remainder
    Solid { length: f64 },
    Dashed { dash: f64, gap: f64 },
}

/// One rendered frame of the indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorFrame {
    pub radius: f64,
    pub circumference: f64,
    pub dash: DashPattern,
    pub dash_offset: f64,
    /// Background track, hidden while loading
    pub show_track: bool,
    pub rotation_deg: f64,
    pub opacity: f64,
    /// Vertical position relative to the content top
    pub top: f64,
    pub progress: f64,
    pub spinning: bool,
}

impl IndicatorFrame {
    fn ring() -> (f64, f64) {
        let radius = (INDICATOR_SIZE - STROKE_WIDTH) / 2.0;
        (radius, radius * 2.0 * std::f64::consts::PI)
    }

    fn opacity_for(distance: f64, fade: f64) -> f64 {
        interpolate_clamped(distance, 0.0, FADE_IN_DISTANCE, 0.0, 1.0) * fade.clamp(0.0, 1.0)
    }

    /// Frame while the user is pulling or the pull is springing back
    pub fn pulling(distance: f64, progress: f64) -> Self {
        let (radius, circumference) = Self::ring();
        let progress = progress.clamp(0.0, 1.0);
        Self {
            radius,
            circumference,
            dash: DashPattern::Solid {
                length: circumference,
            },
            dash_offset: circumference * (1.0 - progress),
            show_track: true,
            rotation_deg: 0.0,
            opacity: Self::opacity_for(distance, 1.0),
            top: distance - INDICATOR_SIZE - INDICATOR_GAP,
            progress,
            spinning: false,
        }
    }

    /// Frame while a refresh is in flight or tearing down
    pub fn spinning(distance: f64, rotation_deg: f64, fade: f64) -> Self {
        let (radius, circumference) = Self::ring();
        Self {
            radius,
            circumference,
            dash: DashPattern::Dashed {
                dash: LOADING_DASH,
                gap: LOADING_GAP,
            },
            dash_offset: 0.0,
            show_track: false,
            rotation_deg: rotation_deg.rem_euclid(360.0),
            opacity: Self::opacity_for(distance, fade),
            top: distance - INDICATOR_SIZE - INDICATOR_GAP,
            progress: 1.0,
            spinning: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Share of the ring that is drawn
    pub fn drawn_fraction(&self) -> f64 {
        match self.dash {
            DashPattern::Solid { length } if length > 0.0 => {
                ((length - self.dash_offset) / length).clamp(0.0, 1.0)
            }
            DashPattern::Solid { .. } => 0.0,
            DashPattern::Dashed { dash, gap } => dash / (dash + gap),
        }
    }

    pub fn glyph(&self) -> char {
        if self.spinning {
            let quarter = (self.rotation_deg / 90.0).floor() as usize % SPINNER_GLYPHS.len();
            return SPINNER_GLYPHS[quarter];
        }
        let steps = (PROGRESS_GLYPHS.len() - 1) as f64;
        let index = (self.drawn_fraction() * steps).floor() as usize;
        PROGRESS_GLYPHS[index.min(PROGRESS_GLYPHS.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        if self.spinning {
            "Refreshing..."
        } else if self.progress >= 1.0 {
            "Release to refresh"
        } else {
            "Pull to refresh"
        }
    }
}
