// Light and dark palettes for the script view

use scriptview_core::Theme;

use crate::Color;

/// Runtime theme colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Screen background
    pub background: Color,
    /// Body text
    pub text: Color,
    /// Hints, footers, empty-state messages
    pub text_muted: Color,
    /// Dialogue card background
    pub card: Color,
    /// Dialogue card border
    pub card_border: Color,
    /// Speaker name above a dialogue line
    pub speaker: Color,
    /// Technical cue
    pub technical: Color,
    /// Music cue
    pub music: Color,
    /// Title bar and theme toggle
    pub accent: Color,
    /// Text drawn on top of `accent`
    pub accent_text: Color,
    /// Error notification border and title
    pub error: Color,
}

impl ThemeColors {
    /// Built-in light theme
    pub fn light() -> Self {
        ThemeColors {
            background: Color::from_hex(0xF4F4F9),
            text: Color::from_hex(0x333333),
            text_muted: Color::from_hex(0x777777),
            card: Color::from_hex(0xFFFFFF),
            card_border: Color::from_hex(0xCCCCCC),
            speaker: Color::from_hex(0xFF5733),
            technical: Color::from_hex(0xB8860B),
            music: Color::from_hex(0x4D79FF),
            accent: Color::from_hex(0x007BFF),
            accent_text: Color::from_hex(0xFFFFFF),
            error: Color::from_hex(0xD32F2F),
        }
    }

    /// Built-in dark theme
    pub fn dark() -> Self {
        ThemeColors {
            background: Color::from_hex(0x1E1E1E),
            text: Color::from_hex(0xFFFFFF),
            text_muted: Color::from_hex(0x888888),
            card: Color::from_hex(0x333333),
            card_border: Color::from_hex(0x444444),
            speaker: Color::from_hex(0xFF5733),
            technical: Color::from_hex(0xFFDB4D),
            music: Color::from_hex(0x4D79FF),
            accent: Color::from_hex(0x555555),
            accent_text: Color::from_hex(0xFFFFFF),
            error: Color::from_hex(0xFF6B6B),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
