//! Colors used by the terminal front end
//!
//! Organized by purpose, not by color name.

use ratatui::style::Color;

#[derive(Clone, Debug)]
pub struct Theme {
    /// Headers, active items
    pub text_primary: Color,
    /// Hints, captions, timestamps
    pub text_muted: Color,
    /// Brand color
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::Rgb(0xe8, 0xe3, 0xf5),
            text_muted: Color::Rgb(0x8c, 0x86, 0xa3),
            accent: Color::Rgb(0xb4, 0x8e, 0xf0),
            success: Color::Rgb(0x7c, 0xd9, 0x92),
            error: Color::Rgb(0xf0, 0x7a, 0x86),
            border: Color::Rgb(0x4a, 0x44, 0x60),
            border_focused: Color::Rgb(0xb4, 0x8e, 0xf0),
        }
    }
}
