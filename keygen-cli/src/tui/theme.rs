use ratatui::style::{Color, Style};

/// TON-blue palette
pub struct Theme {
    pub primary: Color,
    pub background: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0, 136, 204),        // #0088CC
            background: Color::Rgb(17, 17, 17),      // #111111
            text_primary: Color::Rgb(224, 224, 224), // #E0E0E0
            text_dim: Color::Rgb(128, 128, 128),     // #808080
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
        }
    }
}

impl Theme {
    /// Titles and active elements
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }
}
