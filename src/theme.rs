use ratatui::style::Color;

#[derive(Debug, Clone)]
pub(crate) struct Theme {
    pub(crate) bg: Color,
    pub(crate) bg_alt: Color,
    pub(crate) fg: Color,
    pub(crate) fg_muted: Color,
    pub(crate) accent: Color,
    pub(crate) accent_secondary: Color,
    pub(crate) error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 30),
            bg_alt: Color::Rgb(40, 40, 40),
            fg: Color::Rgb(220, 220, 220),
            fg_muted: Color::Rgb(120, 120, 140),
            accent: Color::Rgb(86, 156, 214),
            accent_secondary: Color::Rgb(206, 198, 130),
            error: Color::Rgb(224, 108, 117),
        }
    }
}
