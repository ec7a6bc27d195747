use ratatui::style::{Color, Modifier, Style};

/// Application theme configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,

    /// Primary colors
    pub primary: Color,

    /// Text colors
    pub text: Color,
    pub text_dim: Color,

    /// Background colors
    pub background: Color,
    pub background_alt: Color,

    /// Border colors
    pub border: Color,

    /// Dialog colors
    pub backdrop: Color,
    pub panel: Color,
    pub panel_border: Color,
    pub affirmative_bg: Color,
    pub affirmative_fg: Color,
    pub negative_fg: Color,
    pub negative_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`]
    pub const NAMES: [&'static str; 2] = ["dark", "light"];

    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            name: "dark",

            primary: Color::Rgb(147, 51, 234),    // Purple

            text: Color::Rgb(248, 250, 252),      // Slate-50
            text_dim: Color::Rgb(148, 163, 184),  // Slate-400

            background: Color::Rgb(15, 23, 42),   // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800

            border: Color::Rgb(71, 85, 105),      // Slate-600

            backdrop: Color::Black,
            panel: Color::Rgb(30, 41, 59),        // Slate-800
            panel_border: Color::Rgb(148, 163, 184),
            affirmative_bg: Color::White,
            affirmative_fg: Color::Black,
            negative_fg: Color::White,
            negative_border: Color::White,
        }
    }

    /// Create a light theme
    pub fn light() -> Self {
        Self {
            name: "light",

            primary: Color::Rgb(109, 40, 217),    // Violet-700

            text: Color::Rgb(15, 23, 42),         // Slate-900
            text_dim: Color::Rgb(71, 85, 105),    // Slate-600

            background: Color::Rgb(248, 250, 252), // Slate-50
            background_alt: Color::Rgb(226, 232, 240), // Slate-200

            border: Color::Rgb(148, 163, 184),    // Slate-400

            backdrop: Color::Rgb(100, 116, 139),  // Slate-500
            panel: Color::White,
            panel_border: Color::Rgb(71, 85, 105),
            affirmative_bg: Color::Rgb(15, 23, 42),
            affirmative_fg: Color::White,
            negative_fg: Color::Rgb(15, 23, 42),
            negative_border: Color::Rgb(15, 23, 42),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Base style for normal elements
    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
    }

    /// Style for the status bar
    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background_alt)
    }

    /// Style for help text
    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Applied on top of whatever is under an open dialog
    pub fn backdrop_style(&self) -> Style {
        Style::default()
            .bg(self.backdrop)
            .add_modifier(Modifier::DIM)
    }

    pub fn panel_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.panel)
    }

    pub fn panel_border_style(&self) -> Style {
        Style::default().fg(self.panel_border)
    }

    pub fn message_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn affirmative_button_style(&self) -> Style {
        Style::default()
            .fg(self.affirmative_fg)
            .bg(self.affirmative_bg)
    }

    /// Cancel keeps the panel background showing through
    pub fn negative_button_style(&self) -> Style {
        Style::default()
            .fg(self.negative_fg)
            .bg(self.panel)
    }

    pub fn negative_border_style(&self) -> Style {
        Style::default().fg(self.negative_border)
    }

    pub fn focused_button_modifier(&self) -> Modifier {
        Modifier::BOLD | Modifier::UNDERLINED
    }
}
