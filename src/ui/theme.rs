use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Terminal styles for CLI output
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    /// Actor and verb of a recorded like
    pub liked: Style,
    /// Actor and verb of a recorded pass
    pub passed: Style,
    /// Highlight for mutual likes
    pub mutual: Style,
    pub dim: Style,
    pub muted: Style,
}

impl Theme {
    /// Colors on a terminal, plain text when piped
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            liked: Style::new().bright_red().bold(),
            passed: Style::new().bright_black().italic(),
            mutual: Style::new().magenta().bold(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            liked: Style::new(),
            passed: Style::new(),
            mutual: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
        }
    }

    /// Style for a decision's verb
    pub fn decision(&self, liked: bool) -> &Style {
        if liked { &self.liked } else { &self.passed }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
