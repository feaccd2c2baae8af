use crate::helm::HelmError;
use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line message shown at the bottom of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn style(&self) -> Style {
        match self.level {
            NoticeLevel::Info => Style::default().fg(Color::Green),
            NoticeLevel::Error => Style::default().fg(Color::Red),
        }
    }
}

impl From<&HelmError> for Notice {
    fn from(error: &HelmError) -> Self {
        Notice::error(error.to_string())
    }
}
