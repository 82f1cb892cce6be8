use std::fmt;

use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Success,
    Error,
    Dim,
}

/// Text with an optional semantic color, rendered plain when color is off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    color: Option<SemanticColor>,
    bold: bool,
}

impl ColoredText {
    fn with_color(text: impl Into<String>, color: SemanticColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::with_color(text, SemanticColor::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::with_color(text, SemanticColor::Error)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::with_color(text, SemanticColor::Dim)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        if !supports_color {
            return self.text.clone();
        }
        let color = match self.color {
            Some(SemanticColor::Success) => theme::colors::SUCCESS,
            Some(SemanticColor::Error) => theme::colors::ERROR,
            Some(SemanticColor::Dim) => theme::colors::DIM,
            None if self.bold => return format!("{}", self.text.as_str().bold()),
            None => return self.text.clone(),
        };
        let styled = self.text.as_str().with(color);
        if self.bold {
            format!("{}", styled.bold())
        } else {
            format!("{}", styled)
        }
    }
}

impl fmt::Display for ColoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
