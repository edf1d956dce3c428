//! Structured output of one translated source line.
//!
//! Handlers never build indentation or comment suffixes into their text —
//! they return an [`Emit`], and rendering joins indent, code, and comment.

use crate::python::INDENT_WIDTH;

/// What a single source line translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Emit {
    /// The line is consumed without producing output (`do`, `fi`, shebang).
    Suppressed,
    /// The line produces an empty output line.
    Blank,
    /// The line produces code, a comment, or both.
    Line(Line),
}

/// A rendered-on-demand output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Nesting depth the line is written at.
    pub indent: usize,
    /// Python code; may be empty for a comment-only line.
    pub code: String,
    /// Trailing comment, including its leading `#`.
    pub comment: Option<String>,
}

impl Emit {
    /// A code line at `indent`.
    #[must_use]
    pub fn code(indent: usize, code: impl Into<String>) -> Self {
        Emit::Line(Line {
            indent,
            code: code.into(),
            comment: None,
        })
    }

    /// Attach a trailing comment.
    ///
    /// A suppressed or blank line becomes a comment-only line at `indent`.
    #[must_use]
    pub fn with_comment(self, comment: &str, indent: usize) -> Self {
        let comment = Some(comment.to_string());
        match self {
            Emit::Line(line) => Emit::Line(Line { comment, ..line }),
            Emit::Suppressed | Emit::Blank => Emit::Line(Line {
                indent,
                code: String::new(),
                comment,
            }),
        }
    }

    /// Render to an output line, or `None` for a suppressed line.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Emit::Suppressed => None,
            Emit::Blank => Some(String::new()),
            Emit::Line(line) => Some(line.render()),
        }
    }
}

impl Line {
    /// Indent, code, and comment joined into one string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = " ".repeat(self.indent * INDENT_WIDTH);
        out.push_str(&self.code);
        if let Some(comment) = &self.comment {
            if !self.code.is_empty() {
                out.push(' ');
            }
            out.push_str(comment);
        }
        out
    }
}
