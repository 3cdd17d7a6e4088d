//! Text classification and normalization shared by on-screen preview and
//! Word export.
//!
//! Both [`ContentRenderer`] and [`DocumentExporter`] consume the same
//! [`Content`] value and the same [`Line`] sequence from [`normalize_plain`],
//! so a line can never be a heading in one output and a paragraph in the other.

pub mod exporter;
pub mod renderer;
pub mod sanitize;

use serde::Serialize;

pub use exporter::{DocumentExporter, ExportedDocument};
pub use renderer::ContentRenderer;

/// Residual markdown emphasis/heading markers removed from plain text.
const MARKDOWN_MARKERS: [char; 2] = ['*', '#'];

/// Minimum number of characters (exclusive) for an all-caps line to count as a heading.
const HEADING_MIN_CHARS: usize = 5;

const STRUCTURED_PREFIXES: [&str; 2] = ["<table", "<div"];

/// A generated text block, classified once when the result is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Content {
    /// Markup fragment that starts with a table or container tag.
    Structured(String),
    /// Freeform administrative text.
    Plain(String),
}

impl Content {
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        if STRUCTURED_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            Content::Structured(text)
        } else {
            Content::Plain(text)
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Content::Structured(_))
    }
}

/// Drops administrative header lines that must never reach a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoilerplateFilter {
    markers: Vec<String>,
}

impl BoilerplateFilter {
    pub fn new<'a>(markers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            markers: markers
                .into_iter()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_uppercase)
                .collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn is_blocked(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.markers.iter().any(|m| upper.contains(m.as_str()))
    }
}

impl Default for BoilerplateFilter {
    /// District people's committee and district education office headers.
    fn default() -> Self {
        Self::new(["UBND HUYỆN", "PHÒNG GIÁO DỤC"])
    }
}

/// One normalized line of plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Line {
    Spacer,
    Heading(String),
    Paragraph(String),
}

impl Line {
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Line::Spacer
        } else if trimmed == trimmed.to_uppercase()
            && trimmed.chars().count() > HEADING_MIN_CHARS
        {
            Line::Heading(trimmed.to_string())
        } else {
            Line::Paragraph(trimmed.to_string())
        }
    }
}

/// Strips markdown markers, splits on `\n`, removes boilerplate lines and
/// classifies what is left.
pub fn normalize_plain(text: &str, filter: &BoilerplateFilter) -> Vec<Line> {
    let cleaned: String = text
        .chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .collect();

    cleaned
        .split('\n')
        .filter(|line| !filter.is_blocked(line))
        .map(Line::classify)
        .collect()
}
