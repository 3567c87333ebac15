//! Renderer-independent layout of an exported sheet
//!
//! The export service decides what text goes where; renderers only decide how
//! a section style is drawn.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetDocument {
    /// File name without extension
    pub file_stem: String,
    pub colors: DocumentColors,
    pub pages: Vec<DocumentPage>,
}

/// Theme colours as RGB triples
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentColors {
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub text: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentPage {
    pub heading: String,
    pub sections: Vec<DocumentSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSection {
    pub title: Option<String>,
    pub style: SectionStyle,
    pub lines: Vec<String>,
}

impl DocumentSection {
    pub fn new(title: Option<&str>, style: SectionStyle, lines: Vec<String>) -> Self {
        Self {
            title: title.map(str::to_string),
            style,
            lines,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SectionStyle {
    /// One line after another
    Plain,
    /// Boxed block of label/value lines
    Panel,
    /// Lines laid out side by side on one row
    Row,
    /// Lines split into columns of at most `per_column` entries
    #[serde(rename_all = "camelCase")]
    Columns { per_column: usize },
}

impl SheetDocument {
    pub fn page(&self, heading: &str) -> Option<&DocumentPage> {
        self.pages.iter().find(|p| p.heading == heading)
    }
}

impl DocumentPage {
    pub fn section(&self, title: &str) -> Option<&DocumentSection> {
        self.sections
            .iter()
            .find(|s| s.title.as_deref() == Some(title))
    }
}
