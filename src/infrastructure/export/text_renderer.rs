//! Plain-text sheet renderer
//!
//! Monospace layout: a banner per page, boxed panels, columns side by side,
//! and a form feed between pages so printers start each page fresh.

use crate::application::dto::{DocumentPage, DocumentSection, SectionStyle, SheetDocument};
use crate::application::ports::outbound::{DocumentRendererPort, RenderError};

const PAGE_BREAK: char = '\u{000C}';
const COLUMN_GAP: usize = 4;

pub struct TextRenderer {
    page_width: usize,
}

impl TextRenderer {
    pub fn new(page_width: usize) -> Self {
        Self {
            page_width: page_width.max(20),
        }
    }

    fn render_page(&self, page: &DocumentPage, out: &mut String) {
        let rule = "=".repeat(self.page_width);
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("{:^width$}", page.heading, width = self.page_width));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        for section in &page.sections {
            out.push('\n');
            self.render_section(section, out);
        }
    }

    fn render_section(&self, section: &DocumentSection, out: &mut String) {
        if let Some(title) = &section.title {
            out.push_str(title);
            out.push('\n');
            out.push_str(&"-".repeat(title.chars().count()));
            out.push('\n');
        }

        match section.style {
            SectionStyle::Plain => {
                for line in &section.lines {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            SectionStyle::Panel => render_panel(&section.lines, out),
            SectionStyle::Row => {
                out.push_str(&section.lines.join(&" ".repeat(COLUMN_GAP)));
                out.push('\n');
            }
            SectionStyle::Columns { per_column } => {
                render_columns(&section.lines, per_column.max(1), out)
            }
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(96)
    }
}

fn render_panel(lines: &[String], out: &mut String) {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = format!("+{}+\n", "-".repeat(inner + 2));
    out.push_str(&border);
    for line in lines {
        out.push_str(&format!("| {:<inner$} |\n", line, inner = inner));
    }
    out.push_str(&border);
}

fn render_columns(lines: &[String], per_column: usize, out: &mut String) {
    let columns: Vec<&[String]> = lines.chunks(per_column).collect();
    let widths: Vec<usize> = columns
        .iter()
        .map(|col| col.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();

    let rows = columns.first().map(|c| c.len()).unwrap_or(0);
    for row in 0..rows {
        let mut line = String::new();
        for (index, column) in columns.iter().enumerate() {
            let Some(cell) = column.get(row) else { break };
            if index + 1 < columns.len() {
                line.push_str(&format!("{:<width$}", cell, width = widths[index] + COLUMN_GAP));
            } else {
                line.push_str(cell);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

impl DocumentRendererPort for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, document: &SheetDocument) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        for (index, page) in document.pages.iter().enumerate() {
            if index > 0 {
                out.push(PAGE_BREAK);
                out.push('\n');
            }
            self.render_page(page, &mut out);
        }
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ExportService;
    use crate::domain::entities::CharacterSheet;
    use crate::domain::value_objects::{AppSettings, CharacterTheme};

    fn render(sheet: &CharacterSheet) -> String {
        let document = ExportService::new(&AppSettings::default())
            .build_document(sheet, &CharacterTheme::default());
        String::from_utf8(TextRenderer::default().render(&document).unwrap()).unwrap()
    }

    #[test]
    fn test_pages_are_separated_by_form_feed() {
        let text = render(&CharacterSheet::default());
        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("D&D CHARACTER SHEET"));
        assert!(pages[1].contains("CHARACTER DETAILS"));
        assert!(pages[1].contains("To be written..."));
    }

    #[test]
    fn test_skill_columns_sit_side_by_side() {
        let text = render(&CharacterSheet::default());
        let row = text
            .lines()
            .find(|l| l.contains("Acrobatics"))
            .unwrap();
        // Tenth skill starts the second column
        assert!(row.contains("Medicine"));
        assert!(!text.lines().any(|l| l.trim_start().starts_with("○ Medicine")));
    }

    #[test]
    fn test_panel_is_boxed() {
        let mut out = String::new();
        render_panel(&["AC: 10".to_string(), "Speed: 30".to_string()], &mut out);
        assert_eq!(
            out,
            "+-----------+\n| AC: 10    |\n| Speed: 30 |\n+-----------+\n"
        );
    }

    #[test]
    fn test_columns_with_short_last_column() {
        let lines: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut out = String::new();
        render_columns(&lines, 2, &mut out);
        assert_eq!(out, "a    c\nb\n");
    }
}
