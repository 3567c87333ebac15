//! Export Service - Lays out a sheet for download
//!
//! Builds a two-page [`SheetDocument`] from a sheet and theme and hands it to
//! the renderer registered for the requested format.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::dto::{
    DocumentColors, DocumentPage, DocumentSection, SectionStyle, SheetDocument,
};
use crate::application::ports::outbound::{DocumentRendererPort, RenderError};
use crate::domain::entities::CharacterSheet;
use crate::domain::services::{derived, is_consistent};
use crate::domain::value_objects::{Ability, AppSettings, CharacterTheme};

pub const SHEET_HEADING: &str = "D&D CHARACTER SHEET";
pub const DETAILS_HEADING: &str = "CHARACTER DETAILS";

const EQUIPMENT_LINES: usize = 3;
const APPEARANCE_LINES: usize = 5;
const PERSONALITY_LINES: usize = 3;
const BACKSTORY_LINES: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported export format: '{0}'")]
    UnsupportedFormat(String),
    #[error("No renderer registered for {0}")]
    NoRenderer(ExportFormat),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A rendered file ready to be sent
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportService {
    wrap_width: usize,
    skills_per_column: usize,
    renderers: HashMap<ExportFormat, Arc<dyn DocumentRendererPort>>,
}

impl ExportService {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            wrap_width: settings.export_wrap_width.max(1),
            skills_per_column: settings.skills_per_column.max(1),
            renderers: HashMap::new(),
        }
    }

    pub fn with_renderer(
        mut self,
        format: ExportFormat,
        renderer: Arc<dyn DocumentRendererPort>,
    ) -> Self {
        self.renderers.insert(format, renderer);
        self
    }

    #[instrument(skip(self, sheet, theme), fields(name = %sheet.character_name))]
    pub fn export(
        &self,
        sheet: &CharacterSheet,
        theme: &CharacterTheme,
        format: ExportFormat,
    ) -> Result<ExportedFile, ExportError> {
        let renderer = self
            .renderers
            .get(&format)
            .ok_or(ExportError::NoRenderer(format))?;

        let document = self.build_document(sheet, theme);
        let bytes = renderer.render(&document)?;
        let file_name = format!("{}.{}", document.file_stem, renderer.extension());
        info!(file_name = %file_name, bytes = bytes.len(), "Sheet exported");

        Ok(ExportedFile {
            file_name,
            content_type: renderer.content_type(),
            bytes,
        })
    }

    /// Lay out both pages. A sheet whose derived fields are stale is
    /// re-derived first so the document never shows inconsistent numbers.
    pub fn build_document(&self, sheet: &CharacterSheet, theme: &CharacterTheme) -> SheetDocument {
        let sheet = if is_consistent(sheet) {
            sheet.clone()
        } else {
            warn!("Exporting a sheet with stale derived fields; re-deriving");
            derived(sheet.clone())
        };

        let palette = &theme.palette;
        SheetDocument {
            file_stem: file_stem(&sheet.character_name),
            colors: DocumentColors {
                primary: palette.primary.to_rgb(),
                secondary: palette.secondary.to_rgb(),
                text: palette.text.to_rgb(),
            },
            pages: vec![self.sheet_page(&sheet), self.details_page(&sheet)],
        }
    }

    fn sheet_page(&self, s: &CharacterSheet) -> DocumentPage {
        // Left column first, then right: name/race/player/XP beside class/background/alignment
        let identity = vec![
            format!("Character Name: {}", s.character_name),
            format!("Race: {}", s.race),
            format!("Player: {}", s.player_name),
            format!("XP: {}", s.experience_points),
            format!("Class: {} {}", s.class_name, s.level),
            format!("Background: {}", s.background),
            format!("Alignment: {}", s.alignment),
        ];

        let core = vec![
            format!("AC: {}", s.armor_class),
            format!("Initiative: {}", signed(s.initiative)),
            format!("Speed: {}", s.speed),
            format!("Prof Bonus: {}", signed(s.proficiency_bonus)),
        ];

        let hit_points = vec![
            format!("HP Max: {}", s.hit_point_maximum),
            format!("Current HP: {}", s.current_hit_points),
            format!("Temp HP: {}", s.temporary_hit_points),
            format!("Hit Dice: {}", s.hit_dice),
        ];

        let abilities = Ability::ALL
            .iter()
            .map(|&ability| {
                let a = s.abilities[ability];
                format!("{} {} ({})", ability.abbreviation(), a.score, signed(a.modifier))
            })
            .collect();

        let skills = s
            .skills
            .iter()
            .map(|skill| {
                let mark = if skill.proficient { '●' } else { '○' };
                format!("{} {}: {}", mark, skill.name, signed(skill.value))
            })
            .collect();

        DocumentPage {
            heading: SHEET_HEADING.to_string(),
            sections: vec![
                DocumentSection::new(None, SectionStyle::Columns { per_column: 4 }, identity),
                DocumentSection::new(Some("CORE STATS"), SectionStyle::Panel, core),
                DocumentSection::new(Some("HIT POINTS"), SectionStyle::Panel, hit_points),
                DocumentSection::new(Some("ABILITIES"), SectionStyle::Row, abilities),
                DocumentSection::new(
                    Some("SKILLS"),
                    SectionStyle::Columns {
                        per_column: self.skills_per_column,
                    },
                    skills,
                ),
                self.text_block("EQUIPMENT", &s.equipment, "None", EQUIPMENT_LINES),
            ],
        }
    }

    fn details_page(&self, s: &CharacterSheet) -> DocumentPage {
        let d = &s.details;
        let physical = vec![
            format!("Age: {}  |  Height: {}  |  Weight: {}", d.age, d.height, d.weight),
            format!("Eyes: {}  |  Skin: {}  |  Hair: {}", d.eyes, d.skin, d.hair),
        ];

        DocumentPage {
            heading: DETAILS_HEADING.to_string(),
            sections: vec![
                DocumentSection::new(None, SectionStyle::Plain, physical),
                self.text_block("APPEARANCE", &d.appearance, "Not described", APPEARANCE_LINES),
                self.text_block(
                    "PERSONALITY TRAITS",
                    &s.personality_traits,
                    "Not defined",
                    PERSONALITY_LINES,
                ),
                self.text_block("IDEALS", &s.ideals, "Not defined", PERSONALITY_LINES),
                self.text_block("BONDS", &s.bonds, "Not defined", PERSONALITY_LINES),
                self.text_block("FLAWS", &s.flaws, "Not defined", PERSONALITY_LINES),
                self.text_block("BACKSTORY", &d.backstory, "To be written...", BACKSTORY_LINES),
            ],
        }
    }

    fn text_block(
        &self,
        title: &str,
        text: &str,
        fallback: &str,
        max_lines: usize,
    ) -> DocumentSection {
        let text = if text.trim().is_empty() { fallback } else { text };
        let mut lines = wrap_text(text, self.wrap_width);
        lines.truncate(max_lines);
        DocumentSection::new(Some(title), SectionStyle::Plain, lines)
    }
}

/// Greedy word wrap: a word moves to the next line only when adding it would
/// exceed `width` and the current line already has content. A single word
/// longer than `width` gets a line of its own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if candidate_len > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// "<name>-sheet", or "character-sheet" for an unnamed character
pub fn file_stem(character_name: &str) -> String {
    let name: String = character_name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|'))
        .collect();
    if name.is_empty() {
        "character-sheet".to_string()
    } else {
        format!("{}-sheet", name)
    }
}

fn signed(value: i32) -> String {
    format!("{:+}", value)
}
