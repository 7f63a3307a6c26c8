//! Stories - styled text flowing through text frames

use serde::{Deserialize, Serialize};

/// A run of characters sharing one character style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRange {
    pub applied_character_style: String,
    /// Font family name applied as local formatting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_font: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl CharacterRange {
    pub fn new(style: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            applied_character_style: style.into(),
            applied_font: None,
            content: content.into(),
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.applied_font = Some(font.into());
        self
    }
}

/// A run of paragraphs sharing one paragraph style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRange {
    pub applied_paragraph_style: String,
    #[serde(default)]
    pub characters: Vec<CharacterRange>,
}

impl ParagraphRange {
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            applied_paragraph_style: style.into(),
            characters: Vec::new(),
        }
    }

    pub fn with_characters(mut self, range: CharacterRange) -> Self {
        self.characters.push(range);
        self
    }
}

/// A story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    #[serde(default)]
    pub paragraphs: Vec<ParagraphRange>,
}

impl Story {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            paragraphs: Vec::new(),
        }
    }

    pub fn with_paragraph(mut self, range: ParagraphRange) -> Self {
        self.paragraphs.push(range);
        self
    }

    /// Plain text of the story
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .flat_map(|p| p.characters.iter())
            .map(|c| c.content.as_str())
            .collect()
    }
}
