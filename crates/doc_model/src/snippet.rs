//! Snippet model - a minimal, self-contained package derived from a selection
//!
//! A [`MinimalDocument`] carries only the resources reachable from the
//! selected page items, plus the structural defaults every package needs.

use crate::{
    Color, ColorGroup, CompatibilityPlaceholder, FontFamily, Layer, NumberingList, PageItem,
    Story, StrokeStyle, StyleListing, Swatch,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a package is a full document or partial content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageKind {
    Document,
    Snippet,
}

impl PackageKind {
    /// Type tag written into the package marker
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Document => "document",
            PackageKind::Snippet => "snippet",
        }
    }
}

/// The synthetic node holding the selected page items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetContainer {
    pub id: String,
    pub items: Vec<PageItem>,
}

/// A derived package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalDocument {
    /// Always [`PackageKind::Snippet`] for assembled packages
    pub kind: PackageKind,
    pub created: DateTime<Utc>,
    pub colors: Vec<Color>,
    pub swatches: Vec<Swatch>,
    pub stroke_styles: Vec<StrokeStyle>,
    pub color_groups: Vec<ColorGroup>,
    pub layers: Vec<Layer>,
    pub fonts: Vec<FontFamily>,
    pub numbering_lists: Vec<NumberingList>,
    pub placeholders: Vec<CompatibilityPlaceholder>,
    pub styles: StyleListing,
    pub container: SnippetContainer,
    pub stories: Vec<Story>,
}

impl MinimalDocument {
    pub fn is_snippet(&self) -> bool {
        self.kind == PackageKind::Snippet
    }

    pub fn find_color(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn find_swatch(&self, id: &str) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.id == id)
    }

    pub fn find_story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }
}
