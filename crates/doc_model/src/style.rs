//! Style system - Style definitions, style groups, and per-category listings
//!
//! This module implements a layout-package style system with:
//! - Three parallel style categories (Paragraph, Character, Object)
//! - Style inheritance via `based_on` chains within a category
//! - Nested style groups holding the styles of one category
//!
//! Built-in sentinel styles (identifiers carrying `$ID/`) are always
//! available to the consuming application and terminate `based_on` chains.

use crate::identifier::is_built_in;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Style Identifier
// =============================================================================

/// Unique identifier for a style within its category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(pub String);

impl StyleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier denotes a built-in sentinel style
    pub fn is_built_in(&self) -> bool {
        is_built_in(&self.0)
    }
}

impl From<&str> for StyleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StyleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Style Categories
// =============================================================================

/// The category of a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleCategory {
    /// Applied to paragraph ranges of a story
    Paragraph,
    /// Applied to character ranges of a story
    Character,
    /// Applied to page items and images
    Object,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 3] = [
        StyleCategory::Paragraph,
        StyleCategory::Character,
        StyleCategory::Object,
    ];

    /// Element name of styles of this category
    pub fn element_name(&self) -> &'static str {
        match self {
            StyleCategory::Paragraph => "ParagraphStyle",
            StyleCategory::Character => "CharacterStyle",
            StyleCategory::Object => "ObjectStyle",
        }
    }

    /// Identifier of the root group of this category
    pub fn root_group_id(&self) -> &'static str {
        match self {
            StyleCategory::Paragraph => "RootParagraphStyleGroup",
            StyleCategory::Character => "RootCharacterStyleGroup",
            StyleCategory::Object => "RootObjectStyleGroup",
        }
    }

    /// The built-in style every package of this category carries
    pub fn default_style_id(&self) -> &'static str {
        match self {
            StyleCategory::Paragraph => "ParagraphStyle/$ID/[No paragraph style]",
            StyleCategory::Character => "CharacterStyle/$ID/[No character style]",
            StyleCategory::Object => "ObjectStyle/$ID/[None]",
        }
    }
}

// =============================================================================
// Style Definition
// =============================================================================

/// A named style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Identifier, unique within the category
    pub id: StyleId,
    /// Display name
    pub name: String,
    /// Style category
    pub category: StyleCategory,
    /// Parent style of the same category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on: Option<StyleId>,
    /// Formatting attributes, carried verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Style {
    /// Create a style of the given category
    pub fn new(category: StyleCategory, id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            based_on: None,
            properties: BTreeMap::new(),
        }
    }

    /// Create a new paragraph style
    pub fn paragraph(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self::new(StyleCategory::Paragraph, id, name)
    }

    /// Create a new character style
    pub fn character(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self::new(StyleCategory::Character, id, name)
    }

    /// Create a new object style
    pub fn object(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self::new(StyleCategory::Object, id, name)
    }

    /// Set the base style
    pub fn with_based_on(mut self, base: impl Into<StyleId>) -> Self {
        self.based_on = Some(base.into());
        self
    }

    /// Set a formatting attribute
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The declared parent, ignoring empty values
    pub fn parent(&self) -> Option<&StyleId> {
        self.based_on.as_ref().filter(|p| !p.as_str().is_empty())
    }

    pub fn is_built_in(&self) -> bool {
        self.id.is_built_in()
    }
}

// =============================================================================
// Style Groups
// =============================================================================

/// A group of styles of one category; groups nest groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleGroup {
    pub id: String,
    pub name: String,
    /// Styles held directly by this group, in declared order
    #[serde(default)]
    pub styles: Vec<Style>,
    /// Nested groups, in declared order
    #[serde(default)]
    pub groups: Vec<StyleGroup>,
}

impl StyleGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            styles: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Create the empty root group of a category
    pub fn root(category: StyleCategory) -> Self {
        Self::new(category.root_group_id(), "")
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }

    pub fn with_group(mut self, group: StyleGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// True when neither this group nor any descendant holds a style
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.groups.iter().all(StyleGroup::is_empty)
    }

    /// Number of styles in this group and all descendants
    pub fn style_count(&self) -> usize {
        self.styles.len() + self.groups.iter().map(StyleGroup::style_count).sum::<usize>()
    }

    /// All styles in this subtree, depth-first in declared order
    pub fn all_styles(&self) -> Vec<&Style> {
        let mut out = Vec::new();
        self.collect_styles(&mut out);
        out
    }

    fn collect_styles<'a>(&'a self, out: &mut Vec<&'a Style>) {
        out.extend(self.styles.iter());
        for group in &self.groups {
            group.collect_styles(out);
        }
    }

    /// Find a style anywhere in this subtree
    pub fn find(&self, id: &str) -> Option<&Style> {
        self.styles
            .iter()
            .find(|s| s.id.as_str() == id)
            .or_else(|| self.groups.iter().find_map(|g| g.find(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Remove a style from wherever it lives in this subtree
    pub fn remove(&mut self, id: &str) -> Option<Style> {
        if let Some(index) = self.styles.iter().position(|s| s.id.as_str() == id) {
            return Some(self.styles.remove(index));
        }
        self.groups.iter_mut().find_map(|g| g.remove(id))
    }
}

// =============================================================================
// Style Listing
// =============================================================================

/// The complete style resource of a document: one group tree per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleListing {
    pub paragraph: StyleGroup,
    pub character: StyleGroup,
    pub object: StyleGroup,
}

impl StyleListing {
    /// Create a listing with empty root groups
    pub fn new() -> Self {
        Self {
            paragraph: StyleGroup::root(StyleCategory::Paragraph),
            character: StyleGroup::root(StyleCategory::Character),
            object: StyleGroup::root(StyleCategory::Object),
        }
    }

    /// Root group of a category
    pub fn root(&self, category: StyleCategory) -> &StyleGroup {
        match category {
            StyleCategory::Paragraph => &self.paragraph,
            StyleCategory::Character => &self.character,
            StyleCategory::Object => &self.object,
        }
    }

    /// Mutable root group of a category
    pub fn root_mut(&mut self, category: StyleCategory) -> &mut StyleGroup {
        match category {
            StyleCategory::Paragraph => &mut self.paragraph,
            StyleCategory::Character => &mut self.character,
            StyleCategory::Object => &mut self.object,
        }
    }

    /// Get a style by category and identifier
    pub fn get(&self, category: StyleCategory, id: &str) -> Option<&Style> {
        self.root(category).find(id)
    }

    /// Check if a style exists
    pub fn contains(&self, category: StyleCategory, id: &str) -> bool {
        self.root(category).contains(id)
    }

    /// Whether a reference to `id` can be satisfied (declared or built-in)
    pub fn resolves(&self, category: StyleCategory, id: &str) -> bool {
        is_built_in(id) || self.contains(category, id)
    }

    /// Register a style at the root of its category
    pub fn insert(&mut self, style: Style) {
        self.root_mut(style.category).styles.push(style);
    }

    /// Remove a style from its category tree
    pub fn remove(&mut self, category: StyleCategory, id: &str) -> Option<Style> {
        self.root_mut(category).remove(id)
    }

    /// All styles of a category in declared order
    pub fn styles(&self, category: StyleCategory) -> Vec<&Style> {
        self.root(category).all_styles()
    }
}

impl Default for StyleListing {
    fn default() -> Self {
        Self::new()
    }
}
