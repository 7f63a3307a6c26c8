//! Document root and document-level resource access
//!
//! The [`Document`] exclusively owns every part of a package. It is built on
//! load, mutated in place by successive calls, and serialized on save.

use crate::{
    story_location, Color, DocModelError, FontFamily, Layer, Link, PageItem, Result, Spread,
    Story, StyleListing, Swatch,
};
use serde::{Deserialize, Serialize};

/// Document metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

/// A full layout document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMetadata,
    spreads: Vec<Spread>,
    stories: Vec<Story>,
    /// `None` when the package carries no style resource at all
    styles: Option<StyleListing>,
    colors: Vec<Color>,
    swatches: Vec<Swatch>,
    fonts: Vec<FontFamily>,
    layers: Vec<Layer>,
    links: Vec<Link>,
}

impl Document {
    /// Create a new empty document with an empty style listing
    pub fn new() -> Self {
        Self {
            styles: Some(StyleListing::new()),
            ..Self::default()
        }
    }

    // =========================================================================
    // Stories
    // =========================================================================

    /// Canonical part location of a story
    pub fn story_location(&self, id: &str) -> String {
        story_location(id)
    }

    /// Look up a story by identifier
    pub fn get_story(&self, id: &str) -> Result<&Story> {
        self.stories
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| DocModelError::StoryNotFound {
                id: id.to_string(),
                location: story_location(id),
            })
    }

    pub fn contains_story(&self, id: &str) -> bool {
        self.stories.iter().any(|s| s.id == id)
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Add a story; identifiers must be unique
    pub fn insert_story(&mut self, story: Story) -> Result<()> {
        if self.contains_story(&story.id) {
            return Err(DocModelError::DuplicateId(story.id));
        }
        self.stories.push(story);
        Ok(())
    }

    /// Replace an existing story, returning the previous version
    pub fn replace_story(&mut self, story: Story) -> Result<Story> {
        match self.stories.iter_mut().find(|s| s.id == story.id) {
            Some(slot) => Ok(std::mem::replace(slot, story)),
            None => Err(DocModelError::StoryNotFound {
                location: story_location(&story.id),
                id: story.id,
            }),
        }
    }

    pub fn remove_story(&mut self, id: &str) -> Result<Story> {
        let index = self
            .stories
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DocModelError::StoryNotFound {
                id: id.to_string(),
                location: story_location(id),
            })?;
        Ok(self.stories.remove(index))
    }

    // =========================================================================
    // Spreads and page items
    // =========================================================================

    pub fn spreads(&self) -> &[Spread] {
        &self.spreads
    }

    pub fn spread(&self, id: &str) -> Result<&Spread> {
        self.spreads
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| DocModelError::SpreadNotFound(id.to_string()))
    }

    pub fn spread_mut(&mut self, id: &str) -> Result<&mut Spread> {
        self.spreads
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DocModelError::SpreadNotFound(id.to_string()))
    }

    pub fn insert_spread(&mut self, spread: Spread) -> Result<()> {
        if self.spreads.iter().any(|s| s.id == spread.id) {
            return Err(DocModelError::DuplicateId(spread.id));
        }
        self.spreads.push(spread);
        Ok(())
    }

    /// Every page item across all spreads, in declared order
    pub fn page_items(&self) -> impl Iterator<Item = &PageItem> {
        self.spreads.iter().flat_map(|s| s.items.iter())
    }

    /// Find a page item in a specific spread
    pub fn page_item(&self, spread_id: &str, item_id: &str) -> Result<&PageItem> {
        self.spread(spread_id)?
            .get(item_id)
            .ok_or_else(|| DocModelError::PageItemNotFound {
                spread_id: spread_id.to_string(),
                item_id: item_id.to_string(),
            })
    }

    /// Find a page item in any spread, returning the owning spread's id
    pub fn find_page_item(&self, item_id: &str) -> Option<(&str, &PageItem)> {
        self.spreads
            .iter()
            .find_map(|s| s.get(item_id).map(|item| (s.id.as_str(), item)))
    }

    // =========================================================================
    // Styles
    // =========================================================================

    pub fn style_listing(&self) -> Option<&StyleListing> {
        self.styles.as_ref()
    }

    pub fn style_listing_mut(&mut self) -> Option<&mut StyleListing> {
        self.styles.as_mut()
    }

    /// Replace (or drop) the style resource
    pub fn set_style_listing(&mut self, styles: Option<StyleListing>) {
        self.styles = styles;
    }

    /// The style listing, created empty if the package had none
    pub fn ensure_style_listing(&mut self) -> &mut StyleListing {
        self.styles.get_or_insert_with(StyleListing::new)
    }

    // =========================================================================
    // Colors and swatches
    // =========================================================================

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn find_color(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn insert_color(&mut self, color: Color) -> Result<()> {
        if self.find_color(&color.id).is_some() {
            return Err(DocModelError::DuplicateId(color.id));
        }
        self.colors.push(color);
        Ok(())
    }

    pub fn remove_color(&mut self, id: &str) -> Option<Color> {
        let index = self.colors.iter().position(|c| c.id == id)?;
        Some(self.colors.remove(index))
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn find_swatch(&self, id: &str) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.id == id)
    }

    pub fn insert_swatch(&mut self, swatch: Swatch) -> Result<()> {
        if self.find_swatch(&swatch.id).is_some() {
            return Err(DocModelError::DuplicateId(swatch.id));
        }
        self.swatches.push(swatch);
        Ok(())
    }

    pub fn remove_swatch(&mut self, id: &str) -> Option<Swatch> {
        let index = self.swatches.iter().position(|s| s.id == id)?;
        Some(self.swatches.remove(index))
    }

    // =========================================================================
    // Fonts, layers, links
    // =========================================================================

    pub fn fonts(&self) -> &[FontFamily] {
        &self.fonts
    }

    /// Find a font family by name or identifier
    pub fn find_font(&self, reference: &str) -> Option<&FontFamily> {
        self.fonts.iter().find(|f| f.matches(reference))
    }

    pub fn insert_font(&mut self, family: FontFamily) -> Result<()> {
        if self.fonts.iter().any(|f| f.id == family.id) {
            return Err(DocModelError::DuplicateId(family.id));
        }
        self.fonts.push(family);
        Ok(())
    }

    pub fn remove_font(&mut self, reference: &str) -> Option<FontFamily> {
        let index = self.fonts.iter().position(|f| f.matches(reference))?;
        Some(self.fonts.remove(index))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn find_layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn insert_layer(&mut self, layer: Layer) -> Result<()> {
        if self.find_layer(&layer.id).is_some() {
            return Err(DocModelError::DuplicateId(layer.id));
        }
        self.layers.push(layer);
        Ok(())
    }

    pub fn remove_layer(&mut self, id: &str) -> Option<Layer> {
        let index = self.layers.iter().position(|l| l.id == id)?;
        Some(self.layers.remove(index))
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Find a link by identifier or URI
    pub fn find_link(&self, key: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.matches(key))
    }

    pub fn insert_link(&mut self, link: Link) -> Result<()> {
        if self.links.iter().any(|l| l.id == link.id) {
            return Err(DocModelError::DuplicateId(link.id));
        }
        self.links.push(link);
        Ok(())
    }

    /// Remove every link keyed by `key` (identifier or URI)
    pub fn remove_links(&mut self, key: &str) -> Vec<Link> {
        let (removed, kept): (Vec<Link>, Vec<Link>) = std::mem::take(&mut self.links)
            .into_iter()
            .partition(|l| l.matches(key));
        self.links = kept;
        removed
    }
}
