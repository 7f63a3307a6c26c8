//! Reachability walker - collects the direct references of page content
//!
//! The walker visits page items and the stories they show, recording every
//! referenced identifier in a [`ReferenceSet`]. Style ancestry is not
//! followed here; see [`crate::StyleHierarchyResolver`].

use crate::{ReferenceSet, ResourceCategory};
use doc_model::{
    is_swatch_reference, non_empty, Document, Image, PageItem, Selection, Story, StyleCategory,
};

/// Walks page items and stories of one document
pub struct ReachabilityWalker<'a> {
    document: &'a Document,
    set: ReferenceSet,
}

impl<'a> ReachabilityWalker<'a> {
    /// Create a walker with an empty reference set
    pub fn new(document: &'a Document) -> Self {
        Self::with_set(document, ReferenceSet::new())
    }

    /// Create a walker that adds to an existing reference set
    pub fn with_set(document: &'a Document, set: ReferenceSet) -> Self {
        Self { document, set }
    }

    pub fn set(&self) -> &ReferenceSet {
        &self.set
    }

    pub fn into_set(self) -> ReferenceSet {
        self.set
    }

    /// Record the references of one page item.
    ///
    /// Groups contribute only their own style and layer; their members are
    /// independent items and must be analyzed separately.
    pub fn analyze(&mut self, item: &PageItem) {
        let base = item.base();
        if let Some(style) = non_empty(&base.applied_object_style) {
            self.set.insert(ResourceCategory::ObjectStyles, style);
        }
        if let Some(layer) = non_empty(&base.item_layer) {
            self.set.insert(ResourceCategory::Layers, layer);
        }

        match item {
            PageItem::TextFrame(frame) => {
                if let Some(story_id) = non_empty(&frame.parent_story) {
                    self.analyze_story_reference(story_id);
                }
            }
            PageItem::Rectangle(shape)
            | PageItem::Oval(shape)
            | PageItem::Polygon(shape)
            | PageItem::GraphicLine(shape) => {
                if let Some(color) = non_empty(&shape.stroke_color) {
                    self.mark_color(color);
                }
                if let Some(color) = non_empty(&shape.fill_color) {
                    self.mark_color(color);
                }
                if let Some(image) = &shape.image {
                    self.analyze_image(image);
                }
            }
            PageItem::Group(_) => {}
        }
    }

    /// Record the styles (and local fonts) used by a story.
    ///
    /// Only paragraph ranges and their character ranges are visited.
    pub fn analyze_story(&mut self, story: &Story) {
        for paragraph in &story.paragraphs {
            if !paragraph.applied_paragraph_style.is_empty() {
                self.set.insert_style(
                    StyleCategory::Paragraph,
                    paragraph.applied_paragraph_style.as_str(),
                );
            }
            for range in &paragraph.characters {
                if !range.applied_character_style.is_empty() {
                    self.set.insert_style(
                        StyleCategory::Character,
                        range.applied_character_style.as_str(),
                    );
                }
                if let Some(font) = non_empty(&range.applied_font) {
                    self.set.insert(ResourceCategory::Fonts, font);
                }
            }
        }
    }

    /// Analyze every item of a selection
    pub fn analyze_selection(&mut self, selection: &Selection) {
        self.analyze_items(selection.items());
    }

    /// Analyze any sequence of page items
    pub fn analyze_items<'i>(&mut self, items: impl IntoIterator<Item = &'i PageItem>) {
        for item in items {
            self.analyze(item);
        }
    }

    fn analyze_story_reference(&mut self, story_id: &str) {
        let document = self.document;
        self.set.insert(ResourceCategory::Stories, story_id);

        match document.get_story(story_id) {
            Ok(story) => self.analyze_story(story),
            Err(e) => {
                tracing::warn!(
                    "Skipping story {} ({}): {}",
                    story_id,
                    document.story_location(story_id),
                    e
                );
            }
        }
    }

    fn analyze_image(&mut self, image: &Image) {
        if let Some(style) = non_empty(&image.applied_object_style) {
            self.set.insert(ResourceCategory::ObjectStyles, style);
        }
        if let Some(space) = non_empty(&image.color_space) {
            self.set.insert(ResourceCategory::ColorSpaces, space);
        }
        if let Some(link) = &image.link {
            // Consumers key links by either form, so both are kept
            if !link.id.is_empty() {
                self.set.insert(ResourceCategory::Links, link.id.as_str());
            }
            if !link.uri.is_empty() {
                self.set.insert(ResourceCategory::Links, link.uri.as_str());
            }
        }
    }

    fn mark_color(&mut self, id: &str) {
        let category = if is_swatch_reference(id) {
            ResourceCategory::Swatches
        } else {
            ResourceCategory::Colors
        };
        self.set.insert(category, id);
    }
}
