//! Package extraction - pruning full resource trees to what a selection needs
//!
//! [`PackageExtractor::extract`] copies the reachable subset of a document's
//! resources, preserving group nesting and declared order.
//! [`PackageExtractor::assemble`] combines that subset with the structural
//! defaults into a [`MinimalDocument`].

use crate::{EngineError, ReferenceSet, Result};
use chrono::Utc;
use doc_model::{
    Color, ColorGroup, CompatibilityPlaceholder, Document, FontFamily, Layer, MinimalDocument,
    NumberingList, PackageKind, Selection, SnippetContainer, Story, StrokeStyle, Style,
    StyleCategory, StyleGroup, StyleListing, Swatch, BLACK_COLOR, NONE_SWATCH,
};
use std::collections::BTreeSet;
use uuid::Uuid;

/// The reachable subset of a document's resources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedResources {
    pub stories: Vec<Story>,
    /// Pruned root group per category; `None` when nothing qualified
    pub paragraph_styles: Option<StyleGroup>,
    pub character_styles: Option<StyleGroup>,
    pub object_styles: Option<StyleGroup>,
    pub colors: Vec<Color>,
    pub swatches: Vec<Swatch>,
    pub fonts: Vec<FontFamily>,
    pub layers: Vec<Layer>,
}

impl ExtractedResources {
    pub fn styles(&self, category: StyleCategory) -> Option<&StyleGroup> {
        match category {
            StyleCategory::Paragraph => self.paragraph_styles.as_ref(),
            StyleCategory::Character => self.character_styles.as_ref(),
            StyleCategory::Object => self.object_styles.as_ref(),
        }
    }
}

/// Extracts resources from a source document
pub struct PackageExtractor<'a> {
    document: &'a Document,
}

impl<'a> PackageExtractor<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Copy every resource named in a saturated reference set.
    ///
    /// Stories are mandatory once referenced: an unresolvable story aborts
    /// the extraction.
    pub fn extract(&self, set: &ReferenceSet) -> Result<ExtractedResources> {
        for id in &set.stories {
            self.document
                .get_story(id)
                .map_err(|source| EngineError::LookupFailure {
                    story: id.clone(),
                    source,
                })?;
        }

        let stories = self
            .document
            .stories()
            .iter()
            .filter(|s| set.stories.contains(&s.id))
            .cloned()
            .collect();

        let listing = self.document.style_listing();
        let prune = |category: StyleCategory| {
            listing.and_then(|l| prune_group(l.root(category), set.styles(category)))
        };

        let extracted = ExtractedResources {
            stories,
            paragraph_styles: prune(StyleCategory::Paragraph),
            character_styles: prune(StyleCategory::Character),
            object_styles: prune(StyleCategory::Object),
            colors: filter_by_id(self.document.colors(), &set.colors, |c| &c.id),
            swatches: filter_by_id(self.document.swatches(), &set.swatches, |s| &s.id),
            fonts: self
                .document
                .fonts()
                .iter()
                .filter(|f| set.fonts.iter().any(|r| f.matches(r)))
                .cloned()
                .collect(),
            layers: filter_by_id(self.document.layers(), &set.layers, |l| &l.id),
        };

        tracing::debug!(
            "Extracted {} stories, {} colors, {} swatches, {} fonts, {} layers",
            extracted.stories.len(),
            extracted.colors.len(),
            extracted.swatches.len(),
            extracted.fonts.len(),
            extracted.layers.len()
        );

        Ok(extracted)
    }

    /// Build a minimal package from a selection and its extracted resources.
    ///
    /// The structural defaults are present regardless of what was extracted.
    pub fn assemble(selection: &Selection, extracted: ExtractedResources) -> MinimalDocument {
        let colors = merge_after_defaults(vec![Color::black()], extracted.colors, |c| &c.id);
        let swatches = merge_after_defaults(vec![Swatch::none()], extracted.swatches, |s| &s.id);
        let layers = merge_after_defaults(vec![Layer::default_layer()], extracted.layers, |l| &l.id);

        let mut styles = StyleListing::new();
        for (category, group) in [
            (StyleCategory::Paragraph, extracted.paragraph_styles),
            (StyleCategory::Character, extracted.character_styles),
            (StyleCategory::Object, extracted.object_styles),
        ] {
            *styles.root_mut(category) = group.unwrap_or_else(|| default_root_group(category));
        }

        MinimalDocument {
            kind: PackageKind::Snippet,
            created: Utc::now(),
            colors,
            swatches,
            stroke_styles: vec![StrokeStyle::solid()],
            color_groups: vec![ColorGroup::root(vec![
                BLACK_COLOR.to_string(),
                NONE_SWATCH.to_string(),
            ])],
            layers,
            fonts: extracted.fonts,
            numbering_lists: vec![NumberingList::default_list()],
            placeholders: vec![
                CompatibilityPlaceholder::new("TinDocumentDataObject", "TinDocumentDataObject"),
                CompatibilityPlaceholder::new(
                    "TransparencyDefaultContainerObject",
                    "TransparencyDefaultContainerObject",
                ),
            ],
            styles,
            container: SnippetContainer {
                id: format!("u{}", Uuid::new_v4().simple()),
                items: selection.items().to_vec(),
            },
            stories: extracted.stories,
        }
    }
}

/// Copy a group keeping only qualifying styles and non-empty subgroups.
///
/// Returns `None` when neither the group nor any descendant qualifies.
fn prune_group(group: &StyleGroup, keep: &BTreeSet<String>) -> Option<StyleGroup> {
    let styles: Vec<Style> = group
        .styles
        .iter()
        .filter(|s| keep.contains(s.id.as_str()))
        .cloned()
        .collect();
    let groups: Vec<StyleGroup> = group
        .groups
        .iter()
        .filter_map(|g| prune_group(g, keep))
        .collect();

    if styles.is_empty() && groups.is_empty() {
        return None;
    }

    Some(StyleGroup {
        id: group.id.clone(),
        name: group.name.clone(),
        styles,
        groups,
    })
}

fn filter_by_id<T: Clone>(items: &[T], keep: &BTreeSet<String>, id: impl Fn(&T) -> &String) -> Vec<T> {
    items
        .iter()
        .filter(|item| keep.contains(id(*item)))
        .cloned()
        .collect()
}

fn merge_after_defaults<T>(mut defaults: Vec<T>, extracted: Vec<T>, id: impl Fn(&T) -> &String) -> Vec<T> {
    for item in extracted {
        if !defaults.iter().any(|d| id(d) == id(&item)) {
            defaults.push(item);
        }
    }
    defaults
}

/// Root group holding only the category's built-in default style
fn default_root_group(category: StyleCategory) -> StyleGroup {
    let id = category.default_style_id();
    let name = id.split_once('/').map(|(_, name)| name).unwrap_or(id);
    StyleGroup::root(category).with_style(Style::new(category, id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceCategory;
    use doc_model::{ParagraphRange, TextFrame};

    fn source_document() -> Document {
        let mut doc = Document::new();
        let listing = doc.ensure_style_listing();
        listing.insert(Style::paragraph("ParagraphStyle/Body", "Body"));
        listing.paragraph.groups.push(
            StyleGroup::new("ParagraphStyleGroup/Headings", "Headings")
                .with_style(Style::paragraph("ParagraphStyle/H1", "H1"))
                .with_style(Style::paragraph("ParagraphStyle/H2", "H2"))
                .with_group(
                    StyleGroup::new("ParagraphStyleGroup/Headings/Minor", "Minor")
                        .with_style(Style::paragraph("ParagraphStyle/H3", "H3")),
                )
                .with_group(StyleGroup::new("ParagraphStyleGroup/Headings/Unused", "Unused")),
        );
        doc.insert_color(Color::cmyk("Color/Red", "Red", 0.0, 100.0, 100.0, 0.0)).unwrap();
        doc.insert_color(Color::cmyk("Color/Blue", "Blue", 100.0, 100.0, 0.0, 0.0)).unwrap();
        doc.insert_story(
            Story::new("s1").with_paragraph(ParagraphRange::new("ParagraphStyle/H3")),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_prune_keeps_only_qualifying_groups() {
        let doc = source_document();
        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Paragraph, "ParagraphStyle/H3");

        let extracted = PackageExtractor::new(&doc).extract(&set).unwrap();
        let root = extracted.paragraph_styles.unwrap();

        assert!(root.styles.is_empty());
        assert_eq!(root.groups.len(), 1);
        let headings = &root.groups[0];
        assert!(headings.styles.is_empty());
        assert_eq!(headings.groups.len(), 1);
        assert_eq!(headings.groups[0].styles[0].id.as_str(), "ParagraphStyle/H3");
    }

    #[test]
    fn test_prune_preserves_declared_order() {
        let doc = source_document();
        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Paragraph, "ParagraphStyle/H2");
        set.insert_style(StyleCategory::Paragraph, "ParagraphStyle/H1");

        let extracted = PackageExtractor::new(&doc).extract(&set).unwrap();
        let ids: Vec<_> = extracted
            .paragraph_styles
            .unwrap()
            .all_styles()
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["ParagraphStyle/H1", "ParagraphStyle/H2"]);
    }

    #[test]
    fn test_unreferenced_category_is_none() {
        let doc = source_document();
        let extracted = PackageExtractor::new(&doc).extract(&ReferenceSet::new()).unwrap();
        assert!(extracted.paragraph_styles.is_none());
        assert!(extracted.character_styles.is_none());
    }

    #[test]
    fn test_unresolved_story_is_fatal() {
        let doc = source_document();
        let mut set = ReferenceSet::new();
        set.insert(ResourceCategory::Stories, "missing");

        let err = PackageExtractor::new(&doc).extract(&set).unwrap_err();
        assert!(matches!(err, EngineError::LookupFailure { ref story, .. } if story == "missing"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_flat_color_filter() {
        let doc = source_document();
        let mut set = ReferenceSet::new();
        set.insert(ResourceCategory::Colors, "Color/Blue");

        let extracted = PackageExtractor::new(&doc).extract(&set).unwrap();
        assert_eq!(extracted.colors.len(), 1);
        assert_eq!(extracted.colors[0].id, "Color/Blue");
    }

    #[test]
    fn test_assemble_baseline_with_no_dependencies() {
        let selection = Selection::new().with_item(TextFrame::new("tf1"));
        let snippet = PackageExtractor::assemble(&selection, ExtractedResources::default());

        assert!(snippet.is_snippet());
        assert_eq!(snippet.colors.len(), 1);
        assert_eq!(snippet.colors[0].id, BLACK_COLOR);
        assert_eq!(snippet.swatches.len(), 1);
        assert_eq!(snippet.swatches[0].id, NONE_SWATCH);
        assert_eq!(snippet.stroke_styles.len(), 1);
        assert_eq!(snippet.layers.len(), 1);
        assert_eq!(snippet.numbering_lists.len(), 1);
        assert_eq!(snippet.placeholders.len(), 2);
        assert_eq!(snippet.color_groups[0].swatch_refs, vec![BLACK_COLOR, NONE_SWATCH]);
        for category in StyleCategory::ALL {
            let root = snippet.styles.root(category);
            assert_eq!(root.style_count(), 1);
            assert!(root.styles[0].is_built_in());
        }
        assert_eq!(snippet.container.items.len(), 1);
    }

    #[test]
    fn test_assemble_does_not_duplicate_defaults() {
        let extracted = ExtractedResources {
            colors: vec![Color::black(), Color::new("Color/Red", "Red")],
            swatches: vec![Swatch::none()],
            ..Default::default()
        };
        let snippet = PackageExtractor::assemble(&Selection::new(), extracted);

        let ids: Vec<_> = snippet.colors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![BLACK_COLOR, "Color/Red"]);
        assert_eq!(snippet.swatches.len(), 1);
    }

    #[test]
    fn test_container_ids_are_unique() {
        let a = PackageExtractor::assemble(&Selection::new(), ExtractedResources::default());
        let b = PackageExtractor::assemble(&Selection::new(), ExtractedResources::default());
        assert_ne!(a.container.id, b.container.id);
    }
}
