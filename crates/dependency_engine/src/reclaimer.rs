//! Orphan reclamation - deleting resources that a removal leaves unreachable
//!
//! Orphans are found by recomputing reachability from everything that
//! remains, not by reference counting, so a resource reached through any
//! other path is never deleted.

use crate::{
    resolve_style_hierarchy, EngineError, ReachabilityWalker, ReferenceSet, ResourceCategory,
    Result,
};
use doc_model::{is_reserved, Document, StyleCategory};
use serde::{Deserialize, Serialize};

/// The content node to remove
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalTarget {
    Story(String),
    PageItem { spread_id: String, item_id: String },
}

impl RemovalTarget {
    pub fn story(id: impl Into<String>) -> Self {
        RemovalTarget::Story(id.into())
    }

    pub fn page_item(spread_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        RemovalTarget::PageItem {
            spread_id: spread_id.into(),
            item_id: item_id.into(),
        }
    }
}

impl std::fmt::Display for RemovalTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalTarget::Story(id) => write!(f, "story {}", id),
            RemovalTarget::PageItem { spread_id, item_id } => {
                write!(f, "page item {} in spread {}", item_id, spread_id)
            }
        }
    }
}

/// Resources deleted by a cleanup, partitioned by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    pub stories: Vec<String>,
    pub paragraph_styles: Vec<String>,
    pub character_styles: Vec<String>,
    pub object_styles: Vec<String>,
    pub colors: Vec<String>,
    pub swatches: Vec<String>,
    pub fonts: Vec<String>,
    pub layers: Vec<String>,
    pub links: Vec<String>,
}

impl RemovalReport {
    /// Identifiers reclaimed in one category
    pub fn reclaimed(&self, category: ResourceCategory) -> &[String] {
        match category {
            ResourceCategory::Stories => &self.stories,
            ResourceCategory::ParagraphStyles => &self.paragraph_styles,
            ResourceCategory::CharacterStyles => &self.character_styles,
            ResourceCategory::ObjectStyles => &self.object_styles,
            ResourceCategory::Colors => &self.colors,
            ResourceCategory::Swatches => &self.swatches,
            ResourceCategory::Fonts => &self.fonts,
            ResourceCategory::Layers => &self.layers,
            ResourceCategory::Links => &self.links,
            ResourceCategory::ColorSpaces => &[],
        }
    }

    fn record(&mut self, category: ResourceCategory, id: String) {
        let bucket = match category {
            ResourceCategory::Stories => &mut self.stories,
            ResourceCategory::ParagraphStyles => &mut self.paragraph_styles,
            ResourceCategory::CharacterStyles => &mut self.character_styles,
            ResourceCategory::ObjectStyles => &mut self.object_styles,
            ResourceCategory::Colors => &mut self.colors,
            ResourceCategory::Swatches => &mut self.swatches,
            ResourceCategory::Fonts => &mut self.fonts,
            ResourceCategory::Layers => &mut self.layers,
            ResourceCategory::Links => &mut self.links,
            ResourceCategory::ColorSpaces => return,
        };
        bucket.push(id);
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of reclaimed resources across all categories
    pub fn total(&self) -> usize {
        ResourceCategory::ALL
            .iter()
            .map(|&c| self.reclaimed(c).len())
            .sum()
    }
}

/// The saturated reference set of a single content node, computed in isolation
pub fn footprint(document: &Document, target: &RemovalTarget) -> Result<ReferenceSet> {
    let mut walker = ReachabilityWalker::new(document);
    match target {
        RemovalTarget::Story(id) => {
            let story = document
                .get_story(id)
                .map_err(|_| EngineError::NotFound(target.to_string()))?;
            walker.analyze_story(story);
        }
        RemovalTarget::PageItem { spread_id, item_id } => {
            let item = document
                .page_item(spread_id, item_id)
                .map_err(|_| EngineError::NotFound(target.to_string()))?;
            walker.analyze(item);
        }
    }

    let mut set = walker.into_set();
    if let RemovalTarget::Story(id) = target {
        set.insert(ResourceCategory::Stories, id.as_str());
    }
    resolve_style_hierarchy(&mut set, document.style_listing());
    Ok(set)
}

/// Removes content nodes and the resources only they used
pub struct OrphanReclaimer<'a> {
    document: &'a mut Document,
}

impl<'a> OrphanReclaimer<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self { document }
    }

    /// Remove `target`, optionally reclaiming resources it alone used.
    ///
    /// A missing target fails before anything changes. Once the target is
    /// gone, cleanup failures do not restore it.
    pub fn remove_with_cleanup(
        &mut self,
        target: &RemovalTarget,
        cleanup: bool,
    ) -> Result<RemovalReport> {
        let private = if cleanup {
            Some(footprint(self.document, target)?)
        } else {
            self.ensure_exists(target)?;
            None
        };

        self.remove_target(target)?;

        let Some(private) = private else {
            return Ok(RemovalReport::default());
        };

        let remaining = reachable_after_removal(self.document, &private);
        let orphans = private.difference(&remaining);

        let mut report = RemovalReport::default();
        for category in ResourceCategory::ALL {
            for id in orphans.category(category) {
                if is_reserved(id) {
                    continue;
                }
                if self.delete(category, id, &remaining) {
                    report.record(category, id.clone());
                }
            }
        }

        tracing::info!("Removed {}; reclaimed {} resources", target, report.total());
        Ok(report)
    }

    fn ensure_exists(&self, target: &RemovalTarget) -> Result<()> {
        let found = match target {
            RemovalTarget::Story(id) => self.document.contains_story(id),
            RemovalTarget::PageItem { spread_id, item_id } => {
                self.document.page_item(spread_id, item_id).is_ok()
            }
        };
        if found {
            Ok(())
        } else {
            Err(EngineError::NotFound(target.to_string()))
        }
    }

    fn remove_target(&mut self, target: &RemovalTarget) -> Result<()> {
        let removed = match target {
            RemovalTarget::Story(id) => self.document.remove_story(id).map(|_| ()),
            RemovalTarget::PageItem { spread_id, item_id } => self
                .document
                .spread_mut(spread_id)
                .and_then(|spread| spread.remove(item_id))
                .map(|_| ()),
        };
        removed.map_err(|_| EngineError::NotFound(target.to_string()))
    }

    /// Delete one orphaned resource; returns whether anything was deleted
    fn delete(&mut self, category: ResourceCategory, id: &str, remaining: &ReferenceSet) -> bool {
        let document = &mut *self.document;
        match category {
            ResourceCategory::Stories => document.remove_story(id).is_ok(),
            ResourceCategory::ParagraphStyles => remove_style(document, StyleCategory::Paragraph, id),
            ResourceCategory::CharacterStyles => remove_style(document, StyleCategory::Character, id),
            ResourceCategory::ObjectStyles => remove_style(document, StyleCategory::Object, id),
            ResourceCategory::Colors => document.remove_color(id).is_some(),
            ResourceCategory::Swatches => document.remove_swatch(id).is_some(),
            ResourceCategory::Fonts => document.remove_font(id).is_some(),
            ResourceCategory::Layers => document.remove_layer(id).is_some(),
            ResourceCategory::Links => {
                // A link stays while either of its keys is still reachable
                let doomed: Vec<String> = document
                    .links()
                    .iter()
                    .filter(|l| l.matches(id))
                    .filter(|l| {
                        !remaining.contains(ResourceCategory::Links, &l.id)
                            && !remaining.contains(ResourceCategory::Links, &l.uri)
                    })
                    .map(|l| l.id.clone())
                    .collect();
                for link_id in &doomed {
                    document.remove_links(link_id);
                }
                !doomed.is_empty()
            }
            ResourceCategory::ColorSpaces => false,
        }
    }
}

fn remove_style(document: &mut Document, category: StyleCategory, id: &str) -> bool {
    document
        .style_listing_mut()
        .and_then(|listing| listing.remove(category, id))
        .is_some()
}

/// Reachability from all remaining page items, plus the contents of every
/// remaining story that is not itself about to be reclaimed.
fn reachable_after_removal(document: &Document, footprint: &ReferenceSet) -> ReferenceSet {
    let mut walker = ReachabilityWalker::new(document);
    walker.analyze_items(document.page_items());

    for story in document.stories() {
        let orphaned = footprint.contains(ResourceCategory::Stories, &story.id)
            && !walker.set().contains(ResourceCategory::Stories, &story.id);
        if !orphaned {
            walker.analyze_story(story);
        }
    }

    let mut set = walker.into_set();
    resolve_style_hierarchy(&mut set, document.style_listing());
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{ParagraphRange, Shape, Spread, Story, Style, TextFrame, PageItem};

    fn document() -> Document {
        let mut doc = Document::new();
        let listing = doc.ensure_style_listing();
        listing.insert(Style::paragraph("ParagraphStyle/Only", "Only").with_based_on("ParagraphStyle/Base"));
        listing.insert(Style::paragraph("ParagraphStyle/Base", "Base"));
        doc.insert_story(
            Story::new("s1").with_paragraph(ParagraphRange::new("ParagraphStyle/Only")),
        )
        .unwrap();
        doc.insert_spread(
            Spread::new("sp1")
                .with_item(TextFrame::new("t1").with_story("s1"))
                .with_item(PageItem::Rectangle(Shape::new("r1"))),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_footprint_of_story() {
        let doc = document();
        let set = footprint(&doc, &RemovalTarget::story("s1")).unwrap();
        assert!(set.contains(ResourceCategory::Stories, "s1"));
        assert!(set.contains(ResourceCategory::ParagraphStyles, "ParagraphStyle/Only"));
        assert!(set.contains(ResourceCategory::ParagraphStyles, "ParagraphStyle/Base"));
    }

    #[test]
    fn test_remove_without_cleanup() {
        let mut doc = document();
        let report = OrphanReclaimer::new(&mut doc)
            .remove_with_cleanup(&RemovalTarget::page_item("sp1", "t1"), false)
            .unwrap();

        assert!(report.is_empty());
        assert!(doc.contains_story("s1"));
        assert!(doc.page_item("sp1", "t1").is_err());
    }

    #[test]
    fn test_remove_missing_target_changes_nothing() {
        let mut doc = document();
        let before = doc.clone();

        for cleanup in [true, false] {
            let err = OrphanReclaimer::new(&mut doc)
                .remove_with_cleanup(&RemovalTarget::page_item("sp1", "nope"), cleanup)
                .unwrap_err();
            assert!(matches!(err, EngineError::NotFound(_)));
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_story_reclaims_its_styles() {
        let mut doc = document();
        let report = OrphanReclaimer::new(&mut doc)
            .remove_with_cleanup(&RemovalTarget::story("s1"), true)
            .unwrap();

        assert_eq!(report.paragraph_styles.len(), 2);
        assert!(report.stories.is_empty());
        assert!(doc.style_listing().unwrap().paragraph.is_empty());
    }

    #[test]
    fn test_report_total() {
        let mut report = RemovalReport::default();
        report.record(ResourceCategory::Fonts, "Minion Pro".to_string());
        report.record(ResourceCategory::ColorSpaces, "RGB".to_string());
        assert_eq!(report.total(), 1);
        assert_eq!(report.reclaimed(ResourceCategory::Fonts), ["Minion Pro".to_string()]);
    }
}
