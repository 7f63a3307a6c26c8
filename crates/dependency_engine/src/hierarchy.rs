//! Style hierarchy resolution - saturating a reference set with ancestor styles
//!
//! Each style category is flattened into an arena: identifiers are interned
//! to indices and `based_on` links become parent indices. Walks keep a
//! visited-index set so malformed, cyclic hierarchies always terminate.

use crate::ReferenceSet;
use doc_model::{StyleCategory, StyleGroup, StyleListing};
use std::collections::{HashMap, HashSet};

/// Parent links of one style category, indexed by interned identifier
#[derive(Debug, Default)]
struct StyleArena {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    /// `None` for styles with no parent or a built-in parent
    parents: Vec<Option<usize>>,
}

impl StyleArena {
    fn build(root: &StyleGroup) -> Self {
        let mut arena = Self::default();
        for style in root.all_styles() {
            let child = arena.intern(style.id.as_str());
            if let Some(parent) = style.parent() {
                if !parent.is_built_in() {
                    let parent = arena.intern(parent.as_str());
                    arena.parents[child] = Some(parent);
                }
            }
        }
        arena
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&index) = self.index.get(id) {
            return index;
        }
        let index = self.ids.len();
        self.ids.push(id.to_string());
        self.parents.push(None);
        self.index.insert(id.to_string(), index);
        index
    }

    /// Every ancestor of `id`, nearest first, up to a terminal
    fn ancestors(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let Some(&start) = self.index.get(id) else {
            return out;
        };

        let mut visited = HashSet::new();
        let mut current = start;
        while visited.insert(current) {
            match self.parents[current] {
                Some(parent) => {
                    out.push(self.ids[parent].as_str());
                    current = parent;
                }
                None => break,
            }
        }
        out
    }
}

/// Resolves `based_on` chains for all three style categories
#[derive(Debug)]
pub struct StyleHierarchyResolver {
    paragraph: StyleArena,
    character: StyleArena,
    object: StyleArena,
}

impl StyleHierarchyResolver {
    /// Build parent maps from a full style listing
    pub fn new(listing: &StyleListing) -> Self {
        Self {
            paragraph: StyleArena::build(&listing.paragraph),
            character: StyleArena::build(&listing.character),
            object: StyleArena::build(&listing.object),
        }
    }

    fn arena(&self, category: StyleCategory) -> &StyleArena {
        match category {
            StyleCategory::Paragraph => &self.paragraph,
            StyleCategory::Character => &self.character,
            StyleCategory::Object => &self.object,
        }
    }

    /// Ancestors of a style, nearest first; built-in sentinels are excluded
    pub fn ancestors(&self, category: StyleCategory, id: &str) -> Vec<String> {
        self.arena(category)
            .ancestors(id)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Add the ancestors of every style already in `set`.
    ///
    /// The work list is a snapshot taken per category; ancestors found on
    /// the way are added but not queued, since each ascent already runs to
    /// a terminal.
    pub fn resolve(&self, set: &mut ReferenceSet) {
        for category in StyleCategory::ALL {
            let arena = self.arena(category);
            let work_list: Vec<String> = set.styles(category).iter().cloned().collect();
            for id in &work_list {
                for ancestor in arena.ancestors(id) {
                    set.insert_style(category, ancestor);
                }
            }
        }
    }
}

/// Saturate `set` with ancestor styles; a no-op when there is no style listing
pub fn resolve_style_hierarchy(set: &mut ReferenceSet, listing: Option<&StyleListing>) {
    match listing {
        Some(listing) => StyleHierarchyResolver::new(listing).resolve(set),
        None => tracing::debug!("No style listing; skipping hierarchy resolution"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Style;

    fn chain_listing() -> StyleListing {
        let mut listing = StyleListing::new();
        listing.insert(Style::paragraph("A", "A").with_based_on("B"));
        listing.insert(Style::paragraph("B", "B").with_based_on("C"));
        listing.insert(
            Style::paragraph("C", "C").with_based_on("ParagraphStyle/$ID/[No paragraph style]"),
        );
        listing
    }

    fn paragraph_ids(set: &ReferenceSet) -> Vec<&str> {
        set.paragraph_styles.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_chain_resolution_excludes_built_in() {
        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Paragraph, "A");

        resolve_style_hierarchy(&mut set, Some(&chain_listing()));

        assert_eq!(paragraph_ids(&set), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut listing = StyleListing::new();
        listing.insert(Style::paragraph("A", "A").with_based_on("B"));
        listing.insert(Style::paragraph("B", "B").with_based_on("A"));

        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Paragraph, "A");
        resolve_style_hierarchy(&mut set, Some(&listing));

        assert_eq!(paragraph_ids(&set), vec!["A", "B"]);
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut listing = StyleListing::new();
        listing.insert(Style::object("Loop", "Loop").with_based_on("Loop"));

        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Object, "Loop");
        resolve_style_hierarchy(&mut set, Some(&listing));

        assert_eq!(set.object_styles.len(), 1);
    }

    #[test]
    fn test_categories_resolve_independently() {
        let mut listing = chain_listing();
        listing.insert(Style::character("A", "A").with_based_on("X"));

        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Character, "A");
        resolve_style_hierarchy(&mut set, Some(&listing));

        assert!(set.paragraph_styles.is_empty());
        let chars: Vec<_> = set.character_styles.iter().map(String::as_str).collect();
        assert_eq!(chars, vec!["A", "X"]);
    }

    #[test]
    fn test_missing_listing_is_noop() {
        let mut set = ReferenceSet::new();
        set.insert_style(StyleCategory::Paragraph, "A");
        let before = set.clone();

        resolve_style_hierarchy(&mut set, None);

        assert_eq!(set, before);
    }

    #[test]
    fn test_styles_in_nested_groups() {
        let mut listing = StyleListing::new();
        listing.paragraph.groups.push(
            StyleGroup::new("ParagraphStyleGroup/G", "G")
                .with_style(Style::paragraph("Child", "Child").with_based_on("Parent")),
        );
        listing.insert(Style::paragraph("Parent", "Parent"));

        let resolver = StyleHierarchyResolver::new(&listing);
        assert_eq!(
            resolver.ancestors(StyleCategory::Paragraph, "Child"),
            vec!["Parent".to_string()]
        );
        assert!(resolver.ancestors(StyleCategory::Paragraph, "Unknown").is_empty());
    }
}
