//! Reference sets - category-partitioned collections of referenced identifiers

use doc_model::StyleCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The resource categories a page item can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceCategory {
    Stories,
    ParagraphStyles,
    CharacterStyles,
    ObjectStyles,
    Colors,
    Swatches,
    Fonts,
    Layers,
    Links,
    ColorSpaces,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 10] = [
        ResourceCategory::Stories,
        ResourceCategory::ParagraphStyles,
        ResourceCategory::CharacterStyles,
        ResourceCategory::ObjectStyles,
        ResourceCategory::Colors,
        ResourceCategory::Swatches,
        ResourceCategory::Fonts,
        ResourceCategory::Layers,
        ResourceCategory::Links,
        ResourceCategory::ColorSpaces,
    ];

    /// The reference-set category holding styles of a style category
    pub fn for_styles(category: StyleCategory) -> Self {
        match category {
            StyleCategory::Paragraph => ResourceCategory::ParagraphStyles,
            StyleCategory::Character => ResourceCategory::CharacterStyles,
            StyleCategory::Object => ResourceCategory::ObjectStyles,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceCategory::Stories => "stories",
            ResourceCategory::ParagraphStyles => "paragraph styles",
            ResourceCategory::CharacterStyles => "character styles",
            ResourceCategory::ObjectStyles => "object styles",
            ResourceCategory::Colors => "colors",
            ResourceCategory::Swatches => "swatches",
            ResourceCategory::Fonts => "fonts",
            ResourceCategory::Layers => "layers",
            ResourceCategory::Links => "links",
            ResourceCategory::ColorSpaces => "color spaces",
        }
    }
}

/// Ten independent identifier sets, one per [`ResourceCategory`].
///
/// Insertion is idempotent and iteration is ordered by identifier, so two
/// sets built from the same references in any order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    pub stories: BTreeSet<String>,
    pub paragraph_styles: BTreeSet<String>,
    pub character_styles: BTreeSet<String>,
    pub object_styles: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub swatches: BTreeSet<String>,
    pub fonts: BTreeSet<String>,
    pub layers: BTreeSet<String>,
    pub links: BTreeSet<String>,
    pub color_spaces: BTreeSet<String>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: ResourceCategory) -> &BTreeSet<String> {
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
            ResourceCategory::ColorSpaces => &self.color_spaces,
        }
    }

    fn category_mut(&mut self, category: ResourceCategory) -> &mut BTreeSet<String> {
        match category {
            ResourceCategory::Stories => &mut self.stories,
            ResourceCategory::ParagraphStyles => &mut self.paragraph_styles,
            ResourceCategory::CharacterStyles => &mut self.character_styles,
            ResourceCategory::ObjectStyles => &mut self.object_styles,
            ResourceCategory::Colors => &mut self.colors,
            ResourceCategory::Swatches => &mut self.swatches,
            ResourceCategory::Fonts => &mut self.fonts,
            ResourceCategory::Layers => &mut self.layers,
            ResourceCategory::Links => &mut self.links,
            ResourceCategory::ColorSpaces => &mut self.color_spaces,
        }
    }

    /// Styles of one style category
    pub fn styles(&self, category: StyleCategory) -> &BTreeSet<String> {
        self.category(ResourceCategory::for_styles(category))
    }

    /// Insert an identifier; returns false if it was already present
    pub fn insert(&mut self, category: ResourceCategory, id: impl Into<String>) -> bool {
        self.category_mut(category).insert(id.into())
    }

    /// Insert a style identifier into its style category
    pub fn insert_style(&mut self, category: StyleCategory, id: impl Into<String>) -> bool {
        self.insert(ResourceCategory::for_styles(category), id)
    }

    pub fn contains(&self, category: ResourceCategory, id: &str) -> bool {
        self.category(category).contains(id)
    }

    /// Add every identifier of `other`
    pub fn extend(&mut self, other: &ReferenceSet) {
        for category in ResourceCategory::ALL {
            self.category_mut(category)
                .extend(other.category(category).iter().cloned());
        }
    }

    /// Identifiers present here but absent from `other`, per category
    pub fn difference(&self, other: &ReferenceSet) -> ReferenceSet {
        let mut result = ReferenceSet::new();
        for category in ResourceCategory::ALL {
            let remaining = self
                .category(category)
                .difference(other.category(category))
                .cloned();
            result.category_mut(category).extend(remaining);
        }
        result
    }

    /// True when every identifier here is also in `other`
    pub fn is_subset(&self, other: &ReferenceSet) -> bool {
        ResourceCategory::ALL
            .iter()
            .all(|&c| self.category(c).is_subset(other.category(c)))
    }

    pub fn is_empty(&self) -> bool {
        ResourceCategory::ALL
            .iter()
            .all(|&c| self.category(c).is_empty())
    }

    /// Total number of identifiers across all categories
    pub fn len(&self) -> usize {
        ResourceCategory::ALL
            .iter()
            .map(|&c| self.category(c).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = ReferenceSet::new();
        assert!(set.insert(ResourceCategory::Colors, "Color/Red"));
        assert!(!set.insert(ResourceCategory::Colors, "Color/Red"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut set = ReferenceSet::new();
        set.insert(ResourceCategory::Links, "Link/u1");
        assert!(set.contains(ResourceCategory::Links, "Link/u1"));
        assert!(!set.contains(ResourceCategory::Stories, "Link/u1"));
    }

    #[test]
    fn test_order_independent_equality() {
        let mut a = ReferenceSet::new();
        a.insert_style(StyleCategory::Paragraph, "P1");
        a.insert_style(StyleCategory::Paragraph, "P2");

        let mut b = ReferenceSet::new();
        b.insert_style(StyleCategory::Paragraph, "P2");
        b.insert_style(StyleCategory::Paragraph, "P1");

        assert_eq!(a, b);
    }

    #[test]
    fn test_difference_and_subset() {
        let mut before = ReferenceSet::new();
        before.insert(ResourceCategory::Stories, "s1");
        before.insert(ResourceCategory::Colors, "Color/Red");

        let mut after = ReferenceSet::new();
        after.insert(ResourceCategory::Colors, "Color/Red");

        let orphans = before.difference(&after);
        assert_eq!(orphans.len(), 1);
        assert!(orphans.contains(ResourceCategory::Stories, "s1"));
        assert!(after.is_subset(&before));
        assert!(!before.is_subset(&after));
    }
}
