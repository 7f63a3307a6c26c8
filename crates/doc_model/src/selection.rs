//! Selection - the page items chosen as roots for an export

use crate::{DocModelError, Document, PageItem, PageItemKind, Result};
use serde::{Deserialize, Serialize};

/// An ordered, caller-constructed list of page items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<PageItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from page items looked up in a document.
    ///
    /// Items are found in any spread by identifier.
    pub fn from_ids<S: AsRef<str>>(document: &Document, ids: &[S]) -> Result<Self> {
        let mut selection = Self::new();
        for id in ids {
            let id = id.as_ref();
            let (_, item) = document
                .find_page_item(id)
                .ok_or_else(|| DocModelError::ResourceNotFound {
                    category: "page item",
                    id: id.to_string(),
                })?;
            selection.push(item.clone());
        }
        Ok(selection)
    }

    pub fn with_item(mut self, item: impl Into<PageItem>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn push(&mut self, item: PageItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// Items of one kind, in selection order
    pub fn of_kind(&self, kind: PageItemKind) -> impl Iterator<Item = &PageItem> {
        self.items.iter().filter(move |i| i.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl FromIterator<PageItem> for Selection {
    fn from_iter<I: IntoIterator<Item = PageItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Shape, Spread, TextFrame};

    #[test]
    fn test_from_ids() {
        let mut doc = Document::new();
        doc.insert_spread(
            Spread::new("sp1")
                .with_item(TextFrame::new("tf1"))
                .with_item(PageItem::Oval(Shape::new("ov1"))),
        )
        .unwrap();

        let selection = Selection::from_ids(&doc, &["ov1", "tf1"]).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.items()[0].id(), "ov1");
        assert_eq!(selection.of_kind(PageItemKind::TextFrame).count(), 1);

        assert!(Selection::from_ids(&doc, &["missing"]).is_err());
    }
}
