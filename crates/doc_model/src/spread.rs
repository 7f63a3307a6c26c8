//! Spreads - containers of page items

use crate::{DocModelError, PageItem, Result};
use serde::{Deserialize, Serialize};

/// A spread and the page items placed on it, in stacking order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub id: String,
    #[serde(default)]
    pub items: Vec<PageItem>,
}

impl Spread {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: impl Into<PageItem>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn get(&self, item_id: &str) -> Option<&PageItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.get(item_id).is_some()
    }

    /// Append an item; identifiers must be unique within the spread
    pub fn insert(&mut self, item: PageItem) -> Result<()> {
        if self.contains(item.id()) {
            return Err(DocModelError::DuplicateId(item.id().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by identifier
    pub fn remove(&mut self, item_id: &str) -> Result<PageItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == item_id)
            .ok_or_else(|| self.not_found(item_id))?;
        Ok(self.items.remove(index))
    }

    /// Replace an item in place, keeping its stacking position
    pub fn replace(&mut self, item: PageItem) -> Result<PageItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == item.id())
            .ok_or_else(|| self.not_found(item.id()))?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    fn not_found(&self, item_id: &str) -> DocModelError {
        DocModelError::PageItemNotFound {
            spread_id: self.id.clone(),
            item_id: item_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Shape, TextFrame};

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut spread = Spread::new("sp1").with_item(TextFrame::new("tf1"));
        let err = spread.insert(TextFrame::new("tf1").into()).unwrap_err();
        assert!(matches!(err, DocModelError::DuplicateId(id) if id == "tf1"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut spread = Spread::new("sp1")
            .with_item(PageItem::Rectangle(Shape::new("r1")))
            .with_item(TextFrame::new("tf1"));
        spread
            .replace(PageItem::Rectangle(Shape::new("r1").with_fill("Color/Red")))
            .unwrap();
        assert_eq!(spread.items[0].as_shape().unwrap().fill_color.as_deref(), Some("Color/Red"));
        assert_eq!(spread.items[1].id(), "tf1");
    }

    #[test]
    fn test_remove_missing_item() {
        let mut spread = Spread::new("sp1");
        assert!(matches!(
            spread.remove("nope"),
            Err(DocModelError::PageItemNotFound { .. })
        ));
    }
}
