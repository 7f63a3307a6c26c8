//! Page items - the frames, shapes, and groups placed on spreads

use crate::resource::Link;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields shared by every page item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    /// Identifier, unique within the document
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_object_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_layer: Option<String>,
    /// Geometry and other attributes, carried verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ItemBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            applied_object_style: None,
            item_layer: None,
            attributes: BTreeMap::new(),
        }
    }
}

/// A placed image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_object_style: Option<String>,
    /// Name of the image's color space (e.g. "RGB")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl Image {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            applied_object_style: None,
            color_space: None,
            link: None,
        }
    }

    pub fn with_object_style(mut self, style: impl Into<String>) -> Self {
        self.applied_object_style = Some(style.into());
        self
    }

    pub fn with_color_space(mut self, space: impl Into<String>) -> Self {
        self.color_space = Some(space.into());
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }
}

/// A text frame, showing (part of) a story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    pub base: ItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_story: Option<String>,
}

impl TextFrame {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: ItemBase::new(id),
            parent_story: None,
        }
    }

    pub fn with_story(mut self, story_id: impl Into<String>) -> Self {
        self.parent_story = Some(story_id.into());
        self
    }

    pub fn with_object_style(mut self, style: impl Into<String>) -> Self {
        self.base.applied_object_style = Some(style.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.base.item_layer = Some(layer.into());
        self
    }
}

/// A rectangle, oval, polygon, or graphic line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub base: ItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl Shape {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: ItemBase::new(id),
            stroke_color: None,
            fill_color: None,
            image: None,
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_object_style(mut self, style: impl Into<String>) -> Self {
        self.base.applied_object_style = Some(style.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.base.item_layer = Some(layer.into());
        self
    }
}

/// A group of page items.
///
/// Members are listed for structure only; they remain independent page
/// items and are not implied by selecting the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub base: ItemBase,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: ItemBase::new(id),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, id: impl Into<String>) -> Self {
        self.members.push(id.into());
        self
    }

    pub fn with_object_style(mut self, style: impl Into<String>) -> Self {
        self.base.applied_object_style = Some(style.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.base.item_layer = Some(layer.into());
        self
    }
}

/// Kind of page item, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageItemKind {
    TextFrame,
    Rectangle,
    Oval,
    Polygon,
    GraphicLine,
    Group,
}

impl PageItemKind {
    /// Element name used in packages
    pub fn element_name(&self) -> &'static str {
        match self {
            PageItemKind::TextFrame => "TextFrame",
            PageItemKind::Rectangle => "Rectangle",
            PageItemKind::Oval => "Oval",
            PageItemKind::Polygon => "Polygon",
            PageItemKind::GraphicLine => "GraphicLine",
            PageItemKind::Group => "Group",
        }
    }
}

/// Anything placed on a spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageItem {
    TextFrame(TextFrame),
    Rectangle(Shape),
    Oval(Shape),
    Polygon(Shape),
    GraphicLine(Shape),
    Group(Group),
}

impl PageItem {
    pub fn kind(&self) -> PageItemKind {
        match self {
            PageItem::TextFrame(_) => PageItemKind::TextFrame,
            PageItem::Rectangle(_) => PageItemKind::Rectangle,
            PageItem::Oval(_) => PageItemKind::Oval,
            PageItem::Polygon(_) => PageItemKind::Polygon,
            PageItem::GraphicLine(_) => PageItemKind::GraphicLine,
            PageItem::Group(_) => PageItemKind::Group,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            PageItem::TextFrame(frame) => &frame.base,
            PageItem::Rectangle(shape)
            | PageItem::Oval(shape)
            | PageItem::Polygon(shape)
            | PageItem::GraphicLine(shape) => &shape.base,
            PageItem::Group(group) => &group.base,
        }
    }


    pub fn id(&self) -> &str {
        &self.base().id
    }

    /// The shape payload, for the four shape variants
    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            PageItem::Rectangle(shape)
            | PageItem::Oval(shape)
            | PageItem::Polygon(shape)
            | PageItem::GraphicLine(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_text_frame(&self) -> Option<&TextFrame> {
        match self {
            PageItem::TextFrame(frame) => Some(frame),
            _ => None,
        }
    }

    /// The nested image, if this is a shape holding one
    pub fn image(&self) -> Option<&Image> {
        self.as_shape().and_then(|s| s.image.as_ref())
    }
}

impl From<TextFrame> for PageItem {
    fn from(frame: TextFrame) -> Self {
        PageItem::TextFrame(frame)
    }
}

impl From<Group> for PageItem {
    fn from(group: Group) -> Self {
        PageItem::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_accessors() {
        let item = PageItem::Rectangle(
            Shape::new("u1")
                .with_fill("Color/Red")
                .with_image(Image::new("u2").with_color_space("RGB")),
        );
        assert_eq!(item.kind(), PageItemKind::Rectangle);
        assert_eq!(item.id(), "u1");
        assert_eq!(item.image().and_then(|i| i.color_space.as_deref()), Some("RGB"));
        assert!(item.as_text_frame().is_none());
    }

    #[test]
    fn test_tagged_serialization() {
        let item: PageItem = TextFrame::new("tf1").with_story("s1").into();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""type":"TextFrame""#));

        let back: PageItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_group_members_are_structural() {
        let group = Group::new("g1").with_member("u1").with_member("u2");
        let item = PageItem::from(group);
        assert!(item.as_shape().is_none());
        assert!(item.image().is_none());
    }
}
