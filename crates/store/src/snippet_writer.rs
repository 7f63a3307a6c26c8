//! Snippet writer
//!
//! Serializes a [`MinimalDocument`] as a single XML file. The `aid`
//! processing instruction carries the package type tag, which marks the
//! file as partial content rather than a full document.

use crate::Result;
use doc_model::{
    Color, Image, MinimalDocument, PageItem, Story, Style, StyleCategory, StyleGroup,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snippet output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetOptions {
    /// Spaces per nesting level; 0 writes everything on one line
    pub indent: usize,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl SnippetOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

type XmlWriter = Writer<Vec<u8>>;

/// Writer for snippet XML
pub struct SnippetWriter {
    options: SnippetOptions,
}

impl SnippetWriter {
    pub fn new(options: SnippetOptions) -> Self {
        Self { options }
    }

    /// Generate the snippet XML
    pub fn write(&self, snippet: &MinimalDocument) -> Result<String> {
        let mut w = if self.options.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.options.indent)
        } else {
            Writer::new(Vec::new())
        };

        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        w.write_event(Event::PI(BytesPI::new(format!(
            r#"aid style="50" type="{}" readerVersion="6.0" featureSet="257""#,
            snippet.kind.as_str()
        ))))?;

        let created = snippet.created.to_rfc3339();
        start(&mut w, "Document", &[("DOMVersion", "8.0"), ("Self", "d"), ("Created", created.as_str())])?;

        for color in &snippet.colors {
            write_color(&mut w, color)?;
        }
        for swatch in &snippet.swatches {
            empty(&mut w, "Swatch", &[("Self", swatch.id.as_str()), ("Name", swatch.name.as_str())])?;
        }
        for stroke in &snippet.stroke_styles {
            empty(&mut w, "StrokeStyle", &[("Self", stroke.id.as_str()), ("Name", stroke.name.as_str())])?;
        }
        for group in &snippet.color_groups {
            start(&mut w, "ColorGroup", &[("Self", group.id.as_str()), ("Name", group.name.as_str()), ("IsRootColorGroup", "true")])?;
            for swatch_ref in &group.swatch_refs {
                empty(&mut w, "ColorGroupSwatch", &[("SwatchItemRef", swatch_ref.as_str())])?;
            }
            end(&mut w, "ColorGroup")?;
        }
        for family in &snippet.fonts {
            start(&mut w, "FontFamily", &[("Self", family.id.as_str()), ("Name", family.name.as_str())])?;
            for font in &family.fonts {
                empty(
                    &mut w,
                    "Font",
                    &[
                        ("Self", font.id.as_str()),
                        ("FontFamily", family.name.as_str()),
                        ("FontStyleName", font.font_style_name.as_str()),
                        ("PostScriptName", font.post_script_name.as_str()),
                    ],
                )?;
            }
            end(&mut w, "FontFamily")?;
        }

        for category in [StyleCategory::Character, StyleCategory::Paragraph, StyleCategory::Object] {
            write_style_group(&mut w, category, snippet.styles.root(category), true)?;
        }

        for list in &snippet.numbering_lists {
            let continues = list.continue_numbers_across_stories.to_string();
            empty(
                &mut w,
                "NumberingList",
                &[("Self", list.id.as_str()), ("Name", list.name.as_str()), ("ContinueNumbersAcrossStories", continues.as_str())],
            )?;
        }
        for placeholder in &snippet.placeholders {
            empty(&mut w, &placeholder.element, &[("Self", placeholder.id.as_str())])?;
        }
        for layer in &snippet.layers {
            let visible = layer.visible.to_string();
            let locked = layer.locked.to_string();
            empty(
                &mut w,
                "Layer",
                &[("Self", layer.id.as_str()), ("Name", layer.name.as_str()), ("Visible", visible.as_str()), ("Locked", locked.as_str())],
            )?;
        }

        start(&mut w, "Spread", &[("Self", snippet.container.id.as_str())])?;
        for item in &snippet.container.items {
            write_page_item(&mut w, item)?;
        }
        end(&mut w, "Spread")?;

        for story in &snippet.stories {
            write_story(&mut w, story)?;
        }

        end(&mut w, "Document")?;
        Ok(String::from_utf8(w.into_inner())?)
    }
}

fn write_color(w: &mut XmlWriter, color: &Color) -> Result<()> {
    let value = color
        .value
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    empty(
        w,
        "Color",
        &[
            ("Self", color.id.as_str()),
            ("Name", color.name.as_str()),
            ("Model", color.model.as_str()),
            ("Space", color.space.as_str()),
            ("ColorValue", value.as_str()),
        ],
    )
}

fn write_style_group(w: &mut XmlWriter, category: StyleCategory, group: &StyleGroup, root: bool) -> Result<()> {
    let element = if root {
        category.root_group_id().to_string()
    } else {
        format!("{}Group", category.element_name())
    };

    let mut attrs = vec![("Self", group.id.as_str())];
    if !root {
        attrs.push(("Name", group.name.as_str()));
    }
    start(w, &element, &attrs)?;
    for style in &group.styles {
        write_style(w, style)?;
    }
    for child in &group.groups {
        write_style_group(w, category, child, false)?;
    }
    end(w, &element)
}

fn write_style(w: &mut XmlWriter, style: &Style) -> Result<()> {
    let element = style.category.element_name();
    let mut attrs = vec![("Self", style.id.as_str()), ("Name", style.name.as_str())];
    extend_unique(&mut attrs, &style.properties);

    match style.parent() {
        Some(parent) => {
            start(w, element, &attrs)?;
            start(w, "Properties", &[])?;
            start(w, "BasedOn", &[("type", "object")])?;
            w.write_event(Event::Text(BytesText::new(parent.as_str())))?;
            end(w, "BasedOn")?;
            end(w, "Properties")?;
            end(w, element)
        }
        None => empty(w, element, &attrs),
    }
}

fn write_page_item(w: &mut XmlWriter, item: &PageItem) -> Result<()> {
    let base = item.base();
    let element = item.kind().element_name();

    let mut attrs = vec![("Self", base.id.as_str())];
    if let Some(style) = &base.applied_object_style {
        attrs.push(("AppliedObjectStyle", style.as_str()));
    }
    if let Some(layer) = &base.item_layer {
        attrs.push(("ItemLayer", layer.as_str()));
    }
    match item {
        PageItem::TextFrame(frame) => {
            if let Some(story) = &frame.parent_story {
                attrs.push(("ParentStory", story.as_str()));
            }
        }
        PageItem::Rectangle(shape)
        | PageItem::Oval(shape)
        | PageItem::Polygon(shape)
        | PageItem::GraphicLine(shape) => {
            if let Some(fill) = &shape.fill_color {
                attrs.push(("FillColor", fill.as_str()));
            }
            if let Some(stroke) = &shape.stroke_color {
                attrs.push(("StrokeColor", stroke.as_str()));
            }
        }
        PageItem::Group(_) => {}
    }
    extend_unique(&mut attrs, &base.attributes);

    match item.image() {
        Some(image) => {
            start(w, element, &attrs)?;
            write_image(w, image)?;
            end(w, element)
        }
        None => empty(w, element, &attrs),
    }
}

fn write_image(w: &mut XmlWriter, image: &Image) -> Result<()> {
    let mut attrs = vec![("Self", image.id.as_str())];
    if let Some(style) = &image.applied_object_style {
        attrs.push(("AppliedObjectStyle", style.as_str()));
    }
    if let Some(space) = &image.color_space {
        attrs.push(("Space", space.as_str()));
    }

    match &image.link {
        Some(link) => {
            start(w, "Image", &attrs)?;
            empty(w, "Link", &[("Self", link.id.as_str()), ("LinkResourceURI", link.uri.as_str())])?;
            end(w, "Image")
        }
        None => empty(w, "Image", &attrs),
    }
}

fn write_story(w: &mut XmlWriter, story: &Story) -> Result<()> {
    start(w, "Story", &[("Self", story.id.as_str())])?;
    for paragraph in &story.paragraphs {
        start(w, "ParagraphStyleRange", &[("AppliedParagraphStyle", paragraph.applied_paragraph_style.as_str())])?;
        for range in &paragraph.characters {
            let mut attrs = vec![("AppliedCharacterStyle", range.applied_character_style.as_str())];
            if let Some(font) = &range.applied_font {
                attrs.push(("AppliedFont", font.as_str()));
            }
            start(w, "CharacterStyleRange", &attrs)?;
            start(w, "Content", &[])?;
            w.write_event(Event::Text(BytesText::new(&range.content)))?;
            end(w, "Content")?;
            end(w, "CharacterStyleRange")?;
        }
        end(w, "ParagraphStyleRange")?;
    }
    end(w, "Story")
}

// =============================================================================
// Event helpers
// =============================================================================

/// Append verbatim attributes; a key already written by the model wins
fn extend_unique<'a>(attrs: &mut Vec<(&'a str, &'a str)>, extra: &'a BTreeMap<String, String>) {
    for (key, value) in extra {
        if attrs.iter().any(|(k, _)| *k == key.as_str()) {
            tracing::debug!("Dropping attribute {} that shadows a model field", key);
            continue;
        }
        attrs.push((key.as_str(), value.as_str()));
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    start
}

fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    w.write_event(Event::Start(element(name, attrs)))?;
    Ok(())
}

fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    w.write_event(Event::Empty(element(name, attrs)))?;
    Ok(())
}

fn end(w: &mut XmlWriter, name: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
