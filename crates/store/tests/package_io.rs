//! Integration tests for package reading and writing
//!
//! Packages are written, then tampered with at the zip level to check how
//! the reader treats damaged or missing parts.

use doc_model::{
    spread_location, story_location, CharacterRange, Color, Document, FontFamily, Layer, Link,
    PageItem, ParagraphRange, Selection, Shape, Spread, Story, Style, StyleCategory, Swatch,
    TextFrame,
};
use std::io::{Cursor, Read, Write};
use store::{
    export_snippet, read_package, read_package_bytes, write_package, write_package_bytes,
    write_snippet, SnippetOptions, StoreError,
};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

fn sample_document() -> Document {
    let mut doc = Document::new();
    doc.metadata.title = Some("Catalog".to_string());

    let listing = doc.ensure_style_listing();
    listing.insert(Style::paragraph("ParagraphStyle/Body", "Body").with_property("PointSize", "10"));
    listing.insert(Style::paragraph("ParagraphStyle/Lead", "Lead").with_based_on("ParagraphStyle/Body"));

    doc.insert_color(Color::black()).unwrap();
    doc.insert_color(Color::cmyk("Color/Red", "Red", 0.0, 100.0, 100.0, 0.0)).unwrap();
    doc.insert_swatch(Swatch::none()).unwrap();
    doc.insert_font(FontFamily::new("di1", "Minion Pro")).unwrap();
    doc.insert_layer(Layer::new("Layer/Art", "Art")).unwrap();
    doc.insert_link(Link::new("Link/u9", "file:///a.psd")).unwrap();

    doc.insert_story(
        Story::new("s1").with_paragraph(
            ParagraphRange::new("ParagraphStyle/Lead").with_characters(
                CharacterRange::new("CharacterStyle/$ID/[No character style]", "Fish & chips")
                    .with_font("Minion Pro"),
            ),
        ),
    )
    .unwrap();

    doc.insert_spread(Spread::new("sp1").with_item(TextFrame::new("tf1").with_story("s1")))
        .unwrap();
    doc.insert_spread(
        Spread::new("sp2")
            .with_item(PageItem::Rectangle(Shape::new("r1").with_fill("Color/Red").with_layer("Layer/Art"))),
    )
    .unwrap();

    doc
}

/// Rebuild an archive, letting `edit` replace or drop each part
fn rewrite(bytes: &[u8], edit: impl Fn(&str, Vec<u8>) -> Option<Vec<u8>>) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();

        if let Some(data) = edit(&name, data) {
            out.start_file(name.as_str(), SimpleFileOptions::default()).unwrap();
            out.write_all(&data).unwrap();
        }
    }

    out.finish().unwrap().into_inner()
}

#[test]
fn test_round_trip_in_memory() {
    let doc = sample_document();
    let bytes = write_package_bytes(&doc).unwrap();
    let loaded = read_package_bytes(&bytes).unwrap();
    assert_eq!(loaded, doc);
}

#[test]
fn test_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.pkg");
    let doc = sample_document();

    write_package(&doc, &path).unwrap();
    let loaded = read_package(&path).unwrap();

    assert_eq!(loaded, doc);
    assert_eq!(loaded.metadata.title.as_deref(), Some("Catalog"));
}

#[test]
fn test_missing_style_part_means_no_listing() {
    let mut doc = sample_document();
    doc.set_style_listing(None);

    let loaded = read_package_bytes(&write_package_bytes(&doc).unwrap()).unwrap();
    assert!(loaded.style_listing().is_none());
}

#[test]
fn test_corrupt_spread_is_skipped() {
    let bytes = write_package_bytes(&sample_document()).unwrap();
    let corrupt = spread_location("sp1");
    let damaged = rewrite(&bytes, |name, data| {
        Some(if name == corrupt { b"{ not json".to_vec() } else { data })
    });

    let loaded = read_package_bytes(&damaged).unwrap();
    let ids: Vec<_> = loaded.spreads().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["sp2"]);
    assert!(loaded.contains_story("s1"));
}

#[test]
fn test_unlisted_spread_part_is_found() {
    let bytes = write_package_bytes(&sample_document()).unwrap();

    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    for i in 0..archive.len() {
        out.raw_copy_file(archive.by_index_raw(i).unwrap()).unwrap();
    }
    out.start_file(spread_location("sp3").as_str(), SimpleFileOptions::default())
        .unwrap();
    out.write_all(&serde_json::to_vec(&Spread::new("sp3")).unwrap())
        .unwrap();
    let bytes = out.finish().unwrap().into_inner();

    let loaded = read_package_bytes(&bytes).unwrap();
    let ids: Vec<_> = loaded.spreads().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["sp1", "sp2", "sp3"]);
}

#[test]
fn test_missing_story_is_fatal() {
    let bytes = write_package_bytes(&sample_document()).unwrap();
    let missing = story_location("s1");
    let damaged = rewrite(&bytes, |name, data| (name != missing).then_some(data));

    match read_package_bytes(&damaged) {
        Err(StoreError::MissingPart(part)) => assert_eq!(part, missing),
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_wrong_mimetype_rejected() {
    let bytes = write_package_bytes(&sample_document()).unwrap();
    let damaged = rewrite(&bytes, |name, data| {
        Some(if name == "mimetype" { b"text/plain".to_vec() } else { data })
    });

    assert!(matches!(
        read_package_bytes(&damaged),
        Err(StoreError::InvalidFormat(_))
    ));
}

#[test]
fn test_exported_selection_as_snippet_file() {
    let doc = sample_document();
    let selection = Selection::from_ids(&doc, &["tf1"]).unwrap();
    let snippet = dependency_engine::export_selection(&doc, &selection).unwrap();

    let xml = write_snippet(&snippet, &SnippetOptions::default()).unwrap();
    assert!(xml.contains(r#"type="snippet""#));
    assert!(xml.contains("Fish &amp; chips"));
    assert!(xml.contains(r#"Self="ParagraphStyle/Lead""#));
    assert!(xml.contains(r#"Self="ParagraphStyle/Body""#));
    assert!(xml.contains(r#"<BasedOn type="object">ParagraphStyle/Body</BasedOn>"#));
    assert!(!xml.contains("Color/Red"));
    assert!(snippet.styles.contains(StyleCategory::Paragraph, "ParagraphStyle/Lead"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.snippet");
    export_snippet(&snippet, &path, &SnippetOptions::default()).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), xml);
}
