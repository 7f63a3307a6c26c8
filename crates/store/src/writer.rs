//! Package writing
//!
//! Creates zip archives with the mimetype part first and uncompressed,
//! followed by the design map, resources, spreads, and stories.

use crate::{
    DesignMap, GraphicPart, Result, DESIGNMAP_PART, FONTS_PART, GRAPHIC_PART, LINKS_PART,
    MIMETYPE, MIMETYPE_PART, STYLES_PART,
};
use doc_model::{spread_location, story_location, Document, PackageKind};
use serde::Serialize;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Writes a document as a zip package
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Write every part of `document` and finish the archive
    pub fn write(mut self, document: &Document) -> Result<W> {
        self.write_stored(MIMETYPE_PART, MIMETYPE.as_bytes())?;

        let map = DesignMap {
            kind: PackageKind::Document,
            metadata: document.metadata.clone(),
            spreads: document.spreads().iter().map(|s| s.id.clone()).collect(),
            stories: document.stories().iter().map(|s| s.id.clone()).collect(),
            layers: document.layers().to_vec(),
        };
        self.write_json(DESIGNMAP_PART, &map)?;

        if let Some(styles) = document.style_listing() {
            self.write_json(STYLES_PART, styles)?;
        }
        let graphic = GraphicPart {
            colors: document.colors().to_vec(),
            swatches: document.swatches().to_vec(),
        };
        self.write_json(GRAPHIC_PART, &graphic)?;
        self.write_json(FONTS_PART, document.fonts())?;
        self.write_json(LINKS_PART, document.links())?;

        for spread in document.spreads() {
            self.write_json(&spread_location(&spread.id), spread)?;
        }
        for story in document.stories() {
            self.write_json(&story_location(&story.id), story)?;
        }

        tracing::debug!(
            "Wrote package with {} spreads and {} stories",
            document.spreads().len(),
            document.stories().len()
        );

        Ok(self.zip.finish()?)
    }

    /// Write a JSON part
    pub fn write_json<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_file(path, &json)
    }

    /// Write a compressed text part
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }

    /// Write an uncompressed part
    pub fn write_stored(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;

        Ok(())
    }
}
