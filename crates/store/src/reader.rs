//! Package reading
//!
//! Resource parts and stories are required once listed; spreads are
//! scanned best-effort, so one unreadable spread does not prevent the rest
//! of the document from loading.

use crate::{
    spread_id_from_part, DesignMap, GraphicPart, Result, StoreError, DESIGNMAP_PART, FONTS_PART,
    GRAPHIC_PART, LINKS_PART, MIMETYPE, MIMETYPE_PART, STYLES_PART,
};
use doc_model::{
    spread_location, story_location, Document, FontFamily, Link, PackageKind, Spread, Story,
    StyleListing,
};
use serde::de::DeserializeOwned;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// A zip package opened for reading
pub struct PackageReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> PackageReader<R> {
    /// Open a package from a source that implements Read + Seek
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read a part as a string
    pub fn read_part(&mut self, path: &str) -> Result<String> {
        let mut file = self.archive.by_name(path).map_err(|e| {
            if matches!(e, zip::result::ZipError::FileNotFound) {
                StoreError::MissingPart(path.to_string())
            } else {
                StoreError::from(e)
            }
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Read and deserialize a JSON part
    pub fn read_json<T: DeserializeOwned>(&mut self, path: &str) -> Result<T> {
        let contents = self.read_part(path)?;
        serde_json::from_str(&contents).map_err(|e| StoreError::InvalidPart {
            part: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Scan spread parts: the listed ones first, in order, then any other
    /// spread part found in the archive
    pub fn scan_spreads(&mut self, listed: &[String]) -> SpreadScan<'_, R> {
        let mut parts: Vec<String> = listed.iter().map(|id| spread_location(id)).collect();
        let mut unlisted: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| spread_id_from_part(name).is_some())
            .filter(|name| !parts.iter().any(|p| p == name))
            .map(str::to_string)
            .collect();
        unlisted.sort();
        parts.extend(unlisted);

        SpreadScan {
            reader: self,
            parts: parts.into_iter(),
        }
    }

    /// Load the whole document
    pub fn read_document(&mut self) -> Result<Document> {
        let mimetype = self.read_part(MIMETYPE_PART)?;
        if mimetype.trim() != MIMETYPE {
            return Err(StoreError::InvalidFormat(format!(
                "unexpected mimetype {:?}",
                mimetype.trim()
            )));
        }

        let map: DesignMap = self.read_json(DESIGNMAP_PART)?;
        if map.kind != PackageKind::Document {
            return Err(StoreError::InvalidFormat(format!(
                "expected a document package, found {}",
                map.kind.as_str()
            )));
        }

        let mut document = Document::new();
        document.metadata = map.metadata;

        let styles = if self.contains(STYLES_PART) {
            Some(self.read_json::<StyleListing>(STYLES_PART)?)
        } else {
            None
        };
        document.set_style_listing(styles);

        if self.contains(GRAPHIC_PART) {
            let graphic: GraphicPart = self.read_json(GRAPHIC_PART)?;
            for color in graphic.colors {
                document.insert_color(color)?;
            }
            for swatch in graphic.swatches {
                document.insert_swatch(swatch)?;
            }
        }
        if self.contains(FONTS_PART) {
            for family in self.read_json::<Vec<FontFamily>>(FONTS_PART)? {
                document.insert_font(family)?;
            }
        }
        if self.contains(LINKS_PART) {
            for link in self.read_json::<Vec<Link>>(LINKS_PART)? {
                document.insert_link(link)?;
            }
        }
        for layer in map.layers {
            document.insert_layer(layer)?;
        }

        let mut skipped = 0;
        for result in self.scan_spreads(&map.spreads) {
            match result.and_then(|spread| Ok(document.insert_spread(spread)?)) {
                Ok(()) => {}
                Err(e) => {
                    tracing::warn!("Skipping spread: {}", e);
                    skipped += 1;
                }
            }
        }

        for id in &map.stories {
            let story: Story = self.read_json(&story_location(id))?;
            document.insert_story(story)?;
        }

        tracing::debug!(
            "Loaded package with {} spreads ({} skipped) and {} stories",
            document.spreads().len(),
            skipped,
            document.stories().len()
        );

        Ok(document)
    }
}

/// Yields one result per spread part; a failed part does not end the scan
pub struct SpreadScan<'a, R: Read + Seek> {
    reader: &'a mut PackageReader<R>,
    parts: std::vec::IntoIter<String>,
}

impl<'a, R: Read + Seek> Iterator for SpreadScan<'a, R> {
    type Item = Result<Spread>;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.parts.next()?;
        Some(self.reader.read_json(&part))
    }
}
