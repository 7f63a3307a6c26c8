//! Public API for package and snippet I/O
//!
//! This module provides the main entry points for loading and saving
//! documents and for exporting minimal documents as snippets.

use crate::{PackageReader, PackageWriter, Result, SnippetOptions, SnippetWriter, StoreError};
use doc_model::{Document, MinimalDocument};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Read a package from disk
///
/// # Example
///
/// ```ignore
/// use store::read_package;
/// use std::path::Path;
///
/// let document = read_package(Path::new("layout.pkg"))?;
/// ```
pub fn read_package(path: &Path) -> Result<Document> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            ))
        } else {
            StoreError::Io(e)
        }
    })?;

    PackageReader::new(BufReader::new(file))?.read_document()
}

/// Write a package to disk, creating parent directories as needed
pub fn write_package(document: &Document, path: &Path) -> Result<()> {
    create_parent_dir(path)?;
    let file = File::create(path)?;
    let writer = PackageWriter::new(BufWriter::new(file)).write(document)?;
    writer.into_inner().map_err(|e| e.into_error())?;
    Ok(())
}

/// Read a package from an in-memory byte slice
pub fn read_package_bytes(bytes: &[u8]) -> Result<Document> {
    PackageReader::new(Cursor::new(bytes))?.read_document()
}

/// Write a package to an in-memory byte vector
pub fn write_package_bytes(document: &Document) -> Result<Vec<u8>> {
    let cursor = PackageWriter::new(Cursor::new(Vec::new())).write(document)?;
    Ok(cursor.into_inner())
}

/// Serialize a minimal document as snippet XML
pub fn write_snippet(snippet: &MinimalDocument, options: &SnippetOptions) -> Result<String> {
    SnippetWriter::new(*options).write(snippet)
}

/// Write a minimal document to disk as a snippet file
pub fn export_snippet(snippet: &MinimalDocument, path: &Path, options: &SnippetOptions) -> Result<()> {
    let xml = write_snippet(snippet, options)?;
    create_parent_dir(path)?;
    std::fs::write(path, xml)?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
