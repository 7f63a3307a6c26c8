//! Public API for document mutation and selection export
//!
//! This module provides the main entry points: removal with optional
//! cleanup, reference-checked insertion and update, and export of a
//! selection to a minimal package.

use crate::{
    resolve_style_hierarchy, ContentNode, EngineError, OrphanReclaimer, PackageExtractor,
    ReachabilityWalker, ReferenceIntegrityValidator, ReferenceSet, RemovalReport, RemovalTarget,
    Result, ValidationOptions,
};
use doc_model::{Document, MinimalDocument, PageItem, PageItemKind, Selection, Shape, Story, TextFrame};

// =============================================================================
// Removal
// =============================================================================

/// Remove a story, optionally reclaiming the resources only it used
///
/// # Example
///
/// ```ignore
/// use dependency_engine::remove_story;
///
/// let report = remove_story(&mut document, "u1a2", true)?;
/// println!("reclaimed {} resources", report.total());
/// ```
pub fn remove_story(document: &mut Document, story_id: &str, cleanup: bool) -> Result<RemovalReport> {
    OrphanReclaimer::new(document).remove_with_cleanup(&RemovalTarget::story(story_id), cleanup)
}

/// Remove a text frame from a spread
pub fn remove_text_frame(
    document: &mut Document,
    spread_id: &str,
    item_id: &str,
    cleanup: bool,
) -> Result<RemovalReport> {
    ensure_kind(document, spread_id, item_id, PageItemKind::TextFrame)?;
    remove_page_item(document, spread_id, item_id, cleanup)
}

/// Remove a rectangle from a spread
pub fn remove_rectangle(
    document: &mut Document,
    spread_id: &str,
    item_id: &str,
    cleanup: bool,
) -> Result<RemovalReport> {
    ensure_kind(document, spread_id, item_id, PageItemKind::Rectangle)?;
    remove_page_item(document, spread_id, item_id, cleanup)
}

/// Remove any page item from a spread
pub fn remove_page_item(
    document: &mut Document,
    spread_id: &str,
    item_id: &str,
    cleanup: bool,
) -> Result<RemovalReport> {
    OrphanReclaimer::new(document)
        .remove_with_cleanup(&RemovalTarget::page_item(spread_id, item_id), cleanup)
}

fn ensure_kind(document: &Document, spread_id: &str, item_id: &str, kind: PageItemKind) -> Result<()> {
    match document.page_item(spread_id, item_id) {
        Ok(item) if item.kind() == kind => Ok(()),
        _ => Err(EngineError::NotFound(format!(
            "{} {} in spread {}",
            kind.element_name(),
            item_id,
            spread_id
        ))),
    }
}

// =============================================================================
// Insertion
// =============================================================================

/// Add a new story, enforcing reference integrity per `options`
pub fn add_story(document: &mut Document, story: Story, options: &ValidationOptions) -> Result<()> {
    if document.contains_story(&story.id) {
        return Err(EngineError::AlreadyExists(format!("story {}", story.id)));
    }
    ReferenceIntegrityValidator::new(*options).enforce(ContentNode::Story(&story), document)?;
    document.insert_story(story)?;
    Ok(())
}

/// Add a text frame to a spread
pub fn add_text_frame(
    document: &mut Document,
    spread_id: &str,
    frame: TextFrame,
    options: &ValidationOptions,
) -> Result<()> {
    add_page_item(document, spread_id, PageItem::TextFrame(frame), options)
}

/// Add a rectangle to a spread
pub fn add_rectangle(
    document: &mut Document,
    spread_id: &str,
    shape: Shape,
    options: &ValidationOptions,
) -> Result<()> {
    add_page_item(document, spread_id, PageItem::Rectangle(shape), options)
}

/// Add any page item to a spread.
///
/// Page item identifiers are unique across the whole document; a duplicate
/// in any spread is rejected before references are checked.
pub fn add_page_item(
    document: &mut Document,
    spread_id: &str,
    item: PageItem,
    options: &ValidationOptions,
) -> Result<()> {
    document
        .spread(spread_id)
        .map_err(|_| EngineError::NotFound(format!("spread {}", spread_id)))?;
    if let Some((owner, _)) = document.find_page_item(item.id()) {
        return Err(EngineError::AlreadyExists(format!(
            "{} {} in spread {}",
            item.kind().element_name(),
            item.id(),
            owner
        )));
    }

    ReferenceIntegrityValidator::new(*options).enforce(ContentNode::PageItem(&item), document)?;
    document.spread_mut(spread_id)?.insert(item)?;
    Ok(())
}

// =============================================================================
// Update
// =============================================================================

/// Replace an existing story with a new version
pub fn update_story(document: &mut Document, story: Story, options: &ValidationOptions) -> Result<()> {
    if !document.contains_story(&story.id) {
        return Err(EngineError::NotFound(format!("story {}", story.id)));
    }
    ReferenceIntegrityValidator::new(*options).enforce(ContentNode::Story(&story), document)?;
    document.replace_story(story)?;
    Ok(())
}

/// Replace an existing text frame
pub fn update_text_frame(
    document: &mut Document,
    spread_id: &str,
    frame: TextFrame,
    options: &ValidationOptions,
) -> Result<()> {
    ensure_kind(document, spread_id, &frame.base.id, PageItemKind::TextFrame)?;
    update_page_item(document, spread_id, PageItem::TextFrame(frame), options)
}

/// Replace an existing rectangle
pub fn update_rectangle(
    document: &mut Document,
    spread_id: &str,
    shape: Shape,
    options: &ValidationOptions,
) -> Result<()> {
    ensure_kind(document, spread_id, &shape.base.id, PageItemKind::Rectangle)?;
    update_page_item(document, spread_id, PageItem::Rectangle(shape), options)
}

/// Replace an existing page item, keeping its position in the spread
pub fn update_page_item(
    document: &mut Document,
    spread_id: &str,
    item: PageItem,
    options: &ValidationOptions,
) -> Result<()> {
    if document.page_item(spread_id, item.id()).is_err() {
        return Err(EngineError::NotFound(format!(
            "{} {} in spread {}",
            item.kind().element_name(),
            item.id(),
            spread_id
        )));
    }

    ReferenceIntegrityValidator::new(*options).enforce(ContentNode::PageItem(&item), document)?;
    document.spread_mut(spread_id)?.replace(item)?;
    Ok(())
}

// =============================================================================
// Export
// =============================================================================

/// The saturated reference set of a selection: direct references plus
/// every ancestor style
pub fn selection_references(document: &Document, selection: &Selection) -> ReferenceSet {
    let mut walker = ReachabilityWalker::new(document);
    walker.analyze_selection(selection);
    let mut set = walker.into_set();
    resolve_style_hierarchy(&mut set, document.style_listing());
    set
}

/// Export a selection as a minimal, self-contained package
///
/// # Example
///
/// ```ignore
/// use dependency_engine::export_selection;
/// use doc_model::Selection;
///
/// let selection = Selection::from_ids(&document, &["u1f3"])?;
/// let snippet = export_selection(&document, &selection)?;
/// assert!(snippet.is_snippet());
/// ```
pub fn export_selection(document: &Document, selection: &Selection) -> Result<MinimalDocument> {
    if selection.is_empty() {
        return Err(EngineError::Validation("selection is empty".to_string()));
    }

    let set = selection_references(document, selection);
    tracing::debug!(
        "Selection of {} items references {} identifiers",
        selection.len(),
        set.len()
    );

    let extracted = PackageExtractor::new(document).extract(&set)?;
    Ok(PackageExtractor::assemble(selection, extracted))
}
