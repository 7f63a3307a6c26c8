//! Reference integrity - checking that inserted content resolves its references
//!
//! Before a story or page item is added or updated, its style and font
//! references are checked against the document. Missing references are
//! either filled with placeholders, rejected, or let through, depending on
//! [`ValidationOptions`].

use crate::{EngineError, ReachabilityWalker, ResourceCategory, Result};
use doc_model::{is_built_in, Document, FontFamily, PageItem, Story, Style, StyleCategory};
use serde::{Deserialize, Serialize};

/// How reference integrity is enforced on insert and update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Check paragraph, character, and object style references
    pub ensure_styles_exist: bool,
    /// Check font references
    pub ensure_fonts_exist: bool,
    /// Create placeholder resources for missing references
    pub auto_add_missing: bool,
    /// Reject the mutation when references are missing (unless auto-adding)
    pub fail_on_missing: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::permissive()
    }
}

impl ValidationOptions {
    /// No checking at all; dangling references are allowed
    pub fn permissive() -> Self {
        Self {
            ensure_styles_exist: false,
            ensure_fonts_exist: false,
            auto_add_missing: false,
            fail_on_missing: false,
        }
    }

    /// Check styles and fonts, rejecting anything unresolved
    pub fn strict() -> Self {
        Self {
            ensure_styles_exist: true,
            ensure_fonts_exist: true,
            auto_add_missing: false,
            fail_on_missing: true,
        }
    }

    pub fn with_styles_checked(mut self, enabled: bool) -> Self {
        self.ensure_styles_exist = enabled;
        self
    }

    pub fn with_fonts_checked(mut self, enabled: bool) -> Self {
        self.ensure_fonts_exist = enabled;
        self
    }

    pub fn with_auto_add(mut self, enabled: bool) -> Self {
        self.auto_add_missing = enabled;
        self
    }

    pub fn with_fail_on_missing(mut self, enabled: bool) -> Self {
        self.fail_on_missing = enabled;
        self
    }

    /// Whether any reference is checked at all
    pub fn is_enforcing(&self) -> bool {
        self.ensure_styles_exist || self.ensure_fonts_exist
    }
}

/// Content being inserted or updated
#[derive(Debug, Clone, Copy)]
pub enum ContentNode<'a> {
    Story(&'a Story),
    PageItem(&'a PageItem),
}

impl<'a> From<&'a Story> for ContentNode<'a> {
    fn from(story: &'a Story) -> Self {
        ContentNode::Story(story)
    }
}

impl<'a> From<&'a PageItem> for ContentNode<'a> {
    fn from(item: &'a PageItem) -> Self {
        ContentNode::PageItem(item)
    }
}

/// A reference that does not resolve in the document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingReference {
    pub category: ResourceCategory,
    pub id: String,
}

/// Checks and repairs the references of content nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceIntegrityValidator {
    options: ValidationOptions,
}

impl ReferenceIntegrityValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Every unresolved reference of `node` covered by the options.
    ///
    /// Built-in identifiers always resolve. A text frame is checked together
    /// with the story it shows, as found in `document`: a frame that points
    /// at a story with unresolved styles is itself reported.
    pub fn check(&self, node: ContentNode<'_>, document: &Document) -> Vec<MissingReference> {
        let mut walker = ReachabilityWalker::new(document);
        match node {
            ContentNode::Story(story) => walker.analyze_story(story),
            ContentNode::PageItem(item) => walker.analyze(item),
        }
        let set = walker.into_set();

        let mut missing = Vec::new();
        if self.options.ensure_styles_exist {
            let listing = document.style_listing();
            for category in StyleCategory::ALL {
                for id in set.styles(category) {
                    if !listing.map_or(false, |l| l.resolves(category, id)) {
                        missing.push(MissingReference {
                            category: ResourceCategory::for_styles(category),
                            id: id.clone(),
                        });
                    }
                }
            }
        }
        if self.options.ensure_fonts_exist {
            for id in &set.fonts {
                if !is_built_in(id) && document.find_font(id).is_none() {
                    missing.push(MissingReference {
                        category: ResourceCategory::Fonts,
                        id: id.clone(),
                    });
                }
            }
        }
        missing
    }

    /// Apply the options to `node` before it is written into `document`.
    ///
    /// Auto-adding takes precedence over failing.
    pub fn enforce(&self, node: ContentNode<'_>, document: &mut Document) -> Result<()> {
        if !self.options.is_enforcing() {
            return Ok(());
        }

        let missing = self.check(node, document);
        if missing.is_empty() {
            return Ok(());
        }

        if self.options.auto_add_missing {
            for reference in &missing {
                add_placeholder(document, reference)?;
            }
            tracing::info!("Added {} placeholder resources", missing.len());
            Ok(())
        } else if self.options.fail_on_missing {
            Err(EngineError::MissingResources(
                missing.into_iter().map(|m| m.id).collect(),
            ))
        } else {
            tracing::warn!(
                "Proceeding with {} unresolved references: {}",
                missing.len(),
                missing
                    .iter()
                    .map(|m| m.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(())
        }
    }
}

fn add_placeholder(document: &mut Document, reference: &MissingReference) -> Result<()> {
    let name = display_name(&reference.id);
    let category = match reference.category {
        ResourceCategory::ParagraphStyles => StyleCategory::Paragraph,
        ResourceCategory::CharacterStyles => StyleCategory::Character,
        ResourceCategory::ObjectStyles => StyleCategory::Object,
        ResourceCategory::Fonts => {
            document.insert_font(FontFamily::new(reference.id.as_str(), name))?;
            return Ok(());
        }
        other => {
            return Err(EngineError::Validation(format!(
                "no placeholder for {} {}",
                other.label(),
                reference.id
            )))
        }
    };
    document
        .ensure_style_listing()
        .insert(Style::new(category, reference.id.as_str(), name));
    Ok(())
}

/// The last path segment of an identifier
fn display_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CharacterRange, ParagraphRange, TextFrame};

    fn story() -> Story {
        Story::new("s1").with_paragraph(
            ParagraphRange::new("ParagraphStyle/Body").with_characters(
                CharacterRange::new("CharacterStyle/$ID/[No character style]", "x")
                    .with_font("Minion Pro"),
            ),
        )
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ValidationOptions =
            serde_json::from_str(r#"{"ensure_styles_exist": true}"#).unwrap();
        assert!(options.ensure_styles_exist);
        assert!(!options.fail_on_missing);
        assert_eq!(ValidationOptions::default(), ValidationOptions::permissive());
    }

    #[test]
    fn test_check_skips_built_ins() {
        let doc = Document::new();
        let validator = ReferenceIntegrityValidator::new(ValidationOptions::strict());
        let story = story();
        let missing = validator.check((&story).into(), &doc);

        let ids: Vec<_> = missing.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["ParagraphStyle/Body", "Minion Pro"]);
    }

    #[test]
    fn test_permissive_never_checks() {
        let mut doc = Document::new();
        let validator = ReferenceIntegrityValidator::default();
        let story = story();
        assert!(validator.enforce((&story).into(), &mut doc).is_ok());
        assert!(doc.fonts().is_empty());
    }

    #[test]
    fn test_fail_lists_every_missing_id() {
        let mut doc = Document::new();
        let validator = ReferenceIntegrityValidator::new(ValidationOptions::strict());
        let story = story();

        let err = validator.enforce((&story).into(), &mut doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing resources: ParagraphStyle/Body, Minion Pro"
        );
    }

    #[test]
    fn test_auto_add_wins_over_fail() {
        let mut doc = Document::new();
        let validator =
            ReferenceIntegrityValidator::new(ValidationOptions::strict().with_auto_add(true));
        let story = story();

        validator.enforce((&story).into(), &mut doc).unwrap();
        assert!(doc
            .style_listing()
            .unwrap()
            .contains(StyleCategory::Paragraph, "ParagraphStyle/Body"));
        assert_eq!(doc.find_font("Minion Pro").map(|f| f.name.as_str()), Some("Minion Pro"));
    }

    #[test]
    fn test_fail_without_checks_proceeds() {
        let mut doc = Document::new();
        let validator = ReferenceIntegrityValidator::new(
            ValidationOptions::permissive().with_fail_on_missing(true),
        );
        let item: PageItem = TextFrame::new("tf1").with_object_style("ObjectStyle/Ghost").into();

        assert!(validator.check((&item).into(), &doc).is_empty());
        assert!(validator.enforce((&item).into(), &mut doc).is_ok());
        assert!(!doc.style_listing().unwrap().contains(StyleCategory::Object, "ObjectStyle/Ghost"));
    }

    #[test]
    fn test_frame_check_includes_shown_story() {
        let mut doc = Document::new();
        doc.insert_story(story()).unwrap();
        let validator = ReferenceIntegrityValidator::new(
            ValidationOptions::permissive().with_styles_checked(true),
        );
        let item: PageItem = TextFrame::new("tf1").with_story("s1").into();

        let missing = validator.check((&item).into(), &doc);
        assert_eq!(
            missing,
            vec![MissingReference {
                category: ResourceCategory::ParagraphStyles,
                id: "ParagraphStyle/Body".to_string(),
            }]
        );
    }

    #[test]
    fn test_unchecked_missing_proceeds() {
        let mut doc = Document::new();
        let validator = ReferenceIntegrityValidator::new(
            ValidationOptions::permissive().with_styles_checked(true),
        );
        let item: PageItem = TextFrame::new("tf1").with_object_style("ObjectStyle/Frame").into();

        assert_eq!(validator.check((&item).into(), &doc).len(), 1);
        assert!(validator.enforce((&item).into(), &mut doc).is_ok());
        assert!(!doc.style_listing().unwrap().contains(StyleCategory::Object, "ObjectStyle/Frame"));
    }
}
