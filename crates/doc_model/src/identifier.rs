//! Identifier conventions shared by every part of a package

/// Marker carried by built-in sentinel identifiers (e.g. `ParagraphStyle/$ID/[No paragraph style]`)
pub const BUILT_IN_MARKER: &str = "$ID/";

/// Prefix of swatch references in fill and stroke attributes
pub const SWATCH_PREFIX: &str = "Swatch/";

/// The explicit "no color" swatch
pub const NONE_SWATCH: &str = "Swatch/None";

/// The default neutral color
pub const BLACK_COLOR: &str = "Color/Black";

pub const PAPER_COLOR: &str = "Color/Paper";

pub const REGISTRATION_COLOR: &str = "Color/Registration";

/// Directory holding story parts inside a package
pub const STORIES_DIR: &str = "Stories/";

/// Directory holding spread parts inside a package
pub const SPREADS_DIR: &str = "Spreads/";

/// Whether an identifier denotes a built-in, always-available resource
pub fn is_built_in(id: &str) -> bool {
    id.starts_with(BUILT_IN_MARKER) || id.contains("/$ID/")
}

/// Whether a resource must survive cleanup even when nothing references it
pub fn is_reserved(id: &str) -> bool {
    is_built_in(id)
        || matches!(
            id,
            NONE_SWATCH | BLACK_COLOR | PAPER_COLOR | REGISTRATION_COLOR
        )
}

/// Whether a fill/stroke reference names a swatch rather than a color
pub fn is_swatch_reference(id: &str) -> bool {
    id.starts_with(SWATCH_PREFIX)
}

/// Canonical part location of a story
pub fn story_location(id: &str) -> String {
    format!("{}Story_{}.json", STORIES_DIR, id)
}

/// Canonical part location of a spread
pub fn spread_location(id: &str) -> String {
    format!("{}Spread_{}.json", SPREADS_DIR, id)
}

/// Treat `Some("")` the same as `None`
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_detection() {
        assert!(is_built_in("ParagraphStyle/$ID/[No paragraph style]"));
        assert!(is_built_in("$ID/[Normal]"));
        assert!(!is_built_in("ParagraphStyle/Body"));
    }

    #[test]
    fn test_reserved_resources() {
        assert!(is_reserved(NONE_SWATCH));
        assert!(is_reserved(BLACK_COLOR));
        assert!(is_reserved("StrokeStyle/$ID/Solid"));
        assert!(!is_reserved("Color/Accent"));
    }

    #[test]
    fn test_locations() {
        assert_eq!(story_location("u1f"), "Stories/Story_u1f.json");
        assert_eq!(spread_location("ub6"), "Spreads/Spread_ub6.json");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
