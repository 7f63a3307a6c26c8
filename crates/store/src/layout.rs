//! Package layout - part names and the design map
//!
//! A package holds one JSON part per spread and per story, plus one part
//! per resource category. The design map lists spreads and stories in
//! document order.

use doc_model::{Color, DocumentMetadata, Layer, PackageKind, Swatch, SPREADS_DIR};
use serde::{Deserialize, Serialize};

/// First part of every package, stored uncompressed
pub const MIMETYPE_PART: &str = "mimetype";

pub const MIMETYPE: &str = "application/vnd.layout-package+zip";

pub const DESIGNMAP_PART: &str = "designmap.json";

pub const STYLES_PART: &str = "Resources/Styles.json";

pub const GRAPHIC_PART: &str = "Resources/Graphic.json";

pub const FONTS_PART: &str = "Resources/Fonts.json";

pub const LINKS_PART: &str = "Resources/Links.json";

/// Package index: kind, metadata, and the ordered spread and story lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMap {
    pub kind: PackageKind,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub spreads: Vec<String>,
    #[serde(default)]
    pub stories: Vec<String>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Contents of the graphic resource part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicPart {
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub swatches: Vec<Swatch>,
}

/// Spread identifier encoded in a part name (`Spreads/Spread_<id>.json`)
pub fn spread_id_from_part(name: &str) -> Option<String> {
    part_id(name, SPREADS_DIR, "Spread_")
}

fn part_id(name: &str, dir: &str, prefix: &str) -> Option<String> {
    let pattern = format!(
        r"^{}{}(.+)\.json$",
        regex_lite::escape(dir),
        regex_lite::escape(prefix)
    );
    let re = regex_lite::Regex::new(&pattern).ok()?;
    re.captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::spread_location;

    #[test]
    fn test_part_ids_round_trip_locations() {
        assert_eq!(spread_id_from_part(&spread_location("ub6")), Some("ub6".to_string()));
    }

    #[test]
    fn test_unrelated_parts_have_no_id() {
        assert_eq!(spread_id_from_part("Stories/Story_u1.json"), None);
        assert_eq!(spread_id_from_part("Spreads/Spread_u1.xml"), None);
        assert_eq!(spread_id_from_part(DESIGNMAP_PART), None);
    }
}
