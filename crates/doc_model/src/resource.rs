//! Shared resources - colors, swatches, fonts, layers, links, and the
//! structural defaults every package carries

use crate::identifier::{BLACK_COLOR, NONE_SWATCH};
use serde::{Deserialize, Serialize};

// =============================================================================
// Colors and Swatches
// =============================================================================

/// How a color is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorModel {
    #[default]
    Process,
    Spot,
    Registration,
}

impl ColorModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorModel::Process => "Process",
            ColorModel::Spot => "Spot",
            ColorModel::Registration => "Registration",
        }
    }
}

/// The space a color value is expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    Cmyk,
    Rgb,
    Lab,
}

impl ColorSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpace::Cmyk => "CMYK",
            ColorSpace::Rgb => "RGB",
            ColorSpace::Lab => "LAB",
        }
    }
}

/// A named color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model: ColorModel,
    #[serde(default)]
    pub space: ColorSpace,
    /// Component values in the color space
    #[serde(default)]
    pub value: Vec<f64>,
}

impl Color {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model: ColorModel::Process,
            space: ColorSpace::Cmyk,
            value: Vec::new(),
        }
    }

    /// CMYK process color
    pub fn cmyk(id: impl Into<String>, name: impl Into<String>, c: f64, m: f64, y: f64, k: f64) -> Self {
        Self {
            value: vec![c, m, y, k],
            ..Self::new(id, name)
        }
    }

    /// The default neutral color
    pub fn black() -> Self {
        Self::cmyk(BLACK_COLOR, "Black", 0.0, 0.0, 0.0, 100.0)
    }
}

/// A swatch that is not a plain color (e.g. the "none" swatch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: String,
    pub name: String,
}

impl Swatch {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The explicit "no color" swatch
    pub fn none() -> Self {
        Self::new(NONE_SWATCH, "None")
    }
}

/// A group of swatch references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorGroup {
    pub id: String,
    pub name: String,
    /// Identifiers of the colors and swatches in this group
    pub swatch_refs: Vec<String>,
}

impl ColorGroup {
    /// The root color group referencing the given swatches
    pub fn root(swatch_refs: Vec<String>) -> Self {
        Self {
            id: "ColorGroup/[Root Color Group]".to_string(),
            name: "[Root Color Group]".to_string(),
            swatch_refs,
        }
    }
}

// =============================================================================
// Fonts
// =============================================================================

/// A single face of a font family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: String,
    pub font_style_name: String,
    #[serde(default)]
    pub post_script_name: String,
}

/// A font family; character ranges reference families by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fonts: Vec<Font>,
}

impl FontFamily {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fonts: Vec::new(),
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.fonts.push(font);
        self
    }

    /// Whether a font reference names this family
    pub fn matches(&self, reference: &str) -> bool {
        self.name == reference || self.id == reference
    }
}

// =============================================================================
// Layers and Links
// =============================================================================

/// A document layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

fn default_true() -> bool {
    true
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            locked: false,
        }
    }

    /// The layer every package carries
    pub fn default_layer() -> Self {
        Self::new("Layer/Layer 1", "Layer 1")
    }
}

/// An external file placed in the document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    /// Resource URI of the linked file
    pub uri: String,
}

impl Link {
    pub fn new(id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
        }
    }

    /// Links are keyed by either identifier or URI
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.uri == key
    }
}

// =============================================================================
// Structural defaults
// =============================================================================

/// A stroke style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub id: String,
    pub name: String,
}

impl StrokeStyle {
    /// The default solid stroke
    pub fn solid() -> Self {
        Self {
            id: "StrokeStyle/$ID/Solid".to_string(),
            name: "$ID/Solid".to_string(),
        }
    }
}

/// A numbering list definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub continue_numbers_across_stories: bool,
}

impl NumberingList {
    pub fn default_list() -> Self {
        Self {
            id: "NumberingList/$ID/[Default]".to_string(),
            name: "$ID/[Default]".to_string(),
            continue_numbers_across_stories: false,
        }
    }
}

/// An opaque element consumers require for compatibility; carries no data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityPlaceholder {
    /// Element name written to the package
    pub element: String,
    pub id: String,
}

impl CompatibilityPlaceholder {
    pub fn new(element: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            id: id.into(),
        }
    }
}
