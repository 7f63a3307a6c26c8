//! Document Model - Layout package structure and shared resources
//!
//! This crate provides the document model for layout packages: spreads of
//! page items, stories of styled text, and the resource listings (styles,
//! colors, swatches, fonts, layers, links) they reference by identifier.

mod error;
mod identifier;
pub mod style;
mod page_item;
mod story;
mod resource;
mod spread;
mod document;
mod selection;
pub mod snippet;

pub use error::*;
pub use identifier::*;
pub use style::*;
pub use page_item::*;
pub use story::*;
pub use resource::*;
pub use spread::*;
pub use document::*;
pub use selection::*;
pub use snippet::*;
