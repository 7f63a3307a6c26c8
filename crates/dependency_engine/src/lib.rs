//! Dependency Engine - Resource reachability for layout packages
//!
//! This crate computes which resources a piece of page content depends on,
//! extracts minimal self-contained packages from a selection, reclaims
//! resources orphaned by removals, and enforces reference integrity on
//! insertion and update.

mod error;
mod reference_set;
mod walker;
mod hierarchy;
mod extractor;
mod reclaimer;
mod integrity;
mod api;

pub use error::*;
pub use reference_set::*;
pub use walker::*;
pub use hierarchy::*;
pub use extractor::*;
pub use reclaimer::*;
pub use integrity::*;
pub use api::*;
