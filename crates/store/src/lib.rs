//! Store - Package container I/O and snippet export
//!
//! This crate reads and writes layout documents as zip packages of JSON
//! parts, and serializes minimal documents as XML snippets.

mod error;
mod layout;
mod reader;
mod writer;
mod snippet_writer;
mod api;

pub use error::*;
pub use layout::*;
pub use reader::*;
pub use writer::*;
pub use snippet_writer::*;
pub use api::*;
