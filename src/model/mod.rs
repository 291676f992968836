//! Output document model.
//!
//! This module defines the tagged tree produced by structure inference:
//! ordered pages of semantic nodes (headings, paragraphs, lists, tables,
//! images) in reading order, plus the document-level info the scorer and
//! renderers consume.

mod document;
mod image;
mod node;
mod table;

pub use document::{DocumentInfo, DocumentTree, PageNode};
pub use image::{AltTextSource, ImageNode};
pub use node::{InlineContent, ListItem, SemanticNode};
pub use table::{Table, TableCell, TableRow};
