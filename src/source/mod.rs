//! Primitive-source boundary types.
//!
//! The underlying PDF extractor is an external collaborator: it hands this
//! library per-page text spans with font metadata, image blocks with raw
//! pixels, and link annotations. This module defines that boundary and
//! validates incoming streams; nothing here reads PDF bytes.

mod block;
mod page;
mod validate;

pub use block::{BBox, Span, TextBlock};
pub use page::{ImageBlock, LinkAnnotation, PageContent, RawDocument, SourceMetadata};
pub use validate::validate;
