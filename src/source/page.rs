//! Page-level primitive content and document metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::{BBox, TextBlock};

/// An image block extracted from a page.
///
/// Carries raw pixel data as handed over by the extractor. The analysis
/// pipeline attaches alternative text exactly once; the raw bytes are
/// otherwise opaque to this library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Raw image bytes (not serialized; streams carry dimensions only)
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// Bounding box on the page
    pub bbox: BBox,

    /// Zero-based page index
    pub page: usize,

    /// Pixel width
    pub width: u32,

    /// Pixel height
    pub height: u32,
}

impl ImageBlock {
    /// Create a new image block.
    pub fn new(data: Vec<u8>, bbox: BBox, page: usize, width: u32, height: u32) -> Self {
        Self {
            data,
            bbox,
            page,
            width,
            height,
        }
    }
}

/// A link annotation on a page: an active rectangle with a target URI.
///
/// Annotations are read-only; spans reference them by containment, never
/// by ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAnnotation {
    /// Active rectangle in page coordinates
    pub rect: BBox,

    /// Target URI
    pub uri: String,
}

impl LinkAnnotation {
    /// Create a new link annotation.
    pub fn new(rect: BBox, uri: impl Into<String>) -> Self {
        Self {
            rect,
            uri: uri.into(),
        }
    }
}

/// All primitive content of a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Zero-based page index
    pub index: usize,

    /// Page width in document units
    pub width: f32,

    /// Page height in document units
    pub height: f32,

    /// Text blocks in extractor order
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,

    /// Image blocks
    #[serde(default)]
    pub images: Vec<ImageBlock>,

    /// Link annotations
    #[serde(default)]
    pub links: Vec<LinkAnnotation>,
}

impl PageContent {
    /// Create an empty page with the given dimensions.
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            text_blocks: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Total extractable characters on this page.
    pub fn char_count(&self) -> usize {
        self.text_blocks
            .iter()
            .flat_map(|b| b.spans.iter())
            .map(|s| s.text.trim().chars().count())
            .sum()
    }
}

/// Document metadata as reported by the primitive source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Document title
    pub title: Option<String>,

    /// Declared language (e.g., "en", "fr-CA")
    pub language: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// Producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

/// The complete primitive stream for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    /// Document metadata
    #[serde(default)]
    pub metadata: SourceMetadata,

    /// Pages in source order
    #[serde(default)]
    pub pages: Vec<PageContent>,
}

impl RawDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageContent) {
        self.pages.push(page);
    }

    /// Total extractable characters across all pages.
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.char_count()).sum()
    }
}
