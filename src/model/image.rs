//! Image nodes with resolved alternative text.

use serde::{Deserialize, Serialize};

/// An image in the output tree.
///
/// After the alt-text pipeline completes, `alt_text` is always non-empty:
/// images whose OCR and captioning both fail receive a generic description
/// derived from their dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageNode {
    /// Zero-based page index
    pub page: usize,

    /// Index of the image among the page's images, in source order
    pub index: usize,

    /// Pixel width
    pub width: u32,

    /// Pixel height
    pub height: u32,

    /// Alternative text
    pub alt_text: String,

    /// How the alternative text was produced
    pub source: AltTextSource,
}

impl ImageNode {
    /// Create an image node with pending (empty) alternative text.
    pub fn pending(page: usize, index: usize, width: u32, height: u32) -> Self {
        Self {
            page,
            index,
            width,
            height,
            alt_text: String::new(),
            source: AltTextSource::Fallback,
        }
    }

    /// Check if alternative text has been attached.
    pub fn has_alt_text(&self) -> bool {
        !self.alt_text.trim().is_empty()
    }
}

/// Origin of an image's alternative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltTextSource {
    /// Text recognized inside the image
    Ocr,
    /// Generated by the captioning collaborator
    Caption,
    /// Generic description derived from image dimensions
    Fallback,
}
