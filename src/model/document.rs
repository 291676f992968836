//! Document tree and document-level info.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::SemanticNode;

/// The final ordered, classified representation of a document.
///
/// Built incrementally by the reading-order assembler; never mutated after
/// assembly completes (the remediation pass operates on an explicit
/// mutable borrow and is the only sanctioned post-assembly writer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Document-level info
    pub info: DocumentInfo,

    /// Pages in source order
    pub pages: Vec<PageNode>,
}

impl DocumentTree {
    /// Create a tree with the given info and no pages.
    pub fn new(info: DocumentInfo) -> Self {
        Self {
            info,
            pages: Vec::new(),
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of semantic nodes across all pages.
    pub fn node_count(&self) -> usize {
        self.pages.iter().map(|p| p.nodes.len()).sum()
    }

    /// Iterate over all nodes in reading order, with their page index and
    /// position within the page.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (usize, usize, &SemanticNode)> {
        self.pages.iter().flat_map(|page| {
            page.nodes
                .iter()
                .enumerate()
                .map(move |(ordinal, node)| (page.index, ordinal, node))
        })
    }

    /// Plain text of the whole document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the document has any content nodes.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

/// A single page in the output tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageNode {
    /// Zero-based page index
    pub index: usize,

    /// Page width in document units
    pub width: f32,

    /// Page height in document units
    pub height: f32,

    /// Semantic nodes in reading order
    pub nodes: Vec<SemanticNode>,
}

impl PageNode {
    /// Create an empty page node.
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            nodes: Vec::new(),
        }
    }

    /// Plain text of the page.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document-level info carried into the accessibility report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title from metadata
    pub title: Option<String>,

    /// Declared language from metadata
    pub language: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// Number of pages
    pub page_count: usize,

    /// Total extractable characters across all pages
    pub text_char_count: usize,

    /// Whether the document appears image-based and needs OCR
    /// (average under 100 extractable characters per page)
    pub needs_ocr: bool,
}

impl DocumentInfo {
    /// Check if the document has a non-empty title.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Check if the document declares a language.
    pub fn has_language(&self) -> bool {
        self.language
            .as_deref()
            .is_some_and(|l| !l.trim().is_empty())
    }
}
