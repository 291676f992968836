//! Semantic node types.

use serde::{Deserialize, Serialize};

use super::image::ImageNode;
use super::table::Table;

/// A classified structural unit in the output tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SemanticNode {
    /// A heading with level 1-6
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Inline content
        content: Vec<InlineContent>,
    },

    /// A body paragraph
    Paragraph {
        /// Inline content
        content: Vec<InlineContent>,
    },

    /// A list of items
    List {
        /// Whether the list is ordered (numbered) or bulleted
        ordered: bool,
        /// List items in order
        items: Vec<ListItem>,
    },

    /// A table
    Table(Table),

    /// An image with resolved alternative text
    Image(ImageNode),
}

impl SemanticNode {
    /// Create a heading node from plain text, clamping the level to 1-6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        SemanticNode::Heading {
            level: level.clamp(1, 6),
            content: vec![InlineContent::text(text)],
        }
    }

    /// Create a paragraph node from plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        SemanticNode::Paragraph {
            content: vec![InlineContent::text(text)],
        }
    }

    /// Check if this node is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, SemanticNode::Heading { .. })
    }

    /// Get the heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            SemanticNode::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Plain text content of the node.
    pub fn plain_text(&self) -> String {
        match self {
            SemanticNode::Heading { content, .. } | SemanticNode::Paragraph { content } => {
                join_inline(content)
            }
            SemanticNode::List { items, .. } => items
                .iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            SemanticNode::Table(table) => table.plain_text(),
            SemanticNode::Image(image) => image.alt_text.clone(),
        }
    }

    /// Iterate over inline hyperlinks in this node.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        let content: &[InlineContent] = match self {
            SemanticNode::Heading { content, .. } | SemanticNode::Paragraph { content } => content,
            _ => &[],
        };
        content.iter().filter_map(|c| match c {
            InlineContent::Link { text, url } => Some((text.as_str(), url.as_str())),
            _ => None,
        })
    }
}

/// Inline content within a heading or paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A plain text run
    Text {
        /// The text content
        text: String,
    },

    /// A hyperlink
    Link {
        /// Link text
        text: String,
        /// Target URL
        url: String,
    },
}

impl InlineContent {
    /// Create a text run.
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text { text: text.into() }
    }

    /// Create a hyperlink.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineContent::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    /// The visible text of this run.
    pub fn visible_text(&self) -> &str {
        match self {
            InlineContent::Text { text } | InlineContent::Link { text, .. } => text,
        }
    }
}

/// A single list item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text
    pub text: String,
}

impl ListItem {
    /// Create a new list item.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

fn join_inline(content: &[InlineContent]) -> String {
    let mut out = String::new();
    for c in content {
        let t = c.visible_text();
        if t.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(t);
    }
    out
}
