//! Text spans, blocks, and bounding boxes from the primitive source.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page coordinates.
///
/// The origin is the top-left corner of the page; `y` grows downward, so
/// `y0` is the top edge and `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Center point of the box.
    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if a point falls inside the box (edges inclusive).
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Check that all coordinates are finite and edges are ordered.
    pub fn is_well_formed(&self) -> bool {
        self.x0.is_finite()
            && self.y0.is_finite()
            && self.x1.is_finite()
            && self.y1.is_finite()
            && self.x1 >= self.x0
            && self.y1 >= self.y0
    }
}

/// A styled run of text with position and font metadata.
///
/// Spans are immutable once produced by the primitive source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Font size in document units
    pub font_size: f32,

    /// Bold style flag
    #[serde(default)]
    pub bold: bool,

    /// Italic style flag
    #[serde(default)]
    pub italic: bool,

    /// Bounding box in page coordinates
    pub bbox: BBox,

    /// Zero-based page index
    pub page: usize,
}

impl Span {
    /// Create a new span, inferring bold/italic from the font name.
    ///
    /// Some producers omit explicit style flags; the font name then carries
    /// the style ("Helvetica-Bold", "Times-Oblique").
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        font_size: f32,
        bbox: BBox,
        page: usize,
    ) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let italic = lower.contains("italic") || lower.contains("oblique");

        Self {
            text: text.into(),
            font_name,
            font_size,
            bold,
            italic,
            bbox,
            page,
        }
    }

    /// Check if this span is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A paragraph-like grouping of spans on one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// The spans in this block, in source order
    pub spans: Vec<Span>,
}

impl TextBlock {
    /// Create a new text block from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Combined text of all spans, with single spaces between runs.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for span in &self.spans {
            let t = span.text.trim();
            if t.is_empty() {
                continue;
            }
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(t);
        }
        result
    }

    /// Split the block into visual lines by grouping spans on a shared
    /// baseline. Spans whose top edges lie within half the smaller font
    /// size of each other are treated as one line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_y: Option<f32> = None;

        for span in &self.spans {
            let t = span.text.trim();
            if t.is_empty() {
                continue;
            }
            let tolerance = span.font_size.max(1.0) * 0.5;
            match current_y {
                Some(y) if (span.bbox.y0 - y).abs() <= tolerance => {
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(t);
                }
                _ => {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current_y = Some(span.bbox.y0);
                    current.push_str(t);
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Aggregate bounding box of all spans.
    pub fn bbox(&self) -> Option<BBox> {
        let mut iter = self.spans.iter().map(|s| s.bbox);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(&b)))
    }

    /// Largest span font size in the block.
    pub fn max_font_size(&self) -> f32 {
        self.spans
            .iter()
            .map(|s| s.font_size)
            .fold(0.0_f32, f32::max)
    }

    /// Dominant font size, weighted by text length.
    pub fn dominant_font_size(&self) -> f32 {
        let total_chars: usize = self.spans.iter().map(|s| s.text.len()).sum();
        if total_chars == 0 {
            return self.max_font_size();
        }
        let weighted: f32 = self
            .spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        weighted / total_chars as f32
    }

    /// Check if any span in the block is bold.
    pub fn has_bold(&self) -> bool {
        self.spans.iter().any(|s| s.bold)
    }

    /// Check if the block text is entirely uppercase.
    pub fn is_uppercase(&self) -> bool {
        let text = self.text();
        let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
        !letters.is_empty() && letters.iter().all(|c| c.is_uppercase())
    }

    /// Page index of the block (taken from its first span).
    pub fn page(&self) -> Option<usize> {
        self.spans.first().map(|s| s.page)
    }

    /// Check if the block has no visible text.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.is_empty())
    }
}
