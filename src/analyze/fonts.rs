//! Document-wide font statistics.

use std::collections::HashMap;

use crate::source::RawDocument;

/// Document-scoped font-size statistics used as a relative reference
/// frame for heading classification.
///
/// Built once from all text blocks before any classification begins;
/// read-only afterward. A fresh profile is built for every document.
#[derive(Debug, Clone)]
pub struct FontProfile {
    /// Observed sizes with frequency, bucketed to 0.1pt
    histogram: HashMap<i32, usize>,

    /// Unique sizes, ascending
    sizes: Vec<f32>,

    /// Document-wide maximum size
    max_size: f32,

    /// Mean size across all span observations
    mean_size: f32,

    /// The largest distinct sizes (up to 3), descending, used as anchors
    /// for heading-level inference
    anchors: Vec<f32>,
}

const BUCKET_SCALE: f32 = 10.0;

impl FontProfile {
    /// Build a profile from every span in the document.
    pub fn from_document(doc: &RawDocument) -> Self {
        let mut histogram: HashMap<i32, usize> = HashMap::new();

        for page in &doc.pages {
            for block in &page.text_blocks {
                for span in &block.spans {
                    if !span.font_size.is_finite() || span.font_size <= 0.0 || span.is_empty() {
                        continue;
                    }
                    let key = (span.font_size * BUCKET_SCALE).round() as i32;
                    *histogram.entry(key).or_insert(0) += 1;
                }
            }
        }

        let mut sizes: Vec<f32> = histogram
            .keys()
            .map(|k| *k as f32 / BUCKET_SCALE)
            .collect();
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let observations: usize = histogram.values().sum();
        let mean_size = if observations > 0 {
            let weighted: f32 = histogram
                .iter()
                .map(|(k, count)| (*k as f32 / BUCKET_SCALE) * *count as f32)
                .sum();
            weighted / observations as f32
        } else {
            0.0
        };

        let max_size = sizes.last().copied().unwrap_or(0.0);
        let anchors: Vec<f32> = sizes.iter().rev().take(3).copied().collect();

        Self {
            histogram,
            sizes,
            max_size,
            mean_size,
            anchors,
        }
    }

    /// Document-wide maximum span size.
    pub fn max_size(&self) -> f32 {
        self.max_size
    }

    /// Mean span size.
    pub fn mean_size(&self) -> f32 {
        self.mean_size
    }

    /// The ranked set of large sizes (up to 3 distinct), descending.
    pub fn anchors(&self) -> &[f32] {
        &self.anchors
    }

    /// Unique sizes, ascending.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Whether the document shows any size variation at all.
    ///
    /// With fewer than two distinct sizes, size carries no signal and the
    /// classifier must not use it (otherwise every block would look like
    /// the document maximum).
    pub fn has_size_variation(&self) -> bool {
        self.sizes.len() >= 2
    }

    /// Check if a size ties the document maximum, within the lenient
    /// half-point slack producers commonly need.
    pub fn is_document_max(&self, size: f32, slack: f32) -> bool {
        self.max_size > 0.0 && size >= self.max_size - slack
    }

    /// Ratio of a size to the document mean (0 when the mean is unknown).
    pub fn ratio_to_mean(&self, size: f32) -> f32 {
        if self.mean_size > 0.0 {
            size / self.mean_size
        } else {
            0.0
        }
    }

    /// How many spans were observed at a given size.
    pub fn frequency(&self, size: f32) -> usize {
        let key = (size * BUCKET_SCALE).round() as i32;
        self.histogram.get(&key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BBox, PageContent, Span, TextBlock};

    fn doc_with_sizes(sizes: &[(f32, usize)]) -> RawDocument {
        let mut page = PageContent::new(0, 612.0, 792.0);
        for &(size, count) in sizes {
            for _ in 0..count {
                page.text_blocks.push(TextBlock::new(vec![Span::new(
                    "text",
                    "Helvetica",
                    size,
                    BBox::new(0.0, 0.0, 40.0, size),
                    0,
                )]));
            }
        }
        let mut doc = RawDocument::new();
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_profile_statistics() {
        let doc = doc_with_sizes(&[(12.0, 100), (18.0, 5), (24.0, 3)]);
        let profile = FontProfile::from_document(&doc);

        assert_eq!(profile.max_size(), 24.0);
        assert!(profile.mean_size() > 12.0 && profile.mean_size() < 13.5);
        assert_eq!(profile.anchors(), &[24.0, 18.0, 12.0]);
        assert!(profile.has_size_variation());
        assert_eq!(profile.frequency(12.0), 100);
    }

    #[test]
    fn test_single_size_has_no_variation() {
        let doc = doc_with_sizes(&[(12.0, 50)]);
        let profile = FontProfile::from_document(&doc);
        assert!(!profile.has_size_variation());
        assert_eq!(profile.max_size(), 12.0);
    }

    #[test]
    fn test_empty_document() {
        let profile = FontProfile::from_document(&RawDocument::new());
        assert!(!profile.has_size_variation());
        assert_eq!(profile.max_size(), 0.0);
        assert_eq!(profile.ratio_to_mean(12.0), 0.0);
    }

    #[test]
    fn test_document_max_slack() {
        let doc = doc_with_sizes(&[(12.0, 10), (24.0, 1)]);
        let profile = FontProfile::from_document(&doc);
        assert!(profile.is_document_max(24.0, 0.5));
        assert!(profile.is_document_max(23.6, 0.5));
        assert!(!profile.is_document_max(22.0, 0.5));
    }
}
