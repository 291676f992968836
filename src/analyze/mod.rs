//! Structure inference over primitive streams.
//!
//! The analyzer turns an unordered bag of positioned spans into a tagged
//! document tree. A font profile is built first, since classification
//! depends on that global aggregate; pages are then analyzed
//! independently while images resolve alternative text on their own
//! bounded pool. The scorer runs only once the full tree is assembled.

mod fonts;
mod heading;
mod links;
mod options;
mod order;
mod patterns;

pub use fonts::FontProfile;
pub use heading::{HeadingClassifier, HeadingConfig};
pub use links::LinkResolver;
pub use options::AnalyzeOptions;
pub use order::text_order;
pub use patterns::{DetectedPattern, DetectorConfig, PatternDetector};

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::alt::{AltTask, AltTextPool, CancelToken, Captioner, TextRecognizer};
use crate::error::{Result, Warning, WarningKind};
use crate::model::{
    DocumentInfo, DocumentTree, ImageNode, ListItem, PageNode, SemanticNode,
};
use crate::report::{self, AccessibilityReport};
use crate::source::{self, BBox, PageContent, RawDocument, TextBlock};

/// Average extractable characters per page below which a document is
/// flagged as needing OCR.
const NEEDS_OCR_CHARS_PER_PAGE: f32 = 100.0;

/// The complete result of analyzing one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// The tagged document tree
    pub tree: DocumentTree,

    /// The accessibility report
    pub report: AccessibilityReport,

    /// Tool-health diagnostics collected along the way
    pub warnings: Vec<Warning>,
}

/// Document analyzer.
///
/// Holds configuration only; all per-document state (font profile, tree)
/// is created fresh per call and discarded afterward.
pub struct Analyzer {
    options: AnalyzeOptions,
}

impl Analyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::with_options(AnalyzeOptions::default())
    }

    /// Create an analyzer with custom options.
    pub fn with_options(options: AnalyzeOptions) -> Self {
        Self { options }
    }

    /// Analyze a document.
    ///
    /// The OCR and captioning collaborators are shared with the alt-text
    /// worker threads, hence the `Arc`s (the same seam shape the rest of
    /// the crate uses for pluggable collaborators).
    pub fn analyze(
        &self,
        doc: &RawDocument,
        ocr: Arc<dyn TextRecognizer>,
        captioner: Arc<dyn Captioner>,
    ) -> Result<Analysis> {
        self.analyze_with_cancel(doc, ocr, captioner, &CancelToken::new())
    }

    /// Analyze a document with cooperative cancellation.
    ///
    /// Cancelling aborts in-flight image tasks; unresolved images receive
    /// fallback alternative text, so the returned tree is always complete.
    pub fn analyze_with_cancel(
        &self,
        doc: &RawDocument,
        ocr: Arc<dyn TextRecognizer>,
        captioner: Arc<dyn Captioner>,
        cancel: &CancelToken,
    ) -> Result<Analysis> {
        source::validate(doc)?;

        let profile = FontProfile::from_document(doc);
        let classifier = HeadingClassifier::with_config(self.options.heading.clone());
        let detector = PatternDetector::with_config(self.options.detector.clone());
        let resolver = LinkResolver::new();

        let tasks: Vec<AltTask> = doc
            .pages
            .iter()
            .flat_map(|page| {
                page.images.iter().enumerate().map(|(index, image)| AltTask {
                    page: page.index,
                    index,
                    image: image.clone(),
                })
            })
            .collect();

        let mut warnings: Vec<Warning> = Vec::new();

        // Images resolve on their own bounded pool while page text is
        // analyzed; neither blocks the other.
        let (page_results, alt_result) = std::thread::scope(|scope| {
            let pool = AltTextPool::new(self.options.pool_config());
            let cancel = cancel.clone();
            let handle =
                scope.spawn(move || pool.resolve(tasks, ocr, captioner, &cancel));

            let page_results: Vec<(PageNode, Vec<Warning>)> = if self.options.parallel {
                doc.pages
                    .par_iter()
                    .map(|page| self.analyze_page(page, &profile, &classifier, &detector, &resolver))
                    .collect()
            } else {
                doc.pages
                    .iter()
                    .map(|page| self.analyze_page(page, &profile, &classifier, &detector, &resolver))
                    .collect()
            };

            (page_results, handle.join())
        });

        let mut pages = Vec::with_capacity(page_results.len());
        for (page, page_warnings) in page_results {
            pages.push(page);
            warnings.extend(page_warnings);
        }

        let mut alt_map: HashMap<(usize, usize), (String, crate::model::AltTextSource)> =
            HashMap::new();
        match alt_result {
            Ok((resolved, alt_warnings)) => {
                for alt in resolved {
                    alt_map.insert((alt.page, alt.index), (alt.alt_text, alt.source));
                }
                warnings.extend(alt_warnings);
            }
            Err(_) => {
                warnings.push(Warning::new(
                    WarningKind::ImageResolutionFailure,
                    "alt-text pool aborted; fallback descriptions used",
                ));
            }
        }

        for page in &mut pages {
            for node in &mut page.nodes {
                if let SemanticNode::Image(image) = node {
                    match alt_map.remove(&(image.page, image.index)) {
                        Some((alt_text, alt_source)) => {
                            image.alt_text = alt_text;
                            image.source = alt_source;
                        }
                        None => {
                            image.alt_text = crate::alt::fallback_description(
                                image.width,
                                image.height,
                            );
                            image.source = crate::model::AltTextSource::Fallback;
                        }
                    }
                }
            }
        }

        let info = build_info(doc);
        let tree = DocumentTree { info, pages };
        let report = report::score(&tree)?;

        Ok(Analysis {
            tree,
            report,
            warnings,
        })
    }

    /// Analyze one page: classify its blocks and order everything.
    fn analyze_page(
        &self,
        page: &PageContent,
        profile: &FontProfile,
        classifier: &HeadingClassifier,
        detector: &PatternDetector,
        resolver: &LinkResolver,
    ) -> (PageNode, Vec<Warning>) {
        let mut warnings = Vec::new();

        // Reading order first; pattern detection operates on runs of
        // consecutive ordered blocks.
        let mut blocks: Vec<TextBlock> = Vec::new();
        for idx in order::text_order(page) {
            let block = &page.text_blocks[idx];
            if block.is_empty() {
                continue;
            }
            match block.bbox() {
                Some(bbox) if bbox.is_well_formed() && block.max_font_size().is_finite() => {
                    blocks.push(block.clone());
                }
                _ => {
                    log::warn!(
                        "skipping malformed block on page {}: {:?}",
                        page.index,
                        block.bbox()
                    );
                    warnings.push(
                        Warning::new(
                            WarningKind::ExtractionDegraded,
                            "skipped block with malformed geometry",
                        )
                        .on_page(page.index),
                    );
                }
            }
        }

        let mut nodes: Vec<(Option<BBox>, SemanticNode)> = Vec::new();
        let mut i = 0;
        while i < blocks.len() {
            if let Some(pattern) = detector.detect_at(&blocks, i) {
                let anchor = blocks[i].bbox();
                match pattern {
                    DetectedPattern::List {
                        ordered,
                        items,
                        consumed,
                    } => {
                        nodes.push((
                            anchor,
                            SemanticNode::List {
                                ordered,
                                items: items.into_iter().map(ListItem::new).collect(),
                            },
                        ));
                        i += consumed.max(1);
                    }
                    DetectedPattern::Table { table, consumed } => {
                        nodes.push((anchor, SemanticNode::Table(table)));
                        i += consumed.max(1);
                    }
                }
                continue;
            }

            let block = &blocks[i];
            let content = resolver.resolve_block(block, &page.links);
            if !content.is_empty() {
                let node = match classifier.classify(block, page.height, profile) {
                    Some(level) => SemanticNode::Heading { level, content },
                    None => SemanticNode::Paragraph { content },
                };
                nodes.push((block.bbox(), node));
            }
            i += 1;
        }

        for (index, image) in page.images.iter().enumerate() {
            nodes.push((
                Some(image.bbox),
                SemanticNode::Image(ImageNode::pending(
                    page.index,
                    index,
                    image.width,
                    image.height,
                )),
            ));
        }

        order::sort_by_position(&mut nodes);

        let mut page_node = PageNode::new(page.index, page.width, page.height);
        page_node.nodes = nodes.into_iter().map(|(_, node)| node).collect();
        (page_node, warnings)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build document info from source metadata and text statistics.
fn build_info(doc: &RawDocument) -> DocumentInfo {
    let page_count = doc.page_count();
    let text_char_count = doc.char_count();
    let avg_chars = text_char_count as f32 / page_count.max(1) as f32;

    DocumentInfo {
        title: doc.metadata.title.clone(),
        language: doc.metadata.language.clone(),
        author: doc.metadata.author.clone(),
        created: doc.metadata.created,
        modified: doc.metadata.modified,
        page_count,
        text_char_count,
        needs_ocr: avg_chars < NEEDS_OCR_CHARS_PER_PAGE,
    }
}
