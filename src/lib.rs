//! # pdfa11y
//!
//! Accessibility structure inference and WCAG scoring for extracted PDF
//! content.
//!
//! The library consumes a primitive stream (per-page text spans with
//! font metadata, image blocks, and link annotations, as produced by an
//! external PDF extractor) and infers the semantic structure a tagged
//! document needs: a heading hierarchy, lists, tables, reading order, and
//! hyperlinks. It then walks the finished tree and emits a deterministic
//! accessibility report with WCAG references and a 0-100 score.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pdfa11y::{analyze, NoopCaptioner, NoopRecognizer, RawDocument};
//!
//! fn main() -> pdfa11y::Result<()> {
//!     let data = std::fs::read_to_string("document.json")?;
//!     let doc: RawDocument = serde_json::from_str(&data)?;
//!
//!     let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner))?;
//!     println!("score: {}", analysis.report.score);
//!     for issue in &analysis.report.issues {
//!         println!("[WCAG {}] {}", issue.wcag_reference, issue.description);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multi-signal heading detection**: font size relative to a
//!   document-wide profile, weight, position, and text shape
//! - **List and table inference** from delimiter and bullet patterns
//! - **Hyperlink resolution** from annotations and bare URLs
//! - **Alt-text pipeline**: OCR, captioning, and dimension fallback on a
//!   bounded worker pool with per-image timeouts
//! - **Deterministic WCAG scoring** with capped penalties
//! - **Accessible HTML and JSON rendering**

use std::sync::Arc;

pub mod alt;
pub mod analyze;
pub mod error;
pub mod model;
pub mod remediate;
pub mod render;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use alt::{
    AltTextPool, CancelToken, Captioner, CollaboratorError, NoopCaptioner, NoopRecognizer,
    PoolConfig, TextRecognizer,
};
pub use analyze::{Analysis, AnalyzeOptions, Analyzer, FontProfile, HeadingConfig};
pub use error::{Error, Result, Warning, WarningKind};
pub use model::{
    AltTextSource, DocumentInfo, DocumentTree, ImageNode, InlineContent, ListItem, PageNode,
    SemanticNode, Table, TableCell, TableRow,
};
pub use render::{JsonFormat, RenderOptions};
pub use report::{AccessibilityReport, Issue, IssueKind};
pub use source::{
    BBox, ImageBlock, LinkAnnotation, PageContent, RawDocument, Span, SourceMetadata, TextBlock,
};

/// Analyze a document with default options.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use pdfa11y::{analyze, NoopCaptioner, NoopRecognizer, RawDocument};
///
/// let doc = RawDocument::new();
/// let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
/// assert!(analysis.report.score <= 100);
/// ```
pub fn analyze(
    doc: &RawDocument,
    ocr: Arc<dyn TextRecognizer>,
    captioner: Arc<dyn Captioner>,
) -> Result<Analysis> {
    Analyzer::new().analyze(doc, ocr, captioner)
}

/// Analyze a document with custom options.
pub fn analyze_with_options(
    doc: &RawDocument,
    ocr: Arc<dyn TextRecognizer>,
    captioner: Arc<dyn Captioner>,
    options: AnalyzeOptions,
) -> Result<Analysis> {
    Analyzer::with_options(options).analyze(doc, ocr, captioner)
}

/// Score an already assembled document tree.
///
/// The scorer is pure and idempotent: scoring the same tree twice yields
/// an identical report.
pub fn score_tree(tree: &DocumentTree) -> Result<AccessibilityReport> {
    report::score(tree)
}

/// Builder for analyzing and rendering documents.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use pdfa11y::{Pdfa11y, NoopCaptioner, NoopRecognizer, RawDocument};
///
/// let doc = RawDocument::new();
/// let html = Pdfa11y::new()
///     .sequential()
///     .with_fallback_lang("fr")
///     .analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner))?
///     .to_html();
/// # Ok::<(), pdfa11y::Error>(())
/// ```
pub struct Pdfa11y {
    analyze_options: AnalyzeOptions,
    render_options: RenderOptions,
}

impl Pdfa11y {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            analyze_options: AnalyzeOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Disable page-level parallelism.
    pub fn sequential(mut self) -> Self {
        self.analyze_options = self.analyze_options.sequential();
        self
    }

    /// Set heading classifier calibration.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.analyze_options = self.analyze_options.with_heading_config(config);
        self
    }

    /// Set the number of alt-text workers.
    pub fn with_image_workers(mut self, workers: usize) -> Self {
        self.analyze_options = self.analyze_options.with_image_workers(workers);
        self
    }

    /// Set the per-image deadline.
    pub fn with_image_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.analyze_options = self.analyze_options.with_image_timeout(timeout);
        self
    }

    /// Set the fallback language used in rendered output.
    pub fn with_fallback_lang(mut self, lang: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_fallback_lang(lang);
        self
    }

    /// Analyze a document and return a result wrapper.
    pub fn analyze(
        self,
        doc: &RawDocument,
        ocr: Arc<dyn TextRecognizer>,
        captioner: Arc<dyn Captioner>,
    ) -> Result<Pdfa11yResult> {
        let analysis = Analyzer::with_options(self.analyze_options).analyze(doc, ocr, captioner)?;
        Ok(Pdfa11yResult {
            analysis,
            render_options: self.render_options,
        })
    }
}

impl Default for Pdfa11y {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of analyzing a document through the [`Pdfa11y`] builder.
pub struct Pdfa11yResult {
    /// The analysis
    pub analysis: Analysis,
    render_options: RenderOptions,
}

impl Pdfa11yResult {
    /// Render the tree as accessible HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.analysis.tree, &self.render_options)
    }

    /// Serialize the full analysis as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.analysis, format)
    }

    /// The accessibility report.
    pub fn report(&self) -> &AccessibilityReport {
        &self.analysis.report
    }

    /// The document tree.
    pub fn tree(&self) -> &DocumentTree {
        &self.analysis.tree
    }

    /// Diagnostics collected during analysis.
    pub fn warnings(&self) -> &[Warning] {
        &self.analysis.warnings
    }
}
