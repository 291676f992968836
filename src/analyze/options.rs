//! Analysis options and configuration.

use std::time::Duration;

use crate::alt::PoolConfig;

use super::heading::HeadingConfig;
use super::patterns::DetectorConfig;

/// Options controlling document analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Whether pages are analyzed in parallel
    pub parallel: bool,

    /// Heading classifier calibration
    pub heading: HeadingConfig,

    /// List/table detection configuration
    pub detector: DetectorConfig,

    /// Number of alt-text worker threads
    pub image_workers: usize,

    /// Per-image deadline for OCR/captioning
    pub image_timeout: Duration,

    /// Minimum OCR text length to accept as alternative text
    pub min_ocr_chars: usize,
}

impl AnalyzeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable page-level parallelism.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set heading classifier calibration.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.heading = config;
        self
    }

    /// Set list/table detector configuration.
    pub fn with_detector_config(mut self, config: DetectorConfig) -> Self {
        self.detector = config;
        self
    }

    /// Set the number of alt-text workers.
    pub fn with_image_workers(mut self, workers: usize) -> Self {
        self.image_workers = workers.max(1);
        self
    }

    /// Set the per-image deadline.
    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// Set the minimum accepted OCR text length.
    pub fn with_min_ocr_chars(mut self, chars: usize) -> Self {
        self.min_ocr_chars = chars;
        self
    }

    /// Derive the alt-text pool configuration.
    pub(crate) fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.image_workers,
            task_timeout: self.image_timeout,
            min_ocr_chars: self.min_ocr_chars,
        }
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        let pool = PoolConfig::default();
        Self {
            parallel: true,
            heading: HeadingConfig::default(),
            detector: DetectorConfig::default(),
            image_workers: pool.workers,
            image_timeout: pool.task_timeout,
            min_ocr_chars: pool.min_ocr_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = AnalyzeOptions::new()
            .sequential()
            .with_image_workers(2)
            .with_image_timeout(Duration::from_secs(5))
            .with_min_ocr_chars(4);

        assert!(!options.parallel);
        assert_eq!(options.image_workers, 2);
        assert_eq!(options.image_timeout, Duration::from_secs(5));
        assert_eq!(options.min_ocr_chars, 4);
    }

    #[test]
    fn test_workers_floor_at_one() {
        let options = AnalyzeOptions::new().with_image_workers(0);
        assert_eq!(options.image_workers, 1);
    }

    #[test]
    fn test_defaults() {
        let options = AnalyzeOptions::default();
        assert!(options.parallel);
        assert_eq!(options.min_ocr_chars, 10);
    }
}
