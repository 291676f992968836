//! Multi-signal heading classification.
//!
//! Font metadata alone is unreliable across PDF producers: raw size flags
//! large pull-quotes as headings and misses styled-but-not-enlarged section
//! labels. The classifier therefore scores several independent signals and
//! only then maps the score (together with the block's size relative to
//! the document profile) to a heading level.

use regex::Regex;

use crate::source::TextBlock;

use super::fonts::FontProfile;

/// Calibration constants for heading classification.
///
/// The thresholds are empirically tuned and exposed here rather than
/// hard-coded so they can be recalibrated against a labeled corpus.
#[derive(Debug, Clone)]
pub struct HeadingConfig {
    /// Size ratio to the document mean that scores +2
    pub large_ratio: f32,

    /// Size ratio to the document mean that scores +1
    pub moderate_ratio: f32,

    /// Fraction of the page height counted as the top region
    pub top_region: f32,

    /// Character count under which text scores +1
    pub short_text_chars: usize,

    /// Word count at or under which text scores +1
    pub max_words: usize,

    /// Character count above which a block is never a heading
    pub max_heading_chars: usize,

    /// Score at which a block is promoted to a heading
    pub promote_score: i32,

    /// Score at which a block is considered when its size also stands out
    pub consider_score: i32,

    /// Fraction of the document maximum size counted as "near maximum"
    pub near_max_ratio: f32,

    /// Slack when comparing against the document maximum size
    pub max_size_slack: f32,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            large_ratio: 1.3,
            moderate_ratio: 1.1,
            top_region: 0.30,
            short_text_chars: 50,
            max_words: 8,
            max_heading_chars: 200,
            promote_score: 4,
            consider_score: 2,
            near_max_ratio: 0.95,
            max_size_slack: 0.5,
        }
    }
}

/// Classifies text blocks as headings or body text.
pub struct HeadingClassifier {
    config: HeadingConfig,
    enumerator: Regex,
}

impl HeadingClassifier {
    /// Create a classifier with default calibration.
    pub fn new() -> Self {
        Self::with_config(HeadingConfig::default())
    }

    /// Create a classifier with custom calibration.
    pub fn with_config(config: HeadingConfig) -> Self {
        Self {
            config,
            enumerator: Regex::new(r"^\d+[.)]\s").expect("enumerator pattern is valid"),
        }
    }

    /// Classify a block against the document profile.
    ///
    /// Returns the heading level (1-6) or `None` for body text. Empty
    /// blocks and blocks longer than the heading cutoff are never
    /// headings, regardless of score.
    pub fn classify(
        &self,
        block: &TextBlock,
        page_height: f32,
        profile: &FontProfile,
    ) -> Option<u8> {
        let text = block.text();
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.chars().count() > self.config.max_heading_chars {
            return None;
        }

        let size = block.max_font_size();
        let score = self.score(block, trimmed, page_height, profile);

        // Text at the document-maximum size is always a heading when the
        // document shows size variation; the score picks h1 vs h2.
        if profile.has_size_variation()
            && profile.is_document_max(size, self.config.max_size_slack)
        {
            return Some(if score >= self.config.consider_score {
                1
            } else {
                2
            });
        }

        if score >= self.config.promote_score {
            if profile.has_size_variation()
                && size >= self.config.near_max_ratio * profile.max_size()
            {
                return Some(2);
            }
            return Some(3);
        }

        if score >= self.config.consider_score
            && profile.has_size_variation()
            && profile.ratio_to_mean(size) >= self.config.large_ratio
        {
            return Some(3);
        }

        None
    }

    /// Weighted signal score for a block.
    pub fn score(
        &self,
        block: &TextBlock,
        trimmed: &str,
        page_height: f32,
        profile: &FontProfile,
    ) -> i32 {
        let mut score = 0;

        if profile.has_size_variation() {
            let ratio = profile.ratio_to_mean(block.max_font_size());
            if ratio >= self.config.large_ratio {
                score += 2;
            } else if ratio >= self.config.moderate_ratio {
                score += 1;
            }
        }

        if block.has_bold() {
            score += 2;
        }

        if page_height > 0.0 {
            if let Some(bbox) = block.bbox() {
                if bbox.y0 < page_height * self.config.top_region {
                    score += 1;
                }
            }
        }

        if trimmed.chars().count() < self.config.short_text_chars {
            score += 1;
        }

        if trimmed.chars().count() > 3 && is_all_uppercase(trimmed) {
            score += 1;
        }

        if trimmed.ends_with(':') {
            score += 1;
        }

        if self.enumerator.is_match(trimmed) {
            score += 1;
        }

        if trimmed.split_whitespace().count() <= self.config.max_words {
            score += 1;
        }

        score
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn is_all_uppercase(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty() && letters.iter().all(|c| c.is_uppercase())
}
