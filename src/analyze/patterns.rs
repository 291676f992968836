//! List and table pattern detection.
//!
//! Scans a forward window of consecutive text blocks for delimiter and
//! bullet patterns. Detection never destroys information: when a candidate
//! run fails the consistency checks, no structure is emitted and every
//! block in the run falls back to normal heading/paragraph classification.

use regex::Regex;

use crate::model::{Table, TableCell, TableRow};
use crate::source::TextBlock;

/// Configuration for pattern detection.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Maximum number of consecutive blocks examined per call
    pub window: usize,

    /// Minimum rows for an accepted table
    pub min_table_rows: usize,

    /// Minimum cells per table row
    pub min_cells: usize,

    /// Maximum allowed difference between the widest and narrowest row
    pub max_column_skew: usize,

    /// Character limit for header-row cells
    pub header_cell_chars: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window: 20,
            min_table_rows: 2,
            min_cells: 2,
            max_column_skew: 1,
            header_cell_chars: 50,
        }
    }
}

/// A structure recognized at some position in the block sequence.
#[derive(Debug, Clone)]
pub enum DetectedPattern {
    /// A bulleted or numbered list contained in a single block
    List {
        /// Ordered (numbered) vs bulleted
        ordered: bool,
        /// Item texts
        items: Vec<String>,
        /// Number of blocks consumed (always 1 for lists)
        consumed: usize,
    },

    /// A table spanning one or more consecutive blocks
    Table {
        /// The assembled table
        table: Table,
        /// Number of blocks consumed
        consumed: usize,
    },
}

/// Detects list and table patterns in runs of consecutive text blocks.
pub struct PatternDetector {
    config: DetectorConfig,
    enumerator: Regex,
    multi_space: Regex,
}

impl PatternDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a detector with custom configuration.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            config,
            enumerator: Regex::new(r"^\d+[.)]\s").expect("enumerator pattern is valid"),
            multi_space: Regex::new(r" {3,}").expect("spacing pattern is valid"),
        }
    }

    /// Try to recognize a structure starting at `start`.
    ///
    /// Tables are tried first since a delimiter row could also look like
    /// prose; lists only consume a single block.
    pub fn detect_at(&self, blocks: &[TextBlock], start: usize) -> Option<DetectedPattern> {
        if start >= blocks.len() {
            return None;
        }

        if let Some((table, consumed)) = self.detect_table(blocks, start) {
            log::debug!(
                "detected {}x{} table at block {}",
                table.row_count(),
                table.column_count(),
                start
            );
            return Some(DetectedPattern::Table { table, consumed });
        }

        let block = &blocks[start];

        if let Some(items) = self.detect_bullet_list(block) {
            log::debug!("detected bullet list ({} items) at block {}", items.len(), start);
            return Some(DetectedPattern::List {
                ordered: false,
                items,
                consumed: 1,
            });
        }

        if let Some(items) = self.detect_ordered_list(block) {
            log::debug!(
                "detected numbered list ({} items) at block {}",
                items.len(),
                start
            );
            return Some(DetectedPattern::List {
                ordered: true,
                items,
                consumed: 1,
            });
        }

        None
    }

    /// Recognize a bulleted list inside one block.
    ///
    /// The block qualifies when splitting its text on the normalized
    /// bullet glyph yields at least two non-empty items.
    fn detect_bullet_list(&self, block: &TextBlock) -> Option<Vec<String>> {
        let text = normalize_bullets(&block.text());
        if !text.contains('\u{2022}') {
            return None;
        }

        let items: Vec<String> = text
            .split('\u{2022}')
            .map(|item| item.trim_matches(|c: char| c.is_whitespace() || c == ';' || c == ':'))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        if items.len() >= 2 {
            Some(items)
        } else {
            None
        }
    }

    /// Recognize a numbered list inside one block.
    ///
    /// Qualifies when at least half of the block's visual lines start with
    /// an enumerator (`1.`, `2)`, ...), with a minimum of two such lines.
    fn detect_ordered_list(&self, block: &TextBlock) -> Option<Vec<String>> {
        let lines = block.lines();
        if lines.len() < 2 {
            return None;
        }

        let matching: Vec<&String> = lines
            .iter()
            .filter(|line| self.enumerator.is_match(line))
            .collect();

        if matching.len() < 2 || matching.len() * 2 < lines.len() {
            return None;
        }

        let items: Vec<String> = matching
            .iter()
            .map(|line| self.enumerator.replace(line, "").trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();

        if items.len() >= 2 {
            Some(items)
        } else {
            None
        }
    }

    /// Recognize a delimiter table starting at `start`.
    ///
    /// Collects the run of consecutive blocks (bounded by the window) that
    /// split into at least `min_cells` cells, then checks row-count and
    /// column-consistency requirements over the whole run.
    fn detect_table(&self, blocks: &[TextBlock], start: usize) -> Option<(Table, usize)> {
        let end = (start + self.config.window).min(blocks.len());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for block in &blocks[start..end] {
            match self.split_cells(&block.text()) {
                Some(cells) => rows.push(cells),
                None => break,
            }
        }

        if rows.len() < self.config.min_table_rows {
            return None;
        }

        let min_cols = rows.iter().map(Vec::len).min().unwrap_or(0);
        let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if max_cols - min_cols > self.config.max_column_skew {
            log::debug!(
                "rejecting table candidate at block {}: column counts {}..{} too inconsistent",
                start,
                min_cols,
                max_cols
            );
            return None;
        }

        let consumed = rows.len();
        let has_header = rows.len() >= 2
            && rows[0].len() == rows[1].len()
            && rows[0]
                .iter()
                .all(|cell| cell.chars().count() < self.config.header_cell_chars);

        let mut table = Table::new();
        table.header_rows = u8::from(has_header);
        for (row_idx, cells) in rows.into_iter().enumerate() {
            let cells: Vec<TableCell> = cells.into_iter().map(TableCell::new).collect();
            let row = if row_idx == 0 && has_header {
                TableRow::header(cells)
            } else {
                TableRow::new(cells)
            };
            table.add_row(row);
        }

        Some((table, consumed))
    }

    /// Split a row of text into cells on tab, pipe, or 3+ spaces.
    ///
    /// Returns `None` when the text does not yield enough cells for a
    /// table row.
    fn split_cells(&self, text: &str) -> Option<Vec<String>> {
        let cells: Vec<String> = if text.contains('\t') {
            text.split('\t').map(str::trim).map(str::to_string).collect()
        } else if text.contains('|') {
            text.split('|').map(str::trim).map(str::to_string).collect()
        } else if self.multi_space.is_match(text) {
            self.multi_space
                .split(text)
                .map(str::trim)
                .map(str::to_string)
                .collect()
        } else {
            return None;
        };

        let cells: Vec<String> = cells.into_iter().filter(|c| !c.is_empty()).collect();
        if cells.len() >= self.config.min_cells {
            Some(cells)
        } else {
            None
        }
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize producer-specific bullet characters to a single glyph.
pub fn normalize_bullets(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{f0b7}' | '\u{2023}' | '\u{25aa}' | '\u{25cf}' | '\u{25e6}' | '\u{2043}' => {
                '\u{2022}'
            }
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BBox, Span};

    fn block(text: &str) -> TextBlock {
        block_at(text, 0.0)
    }

    fn block_at(text: &str, y: f32) -> TextBlock {
        TextBlock::new(vec![Span::new(
            text,
            "Helvetica",
            12.0,
            BBox::new(72.0, y, 400.0, y + 12.0),
            0,
        )])
    }

    fn multiline_block(lines: &[&str]) -> TextBlock {
        let spans = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                Span::new(
                    *line,
                    "Helvetica",
                    12.0,
                    BBox::new(72.0, 100.0 + i as f32 * 20.0, 400.0, 112.0 + i as f32 * 20.0),
                    0,
                )
            })
            .collect();
        TextBlock::new(spans)
    }

    #[test]
    fn test_bullet_list() {
        let detector = PatternDetector::new();
        let blocks = vec![block("\u{2022} First item \u{2022} Second item \u{2022} Third")];
        match detector.detect_at(&blocks, 0) {
            Some(DetectedPattern::List {
                ordered,
                items,
                consumed,
            }) => {
                assert!(!ordered);
                assert_eq!(items, vec!["First item", "Second item", "Third"]);
                assert_eq!(consumed, 1);
            }
            other => panic!("expected bullet list, got {:?}", other),
        }
    }

    #[test]
    fn test_private_use_bullets_normalized() {
        let detector = PatternDetector::new();
        let blocks = vec![block("\u{f0b7} Alpha \u{f0b7} Beta")];
        assert!(matches!(
            detector.detect_at(&blocks, 0),
            Some(DetectedPattern::List { ordered: false, .. })
        ));
    }

    #[test]
    fn test_single_bullet_is_not_a_list() {
        let detector = PatternDetector::new();
        let blocks = vec![block("\u{2022} only one item")];
        assert!(detector.detect_at(&blocks, 0).is_none());
    }

    #[test]
    fn test_numbered_list() {
        let detector = PatternDetector::new();
        let blocks = vec![multiline_block(&["1. Setup", "2. Configure", "3. Run"])];
        match detector.detect_at(&blocks, 0) {
            Some(DetectedPattern::List { ordered, items, .. }) => {
                assert!(ordered);
                assert_eq!(items, vec!["Setup", "Configure", "Run"]);
            }
            other => panic!("expected numbered list, got {:?}", other),
        }
    }

    #[test]
    fn test_numbered_minority_is_not_a_list() {
        let detector = PatternDetector::new();
        let blocks = vec![multiline_block(&[
            "1. One numbered line",
            "plain prose line",
            "another plain line",
            "and one more line",
        ])];
        assert!(detector.detect_at(&blocks, 0).is_none());
    }

    #[test]
    fn test_pipe_table_with_header() {
        let detector = PatternDetector::new();
        let blocks = vec![
            block_at("Name | Age | City", 100.0),
            block_at("Alice | 30 | Lyon", 120.0),
            block_at("Bob | 25 | Paris", 140.0),
            block_at("This is a regular paragraph after the table.", 160.0),
        ];
        match detector.detect_at(&blocks, 0) {
            Some(DetectedPattern::Table { table, consumed }) => {
                assert_eq!(consumed, 3);
                assert_eq!(table.row_count(), 3);
                assert_eq!(table.column_count(), 3);
                assert_eq!(table.header_rows, 1);
                assert!(table.rows[0].is_header);
                assert_eq!(table.rows[1].cells[0].text, "Alice");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_tab_table() {
        let detector = PatternDetector::new();
        let blocks = vec![block("Q1\t100"), block("Q2\t200")];
        assert!(matches!(
            detector.detect_at(&blocks, 0),
            Some(DetectedPattern::Table { consumed: 2, .. })
        ));
    }

    #[test]
    fn test_multi_space_table() {
        let detector = PatternDetector::new();
        let blocks = vec![block("Region    Sales    Growth"), block("North    120    4%")];
        match detector.detect_at(&blocks, 0) {
            Some(DetectedPattern::Table { table, .. }) => {
                assert_eq!(table.column_count(), 3);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_single_row_is_not_a_table() {
        let detector = PatternDetector::new();
        let blocks = vec![block("a | b | c"), block("plain prose follows here")];
        assert!(detector.detect_at(&blocks, 0).is_none());
    }

    #[test]
    fn test_inconsistent_columns_rejected() {
        let detector = PatternDetector::new();
        let blocks = vec![block("a | b"), block("c | d | e | f")];
        assert!(detector.detect_at(&blocks, 0).is_none());
    }

    #[test]
    fn test_long_first_row_cells_disable_header() {
        let detector = PatternDetector::new();
        let long = "x".repeat(60);
        let blocks = vec![
            block(&format!("{} | {}", long, long)),
            block("a | b"),
            block("c | d"),
        ];
        match detector.detect_at(&blocks, 0) {
            Some(DetectedPattern::Table { table, .. }) => {
                assert_eq!(table.header_rows, 0);
                assert!(!table.rows[0].is_header);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_window_bounds_table_run() {
        let detector = PatternDetector::with_config(DetectorConfig {
            window: 3,
            ..DetectorConfig::default()
        });
        let blocks: Vec<TextBlock> = (0..10).map(|i| block(&format!("r{} | v{}", i, i))).collect();
        match detector.detect_at(&blocks, 0) {
            Some(DetectedPattern::Table { consumed, .. }) => assert_eq!(consumed, 3),
            other => panic!("expected table, got {:?}", other),
        }
    }
}
