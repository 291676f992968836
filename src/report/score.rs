//! Deterministic accessibility scoring.
//!
//! Starts at 100 and subtracts fixed, capped penalties per violated rule.
//! Rules run in a fixed order and issue emission order equals rule
//! evaluation order, so identical input always yields an identical
//! report. The scorer is pure: running it twice on the same tree yields
//! the same result.

use crate::error::{Error, Result};
use crate::model::{DocumentTree, SemanticNode};

use super::issue::{AccessibilityReport, Issue, IssueKind};

const PENALTY_MISSING_TITLE: u32 = 10;
const PENALTY_MISSING_LANGUAGE: u32 = 10;
const PENALTY_PER_IMAGE: u32 = 5;
const CAP_IMAGES: u32 = 20;
const PENALTY_MISSING_H1: u32 = 10;
const PENALTY_MULTIPLE_H1: u32 = 5;
const PENALTY_PER_TABLE: u32 = 5;
const CAP_TABLES: u32 = 15;
const PENALTY_PER_GENERIC_LINK: u32 = 2;
const CAP_GENERIC_LINKS: u32 = 10;
const PENALTY_HEADING_NESTING: u32 = 3;
const PENALTY_MISSING_STRUCTURE: u32 = 5;

/// Link texts that convey nothing about the target.
const GENERIC_LINK_TEXTS: &[&str] = &[
    "click here",
    "here",
    "link",
    "more",
    "read more",
    "cliquez ici",
    "ici",
    "lien",
    "plus",
    "voir",
];

/// Score a finished document tree.
///
/// Must only be called once assembly is complete; partial trees produce
/// partial scores. Returns [`Error::ScoringInconsistency`] when the tree
/// violates an internal invariant, which signals a pipeline defect rather
/// than a problem with the document.
pub fn score(tree: &DocumentTree) -> Result<AccessibilityReport> {
    check_invariants(tree)?;

    let mut issues: Vec<Issue> = Vec::new();
    let mut deductions: u32 = 0;
    let info = &tree.info;

    // 1. Title
    if !info.has_title() {
        deductions += PENALTY_MISSING_TITLE;
        issues.push(Issue::new(
            IssueKind::MissingTitle,
            "Document lacks a title in metadata",
        ));
    }

    // 2. Language
    if !info.has_language() {
        deductions += PENALTY_MISSING_LANGUAGE;
        issues.push(Issue::new(
            IssueKind::MissingLanguage,
            "Document language is not specified",
        ));
    }

    // 3. Image-based document (reported, not penalized: the missing
    // content already depresses every other rule).
    if info.needs_ocr {
        issues.push(Issue::new(
            IssueKind::LikelyImageBased,
            "Document appears to be image-based with little machine-readable text",
        ));
    }

    // 4. Images without alternative text
    let missing_alt: Vec<String> = tree
        .iter_nodes()
        .filter_map(|(page, ordinal, node)| match node {
            SemanticNode::Image(image) if !image.has_alt_text() => {
                Some(node_id(page, ordinal))
            }
            _ => None,
        })
        .collect();
    if !missing_alt.is_empty() {
        deductions += (missing_alt.len() as u32 * PENALTY_PER_IMAGE).min(CAP_IMAGES);
        issues.push(
            Issue::new(
                IssueKind::ImageWithoutAltText,
                format!("{} image(s) lack alternative text", missing_alt.len()),
            )
            .with_nodes(missing_alt),
        );
    }

    // 5. Level-1 heading count
    let h1_ids: Vec<String> = tree
        .iter_nodes()
        .filter(|(_, _, node)| node.heading_level() == Some(1))
        .map(|(page, ordinal, _)| node_id(page, ordinal))
        .collect();
    if h1_ids.is_empty() {
        deductions += PENALTY_MISSING_H1;
        issues.push(Issue::new(
            IssueKind::MissingH1,
            "Document has no main (level-1) heading",
        ));
    } else if h1_ids.len() > 1 {
        deductions += PENALTY_MULTIPLE_H1;
        issues.push(
            Issue::new(
                IssueKind::MultipleH1,
                format!("{} level-1 headings make the structure unclear", h1_ids.len()),
            )
            .with_nodes(h1_ids),
        );
    }

    // 6. Tables without a role marker
    let unmarked_tables: Vec<String> = tree
        .iter_nodes()
        .filter_map(|(page, ordinal, node)| match node {
            SemanticNode::Table(table) if !table.role_marker => Some(node_id(page, ordinal)),
            _ => None,
        })
        .collect();
    if !unmarked_tables.is_empty() {
        deductions += (unmarked_tables.len() as u32 * PENALTY_PER_TABLE).min(CAP_TABLES);
        issues.push(
            Issue::new(
                IssueKind::TableWithoutRole,
                format!(
                    "{} table(s) lack an accessible role marker",
                    unmarked_tables.len()
                ),
            )
            .with_nodes(unmarked_tables),
        );
    }

    // 7. Generic link text
    let mut generic_links: Vec<String> = Vec::new();
    let mut generic_count: u32 = 0;
    for (page, ordinal, node) in tree.iter_nodes() {
        for (text, _) in node.links() {
            if GENERIC_LINK_TEXTS.contains(&text.trim().to_lowercase().as_str()) {
                generic_count += 1;
                let id = node_id(page, ordinal);
                if !generic_links.contains(&id) {
                    generic_links.push(id);
                }
            }
        }
    }
    if generic_count > 0 {
        deductions += (generic_count * PENALTY_PER_GENERIC_LINK).min(CAP_GENERIC_LINKS);
        issues.push(
            Issue::new(
                IssueKind::GenericLinkText,
                format!("{} link(s) use non-descriptive text", generic_count),
            )
            .with_nodes(generic_links),
        );
    }

    // 8. Heading nesting: a level-3 heading before any level-2 exists
    let mut seen_h2 = false;
    let mut orphaned: Vec<String> = Vec::new();
    for (page, ordinal, node) in tree.iter_nodes() {
        match node.heading_level() {
            Some(2) => seen_h2 = true,
            Some(3) if !seen_h2 => orphaned.push(node_id(page, ordinal)),
            _ => {}
        }
    }
    if !orphaned.is_empty() {
        deductions += PENALTY_HEADING_NESTING;
        issues.push(
            Issue::new(
                IssueKind::ImproperHeadingNesting,
                "Level-3 heading(s) appear with no preceding level-2 heading",
            )
            .with_nodes(orphaned),
        );
    }

    // 9. Sectioning structure
    let has_headings = tree.iter_nodes().any(|(_, _, node)| node.is_heading());
    if !has_headings {
        deductions += PENALTY_MISSING_STRUCTURE;
        issues.push(Issue::new(
            IssueKind::MissingStructure,
            "Document has no sectioning structure",
        ));
    }

    Ok(AccessibilityReport {
        score: (100_i64 - deductions as i64).max(0) as u8,
        issues,
        document_info: info.clone(),
    })
}

/// Stable id for a node: page index and ordinal within the page.
fn node_id(page: usize, ordinal: usize) -> String {
    format!("p{}-n{}", page, ordinal)
}

/// Verify the invariants the scorer depends on.
fn check_invariants(tree: &DocumentTree) -> Result<()> {
    for (position, page) in tree.pages.iter().enumerate() {
        if page.index != position {
            return Err(Error::ScoringInconsistency(format!(
                "page at position {} carries index {}",
                position, page.index
            )));
        }
    }

    for (page, ordinal, node) in tree.iter_nodes() {
        if let Some(level) = node.heading_level() {
            if !(1..=6).contains(&level) {
                return Err(Error::ScoringInconsistency(format!(
                    "node {} has heading level {}",
                    node_id(page, ordinal),
                    level
                )));
            }
        }
        if let SemanticNode::Image(image) = node {
            if image.page != page {
                return Err(Error::ScoringInconsistency(format!(
                    "image node {} claims page {}",
                    node_id(page, ordinal),
                    image.page
                )));
            }
        }
    }

    Ok(())
}
