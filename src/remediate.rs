//! Post-analysis remediation.
//!
//! Applies the fixes a downstream tag writer needs before serializing:
//! fills in missing metadata from the document's own content and attaches
//! accessible role markers to tables. Re-scoring a remediated tree drops
//! the corresponding issues.

use crate::model::{DocumentTree, SemanticNode};

/// Default language attached when the document declares none.
const DEFAULT_LANGUAGE: &str = "en";

/// Apply accessibility fixes to a finished tree.
///
/// Returns a description of each fix applied, in order. `fallback_title`
/// is used when the document has no usable heading to promote (callers
/// typically pass the source file name).
pub fn remediate(tree: &mut DocumentTree, fallback_title: Option<&str>) -> Vec<String> {
    let mut fixes: Vec<String> = Vec::new();

    if !tree.info.has_title() {
        let title = first_heading_text(tree)
            .or_else(|| fallback_title.map(str::to_string))
            .filter(|t| !t.trim().is_empty());
        if let Some(title) = title {
            tree.info.title = Some(title);
            fixes.push("Added document title".to_string());
        }
    }

    if !tree.info.has_language() {
        tree.info.language = Some(DEFAULT_LANGUAGE.to_string());
        fixes.push(format!(
            "Added document language (default: {})",
            DEFAULT_LANGUAGE
        ));
    }

    let mut marked = 0usize;
    for page in &mut tree.pages {
        for node in &mut page.nodes {
            if let SemanticNode::Table(table) = node {
                if !table.role_marker {
                    table.role_marker = true;
                    marked += 1;
                }
            }
        }
    }
    if marked > 0 {
        fixes.push(format!("Attached role markers to {} table(s)", marked));
    }

    fixes
}

/// Text of the first heading in reading order, preferring the shallowest
/// levels.
fn first_heading_text(tree: &DocumentTree) -> Option<String> {
    for wanted in 1..=6u8 {
        for (_, _, node) in tree.iter_nodes() {
            if node.heading_level() == Some(wanted) {
                let text = node.plain_text();
                if !text.trim().is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentInfo, PageNode, Table, TableRow};
    use crate::report::{self, IssueKind};

    fn tree(nodes: Vec<SemanticNode>) -> DocumentTree {
        let mut page = PageNode::new(0, 612.0, 792.0);
        page.nodes = nodes;
        DocumentTree {
            info: DocumentInfo {
                page_count: 1,
                text_char_count: 5000,
                ..Default::default()
            },
            pages: vec![page],
        }
    }

    #[test]
    fn test_title_promoted_from_heading() {
        let mut t = tree(vec![
            SemanticNode::heading(1, "Annual Report"),
            SemanticNode::paragraph("Body"),
        ]);
        let fixes = remediate(&mut t, Some("report.pdf"));
        assert_eq!(t.info.title.as_deref(), Some("Annual Report"));
        assert!(fixes.iter().any(|f| f.contains("title")));
    }

    #[test]
    fn test_fallback_title_when_no_headings() {
        let mut t = tree(vec![SemanticNode::paragraph("Body")]);
        remediate(&mut t, Some("quarterly-summary"));
        assert_eq!(t.info.title.as_deref(), Some("quarterly-summary"));
    }

    #[test]
    fn test_existing_metadata_untouched() {
        let mut t = tree(vec![SemanticNode::heading(1, "Heading")]);
        t.info.title = Some("Original".into());
        t.info.language = Some("fr".into());
        let fixes = remediate(&mut t, None);
        assert_eq!(t.info.title.as_deref(), Some("Original"));
        assert_eq!(t.info.language.as_deref(), Some("fr"));
        assert!(fixes.is_empty());
    }

    #[test]
    fn test_table_roles_attached_and_issue_cleared() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        table.add_row(TableRow::from_strings(["c", "d"]));
        let mut t = tree(vec![
            SemanticNode::heading(1, "Data"),
            SemanticNode::Table(table),
        ]);

        let before = report::score(&t).unwrap();
        assert!(before.has_issue(IssueKind::TableWithoutRole));

        let fixes = remediate(&mut t, None);
        assert!(fixes.iter().any(|f| f.contains("role marker")));

        let after = report::score(&t).unwrap();
        assert!(!after.has_issue(IssueKind::TableWithoutRole));
        assert!(after.score > before.score);
    }
}
