//! Accessibility issue types.

use serde::{Deserialize, Serialize};

use crate::model::DocumentInfo;

/// Kinds of accessibility defects the scorer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// No title in document metadata
    MissingTitle,
    /// No declared language in document metadata
    MissingLanguage,
    /// The document appears image-based with little machine-readable text
    LikelyImageBased,
    /// One or more images lack alternative text
    ImageWithoutAltText,
    /// The document has no level-1 heading
    MissingH1,
    /// The document has more than one level-1 heading
    MultipleH1,
    /// One or more tables lack an accessible role marker
    TableWithoutRole,
    /// Link text that does not describe the link target
    GenericLinkText,
    /// A level-3 heading appears with no preceding level-2 heading
    ImproperHeadingNesting,
    /// The document has no sectioning structure at all
    MissingStructure,
}

impl IssueKind {
    /// The WCAG success criterion this issue maps to.
    pub fn wcag(&self) -> &'static str {
        match self {
            IssueKind::MissingTitle => "2.4.2",
            IssueKind::MissingLanguage => "3.1.1",
            IssueKind::LikelyImageBased => "1.4.5",
            IssueKind::ImageWithoutAltText => "1.1.1",
            IssueKind::MissingH1
            | IssueKind::MultipleH1
            | IssueKind::TableWithoutRole
            | IssueKind::ImproperHeadingNesting
            | IssueKind::MissingStructure => "1.3.1",
            IssueKind::GenericLinkText => "2.4.4",
        }
    }
}

/// A single detected accessibility defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Category of the defect
    pub kind: IssueKind,

    /// Human-readable description
    pub description: String,

    /// WCAG success-criterion reference
    pub wcag_reference: String,

    /// Ids of the affected nodes ("p<page>-n<ordinal>"), empty for
    /// document-level issues
    pub affected_node_ids: Vec<String>,
}

impl Issue {
    /// Create a document-level issue.
    pub fn new(kind: IssueKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            wcag_reference: kind.wcag().to_string(),
            affected_node_ids: Vec::new(),
        }
    }

    /// Attach affected node ids.
    pub fn with_nodes(mut self, ids: Vec<String>) -> Self {
        self.affected_node_ids = ids;
        self
    }
}

/// The score plus issue list returned for a processed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityReport {
    /// Score from 0 (inaccessible) to 100
    pub score: u8,

    /// Detected issues, in rule-evaluation order
    pub issues: Vec<Issue>,

    /// Document-level info
    pub document_info: DocumentInfo,
}

impl AccessibilityReport {
    /// Check whether an issue of the given kind was reported.
    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// Find the first issue of the given kind.
    pub fn issue(&self, kind: IssueKind) -> Option<&Issue> {
        self.issues.iter().find(|i| i.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wcag_references() {
        assert_eq!(IssueKind::MissingTitle.wcag(), "2.4.2");
        assert_eq!(IssueKind::MissingLanguage.wcag(), "3.1.1");
        assert_eq!(IssueKind::ImageWithoutAltText.wcag(), "1.1.1");
        assert_eq!(IssueKind::TableWithoutRole.wcag(), "1.3.1");
        assert_eq!(IssueKind::GenericLinkText.wcag(), "2.4.4");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&IssueKind::LikelyImageBased).unwrap();
        assert_eq!(json, "\"likely_image_based\"");
        let json = serde_json::to_string(&IssueKind::TableWithoutRole).unwrap();
        assert_eq!(json, "\"table_without_role\"");
    }

    #[test]
    fn test_issue_carries_reference() {
        let issue = Issue::new(IssueKind::MissingTitle, "Document lacks a title in metadata");
        assert_eq!(issue.wcag_reference, "2.4.2");
        assert!(issue.affected_node_ids.is_empty());
    }
}
