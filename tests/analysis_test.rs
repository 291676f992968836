//! End-to-end analysis tests over synthetic primitive streams.

use std::sync::Arc;

use pdfa11y::{
    analyze, AltTextSource, BBox, CollaboratorError, ImageBlock, IssueKind, LinkAnnotation,
    NoopCaptioner, NoopRecognizer, PageContent, RawDocument, SemanticNode, Span, TextBlock,
};

fn span(text: &str, font: &str, size: f32, x: f32, y: f32, page: usize) -> Span {
    Span::new(
        text,
        font,
        size,
        BBox::new(x, y, x + text.len() as f32 * size * 0.5, y + size),
        page,
    )
}

fn block(text: &str, font: &str, size: f32, y: f32, page: usize) -> TextBlock {
    TextBlock::new(vec![span(text, font, size, 72.0, y, page)])
}

fn body(text: &str, y: f32, page: usize) -> TextBlock {
    block(text, "Helvetica", 12.0, y, page)
}

const PARAGRAPH: &str = "This paragraph carries enough ordinary prose to be \
    counted as body text by any reasonable reader, and certainly far too \
    many words to ever be mistaken for a heading.";

#[test]
fn heading_followed_by_paragraphs() {
    // A single 24pt bold span followed by three 12pt body paragraphs.
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(block(
        "Executive Summary",
        "Helvetica-Bold",
        24.0,
        80.0,
        0,
    ));
    page.text_blocks.push(body(PARAGRAPH, 200.0, 0));
    page.text_blocks.push(body(PARAGRAPH, 300.0, 0));
    page.text_blocks.push(body(PARAGRAPH, 400.0, 0));

    let mut doc = RawDocument::new();
    doc.metadata.title = Some("Summary".into());
    doc.metadata.language = Some("en".into());
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    let nodes = &analysis.tree.pages[0].nodes;

    assert_eq!(nodes.len(), 4);
    let level = nodes[0].heading_level().expect("first node is a heading");
    assert!(level <= 2, "document-max block must be h1 or h2, got h{}", level);
    for node in &nodes[1..] {
        assert!(!node.is_heading());
    }
    assert!(!analysis.report.has_issue(IssueKind::MissingH1));
}

#[test]
fn unique_largest_block_is_never_a_paragraph() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    // Not bold, not at the top, not short: only its size speaks for it.
    page.text_blocks.push(block(
        "A headline set in the document's largest type",
        "Helvetica",
        20.0,
        500.0,
        0,
    ));
    page.text_blocks.push(body(PARAGRAPH, 100.0, 0));
    page.text_blocks.push(body(PARAGRAPH, 200.0, 0));

    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    let heading = analysis
        .tree
        .iter_nodes()
        .find_map(|(_, _, node)| node.heading_level());
    let level = heading.expect("largest block must classify as a heading");
    assert!(level <= 2);
}

#[test]
fn image_only_document_needs_ocr() {
    // Zero text blocks, two images: average chars/page = 0.
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.images.push(ImageBlock::new(
        vec![],
        BBox::new(72.0, 100.0, 540.0, 400.0),
        0,
        800,
        600,
    ));
    page.images.push(ImageBlock::new(
        vec![],
        BBox::new(72.0, 420.0, 540.0, 700.0),
        0,
        800,
        600,
    ));
    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    assert!(analysis.tree.info.needs_ocr);
    assert!(analysis.report.has_issue(IssueKind::LikelyImageBased));
    assert_eq!(
        analysis
            .report
            .issue(IssueKind::LikelyImageBased)
            .unwrap()
            .wcag_reference,
        "1.4.5"
    );
}

#[test]
fn pipe_table_with_header_row() {
    // Four consecutive blocks, three pipe-delimited cells each; the first
    // row's cells are all short enough to act as a header.
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(body("Product | Units | Revenue", 100.0, 0));
    page.text_blocks.push(body("Widget | 120 | 2400", 120.0, 0));
    page.text_blocks.push(body("Gadget | 75 | 1875", 140.0, 0));
    page.text_blocks.push(body("Sprocket | 30 | 990", 160.0, 0));
    page.text_blocks.push(body(PARAGRAPH, 300.0, 0));

    let mut doc = RawDocument::new();
    doc.metadata.title = Some("Sales".into());
    doc.metadata.language = Some("en".into());
    doc.add_page(page);

    let mut analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();

    let table = analysis
        .tree
        .iter_nodes()
        .find_map(|(_, _, node)| match node {
            SemanticNode::Table(table) => Some(table.clone()),
            _ => None,
        })
        .expect("table expected");
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.header_rows, 1);
    assert!(table.rows[0].is_header);

    // Freshly inferred tables lack a role marker and are flagged...
    assert!(analysis.report.has_issue(IssueKind::TableWithoutRole));

    // ...until one is attached downstream.
    pdfa11y::remediate::remediate(&mut analysis.tree, None);
    let rescored = pdfa11y::score_tree(&analysis.tree).unwrap();
    assert!(!rescored.has_issue(IssueKind::TableWithoutRole));
}

#[test]
fn inconsistent_rows_fall_back_to_paragraphs() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(body("a | b", 100.0, 0));
    page.text_blocks.push(body("c | d | e | f | g", 120.0, 0));

    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    assert!(analysis
        .tree
        .iter_nodes()
        .all(|(_, _, node)| !matches!(node, SemanticNode::Table(_))));
    assert_eq!(analysis.tree.node_count(), 2);
}

#[test]
fn missing_title_and_language_scores_80() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(block(
        "Annual Report",
        "Helvetica-Bold",
        24.0,
        80.0,
        0,
    ));
    page.text_blocks.push(body(PARAGRAPH, 200.0, 0));

    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    let report = &analysis.report;

    assert_eq!(report.score, 80);
    assert_eq!(report.issues[0].kind, IssueKind::MissingTitle);
    assert_eq!(report.issues[0].wcag_reference, "2.4.2");
    assert_eq!(report.issues[1].kind, IssueKind::MissingLanguage);
    assert_eq!(report.issues[1].wcag_reference, "3.1.1");
}

#[test]
fn span_inside_annotation_gets_its_uri() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    let mut linked = TextBlock::new(vec![Span::new(
        "project homepage",
        "Helvetica",
        12.0,
        BBox::new(100.0, 200.0, 220.0, 212.0),
        0,
    )]);
    linked.spans.push(Span::new(
        "plain continuation",
        "Helvetica",
        12.0,
        BBox::new(240.0, 200.0, 380.0, 212.0),
        0,
    ));
    page.text_blocks.push(linked);
    page.links.push(LinkAnnotation::new(
        BBox::new(95.0, 195.0, 225.0, 215.0),
        "https://example.com/project",
    ));
    page.text_blocks.push(body(PARAGRAPH, 400.0, 0));

    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    let links: Vec<(String, String)> = analysis
        .tree
        .iter_nodes()
        .flat_map(|(_, _, node)| {
            node.links()
                .map(|(t, u)| (t.to_string(), u.to_string()))
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(
        links,
        vec![(
            "project homepage".to_string(),
            "https://example.com/project".to_string()
        )]
    );
}

#[test]
fn alt_text_is_never_empty_even_when_collaborators_fail() {
    struct FailingRecognizer;
    impl pdfa11y::TextRecognizer for FailingRecognizer {
        fn recognize_text(&self, _: &ImageBlock) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Transient("ocr service down".into()))
        }
    }
    struct FailingCaptioner;
    impl pdfa11y::Captioner for FailingCaptioner {
        fn caption(&self, _: &ImageBlock) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Transient("caption service down".into()))
        }
    }

    let mut page = PageContent::new(0, 612.0, 792.0);
    for i in 0..3 {
        page.images.push(ImageBlock::new(
            vec![],
            BBox::new(72.0, 100.0 + i as f32 * 200.0, 300.0, 250.0 + i as f32 * 200.0),
            0,
            640,
            480,
        ));
    }
    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(FailingRecognizer), Arc::new(FailingCaptioner)).unwrap();
    let images: Vec<_> = analysis
        .tree
        .iter_nodes()
        .filter_map(|(_, _, node)| match node {
            SemanticNode::Image(image) => Some(image),
            _ => None,
        })
        .collect();

    assert_eq!(images.len(), 3);
    for image in images {
        assert!(image.has_alt_text());
        assert_eq!(image.source, AltTextSource::Fallback);
    }
    assert!(!analysis.warnings.is_empty());
    assert!(!analysis.report.has_issue(IssueKind::ImageWithoutAltText));
}

#[test]
fn ocr_text_becomes_alt_text() {
    struct Recognizer;
    impl pdfa11y::TextRecognizer for Recognizer {
        fn recognize_text(&self, _: &ImageBlock) -> Result<String, CollaboratorError> {
            Ok("Figure 3: quarterly revenue by region".into())
        }
    }

    let mut page = PageContent::new(0, 612.0, 792.0);
    page.images.push(ImageBlock::new(
        vec![],
        BBox::new(72.0, 100.0, 400.0, 300.0),
        0,
        640,
        480,
    ));
    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(Recognizer), Arc::new(NoopCaptioner)).unwrap();
    let image = analysis
        .tree
        .iter_nodes()
        .find_map(|(_, _, node)| match node {
            SemanticNode::Image(image) => Some(image),
            _ => None,
        })
        .unwrap();
    assert_eq!(image.alt_text, "Figure 3: quarterly revenue by region");
    assert_eq!(image.source, AltTextSource::Ocr);
}

#[test]
fn reading_order_is_top_left() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(body("gamma, the last paragraph by position", 500.0, 0));
    page.text_blocks.push(body("alpha, the first paragraph by position", 100.0, 0));
    page.text_blocks.push(body("beta, the middle paragraph by position", 300.0, 0));

    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    let texts: Vec<String> = analysis.tree.pages[0]
        .nodes
        .iter()
        .map(|n| n.plain_text())
        .collect();
    assert!(texts[0].starts_with("alpha"));
    assert!(texts[1].starts_with("beta"));
    assert!(texts[2].starts_with("gamma"));
}

#[test]
fn bullet_runs_become_lists() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(body(
        "\u{2022} Management \u{2022} Interface options \u{2022} Firmware",
        100.0,
        0,
    ));
    let mut doc = RawDocument::new();
    doc.add_page(page);

    let analysis = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    match &analysis.tree.pages[0].nodes[0] {
        SemanticNode::List { ordered, items } => {
            assert!(!ordered);
            assert_eq!(items.len(), 3);
            assert_eq!(items[0].text, "Management");
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn json_stream_from_disk_round_trips() {
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(body(PARAGRAPH, 100.0, 0));
    let mut doc = RawDocument::new();
    doc.metadata.title = Some("On disk".into());
    doc.add_page(page);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.json");
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let loaded: RawDocument =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.metadata.title.as_deref(), Some("On disk"));
    assert_eq!(loaded.page_count(), 1);

    let analysis = analyze(&loaded, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner)).unwrap();
    assert_eq!(analysis.tree.node_count(), 1);
}

#[test]
fn malformed_stream_is_rejected() {
    let mut doc = RawDocument::new();
    let mut page = PageContent::new(0, 612.0, 792.0);
    page.text_blocks.push(TextBlock::new(vec![Span::new(
        "text",
        "Helvetica",
        12.0,
        BBox::new(0.0, 0.0, 10.0, 12.0),
        9,
    )]));
    doc.add_page(page);

    let result = analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner));
    assert!(matches!(result, Err(pdfa11y::Error::InvalidInput(_))));
}
