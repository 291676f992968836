//! Accessible HTML rendering.
//!
//! Emits a standalone HTML document with the structure assistive
//! technologies need: a language attribute, a title header, labelled page
//! landmarks, proper heading tags, `<th scope="col">` table headers, and
//! figures with alternative text.

use crate::model::{DocumentTree, InlineContent, SemanticNode, Table};

use super::options::RenderOptions;

const CSS: &str = "\
<style>
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; font-size: 1.2em; line-height: 1.6; margin: 2em auto; max-width: 800px; padding: 0 1em; color: #333; }
h1, h2, h3, h4, h5, h6 { margin-top: 1.5em; margin-bottom: 0.5em; font-weight: 600; }
p { margin: 1em 0; }
table { border-collapse: collapse; margin: 1.5em 0; width: 100%; }
th, td { border: 1px solid #ddd; padding: 8px 12px; text-align: left; }
th { background-color: #f8f9fa; font-weight: 600; }
ul, ol { margin: 1em 0; padding-left: 2em; line-height: 1.8; }
figure { margin: 1.5em 0; text-align: center; }
figcaption { font-size: 0.9em; color: #666; font-style: italic; margin-top: 0.5em; }
a:hover, a:focus { outline: 2px solid #3498db; outline-offset: 2px; }
section { margin: 2em 0; padding: 1em 0; }
</style>";

/// Render a document tree to accessible HTML.
pub fn to_html(tree: &DocumentTree, options: &RenderOptions) -> String {
    let lang = tree
        .info
        .language
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(&options.fallback_lang);
    let title = tree
        .info
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("Document");

    let mut out: Vec<String> = vec![
        "<!DOCTYPE html>".to_string(),
        format!("<html lang=\"{}\">", escape_attr(lang)),
        "<head>".to_string(),
        "<meta charset=\"UTF-8\">".to_string(),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string(),
        format!("<title>{} - Accessible version</title>", escape(title)),
    ];
    if options.include_css {
        out.push(CSS.to_string());
    }
    out.push("</head>".to_string());
    out.push("<body>".to_string());
    out.push("<header>".to_string());
    out.push(format!("<h1>{}</h1>", escape(title)));
    out.push("</header>".to_string());
    out.push("<main>".to_string());

    let total = tree.page_count();
    for page in &tree.pages {
        if options.page_landmarks {
            out.push(format!(
                "<section aria-label=\"Page {} of {}\">",
                page.index + 1,
                total
            ));
        }
        for node in &page.nodes {
            render_node(node, &mut out);
        }
        if options.page_landmarks {
            out.push("</section>".to_string());
        }
    }

    out.push("</main>".to_string());
    out.push("</body>".to_string());
    out.push("</html>".to_string());
    out.join("\n")
}

fn render_node(node: &SemanticNode, out: &mut Vec<String>) {
    match node {
        SemanticNode::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            out.push(format!(
                "<h{}>{}</h{}>",
                level,
                render_inline(content),
                level
            ));
        }
        SemanticNode::Paragraph { content } => {
            out.push(format!("<p>{}</p>", render_inline(content)));
        }
        SemanticNode::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push(format!("<{}>", tag));
            for item in items {
                out.push(format!("<li>{}</li>", escape(&item.text)));
            }
            out.push(format!("</{}>", tag));
        }
        SemanticNode::Table(table) => render_table(table, out),
        SemanticNode::Image(image) => {
            out.push(format!(
                "<figure role=\"img\" aria-label=\"{}\">",
                escape_attr(&image.alt_text)
            ));
            out.push(format!("<figcaption>{}</figcaption>", escape(&image.alt_text)));
            out.push("</figure>".to_string());
        }
    }
}

fn render_table(table: &Table, out: &mut Vec<String>) {
    if table.role_marker {
        out.push("<table role=\"table\">".to_string());
    } else {
        out.push("<table>".to_string());
    }

    if table.header_rows > 0 {
        out.push("<thead>".to_string());
        for row in table.header() {
            out.push("<tr>".to_string());
            for cell in &row.cells {
                out.push(format!("<th scope=\"col\">{}</th>", escape(&cell.text)));
            }
            out.push("</tr>".to_string());
        }
        out.push("</thead>".to_string());
    }

    out.push("<tbody>".to_string());
    for row in table.body() {
        out.push("<tr>".to_string());
        for cell in &row.cells {
            out.push(format!("<td>{}</td>", escape(&cell.text)));
        }
        out.push("</tr>".to_string());
    }
    out.push("</tbody>".to_string());
    out.push("</table>".to_string());
}

fn render_inline(content: &[InlineContent]) -> String {
    content
        .iter()
        .map(|c| match c {
            InlineContent::Text { text } => escape(text),
            InlineContent::Link { text, url } => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape_attr(url),
                escape(text)
            ),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape(text).replace('"', "&quot;")
}
