//! Hyperlink resolution.
//!
//! Maps spans to link annotations by bounding-box-center containment, and
//! wraps bare URLs found in plain text as inline hyperlinks when no
//! annotation matches.

use regex::Regex;

use crate::model::InlineContent;
use crate::source::{LinkAnnotation, Span, TextBlock};

/// Resolves hyperlinks for spans on a page.
pub struct LinkResolver {
    url_pattern: Regex,
}

impl LinkResolver {
    /// Create a new link resolver.
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(r"(https?://[^\s]+|www\.[^\s]+)")
                .expect("url pattern is valid"),
        }
    }

    /// Find the URI of the first annotation whose rectangle contains the
    /// span's bounding-box center.
    pub fn annotation_for<'a>(
        &self,
        span: &Span,
        links: &'a [LinkAnnotation],
    ) -> Option<&'a str> {
        let (cx, cy) = span.bbox.center();
        links
            .iter()
            .find(|link| link.rect.contains_point(cx, cy))
            .map(|link| link.uri.as_str())
    }

    /// Build inline content for a block, attaching hyperlinks.
    ///
    /// Annotation matches take precedence over bare-URL detection; a span
    /// covered by an annotation becomes a single link run.
    pub fn resolve_block(
        &self,
        block: &TextBlock,
        links: &[LinkAnnotation],
    ) -> Vec<InlineContent> {
        let mut content: Vec<InlineContent> = Vec::new();

        for span in &block.spans {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }

            if let Some(uri) = self.annotation_for(span, links) {
                content.push(InlineContent::link(text, uri));
            } else {
                self.linkify_into(text, &mut content);
            }
        }

        coalesce(content)
    }

    /// Split plain text around bare URLs, pushing text and link runs.
    fn linkify_into(&self, text: &str, out: &mut Vec<InlineContent>) {
        let mut last = 0;
        for m in self.url_pattern.find_iter(text) {
            let before = text[last..m.start()].trim();
            if !before.is_empty() {
                out.push(InlineContent::text(before));
            }

            let raw = m.as_str();
            let url = if raw.starts_with("www.") {
                format!("http://{}", raw)
            } else {
                raw.to_string()
            };
            out.push(InlineContent::link(raw, url));
            last = m.end();
        }

        let rest = text[last..].trim();
        if !rest.is_empty() {
            out.push(InlineContent::text(rest));
        }
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge adjacent plain-text runs, joining with single spaces.
fn coalesce(content: Vec<InlineContent>) -> Vec<InlineContent> {
    let mut out: Vec<InlineContent> = Vec::new();
    for item in content {
        match (out.last_mut(), &item) {
            (Some(InlineContent::Text { text: prev }), InlineContent::Text { text }) => {
                prev.push(' ');
                prev.push_str(text);
            }
            _ => out.push(item),
        }
    }
    out
}
