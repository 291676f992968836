//! Reading-order assembly.
//!
//! Orders page content top-to-bottom, left-to-right by bounding-box
//! position. This is a deliberate heuristic approximation: multi-column
//! layouts may interleave columns incorrectly. A full geometric column
//! solver is out of scope; the limitation is documented, not hidden.

use std::cmp::Ordering;

use crate::source::{BBox, PageContent};

/// Compare two optional boxes by (top, left). Entries without a box sort
/// after positioned ones.
pub(crate) fn position_key(a: Option<BBox>, b: Option<BBox>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a
            .y0
            .partial_cmp(&b.y0)
            .unwrap_or(Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order the text blocks of a page, returning their indices.
///
/// The sort is stable, so blocks sharing a position keep their source
/// order, which keeps the output deterministic for identical input.
pub fn text_order(page: &PageContent) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..page.text_blocks.len()).collect();
    indices.sort_by(|&a, &b| {
        position_key(page.text_blocks[a].bbox(), page.text_blocks[b].bbox())
    });
    indices
}

/// Stable-sort positioned items (classified nodes, image placeholders)
/// into reading order.
pub(crate) fn sort_by_position<T>(items: &mut [(Option<BBox>, T)]) {
    items.sort_by(|(a, _), (b, _)| position_key(*a, *b));
}
