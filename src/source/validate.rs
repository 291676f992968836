//! Validation of incoming primitive streams.

use crate::error::{Error, Result};

use super::page::RawDocument;

/// Validate the structural integrity of a primitive stream.
///
/// Rejects streams whose page indexing is inconsistent: pages out of
/// order, or spans/images claiming a different page than the one they sit
/// on. Geometric defects in individual blocks (non-finite coordinates,
/// inverted boxes) are not fatal; the analyzer skips those blocks and
/// records a warning instead.
pub fn validate(doc: &RawDocument) -> Result<()> {
    for (position, page) in doc.pages.iter().enumerate() {
        if page.index != position {
            return Err(Error::InvalidInput(format!(
                "page at position {} reports index {}",
                position, page.index
            )));
        }

        if !(page.width.is_finite() && page.height.is_finite())
            || page.width <= 0.0
            || page.height <= 0.0
        {
            return Err(Error::InvalidInput(format!(
                "page {} has invalid dimensions {}x{}",
                page.index, page.width, page.height
            )));
        }

        for block in &page.text_blocks {
            for span in &block.spans {
                if span.page != page.index {
                    return Err(Error::InvalidInput(format!(
                        "span on page {} claims page {}",
                        page.index, span.page
                    )));
                }
            }
        }

        for image in &page.images {
            if image.page != page.index {
                return Err(Error::InvalidInput(format!(
                    "image on page {} claims page {}",
                    page.index, image.page
                )));
            }
        }
    }

    Ok(())
}
