//! Rendering of analyzed documents.
//!
//! Two output targets: accessible HTML for human review and JSON for
//! machine consumers. Final PDF tag-tree serialization is a downstream
//! concern and not handled here.

mod html;
mod json;
mod options;

pub use html::to_html;
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
