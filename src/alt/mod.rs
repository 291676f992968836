//! Image alternative-text pipeline.
//!
//! Every image runs through an explicit state machine:
//! `Pending -> OcrAttempted -> (Accepted | CaptionAttempted) -> Resolved`.
//! OCR is tried first; when it yields too little text, the captioning
//! collaborator takes over; when that fails too, a generic description is
//! derived from the image dimensions. The pipeline never resolves an image
//! with empty alternative text.

mod pool;

pub use pool::{AltTask, AltTextPool, CancelToken, PoolConfig, ResolvedAlt};

use thiserror::Error;

use crate::error::{Warning, WarningKind};
use crate::model::AltTextSource;
use crate::source::ImageBlock;

/// Failure of an OCR or captioning collaborator.
///
/// Distinct from "no text found": collaborators signal the absence of a
/// result by returning an empty string, and reserve errors for transient
/// conditions worth reporting.
#[derive(Error, Debug, Clone)]
pub enum CollaboratorError {
    /// A transient failure (service hiccup, resource exhaustion).
    #[error("transient failure: {0}")]
    Transient(String),

    /// The collaborator is not available in this environment.
    #[error("collaborator unavailable")]
    Unavailable,
}

/// Text recognition (OCR) collaborator.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text inside an image. An empty string means "no text
    /// found"; errors are reserved for transient failures.
    fn recognize_text(&self, image: &ImageBlock) -> Result<String, CollaboratorError>;
}

/// Image captioning collaborator.
pub trait Captioner: Send + Sync {
    /// Produce a caption for an image. An empty string means "no caption".
    fn caption(&self, image: &ImageBlock) -> Result<String, CollaboratorError>;
}

/// A recognizer that never finds text.
///
/// Used when no OCR backend is wired up (e.g. the CLI); every image then
/// falls through to captioning or the dimension fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

impl TextRecognizer for NoopRecognizer {
    fn recognize_text(&self, _image: &ImageBlock) -> Result<String, CollaboratorError> {
        Ok(String::new())
    }
}

/// A captioner that never produces a caption.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCaptioner;

impl Captioner for NoopCaptioner {
    fn caption(&self, _image: &ImageBlock) -> Result<String, CollaboratorError> {
        Ok(String::new())
    }
}

/// States of the per-image pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltTextState {
    /// Not yet processed
    Pending,
    /// OCR has been invoked
    OcrAttempted,
    /// OCR produced enough text; terminal
    Accepted,
    /// Captioning has been invoked
    CaptionAttempted,
    /// Alternative text attached; terminal
    Resolved,
}

/// Outcome of running the state machine for one image.
#[derive(Debug, Clone)]
pub struct AltTextOutcome {
    /// The attached alternative text; never empty
    pub alt_text: String,

    /// Where the text came from
    pub source: AltTextSource,

    /// Warning recorded when both collaborators failed transiently
    pub warning: Option<Warning>,
}

/// Run the alt-text state machine for a single image.
pub fn resolve_alt_text(
    image: &ImageBlock,
    ocr: &dyn TextRecognizer,
    captioner: &dyn Captioner,
    min_ocr_chars: usize,
) -> AltTextOutcome {
    let mut state = AltTextState::Pending;
    let mut accepted: Option<(String, AltTextSource)> = None;
    let mut caption_error: Option<CollaboratorError> = None;
    let mut ocr_failed = false;

    loop {
        state = match state {
            AltTextState::Pending => AltTextState::OcrAttempted,

            AltTextState::OcrAttempted => match ocr.recognize_text(image) {
                Ok(text)
                    if !text.trim().is_empty()
                        && text.trim().chars().count() >= min_ocr_chars =>
                {
                    accepted = Some((text.trim().to_string(), AltTextSource::Ocr));
                    AltTextState::Accepted
                }
                Ok(_) => AltTextState::CaptionAttempted,
                Err(err) => {
                    log::debug!("OCR failed for image on page {}: {}", image.page, err);
                    ocr_failed = true;
                    AltTextState::CaptionAttempted
                }
            },

            AltTextState::CaptionAttempted => match captioner.caption(image) {
                Ok(caption) if !caption.trim().is_empty() => {
                    accepted = Some((caption.trim().to_string(), AltTextSource::Caption));
                    AltTextState::Resolved
                }
                Ok(_) => AltTextState::Resolved,
                Err(err) => {
                    log::debug!(
                        "captioning failed for image on page {}: {}",
                        image.page,
                        err
                    );
                    caption_error = Some(err);
                    AltTextState::Resolved
                }
            },

            AltTextState::Accepted | AltTextState::Resolved => break,
        };
    }

    if let Some((alt_text, source)) = accepted {
        return AltTextOutcome {
            alt_text,
            source,
            warning: None,
        };
    }

    let warning = match (&caption_error, ocr_failed) {
        (Some(err), true) => Some(format!("OCR and captioning both failed: {}", err)),
        (Some(err), false) => Some(format!("captioning failed: {}", err)),
        (None, true) => Some("OCR failed and no caption was produced".to_string()),
        (None, false) => None,
    };

    AltTextOutcome {
        alt_text: fallback_description(image.width, image.height),
        source: AltTextSource::Fallback,
        warning: warning.map(|message| {
            Warning::new(WarningKind::ImageResolutionFailure, message).on_page(image.page)
        }),
    }
}

/// Generic description derived from image dimensions.
///
/// Used when neither OCR nor captioning produced anything; the categories
/// come from basic shape heuristics so screen-reader users at least learn
/// what kind of graphic they are skipping.
pub fn fallback_description(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "Image".to_string();
    }
    if width < 50 && height < 50 {
        "Small icon or bullet point".to_string()
    } else if width > height * 3 {
        "Horizontal banner or divider".to_string()
    } else if height > width * 3 {
        "Vertical banner or divider".to_string()
    } else if width > 400 && height > 300 {
        "Photograph or diagram".to_string()
    } else {
        format!("Image ({}x{})", width, height)
    }
}
