//! Rendering options.

/// Options for HTML rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Language attribute when the document declares none
    pub fallback_lang: String,

    /// Whether to emit one labelled `<section>` landmark per page
    pub page_landmarks: bool,

    /// Whether to embed the default stylesheet
    pub include_css: bool,
}

impl RenderOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback language.
    pub fn with_fallback_lang(mut self, lang: impl Into<String>) -> Self {
        self.fallback_lang = lang.into();
        self
    }

    /// Enable or disable per-page section landmarks.
    pub fn with_page_landmarks(mut self, landmarks: bool) -> Self {
        self.page_landmarks = landmarks;
        self
    }

    /// Enable or disable the embedded stylesheet.
    pub fn with_css(mut self, css: bool) -> Self {
        self.include_css = css;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fallback_lang: "en".to_string(),
            page_landmarks: true,
            include_css: true,
        }
    }
}
