//! What goes into a symbol: the encoded text, an optional caption and logo.

use crate::logo::Logo;

/// Content of one symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentSpec {
    /// The string handed to the matrix provider.
    pub raw_content: String,
    /// Caption drawn under the symbol when non-empty.
    pub label_text: Option<String>,
    pub logo: Option<Logo>,
}

impl ContentSpec {
    pub fn new(raw_content: impl Into<String>) -> Self {
        Self { raw_content: raw_content.into(), ..Self::default() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_text = Some(label.into());
        self
    }

    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// The caption, if there is one worth drawing.
    pub fn label(&self) -> Option<&str> {
        self.label_text.as_deref().filter(|text| !text.is_empty())
    }

    /// The logo, if one is attached and switched on.
    pub fn active_logo(&self) -> Option<&Logo> {
        self.logo.as_ref().filter(|logo| logo.is_enabled())
    }

    /// Whitespace-only content is never rendered in a batch.
    pub fn is_blank(&self) -> bool {
        self.raw_content.trim().is_empty()
    }
}
