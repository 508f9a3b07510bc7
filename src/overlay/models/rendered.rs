//! Rendered document views

use serde::{Deserialize, Serialize};
use std::fmt;

/// Markup-bearing string with PII spans wrapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightedText(String);

/// Plain string with PII replaced by placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskedText(String);

macro_rules! rendered_string {
    ($name:ident) => {
        impl $name {
            /// Wrap an already-rendered string
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the rendered string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take ownership of the rendered string
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

rendered_string!(HighlightedText);
rendered_string!(MaskedText);

/// Which derived view the presentation layer is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Original text with PII spans highlighted
    #[default]
    Highlighted,
    /// Text with PII replaced by placeholders
    Masked,
}

impl ViewMode {
    /// The other view
    pub fn toggled(self) -> Self {
        match self {
            Self::Highlighted => Self::Masked,
            Self::Masked => Self::Highlighted,
        }
    }
}

/// One rendered view of an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "text", rename_all = "snake_case")]
pub enum RenderedDocument {
    /// Highlighted view
    Highlighted(HighlightedText),
    /// Masked view
    Masked(MaskedText),
}

impl RenderedDocument {
    /// Borrow the rendered string regardless of view
    pub fn as_str(&self) -> &str {
        match self {
            Self::Highlighted(text) => text.as_str(),
            Self::Masked(text) => text.as_str(),
        }
    }

    /// The view this document was rendered for
    pub fn view_mode(&self) -> ViewMode {
        match self {
            Self::Highlighted(_) => ViewMode::Highlighted,
            Self::Masked(_) => ViewMode::Masked,
        }
    }
}
