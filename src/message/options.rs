#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::encoding::Encoding;

const DEFAULT_CHARSET: &str = "UTF-8";

/// Per-message settings: declared charset and transfer encoding.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOptions {
    charset: String,
    encoding: Encoding,
}

impl MessageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank charsets are ignored and the current one is kept.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        if let Some(normalized) = normalize_charset(charset.into()) {
            self.charset = normalized;
        }
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            encoding: Encoding::QuotedPrintable,
        }
    }
}

fn normalize_charset(input: String) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
