#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::message::Message;

const RECIPIENT_HEADERS: [&str; 3] = ["To", "Cc", "Bcc"];

/// Transport-level addressing derived from a message.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
}

impl Envelope {
    /// Envelope sender from `From`, recipients from `To`, `Cc` then `Bcc`.
    ///
    /// A missing `From` leaves `from` empty (null reverse-path). Recipients
    /// keep header and value order; duplicates are kept.
    pub fn from_message(message: &Message) -> Self {
        let from = message
            .get_header("From")
            .and_then(|values| values.first())
            .map(|value| bare_address(value).to_string())
            .unwrap_or_default();
        Self::with_sender(from, message)
    }

    /// Same recipients as [`Envelope::from_message`], with `from` as the
    /// envelope sender whatever the message's `From` header says.
    pub fn with_sender(from: impl Into<String>, message: &Message) -> Self {
        let to = RECIPIENT_HEADERS
            .iter()
            .filter_map(|name| message.get_header(name))
            .flatten()
            .map(|value| bare_address(value).to_string())
            .collect();
        Self {
            from: from.into(),
            to,
        }
    }
}

/// `Name <addr>` yields `addr`; anything else is returned trimmed.
pub(crate) fn bare_address(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(inner) = trimmed.strip_suffix('>') {
        if let Some(start) = inner.rfind('<') {
            return inner[start + 1..].trim();
        }
    }
    trimmed
}
