//! RFC 5322 message model.
//!
//! A [`Message`] stores headers in insertion order plus one or more body
//! parts, and serializes to a CRLF-delimited byte stream with the MIME
//! headers derived from its [`MessageOptions`].

mod clock;
mod encoding;
mod error;
mod header;
mod options;
mod writer;

pub use clock::{Clock, FixedClock, SystemClock, format_date};
pub use encoding::{Encoding, decode_header_value, encode_header_value};
pub use error::MessageError;
pub use options::MessageOptions;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use header::HeaderMap;

/// One body part: a MIME type and its text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    content_type: String,
    content: String,
}

impl Part {
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    headers: HeaderMap,
    parts: Vec<Part>,
    boundary: Option<String>,
    options: MessageOptions,
    clock: Arc<dyn Clock>,
}

impl Message {
    pub fn new() -> Self {
        Self::with_options(MessageOptions::default())
    }

    pub fn with_options(options: MessageOptions) -> Self {
        Self {
            headers: HeaderMap::default(),
            parts: Vec::new(),
            boundary: None,
            options,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    /// Stores `values` under `name`, replacing whatever was there before.
    /// Addresses are not validated. Characters outside printable ASCII and
    /// `:` are stripped from `name`; a name left empty is ignored.
    pub fn set_header<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.headers.set(name, values);
    }

    pub fn get_header(&self, name: &str) -> Option<&[String]> {
        self.headers.get(name)
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers.iter()
    }

    /// Sets `name` to a single formatted address, see [`Message::format_address`].
    pub fn set_address_header(&mut self, name: &str, address: &str, display_name: &str) {
        let formatted = self.format_address(address, display_name);
        self.headers.set_preformatted(name, vec![formatted]);
    }

    /// Formats `address` with an optional display name.
    ///
    /// ASCII names are quoted (`"Jane Doe" <jane@example.com>`); names that
    /// need encoding become an encoded word in the message charset.
    pub fn format_address(&self, address: &str, display_name: &str) -> String {
        if display_name.is_empty() {
            return address.to_string();
        }

        let encoded = encode_header_value(
            display_name,
            self.options.charset(),
            self.options.encoding(),
        );
        let mut out = String::with_capacity(display_name.len() + address.len() + 5);
        if encoded == display_name {
            out.push('"');
            for ch in display_name.chars() {
                if ch == '\\' || ch == '"' {
                    out.push('\\');
                }
                out.push(ch);
            }
            out.push('"');
        } else {
            out.push_str(&encoded);
        }
        out.push_str(" <");
        out.push_str(address);
        out.push('>');
        out
    }

    pub fn set_date_header<Tz: TimeZone>(&mut self, name: &str, date: &DateTime<Tz>)
    where
        Tz::Offset: fmt::Display,
    {
        self.headers.set_preformatted(name, vec![format_date(date)]);
    }

    /// Replaces every body part with a single one.
    pub fn set_body(&mut self, content_type: impl Into<String>, content: impl Into<String>) {
        self.parts.clear();
        self.add_alternative(content_type, content);
    }

    /// Appends a part; with more than one part the message becomes
    /// `multipart/alternative`. Parts are ordered from least to most preferred.
    pub fn add_alternative(&mut self, content_type: impl Into<String>, content: impl Into<String>) {
        self.parts.push(Part {
            content_type: content_type.into(),
            content: content.into(),
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Fixes the multipart boundary. Without it a random boundary is drawn on
    /// every serialization.
    pub fn set_boundary(&mut self, boundary: impl Into<String>) {
        self.boundary = Some(boundary.into());
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Arc::new(clock);
    }

    /// Drops headers, parts and boundary. Options and clock are kept.
    pub fn reset(&mut self) {
        self.headers.clear();
        self.parts.clear();
        self.boundary = None;
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}
