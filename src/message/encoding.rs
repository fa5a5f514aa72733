use std::borrow::Cow;
use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::error::MessageError;

/// Maximum length of a single RFC 2047 encoded word, delimiters included.
const MAX_ENCODED_WORD_LEN: usize = 75;
/// Base64 body lines are wrapped at this width (RFC 2045).
const BASE64_LINE_LEN: usize = 76;

/// Content-Transfer-Encoding applied to bodies, and the matching encoded-word
/// flavour for non-ASCII header values.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// `quoted-printable`; headers use `Q` encoded words.
    #[default]
    QuotedPrintable,
    /// `base64`; headers use `B` encoded words.
    Base64,
    /// `8bit`, the body is written untouched.
    Unencoded,
}

impl Encoding {
    /// Value of the `Content-Transfer-Encoding` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuotedPrintable => "quoted-printable",
            Self::Base64 => "base64",
            Self::Unencoded => "8bit",
        }
    }

    pub fn encode(&self, content: &[u8]) -> Vec<u8> {
        match self {
            Self::QuotedPrintable => quoted_printable::encode(content),
            Self::Base64 => wrap_lines(&STANDARD.encode(content), BASE64_LINE_LEN).into_bytes(),
            Self::Unencoded => content.to_vec(),
        }
    }

    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>, MessageError> {
        match self {
            Self::QuotedPrintable => {
                quoted_printable::decode(data, quoted_printable::ParseMode::Robust)
                    .map_err(MessageError::quoted_printable)
            }
            Self::Base64 => {
                let compact: Vec<u8> = data
                    .iter()
                    .copied()
                    .filter(|byte| !byte.is_ascii_whitespace())
                    .collect();
                STANDARD.decode(compact).map_err(MessageError::base64)
            }
            Self::Unencoded => Ok(data.to_vec()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrites bare `\n` and `\r` line breaks as `\r\n`.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let already_crlf = bytes.iter().enumerate().all(|(idx, byte)| match byte {
        b'\r' => bytes.get(idx + 1) == Some(&b'\n'),
        b'\n' => idx > 0 && bytes[idx - 1] == b'\r',
        _ => true,
    });
    if already_crlf {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn wrap_lines(encoded: &str, width: usize) -> String {
    let mut out = String::with_capacity(encoded.len() + encoded.len() / width * 2);
    // base64 output is ASCII, byte offsets are char boundaries
    for (idx, chunk) in encoded.as_bytes().chunks(width).enumerate() {
        if idx > 0 {
            out.push_str("\r\n");
        }
        out.extend(chunk.iter().map(|byte| char::from(*byte)));
    }
    out
}

fn needs_encoding(value: &str) -> bool {
    // a literal `=?` would be read back as the start of an encoded word
    value.contains("=?")
        || value
            .bytes()
            .any(|byte| (byte < b' ' || byte > b'~') && byte != b'\t')
}

/// Encodes a header value as one or more RFC 2047 encoded words when it holds
/// non-ASCII or control characters, or the `=?` word opener; any other
/// printable ASCII is returned unchanged.
///
/// `Base64` selects `B` words, every other encoding selects `Q` words. Long
/// values are split over several words separated by a single space, never
/// inside a character. The message writer folds header lines at those spaces.
pub fn encode_header_value<'a>(
    value: &'a str,
    charset: &str,
    encoding: Encoding,
) -> Cow<'a, str> {
    if !needs_encoding(value) {
        return Cow::Borrowed(value);
    }
    let payload_len = max_payload_len(charset);
    let flag = if encoding == Encoding::Base64 { 'b' } else { 'q' };

    let mut words: Vec<String> = Vec::new();
    match encoding {
        Encoding::Base64 => {
            let max_input = payload_len / 4 * 3;
            let mut chunk = String::new();
            for ch in value.chars() {
                if !chunk.is_empty() && chunk.len() + ch.len_utf8() > max_input {
                    words.push(STANDARD.encode(chunk.as_bytes()));
                    chunk.clear();
                }
                chunk.push(ch);
            }
            if !chunk.is_empty() {
                words.push(STANDARD.encode(chunk.as_bytes()));
            }
        }
        _ => {
            let mut current = String::new();
            let mut buf = [0u8; 4];
            for ch in value.chars() {
                let encoded = q_encode_char(ch.encode_utf8(&mut buf).as_bytes());
                if !current.is_empty() && current.len() + encoded.len() > payload_len {
                    words.push(std::mem::take(&mut current));
                }
                current.push_str(&encoded);
            }
            if !current.is_empty() {
                words.push(current);
            }
        }
    }

    let encoded = words
        .iter()
        .map(|payload| format!("=?{charset}?{flag}?{payload}?="))
        .collect::<Vec<_>>()
        .join(" ");
    Cow::Owned(encoded)
}

fn max_payload_len(charset: &str) -> usize {
    // "=?" charset "?x?" payload "?="
    MAX_ENCODED_WORD_LEN.saturating_sub(charset.len() + 7).max(12)
}

fn q_encode_char(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for &byte in bytes {
        match byte {
            b' ' => out.push('_'),
            b'!' | b'*' | b'+' | b'-' | b'/' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' => {
                out.push(char::from(byte))
            }
            other => out.push_str(&format!("={other:02X}")),
        }
    }
    out
}

/// Decodes every RFC 2047 encoded word found in `value`.
///
/// Text outside encoded words is kept verbatim; whitespace separating two
/// adjacent encoded words is dropped. Only UTF-8 and US-ASCII charsets are
/// understood.
pub fn decode_header_value(value: &str) -> Result<String, MessageError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    let mut after_word = false;

    while let Some(start) = rest.find("=?") {
        let (literal, candidate) = rest.split_at(start);
        match parse_encoded_word(candidate)? {
            Some((decoded, consumed)) => {
                if !(after_word && literal.chars().all(char::is_whitespace)) {
                    out.push_str(literal);
                }
                out.push_str(&decoded);
                rest = &candidate[consumed..];
                after_word = true;
            }
            None => {
                out.push_str(literal);
                out.push_str("=?");
                rest = &candidate[2..];
                after_word = false;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn parse_encoded_word(input: &str) -> Result<Option<(String, usize)>, MessageError> {
    let body = &input[2..];
    let Some((charset, after)) = body.split_once('?') else {
        return Ok(None);
    };
    let Some((flag, after)) = after.split_once('?') else {
        return Ok(None);
    };
    let Some(end) = after.find("?=") else {
        return Ok(None);
    };
    let text = &after[..end];
    let well_formed = !charset.is_empty()
        && !charset.contains(char::is_whitespace)
        && flag.len() == 1
        && !text.contains(char::is_whitespace);
    if !well_formed {
        return Ok(None);
    }

    // RFC 2231 language suffix, e.g. `UTF-8*en`
    let charset_name = charset.split('*').next().unwrap_or(charset);
    if !charset_name.eq_ignore_ascii_case("utf-8") && !charset_name.eq_ignore_ascii_case("us-ascii")
    {
        return Err(MessageError::UnsupportedCharset(charset.to_string()));
    }

    let bytes = match flag {
        "q" | "Q" => {
            q_decode(text).ok_or_else(|| MessageError::MalformedEncodedWord(text.to_string()))?
        }
        "b" | "B" => STANDARD.decode(text).map_err(MessageError::base64)?,
        _ => return Ok(None),
    };
    let decoded = String::from_utf8(bytes).map_err(MessageError::utf8)?;
    let consumed = 2 + charset.len() + 1 + flag.len() + 1 + end + 2;
    Ok(Some((decoded, consumed)))
}

fn q_decode(text: &str) -> Option<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'_' => {
                out.push(b' ');
                idx += 1;
            }
            b'=' => {
                let hex = bytes.get(idx + 1..idx + 3)?;
                if !hex.iter().all(u8::is_ascii_hexdigit) {
                    return None;
                }
                let hex = std::str::from_utf8(hex).ok()?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                idx += 3;
            }
            other => {
                out.push(other);
                idx += 1;
            }
        }
    }
    Some(out)
}
