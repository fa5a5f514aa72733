use std::io::{self, Write};

use rand::{Rng, distributions::Alphanumeric};

use super::encoding::{encode_header_value, normalize_newlines};
use super::options::MessageOptions;
use super::{Message, Part, format_date};

const BOUNDARY_LEN: usize = 30;
/// Header lines are folded before passing this width (RFC 2047 section 2).
const MAX_LINE_LEN: usize = 76;

impl Message {
    /// Serializes the message into `w` and returns the number of bytes written.
    ///
    /// Output is identical for identical content as long as the `Date` header
    /// is set or the clock is fixed, and, for multipart messages, the
    /// boundary is fixed.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<u64> {
        let bytes = self.to_bytes();
        w.write_all(&bytes)?;
        Ok(bytes.len() as u64)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = MessageWriter {
            buf: Vec::with_capacity(512),
            options: &self.options,
        };

        for (name, values, preformatted) in self.headers.wire_entries() {
            if name.eq_ignore_ascii_case("Bcc") {
                continue;
            }
            if preformatted {
                out.raw_header(name, &values.join(", "));
            } else {
                out.header(name, values);
            }
        }
        if !self.headers.contains("Mime-Version") {
            out.raw_header("Mime-Version", "1.0");
        }
        if !self.headers.contains("Date") {
            let now = self.clock.now();
            #[cfg(feature = "with-tracing")]
            tracing::trace!(date = %now, "stamping implicit Date header");
            out.raw_header("Date", &format_date(&now));
        }

        match self.parts.as_slice() {
            [] => out.line(""),
            [part] => {
                out.part_headers(part);
                out.line("");
                out.part_body(part);
            }
            parts => {
                let boundary = self.boundary.clone().unwrap_or_else(random_boundary);
                out.raw_header(
                    "Content-Type",
                    &format!("multipart/alternative; boundary={boundary}"),
                );
                out.line("");
                for part in parts {
                    out.line(&format!("--{boundary}"));
                    out.part_headers(part);
                    out.line("");
                    out.part_body(part);
                    out.line("");
                }
                out.line(&format!("--{boundary}--"));
            }
        }
        out.buf
    }
}

struct MessageWriter<'a> {
    buf: Vec<u8>,
    options: &'a MessageOptions,
}

impl MessageWriter<'_> {
    fn header(&mut self, name: &str, values: &[String]) {
        let encoded: Vec<_> = values
            .iter()
            .map(|value| {
                encode_header_value(value, self.options.charset(), self.options.encoding())
            })
            .collect();
        self.raw_header(name, &encoded.join(", "));
    }

    fn raw_header(&mut self, name: &str, value: &str) {
        let line = format!("{name}: {value}");
        self.buf.extend_from_slice(fold_line(&line).as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    fn line(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    fn part_headers(&mut self, part: &Part) {
        let content_type = format!(
            "{}; charset={}",
            part.content_type(),
            self.options.charset()
        );
        self.raw_header("Content-Type", &content_type);
        self.raw_header(
            "Content-Transfer-Encoding",
            self.options.encoding().as_str(),
        );
    }

    fn part_body(&mut self, part: &Part) {
        let content = normalize_newlines(part.content());
        let encoded = self.options.encoding().encode(content.as_bytes());
        self.buf.extend_from_slice(&encoded);
    }
}

/// Inserts CRLF before spaces so no line grows past [`MAX_LINE_LEN`] where a
/// break is possible. Removing every inserted CRLF gives back `line`.
fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut width = 0;
    for (idx, token) in line.split(' ').enumerate() {
        if idx > 0 {
            if !token.is_empty() && width + 1 + token.len() > MAX_LINE_LEN {
                out.push_str("\r\n");
                width = 0;
            }
            out.push(' ');
            width += 1;
        }
        out.push_str(token);
        width += token.len();
    }
    out
}

fn random_boundary() -> String {
    let boundary: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect();
    #[cfg(feature = "with-tracing")]
    tracing::trace!(%boundary, "generated multipart boundary");
    boundary
}
