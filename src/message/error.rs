use thiserror::Error;

/// Errors raised when decoding encoded bodies or header values.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed quoted-printable data: {0}")]
    QuotedPrintable(String),
    #[error("malformed base64 data: {source}")]
    Base64 {
        #[source]
        source: base64::DecodeError,
    },
    #[error("decoded data is not valid UTF-8: {source}")]
    Utf8 {
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("unsupported charset {0:?}")]
    UnsupportedCharset(String),
    #[error("malformed encoded word {0:?}")]
    MalformedEncodedWord(String),
}

impl MessageError {
    pub(crate) fn quoted_printable<T: std::fmt::Display>(err: T) -> Self {
        Self::QuotedPrintable(err.to_string())
    }

    pub(crate) fn base64(source: base64::DecodeError) -> Self {
        Self::Base64 { source }
    }

    pub(crate) fn utf8(source: std::string::FromUtf8Error) -> Self {
        Self::Utf8 { source }
    }
}
