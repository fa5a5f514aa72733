use thiserror::Error;

/// Reply-code style failure a [`Sender`](super::Sender) can surface, e.g. an
/// SMTP `4xx`/`5xx` answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} {message}")]
pub struct ProtocolError {
    pub code: u16,
    pub message: String,
}

impl ProtocolError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

/// Failure of [`send_all`](super::send_all): which message, and why.
#[derive(Debug, Error)]
#[error("could not send message {index}: {source}")]
pub struct SendBatchError<E> {
    pub index: usize,
    #[source]
    pub source: E,
}

impl<E> SendBatchError<E> {
    pub(crate) fn new(index: usize, source: E) -> Self {
        Self { index, source }
    }

    pub fn into_inner(self) -> E {
        self.source
    }
}
