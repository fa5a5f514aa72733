//! Hands messages to a [`Sender`].
//!
//! [`send`] derives the [`Envelope`] from the message headers and forwards the
//! message once. Sender errors come back untouched, so callers can match on
//! the transport's own error type. Connection lifecycle (`close`/`reset` on a
//! [`SendCloser`]) is left to the caller.

mod envelope;
mod error;
mod sender;

pub use envelope::Envelope;
pub use error::{ProtocolError, SendBatchError};
pub use sender::{SendCloser, SendFunc, Sender};

use crate::message::Message;

/// Sends `message` with the envelope sender taken from its `From` header.
pub fn send<S>(sender: &mut S, message: &Message) -> Result<(), S::Error>
where
    S: Sender + ?Sized,
{
    forward(sender, &Envelope::from_message(message), message)
}

/// Sends `message` with `from` as envelope sender. The `From` header of the
/// message is left as is.
pub fn send_custom_from<S>(sender: &mut S, from: &str, message: &Message) -> Result<(), S::Error>
where
    S: Sender + ?Sized,
{
    forward(sender, &Envelope::with_sender(from, message), message)
}

/// Sends `messages` in order and stops at the first failure.
pub fn send_all<'a, S, I>(sender: &mut S, messages: I) -> Result<(), SendBatchError<S::Error>>
where
    S: Sender + ?Sized,
    I: IntoIterator<Item = &'a Message>,
{
    for (index, message) in messages.into_iter().enumerate() {
        send(sender, message).map_err(|source| SendBatchError::new(index, source))?;
    }
    Ok(())
}

fn forward<S>(sender: &mut S, envelope: &Envelope, message: &Message) -> Result<(), S::Error>
where
    S: Sender + ?Sized,
{
    #[cfg(feature = "with-tracing")]
    tracing::debug!(
        from = %envelope.from,
        recipients = envelope.to.len(),
        "forwarding message to sender"
    );
    sender
        .send(&envelope.from, &envelope.to, message)
        .inspect_err(|_| log_rejected(envelope))
}

#[cfg(feature = "with-tracing")]
fn log_rejected(envelope: &Envelope) {
    tracing::warn!(from = %envelope.from, "sender rejected message");
}

#[cfg(not(feature = "with-tracing"))]
fn log_rejected(_envelope: &Envelope) {}
