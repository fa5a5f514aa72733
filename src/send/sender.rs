use crate::message::Message;

/// Transport capability that delivers an already-built message.
///
/// `from` and `to` are the envelope addresses; `message` serializes itself
/// through [`Message::write_to`]. Errors are whatever the transport reports.
pub trait Sender {
    type Error;

    fn send(&mut self, from: &str, to: &[String], message: &Message) -> Result<(), Self::Error>;
}

/// A [`Sender`] holding a connection that callers manage across sends.
pub trait SendCloser: Sender {
    fn close(&mut self) -> Result<(), Self::Error>;

    fn reset(&mut self) -> Result<(), Self::Error>;
}

impl<S: Sender + ?Sized> Sender for &mut S {
    type Error = S::Error;

    fn send(&mut self, from: &str, to: &[String], message: &Message) -> Result<(), Self::Error> {
        (**self).send(from, to, message)
    }
}

/// Adapts a closure into a [`Sender`].
pub struct SendFunc<F>(F);

impl<F> SendFunc<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, E> Sender for SendFunc<F>
where
    F: FnMut(&str, &[String], &Message) -> Result<(), E>,
{
    type Error = E;

    fn send(&mut self, from: &str, to: &[String], message: &Message) -> Result<(), E> {
        (self.0)(from, to, message)
    }
}
