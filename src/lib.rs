#![forbid(unsafe_code)]
//! mailsend_lib — composition de messages RFC 5322 et envoi via un `Sender`

pub mod message;
pub use message::{
    Clock,
    Encoding,
    FixedClock,
    Message,
    MessageError,
    MessageOptions,
    Part,
    SystemClock,
    decode_header_value,
    encode_header_value,
    format_date,
};

pub mod send;
pub use send::{
    Envelope, ProtocolError, SendBatchError, SendCloser, SendFunc, Sender, send, send_all,
    send_custom_from,
};
