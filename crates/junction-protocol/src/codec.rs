//! Codec trait and implementations for serializing/deserializing
//! messages.
//!
//! A "codec" converts between [`Message`] values and raw bytes. The
//! protocol layer doesn't care HOW messages are serialized — any format
//! that can represent the structural value (an ordered sequence of
//! integers, strings, lists, and dicts) will do, and peers negotiate
//! the format out of band. The message contracts themselves (arity,
//! tags, field shapes) are format-independent and live in the message
//! kinds, so every codec gets them for free.
//!
//! Currently we provide [`JsonCodec`] (human-readable, great for
//! debugging). A binary pack format can be added later without changing
//! any message code.

use crate::error::ProtocolError;
use crate::message::Message;
use serde_json::Value;

/// A codec that can turn messages into bytes and back.
///
/// `Send + Sync + 'static` so a single codec instance can be shared by
/// the connection tasks of an async transport.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a message into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the format cannot represent
    /// the message's payload values.
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a message.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are not
    /// well-formed for the format; if they parse but violate a message
    /// contract, the structural error (envelope, arity, tag, field) is
    /// surfaced unchanged.
    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that renders the wire sequence as JSON.
///
/// ## Example
///
/// ```rust
/// use junction_protocol::{Codec, Dict, Invocation, JsonCodec, Message, RegistrationId, RequestId};
///
/// let codec = JsonCodec;
/// let message = Message::Invocation(Invocation::new(
///     RequestId(1),
///     RegistrationId(2),
///     Dict::new(),
/// ));
///
/// let bytes = codec.encode(&message).unwrap();
/// assert_eq!(bytes, b"[68,1,2,{}]");
///
/// let decoded = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, message);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(&message.encode()).map_err(ProtocolError::Encode)
    }

    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError> {
        // Byte-level failures are the codec's (Decode); structural
        // failures belong to the message contract.
        let value: Value = serde_json::from_slice(data).map_err(ProtocolError::Decode)?;
        Message::decode(&value)
    }
}
