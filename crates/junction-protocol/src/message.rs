//! The [`Message`] sum type and tag dispatcher.
//!
//! Inbound traffic arrives as an arbitrary structural value whose kind
//! the caller does not know yet. [`Message::decode`] reads the tag in
//! element 0 and hands the whole value to the matching kind's decoder.
//! The tag → decoder mapping is a single `match` over every kind's
//! `TAG` constant, fixed at build time: adding a variant to `Message`
//! without wiring it into `decode`, `encode`, `tag`, or `name` fails to
//! compile on the exhaustive matches, and the dispatcher test walks
//! every kind to keep the `decode` arm list honest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::pubsub::{
    Event, Publish, Published, Subscribe, Subscribed, Unsubscribe, Unsubscribed,
};
use crate::rpc::{
    Call, CallResult, Cancel, ErrorMessage, Interrupt, Invocation, Register, Registered,
    Unregister, Unregistered, Yield,
};
use crate::session::{Abort, Authenticate, Challenge, Goodbye, Hello, Welcome};
use crate::validate;

/// Any protocol message, tagged by kind.
///
/// This is the exhaustive union of every message the protocol defines.
/// Session logic typically matches on it right after
/// [`Message::decode`]:
///
/// ```rust
/// use junction_protocol::Message;
/// use serde_json::json;
///
/// match Message::decode(&json!([1, "realm1", {}])).unwrap() {
///     Message::Hello(hello) => assert_eq!(hello.realm, "realm1"),
///     other => panic!("expected HELLO, got {}", other.name()),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Session opening request.
    Hello(Hello),
    /// Session opening acceptance.
    Welcome(Welcome),
    /// Session opening rejection.
    Abort(Abort),
    /// Authentication challenge.
    Challenge(Challenge),
    /// Authentication response.
    Authenticate(Authenticate),
    /// Session close.
    Goodbye(Goodbye),
    /// Failure answer to any request kind.
    Error(ErrorMessage),
    /// Topic publication request.
    Publish(Publish),
    /// Publication acknowledgement.
    Published(Published),
    /// Topic subscription request.
    Subscribe(Subscribe),
    /// Subscription acknowledgement.
    Subscribed(Subscribed),
    /// Subscription withdrawal request.
    Unsubscribe(Unsubscribe),
    /// Subscription withdrawal acknowledgement.
    Unsubscribed(Unsubscribed),
    /// Publication delivery to a subscriber.
    Event(Event),
    /// Procedure call request.
    Call(Call),
    /// Call cancellation from the caller.
    Cancel(Cancel),
    /// Call answer to the caller.
    Result(CallResult),
    /// Procedure registration request.
    Register(Register),
    /// Registration acknowledgement.
    Registered(Registered),
    /// Registration withdrawal request.
    Unregister(Unregister),
    /// Registration withdrawal acknowledgement.
    Unregistered(Unregistered),
    /// Call delivery to the callee.
    Invocation(Invocation),
    /// Invocation abort towards the callee.
    Interrupt(Interrupt),
    /// Invocation answer from the callee.
    Yield(Yield),
}

impl Message {
    /// Decodes any message by reading the tag in element 0.
    ///
    /// Nothing beyond element 0 is assumed well-formed: the selected
    /// kind's decoder re-checks the envelope, arity, tag, and every
    /// field, and its result or error is propagated unchanged.
    ///
    /// # Errors
    /// - [`ProtocolError::Envelope`] — the value is not a sequence, or
    ///   is empty (there is no element 0 to read).
    /// - [`ProtocolError::TagKind`] — element 0 is not an integer.
    /// - [`ProtocolError::UnknownTag`] — the integer maps to no kind.
    /// - Anything the selected kind's decoder returns.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        let first = items.first().ok_or(ProtocolError::Envelope {
            got: "an empty list",
        })?;
        let tag = first.as_u64().ok_or(ProtocolError::TagKind {
            got: validate::kind_of(first),
        })?;

        match tag {
            Hello::TAG => Hello::decode(value).map(Self::Hello),
            Welcome::TAG => Welcome::decode(value).map(Self::Welcome),
            Abort::TAG => Abort::decode(value).map(Self::Abort),
            Challenge::TAG => Challenge::decode(value).map(Self::Challenge),
            Authenticate::TAG => Authenticate::decode(value).map(Self::Authenticate),
            Goodbye::TAG => Goodbye::decode(value).map(Self::Goodbye),
            ErrorMessage::TAG => ErrorMessage::decode(value).map(Self::Error),
            Publish::TAG => Publish::decode(value).map(Self::Publish),
            Published::TAG => Published::decode(value).map(Self::Published),
            Subscribe::TAG => Subscribe::decode(value).map(Self::Subscribe),
            Subscribed::TAG => Subscribed::decode(value).map(Self::Subscribed),
            Unsubscribe::TAG => Unsubscribe::decode(value).map(Self::Unsubscribe),
            Unsubscribed::TAG => Unsubscribed::decode(value).map(Self::Unsubscribed),
            Event::TAG => Event::decode(value).map(Self::Event),
            Call::TAG => Call::decode(value).map(Self::Call),
            Cancel::TAG => Cancel::decode(value).map(Self::Cancel),
            CallResult::TAG => CallResult::decode(value).map(Self::Result),
            Register::TAG => Register::decode(value).map(Self::Register),
            Registered::TAG => Registered::decode(value).map(Self::Registered),
            Unregister::TAG => Unregister::decode(value).map(Self::Unregister),
            Unregistered::TAG => Unregistered::decode(value).map(Self::Unregistered),
            Invocation::TAG => Invocation::decode(value).map(Self::Invocation),
            Interrupt::TAG => Interrupt::decode(value).map(Self::Interrupt),
            Yield::TAG => Yield::decode(value).map(Self::Yield),
            unknown => Err(ProtocolError::UnknownTag(unknown)),
        }
    }

    /// Encodes this message to its wire sequence.
    pub fn encode(&self) -> Value {
        match self {
            Self::Hello(m) => m.encode(),
            Self::Welcome(m) => m.encode(),
            Self::Abort(m) => m.encode(),
            Self::Challenge(m) => m.encode(),
            Self::Authenticate(m) => m.encode(),
            Self::Goodbye(m) => m.encode(),
            Self::Error(m) => m.encode(),
            Self::Publish(m) => m.encode(),
            Self::Published(m) => m.encode(),
            Self::Subscribe(m) => m.encode(),
            Self::Subscribed(m) => m.encode(),
            Self::Unsubscribe(m) => m.encode(),
            Self::Unsubscribed(m) => m.encode(),
            Self::Event(m) => m.encode(),
            Self::Call(m) => m.encode(),
            Self::Cancel(m) => m.encode(),
            Self::Result(m) => m.encode(),
            Self::Register(m) => m.encode(),
            Self::Registered(m) => m.encode(),
            Self::Unregister(m) => m.encode(),
            Self::Unregistered(m) => m.encode(),
            Self::Invocation(m) => m.encode(),
            Self::Interrupt(m) => m.encode(),
            Self::Yield(m) => m.encode(),
        }
    }

    /// The wire tag of this message's kind.
    pub fn tag(&self) -> u64 {
        match self {
            Self::Hello(_) => Hello::TAG,
            Self::Welcome(_) => Welcome::TAG,
            Self::Abort(_) => Abort::TAG,
            Self::Challenge(_) => Challenge::TAG,
            Self::Authenticate(_) => Authenticate::TAG,
            Self::Goodbye(_) => Goodbye::TAG,
            Self::Error(_) => ErrorMessage::TAG,
            Self::Publish(_) => Publish::TAG,
            Self::Published(_) => Published::TAG,
            Self::Subscribe(_) => Subscribe::TAG,
            Self::Subscribed(_) => Subscribed::TAG,
            Self::Unsubscribe(_) => Unsubscribe::TAG,
            Self::Unsubscribed(_) => Unsubscribed::TAG,
            Self::Event(_) => Event::TAG,
            Self::Call(_) => Call::TAG,
            Self::Cancel(_) => Cancel::TAG,
            Self::Result(_) => CallResult::TAG,
            Self::Register(_) => Register::TAG,
            Self::Registered(_) => Registered::TAG,
            Self::Unregister(_) => Unregister::TAG,
            Self::Unregistered(_) => Unregistered::TAG,
            Self::Invocation(_) => Invocation::TAG,
            Self::Interrupt(_) => Interrupt::TAG,
            Self::Yield(_) => Yield::TAG,
        }
    }

    /// The protocol-level name of this message's kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hello(_) => Hello::NAME,
            Self::Welcome(_) => Welcome::NAME,
            Self::Abort(_) => Abort::NAME,
            Self::Challenge(_) => Challenge::NAME,
            Self::Authenticate(_) => Authenticate::NAME,
            Self::Goodbye(_) => Goodbye::NAME,
            Self::Error(_) => ErrorMessage::NAME,
            Self::Publish(_) => Publish::NAME,
            Self::Published(_) => Published::NAME,
            Self::Subscribe(_) => Subscribe::NAME,
            Self::Subscribed(_) => Subscribed::NAME,
            Self::Unsubscribe(_) => Unsubscribe::NAME,
            Self::Unsubscribed(_) => Unsubscribed::NAME,
            Self::Event(_) => Event::NAME,
            Self::Call(_) => Call::NAME,
            Self::Cancel(_) => Cancel::NAME,
            Self::Result(_) => CallResult::NAME,
            Self::Register(_) => Register::NAME,
            Self::Registered(_) => Registered::NAME,
            Self::Unregister(_) => Unregister::NAME,
            Self::Unregistered(_) => Unregistered::NAME,
            Self::Invocation(_) => Invocation::NAME,
            Self::Interrupt(_) => Interrupt::NAME,
            Self::Yield(_) => Yield::NAME,
        }
    }
}

/// A [`Message`] serializes as its positional wire sequence, so the
/// type plugs directly into any serde-based byte format.
impl Serialize for Message {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.encode().serialize(serializer)
    }
}

/// Deserializing parses the structural value first, then applies the
/// dispatcher; structural violations surface as the format's custom
/// error.
impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Message::decode(&value).map_err(serde::de::Error::custom)
    }
}

// =========================================================================
// Tests
// =========================================================================
