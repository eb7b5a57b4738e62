//! Wire protocol for Junction.
//!
//! This crate defines the messages Junction peers exchange and the
//! rules for getting them on and off the wire:
//!
//! - **Message kinds** ([`Hello`], [`Invocation`], [`Publish`], ...) —
//!   one value type per protocol message, each with a fixed positional
//!   field layout and a globally unique integer tag.
//! - **Dispatcher** ([`Message`]) — the sum type over every kind, for
//!   callers that receive a value without knowing its kind up front.
//! - **Codec seam** ([`Codec`], [`JsonCodec`]) — how a typed message
//!   becomes bytes and back.
//! - **Errors** ([`ProtocolError`]) — the closed set of ways an
//!   incoming message can be malformed.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and session
//! (who may say what, and when). It checks the shape and types of one
//! message at a time and nothing else: whether an INVOCATION is legal
//! right now is the session layer's call, and routing it is the
//! router's.
//!
//! ```text
//! Transport (bytes) → Codec (structural value) → Message (typed) → Session
//! ```
//!
//! # Wire format
//!
//! Every message is an ordered sequence whose first element is the
//! kind's tag, followed by the kind's fields at fixed positions:
//!
//! ```text
//! [68, request, registration, details, args?, kwargs?]   ← INVOCATION
//! ```
//!
//! Position — not a field name — carries meaning, so optional trailing
//! fields may only be present left-to-right with no gaps. The
//! [`Arguments`] type makes the illegal combinations impossible to
//! build.
//!
//! Decoding is pure and all-or-nothing: a call either produces a fully
//! valid message or the first violation found, with identical results
//! for identical inputs. Nothing here logs, retries, blocks, or shares
//! state, so decode/encode calls can run concurrently without
//! coordination.

mod codec;
mod error;
mod message;
mod pubsub;
mod rpc;
mod session;
mod types;
mod validate;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use message::Message;
pub use pubsub::{Event, Publish, Published, Subscribe, Subscribed, Unsubscribe, Unsubscribed};
pub use rpc::{
    Call, CallResult, Cancel, ErrorMessage, Interrupt, Invocation, Register, Registered,
    Unregister, Unregistered, Yield,
};
pub use session::{Abort, Authenticate, Challenge, Goodbye, Hello, Welcome};
pub use types::{
    Arguments, Dict, PublicationId, RegistrationId, RequestId, SessionId, SubscriptionId,
};

/// Largest protocol-legal identifier: 2^53, the biggest integer every
/// supported serialization format can carry exactly.
///
/// Session, request, registration, subscription, and publication
/// identifiers must all fall in `0 ..= MAX_ID`; decoding rejects
/// anything outside it.
pub const MAX_ID: u64 = 1 << 53;
