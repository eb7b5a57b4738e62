//! Session-lifecycle message kinds.
//!
//! These six kinds open, authenticate, and close a session: HELLO and
//! WELCOME establish it, CHALLENGE and AUTHENTICATE run an optional
//! auth exchange, ABORT rejects an attempt before a session exists, and
//! GOODBYE closes an established one. Whether any of them is *legal* at
//! a given moment is the session layer's business — this module only
//! enforces their wire shape.
//!
//! Each kind follows the same decode sequence: envelope, arity, tag,
//! then fields at fixed positions. See [`crate::validate`] for the
//! individual steps.

use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::{Dict, SessionId};
use crate::validate;

// ---------------------------------------------------------------------------
// HELLO
// ---------------------------------------------------------------------------

/// Opens a session attempt.
///
/// Wire shape: `[1, realm, details]`. The realm names the routing
/// namespace the client wants to join; the details dict announces the
/// client's roles and features and is opaque to this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Hello {
    /// The realm to join.
    pub realm: String,
    /// Feature and role announcements.
    pub details: Dict,
}

impl Hello {
    /// HELLO's wire tag.
    pub const TAG: u64 = 1;
    pub(crate) const NAME: &'static str = "HELLO";

    /// Creates a HELLO for the given realm.
    pub fn new(realm: impl Into<String>, details: Dict) -> Self {
        Self {
            realm: realm.into(),
            details,
        }
    }

    /// Decodes a HELLO from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found: envelope, arity, tag, then
    /// field shape, in that order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let realm = validate::string_field(Self::NAME, "realm", &items[1])?;
        let details = validate::dict_field(Self::NAME, "details", &items[2])?;
        Ok(Self { realm, details })
    }

    /// Encodes this HELLO to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.realm.clone()),
            Value::Object(self.details.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// WELCOME
// ---------------------------------------------------------------------------

/// Accepts a session attempt.
///
/// Wire shape: `[2, session, details]`. The router assigns the session
/// identifier and announces its own roles in the details dict.
#[derive(Debug, Clone, PartialEq)]
pub struct Welcome {
    /// The router-assigned session identifier.
    pub session: SessionId,
    /// Router role and feature announcements.
    pub details: Dict,
}

impl Welcome {
    /// WELCOME's wire tag.
    pub const TAG: u64 = 2;
    pub(crate) const NAME: &'static str = "WELCOME";

    /// Creates a WELCOME for the given session.
    pub fn new(session: SessionId, details: Dict) -> Self {
        Self { session, details }
    }

    /// Decodes a WELCOME from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let session = SessionId(validate::id_field(Self::NAME, "session ID", &items[1])?);
        let details = validate::dict_field(Self::NAME, "details", &items[2])?;
        Ok(Self { session, details })
    }

    /// Encodes this WELCOME to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.session.0),
            Value::Object(self.details.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// ABORT
// ---------------------------------------------------------------------------

/// Rejects a session attempt.
///
/// Wire shape: `[3, details, reason]`. Same layout as GOODBYE; only
/// the tag and the meaning differ.
#[derive(Debug, Clone, PartialEq)]
pub struct Abort {
    /// Diagnostic details.
    pub details: Dict,
    /// The reason for rejecting, as a protocol URI.
    pub reason: String,
}

impl Abort {
    /// ABORT's wire tag.
    pub const TAG: u64 = 3;
    pub(crate) const NAME: &'static str = "ABORT";

    /// Creates an ABORT with the given reason.
    pub fn new(details: Dict, reason: impl Into<String>) -> Self {
        Self {
            details,
            reason: reason.into(),
        }
    }

    /// Decodes an ABORT from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let details = validate::dict_field(Self::NAME, "details", &items[1])?;
        let reason = validate::string_field(Self::NAME, "reason", &items[2])?;
        Ok(Self { details, reason })
    }

    /// Encodes this ABORT to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::Object(self.details.clone()),
            Value::from(self.reason.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// CHALLENGE
// ---------------------------------------------------------------------------

/// Asks the client to authenticate.
///
/// Wire shape: `[4, auth method, extra]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    /// The authentication method the router expects.
    pub auth_method: String,
    /// Method-specific challenge data.
    pub extra: Dict,
}

impl Challenge {
    /// CHALLENGE's wire tag.
    pub const TAG: u64 = 4;
    pub(crate) const NAME: &'static str = "CHALLENGE";

    /// Creates a CHALLENGE for the given method.
    pub fn new(auth_method: impl Into<String>, extra: Dict) -> Self {
        Self {
            auth_method: auth_method.into(),
            extra,
        }
    }

    /// Decodes a CHALLENGE from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let auth_method = validate::string_field(Self::NAME, "auth method", &items[1])?;
        let extra = validate::dict_field(Self::NAME, "extra", &items[2])?;
        Ok(Self { auth_method, extra })
    }

    /// Encodes this CHALLENGE to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.auth_method.clone()),
            Value::Object(self.extra.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// AUTHENTICATE
// ---------------------------------------------------------------------------

/// Answers a CHALLENGE.
///
/// Wire shape: `[5, signature, extra]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticate {
    /// The computed challenge response.
    pub signature: String,
    /// Method-specific response data.
    pub extra: Dict,
}

impl Authenticate {
    /// AUTHENTICATE's wire tag.
    pub const TAG: u64 = 5;
    pub(crate) const NAME: &'static str = "AUTHENTICATE";

    /// Creates an AUTHENTICATE carrying the given signature.
    pub fn new(signature: impl Into<String>, extra: Dict) -> Self {
        Self {
            signature: signature.into(),
            extra,
        }
    }

    /// Decodes an AUTHENTICATE from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let signature = validate::string_field(Self::NAME, "signature", &items[1])?;
        let extra = validate::dict_field(Self::NAME, "extra", &items[2])?;
        Ok(Self { signature, extra })
    }

    /// Encodes this AUTHENTICATE to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.signature.clone()),
            Value::Object(self.extra.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// GOODBYE
// ---------------------------------------------------------------------------

/// Closes an established session.
///
/// Wire shape: `[6, details, reason]`. Sent by either side; the peer
/// answers with its own GOODBYE (a session-layer concern).
#[derive(Debug, Clone, PartialEq)]
pub struct Goodbye {
    /// Diagnostic details.
    pub details: Dict,
    /// The reason for closing, as a protocol URI.
    pub reason: String,
}

impl Goodbye {
    /// GOODBYE's wire tag.
    pub const TAG: u64 = 6;
    pub(crate) const NAME: &'static str = "GOODBYE";

    /// Creates a GOODBYE with the given reason.
    pub fn new(details: Dict, reason: impl Into<String>) -> Self {
        Self {
            details,
            reason: reason.into(),
        }
    }

    /// Decodes a GOODBYE from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let details = validate::dict_field(Self::NAME, "details", &items[1])?;
        let reason = validate::string_field(Self::NAME, "reason", &items[2])?;
        Ok(Self { details, reason })
    }

    /// Encodes this GOODBYE to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::Object(self.details.clone()),
            Value::from(self.reason.clone()),
        ])
    }
}

// =========================================================================
// Tests
// =========================================================================
