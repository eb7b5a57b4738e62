//! Error types for the protocol layer.
//!
//! Every way an incoming message can be malformed has exactly one
//! variant here, and each variant carries the context a session layer
//! needs to report the problem (which kind, which field, expected vs.
//! actual). Decoding fails fast: the first violation is returned and
//! nothing else is inspected, so the same bad input always produces the
//! same error.
//!
//! None of these are retryable at this layer. Deciding what to do with
//! a malformed message — drop the connection, answer with an ABORT —
//! belongs to the session layer, which is also why this crate never
//! logs: the error itself carries everything worth logging.

/// Errors that can occur while decoding or encoding protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The input is not a message sequence at all.
    ///
    /// Raised before anything kind-specific: a message must be an
    /// ordered sequence (with at least a tag element) before a tag or a
    /// field can be read from it.
    #[error("expected a message list, got {got}")]
    Envelope {
        /// Shape of the value that was received instead.
        got: &'static str,
    },

    /// The sequence length is outside the kind's declared bounds.
    ///
    /// Arity counts include the tag element, so an INVOCATION with no
    /// optional tail has length 4.
    #[error("{kind}: expected between {min} and {max} elements, got {len}")]
    Arity {
        kind: &'static str,
        min: usize,
        max: usize,
        len: usize,
    },

    /// Element 0 is an integer, but not the tag of the kind being
    /// decoded.
    ///
    /// Checked after arity and before any field, so a wrong tag never
    /// masquerades as a field problem and vice versa.
    #[error("{kind}: expected message tag {expected}, got {got}")]
    Tag {
        kind: &'static str,
        expected: u64,
        got: u64,
    },

    /// Element 0 is not an integer, so there is no tag to compare.
    #[error("message tag must be an unsigned integer, got {got}")]
    TagKind {
        /// Shape of the value found in the tag slot.
        got: &'static str,
    },

    /// The dispatcher saw an integer tag that maps to no known kind.
    #[error("unknown message tag {0}")]
    UnknownTag(u64),

    /// A positional field failed its shape check.
    #[error("{kind}: field '{field}' must be {expected}, got {got}")]
    Field {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// Keyword arguments were supplied without positional arguments.
    ///
    /// Position carries meaning on the wire, so a kwargs dict can only
    /// occupy its slot when the args list occupies the slot before it.
    /// [`Arguments::from_parts`](crate::Arguments::from_parts) rejects
    /// the combination instead of shifting fields out of meaning.
    #[error("keyword arguments cannot be carried without positional arguments")]
    KwargsWithoutArgs,

    /// Serializing a message to bytes failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The bytes were not a well-formed serializer payload.
    ///
    /// This is the byte-level failure only. Bytes that parse into a
    /// structural value but violate a message contract surface one of
    /// the structural variants above instead.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
