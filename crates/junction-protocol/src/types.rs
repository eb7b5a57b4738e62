//! Identifier newtypes and the argument payload type shared by every
//! message kind.

use serde_json::Value;

use crate::error::ProtocolError;

/// A string-keyed mapping, as carried by `details`/`options`/`extra`
/// fields and keyword arguments.
///
/// The content is opaque to this layer — only the shape ("a dict") is
/// enforced. `serde_json::Map` preserves insertion order, which keeps
/// encode deterministic.
pub type Dict = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Identifier newtypes
// ---------------------------------------------------------------------------

/// A router-assigned session identifier.
///
/// Each identifier role gets its own newtype so a `RequestId` can't be
/// passed where a `RegistrationId` belongs — they are all `u64` on the
/// wire, and nothing else tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// A caller-assigned request identifier, echoed by responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// A router-assigned procedure registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(pub u64);

/// A router-assigned topic subscription identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A router-assigned publication identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicationId(pub u64);

// ---------------------------------------------------------------------------
// Arguments — the optional trailing payload
// ---------------------------------------------------------------------------

/// The application payload carried at the end of PUBLISH, EVENT, CALL,
/// RESULT, INVOCATION, YIELD, and ERROR messages.
///
/// On the wire the payload is up to two optional trailing fields: a
/// positional `args` list, then a keyword `kwargs` dict. Because
/// position — not a field name — carries meaning, kwargs can only be
/// present while args is present; otherwise the dict would sit in the
/// args slot and change meaning entirely. This enum makes that illegal
/// state impossible to build rather than checking for it at encode
/// time.
///
/// `Args(vec![])` and `None` are different values: an empty list is
/// *present* on the wire, an absent list is not, and the two must
/// round-trip distinctly.
///
/// ## Example
///
/// ```rust
/// use junction_protocol::{Arguments, Dict};
/// use serde_json::json;
///
/// let none = Arguments::None;
/// assert!(none.args().is_none());
///
/// let args = Arguments::Args(vec![json!(1), json!(2)]);
/// assert_eq!(args.args(), Some(&[json!(1), json!(2)][..]));
/// assert!(args.kwargs().is_none());
///
/// // kwargs without args cannot be built from parts:
/// assert!(Arguments::from_parts(None, Some(Dict::new())).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Arguments {
    /// No payload fields on the wire.
    #[default]
    None,
    /// Positional arguments only.
    Args(Vec<Value>),
    /// Positional and keyword arguments.
    ArgsKwargs(Vec<Value>, Dict),
}

impl Arguments {
    /// Builds a payload from separately held options, rejecting the
    /// kwargs-without-args combination.
    ///
    /// # Errors
    /// Returns [`ProtocolError::KwargsWithoutArgs`] when `kwargs` is
    /// `Some` but `args` is `None`.
    pub fn from_parts(
        args: Option<Vec<Value>>,
        kwargs: Option<Dict>,
    ) -> Result<Self, ProtocolError> {
        match (args, kwargs) {
            (None, None) => Ok(Self::None),
            (Some(args), None) => Ok(Self::Args(args)),
            (Some(args), Some(kwargs)) => Ok(Self::ArgsKwargs(args, kwargs)),
            (None, Some(_)) => Err(ProtocolError::KwargsWithoutArgs),
        }
    }

    /// The positional arguments, if present on the wire.
    pub fn args(&self) -> Option<&[Value]> {
        match self {
            Self::None => None,
            Self::Args(args) | Self::ArgsKwargs(args, _) => Some(args),
        }
    }

    /// The keyword arguments, if present on the wire.
    pub fn kwargs(&self) -> Option<&Dict> {
        match self {
            Self::None | Self::Args(_) => None,
            Self::ArgsKwargs(_, kwargs) => Some(kwargs),
        }
    }

    /// True when no payload fields are present.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Appends the payload fields to a wire sequence under
    /// construction, in positional order.
    pub(crate) fn append_to(&self, items: &mut Vec<Value>) {
        match self {
            Self::None => {}
            Self::Args(args) => {
                items.push(Value::Array(args.clone()));
            }
            Self::ArgsKwargs(args, kwargs) => {
                items.push(Value::Array(args.clone()));
                items.push(Value::Object(kwargs.clone()));
            }
        }
    }
}
