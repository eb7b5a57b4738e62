//! Field validation primitives shared by every message kind.
//!
//! Decoding is the same dance for every kind: check that the input is a
//! sequence, check its arity, check the tag, then pull each field out
//! of its slot with the required shape. These helpers implement the
//! individual steps so the message modules stay declarative, and they
//! guarantee uniform error context — every failure names the message
//! kind, the field, and the expected vs. actual shape in the same
//! words.
//!
//! All of these are pure functions over the input value. They never
//! mutate it and never partially succeed.

use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::{Arguments, Dict};
use crate::MAX_ID;

/// Human-readable shape name for a structural value, used on the
/// "got" side of every error.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(n) if n.as_u64().is_some() => "an integer",
        Value::Number(n) if n.as_i64().is_some() => "a negative integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a dict",
    }
}

/// Step 1 of every decode: the input must be an ordered sequence.
pub(crate) fn message_list(value: &Value) -> Result<&[Value], ProtocolError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ProtocolError::Envelope {
            got: kind_of(value),
        })
}

/// Step 2: the sequence length must fall inside the kind's bounds
/// (counting the tag element).
pub(crate) fn check_arity(
    kind: &'static str,
    items: &[Value],
    min: usize,
    max: usize,
) -> Result<(), ProtocolError> {
    if items.len() < min || items.len() > max {
        return Err(ProtocolError::Arity {
            kind,
            min,
            max,
            len: items.len(),
        });
    }
    Ok(())
}

/// Step 3: element 0 must be the kind's tag.
///
/// Callers run [`check_arity`] first (every kind's minimum is at least
/// 2), so slot 0 exists here.
pub(crate) fn check_tag(
    kind: &'static str,
    items: &[Value],
    expected: u64,
) -> Result<(), ProtocolError> {
    let got = items[0].as_u64().ok_or(ProtocolError::TagKind {
        got: kind_of(&items[0]),
    })?;
    if got != expected {
        return Err(ProtocolError::Tag {
            kind,
            expected,
            got,
        });
    }
    Ok(())
}

/// Extracts a protocol identifier: a non-negative integer no larger
/// than [`MAX_ID`].
pub(crate) fn id_field(
    kind: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<u64, ProtocolError> {
    match value.as_u64() {
        Some(id) if id <= MAX_ID => Ok(id),
        Some(_) => Err(ProtocolError::Field {
            kind,
            field,
            expected: "an id",
            got: "an out-of-range integer",
        }),
        None => Err(ProtocolError::Field {
            kind,
            field,
            expected: "an id",
            got: kind_of(value),
        }),
    }
}

/// Extracts a plain non-negative integer (no identifier range check).
/// Used for fields like ERROR's request kind, which is a message tag
/// rather than an identifier.
pub(crate) fn int_field(
    kind: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<u64, ProtocolError> {
    value.as_u64().ok_or(ProtocolError::Field {
        kind,
        field,
        expected: "an integer",
        got: kind_of(value),
    })
}

/// Extracts a string field.
pub(crate) fn string_field(
    kind: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<String, ProtocolError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(ProtocolError::Field {
            kind,
            field,
            expected: "a string",
            got: kind_of(value),
        })
}

/// Extracts a dict field (`details`, `options`, `extra`, `kwargs`).
pub(crate) fn dict_field(
    kind: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Dict, ProtocolError> {
    value.as_object().cloned().ok_or(ProtocolError::Field {
        kind,
        field,
        expected: "a dict",
        got: kind_of(value),
    })
}

/// Extracts a list field.
pub(crate) fn list_field(
    kind: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Vec<Value>, ProtocolError> {
    value.as_array().cloned().ok_or(ProtocolError::Field {
        kind,
        field,
        expected: "a list",
        got: kind_of(value),
    })
}

/// Extracts the optional `args`/`kwargs` tail starting at `start`.
///
/// A slot that exists must have the right shape; a slot past the end of
/// the sequence is absent. Because the fields are read positionally,
/// kwargs can only ever be seen after args — the illegal
/// kwargs-without-args state cannot come off the wire.
pub(crate) fn arguments_tail(
    kind: &'static str,
    items: &[Value],
    start: usize,
) -> Result<Arguments, ProtocolError> {
    let args = match items.get(start) {
        Some(value) => list_field(kind, "args", value)?,
        None => return Ok(Arguments::None),
    };
    match items.get(start + 1) {
        Some(value) => {
            let kwargs = dict_field(kind, "kwargs", value)?;
            Ok(Arguments::ArgsKwargs(args, kwargs))
        }
        None => Ok(Arguments::Args(args)),
    }
}
