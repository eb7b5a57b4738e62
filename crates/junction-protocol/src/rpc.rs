//! Remote procedure call message kinds.
//!
//! A callee offers a procedure with REGISTER/REGISTERED and withdraws
//! it with UNREGISTER/UNREGISTERED. A caller issues CALL; the router
//! forwards it to the callee as INVOCATION; the callee answers with
//! YIELD; the router relays the answer to the caller as RESULT. CANCEL
//! and INTERRUPT abort an in-flight call from either end, and ERROR is
//! the failure answer to any request kind (RPC or pub-sub alike).
//!
//! CALL, INVOCATION, YIELD, RESULT, and ERROR carry the optional
//! [`Arguments`] payload tail.

use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::{Arguments, Dict, RegistrationId, RequestId};
use crate::validate;

// ---------------------------------------------------------------------------
// ERROR
// ---------------------------------------------------------------------------

/// Reports the failure of an earlier request.
///
/// Wire shape: `[8, request kind, request, details, error, args?, kwargs?]`.
/// The request kind is the *tag* of the failed request (CALL, SUBSCRIBE,
/// ...), so one ERROR layout serves every request in the protocol; it is
/// a plain integer, not an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMessage {
    /// Tag of the request kind being failed.
    pub request_kind: u64,
    /// The request being failed.
    pub request: RequestId,
    /// Diagnostic details.
    pub details: Dict,
    /// The error, as a protocol URI.
    pub error: String,
    /// The application payload.
    pub arguments: Arguments,
}

impl ErrorMessage {
    /// ERROR's wire tag.
    pub const TAG: u64 = 8;
    pub(crate) const NAME: &'static str = "ERROR";

    /// Creates a payload-less ERROR for the given request.
    pub fn new(
        request_kind: u64,
        request: RequestId,
        details: Dict,
        error: impl Into<String>,
    ) -> Self {
        Self {
            request_kind,
            request,
            details,
            error: error.into(),
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes an ERROR from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 5, 7)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request_kind = validate::int_field(Self::NAME, "request kind", &items[1])?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[2])?);
        let details = validate::dict_field(Self::NAME, "details", &items[3])?;
        let error = validate::string_field(Self::NAME, "error", &items[4])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 5)?;
        Ok(Self {
            request_kind,
            request,
            details,
            error,
            arguments,
        })
    }

    /// Encodes this ERROR to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.request_kind),
            Value::from(self.request.0),
            Value::Object(self.details.clone()),
            Value::from(self.error.clone()),
        ];
        self.arguments.append_to(&mut items);
        Value::Array(items)
    }
}

// ---------------------------------------------------------------------------
// CALL
// ---------------------------------------------------------------------------

/// Calls a procedure.
///
/// Wire shape: `[48, request, options, procedure, args?, kwargs?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Caller-assigned request identifier.
    pub request: RequestId,
    /// Call options.
    pub options: Dict,
    /// The procedure to call.
    pub procedure: String,
    /// The application payload.
    pub arguments: Arguments,
}

impl Call {
    /// CALL's wire tag.
    pub const TAG: u64 = 48;
    pub(crate) const NAME: &'static str = "CALL";

    /// Creates a payload-less CALL.
    pub fn new(request: RequestId, options: Dict, procedure: impl Into<String>) -> Self {
        Self {
            request,
            options,
            procedure: procedure.into(),
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes a CALL from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 4, 6)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        let procedure = validate::string_field(Self::NAME, "procedure", &items[3])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 4)?;
        Ok(Self {
            request,
            options,
            procedure,
            arguments,
        })
    }

    /// Encodes this CALL to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
            Value::from(self.procedure.clone()),
        ];
        self.arguments.append_to(&mut items);
        Value::Array(items)
    }
}

// ---------------------------------------------------------------------------
// CANCEL
// ---------------------------------------------------------------------------

/// Cancels an in-flight CALL from the caller side.
///
/// Wire shape: `[49, request, options]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cancel {
    /// The request to cancel.
    pub request: RequestId,
    /// Cancel options (e.g. the cancellation mode).
    pub options: Dict,
}

impl Cancel {
    /// CANCEL's wire tag.
    pub const TAG: u64 = 49;
    pub(crate) const NAME: &'static str = "CANCEL";

    /// Creates a CANCEL for the given request.
    pub fn new(request: RequestId, options: Dict) -> Self {
        Self { request, options }
    }

    /// Decodes a CANCEL from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        Ok(Self { request, options })
    }

    /// Encodes this CANCEL to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// RESULT
// ---------------------------------------------------------------------------

/// Answers a CALL.
///
/// Wire shape: `[50, request, details, args?, kwargs?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    /// The request being answered.
    pub request: RequestId,
    /// Result details.
    pub details: Dict,
    /// The application payload.
    pub arguments: Arguments,
}

impl CallResult {
    /// RESULT's wire tag.
    pub const TAG: u64 = 50;
    pub(crate) const NAME: &'static str = "RESULT";

    /// Creates a payload-less RESULT.
    pub fn new(request: RequestId, details: Dict) -> Self {
        Self {
            request,
            details,
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes a RESULT from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 5)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let details = validate::dict_field(Self::NAME, "details", &items[2])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 3)?;
        Ok(Self {
            request,
            details,
            arguments,
        })
    }

    /// Encodes this RESULT to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.details.clone()),
        ];
        self.arguments.append_to(&mut items);
        Value::Array(items)
    }
}

// ---------------------------------------------------------------------------
// REGISTER / REGISTERED
// ---------------------------------------------------------------------------

/// Offers a procedure for calling.
///
/// Wire shape: `[64, request, options, procedure]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    /// Caller-assigned request identifier.
    pub request: RequestId,
    /// Register options.
    pub options: Dict,
    /// The procedure being offered.
    pub procedure: String,
}

impl Register {
    /// REGISTER's wire tag.
    pub const TAG: u64 = 64;
    pub(crate) const NAME: &'static str = "REGISTER";

    /// Creates a REGISTER for the given procedure.
    pub fn new(request: RequestId, options: Dict, procedure: impl Into<String>) -> Self {
        Self {
            request,
            options,
            procedure: procedure.into(),
        }
    }

    /// Decodes a REGISTER from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 4, 4)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        let procedure = validate::string_field(Self::NAME, "procedure", &items[3])?;
        Ok(Self {
            request,
            options,
            procedure,
        })
    }

    /// Encodes this REGISTER to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
            Value::from(self.procedure.clone()),
        ])
    }
}

/// Acknowledges a REGISTER.
///
/// Wire shape: `[65, request, registration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    /// The request being acknowledged.
    pub request: RequestId,
    /// The router-assigned registration identifier.
    pub registration: RegistrationId,
}

impl Registered {
    /// REGISTERED's wire tag.
    pub const TAG: u64 = 65;
    pub(crate) const NAME: &'static str = "REGISTERED";

    /// Creates a REGISTERED acknowledgement.
    pub fn new(request: RequestId, registration: RegistrationId) -> Self {
        Self {
            request,
            registration,
        }
    }

    /// Decodes a REGISTERED from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let registration =
            RegistrationId(validate::id_field(Self::NAME, "registration ID", &items[2])?);
        Ok(Self {
            request,
            registration,
        })
    }

    /// Encodes this REGISTERED to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::from(self.registration.0),
        ])
    }
}

// ---------------------------------------------------------------------------
// UNREGISTER / UNREGISTERED
// ---------------------------------------------------------------------------

/// Withdraws a procedure registration.
///
/// Wire shape: `[66, request, registration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unregister {
    /// Caller-assigned request identifier.
    pub request: RequestId,
    /// The registration to withdraw.
    pub registration: RegistrationId,
}

impl Unregister {
    /// UNREGISTER's wire tag.
    pub const TAG: u64 = 66;
    pub(crate) const NAME: &'static str = "UNREGISTER";

    /// Creates an UNREGISTER for the given registration.
    pub fn new(request: RequestId, registration: RegistrationId) -> Self {
        Self {
            request,
            registration,
        }
    }

    /// Decodes an UNREGISTER from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let registration =
            RegistrationId(validate::id_field(Self::NAME, "registration ID", &items[2])?);
        Ok(Self {
            request,
            registration,
        })
    }

    /// Encodes this UNREGISTER to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::from(self.registration.0),
        ])
    }
}

/// Acknowledges an UNREGISTER.
///
/// Wire shape: `[67, request]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unregistered {
    /// The request being acknowledged.
    pub request: RequestId,
}

impl Unregistered {
    /// UNREGISTERED's wire tag.
    pub const TAG: u64 = 67;
    pub(crate) const NAME: &'static str = "UNREGISTERED";

    /// Creates an UNREGISTERED acknowledgement.
    pub fn new(request: RequestId) -> Self {
        Self { request }
    }

    /// Decodes an UNREGISTERED from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 2, 2)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        Ok(Self { request })
    }

    /// Encodes this UNREGISTERED to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![Value::from(Self::TAG), Value::from(self.request.0)])
    }
}

// ---------------------------------------------------------------------------
// INVOCATION
// ---------------------------------------------------------------------------

/// Forwards a CALL to the callee that registered the procedure.
///
/// Wire shape: `[68, request, registration, details, args?, kwargs?]`.
/// The request identifier here is assigned by the router for this
/// invocation; it is not the caller's CALL request identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Router-assigned request identifier for this invocation.
    pub request: RequestId,
    /// The registration the call targets.
    pub registration: RegistrationId,
    /// Invocation details.
    pub details: Dict,
    /// The application payload.
    pub arguments: Arguments,
}

impl Invocation {
    /// INVOCATION's wire tag.
    pub const TAG: u64 = 68;
    pub(crate) const NAME: &'static str = "INVOCATION";

    /// Creates a payload-less INVOCATION.
    pub fn new(request: RequestId, registration: RegistrationId, details: Dict) -> Self {
        Self {
            request,
            registration,
            details,
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes an INVOCATION from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 4, 6)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let registration =
            RegistrationId(validate::id_field(Self::NAME, "registration ID", &items[2])?);
        let details = validate::dict_field(Self::NAME, "details", &items[3])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 4)?;
        Ok(Self {
            request,
            registration,
            details,
            arguments,
        })
    }

    /// Encodes this INVOCATION to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::from(self.registration.0),
            Value::Object(self.details.clone()),
        ];
        self.arguments.append_to(&mut items);
        Value::Array(items)
    }
}

// ---------------------------------------------------------------------------
// INTERRUPT
// ---------------------------------------------------------------------------

/// Aborts an in-flight INVOCATION on the callee side.
///
/// Wire shape: `[69, request, options]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Interrupt {
    /// The invocation to interrupt.
    pub request: RequestId,
    /// Interrupt options.
    pub options: Dict,
}

impl Interrupt {
    /// INTERRUPT's wire tag.
    pub const TAG: u64 = 69;
    pub(crate) const NAME: &'static str = "INTERRUPT";

    /// Creates an INTERRUPT for the given invocation.
    pub fn new(request: RequestId, options: Dict) -> Self {
        Self { request, options }
    }

    /// Decodes an INTERRUPT from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        Ok(Self { request, options })
    }

    /// Encodes this INTERRUPT to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// YIELD
// ---------------------------------------------------------------------------

/// Answers an INVOCATION from the callee.
///
/// Wire shape: `[70, request, options, args?, kwargs?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Yield {
    /// The invocation being answered.
    pub request: RequestId,
    /// Yield options (e.g. progressive-result marks).
    pub options: Dict,
    /// The application payload.
    pub arguments: Arguments,
}

impl Yield {
    /// YIELD's wire tag.
    pub const TAG: u64 = 70;
    pub(crate) const NAME: &'static str = "YIELD";

    /// Creates a payload-less YIELD.
    pub fn new(request: RequestId, options: Dict) -> Self {
        Self {
            request,
            options,
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes a YIELD from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 5)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 3)?;
        Ok(Self {
            request,
            options,
            arguments,
        })
    }

    /// Encodes this YIELD to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
        ];
        self.arguments.append_to(&mut items);
        Value::Array(items)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =====================================================================
    // INVOCATION — the fully exercised representative of the payload
    // kinds; the others share its decode skeleton
    // =====================================================================

    #[test]
    fn test_invocation_minimal_round_trip() {
        let decoded = Invocation::decode(&json!([68, 1, 2, {}])).unwrap();
        assert_eq!(decoded.request, RequestId(1));
        assert_eq!(decoded.registration, RegistrationId(2));
        assert!(decoded.details.is_empty());
        assert!(decoded.arguments.is_none());
        assert_eq!(decoded.encode(), json!([68, 1, 2, {}]));
    }

    #[test]
    fn test_invocation_with_args_round_trip() {
        let decoded = Invocation::decode(&json!([68, 1, 2, {}, [1, 2, 3]])).unwrap();
        assert_eq!(
            decoded.arguments.args(),
            Some(&[json!(1), json!(2), json!(3)][..])
        );
        assert!(decoded.arguments.kwargs().is_none());
        assert_eq!(decoded.encode(), json!([68, 1, 2, {}, [1, 2, 3]]));
    }

    #[test]
    fn test_invocation_with_args_and_kwargs_round_trip() {
        let wire = json!([68, 1, 2, {}, [1], {"a": 1}]);
        let decoded = Invocation::decode(&wire).unwrap();
        assert_eq!(decoded.encode(), wire);
    }

    #[test]
    fn test_invocation_args_must_be_a_list() {
        let err = Invocation::decode(&json!([68, 1, 2, {}, "not-a-sequence"])).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Field {
                kind: "INVOCATION",
                field: "args",
                expected: "a list",
                got: "a string",
            }
        ));
    }

    #[test]
    fn test_invocation_wrong_tag() {
        let err = Invocation::decode(&json!([99, 1, 2, {}])).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Tag {
                kind: "INVOCATION",
                expected: 68,
                got: 99,
            }
        ));
    }

    #[test]
    fn test_invocation_arity_boundaries() {
        assert!(matches!(
            Invocation::decode(&json!([68, 1, 2])).unwrap_err(),
            ProtocolError::Arity { kind: "INVOCATION", min: 4, max: 6, len: 3 }
        ));
        assert!(matches!(
            Invocation::decode(&json!([68, 1, 2, {}, [], {}, {}])).unwrap_err(),
            ProtocolError::Arity { len: 7, .. }
        ));
        // Every length inside the bounds decodes with these fields.
        for wire in [
            json!([68, 1, 2, {}]),
            json!([68, 1, 2, {}, []]),
            json!([68, 1, 2, {}, [], {}]),
        ] {
            assert!(Invocation::decode(&wire).is_ok());
        }
    }

    #[test]
    fn test_invocation_validates_ids_in_order() {
        // The request ID at slot 1 fails before the registration ID at
        // slot 2 is ever looked at.
        let err = Invocation::decode(&json!([68, "one", "two", {}])).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Field { field: "request ID", .. }
        ));
    }

    #[test]
    fn test_invocation_absent_vs_empty_args() {
        let absent = Invocation::decode(&json!([68, 1, 2, {}])).unwrap();
        let empty = Invocation::decode(&json!([68, 1, 2, {}, []])).unwrap();
        assert_ne!(absent, empty);
        assert_eq!(absent.encode(), json!([68, 1, 2, {}]));
        assert_eq!(empty.encode(), json!([68, 1, 2, {}, []]));
    }

    // =====================================================================
    // ERROR
    // =====================================================================

    #[test]
    fn test_error_message_round_trip() {
        let error = ErrorMessage::new(
            Call::TAG,
            RequestId(10),
            Dict::new(),
            "junction.error.no_such_procedure",
        );
        assert_eq!(
            error.encode(),
            json!([8, 48, 10, {}, "junction.error.no_such_procedure"])
        );
        assert_eq!(ErrorMessage::decode(&error.encode()).unwrap(), error);
    }

    #[test]
    fn test_error_message_with_payload_round_trip() {
        let error = ErrorMessage::new(Call::TAG, RequestId(10), Dict::new(), "junction.error.failed")
            .with_arguments(Arguments::Args(vec![json!("diagnostic")]));
        assert_eq!(ErrorMessage::decode(&error.encode()).unwrap(), error);
    }

    #[test]
    fn test_error_message_request_kind_is_a_plain_integer() {
        let err = ErrorMessage::decode(&json!([8, "CALL", 10, {}, "e"])).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Field {
                kind: "ERROR",
                field: "request kind",
                expected: "an integer",
                got: "a string",
            }
        ));
    }

    // =====================================================================
    // Remaining RPC kinds
    // =====================================================================

    #[test]
    fn test_call_round_trip_with_kwargs() {
        let mut kwargs = Dict::new();
        kwargs.insert("flag".into(), json!(true));
        let call = Call::new(RequestId(5), Dict::new(), "com.app.add")
            .with_arguments(Arguments::ArgsKwargs(vec![json!(2), json!(3)], kwargs));
        assert_eq!(
            call.encode(),
            json!([48, 5, {}, "com.app.add", [2, 3], {"flag": true}])
        );
        assert_eq!(Call::decode(&call.encode()).unwrap(), call);
    }

    #[test]
    fn test_cancel_round_trip() {
        let mut options = Dict::new();
        options.insert("mode".into(), json!("kill"));
        let cancel = Cancel::new(RequestId(5), options);
        assert_eq!(cancel.encode(), json!([49, 5, {"mode": "kill"}]));
        assert_eq!(Cancel::decode(&cancel.encode()).unwrap(), cancel);
    }

    #[test]
    fn test_call_result_round_trip() {
        let result = CallResult::new(RequestId(5), Dict::new())
            .with_arguments(Arguments::Args(vec![json!(5)]));
        assert_eq!(result.encode(), json!([50, 5, {}, [5]]));
        assert_eq!(CallResult::decode(&result.encode()).unwrap(), result);
    }

    #[test]
    fn test_register_round_trip() {
        let register = Register::new(RequestId(6), Dict::new(), "com.app.add");
        assert_eq!(register.encode(), json!([64, 6, {}, "com.app.add"]));
        assert_eq!(Register::decode(&register.encode()).unwrap(), register);
    }

    #[test]
    fn test_registered_round_trip() {
        let registered = Registered::new(RequestId(6), RegistrationId(2));
        assert_eq!(registered.encode(), json!([65, 6, 2]));
        assert_eq!(Registered::decode(&registered.encode()).unwrap(), registered);
    }

    #[test]
    fn test_unregister_round_trip() {
        let unregister = Unregister::new(RequestId(7), RegistrationId(2));
        assert_eq!(Unregister::decode(&unregister.encode()).unwrap(), unregister);
    }

    #[test]
    fn test_unregistered_round_trip() {
        let unregistered = Unregistered::new(RequestId(7));
        assert_eq!(unregistered.encode(), json!([67, 7]));
        assert_eq!(
            Unregistered::decode(&unregistered.encode()).unwrap(),
            unregistered
        );
    }

    #[test]
    fn test_interrupt_round_trip() {
        let interrupt = Interrupt::new(RequestId(8), Dict::new());
        assert_eq!(interrupt.encode(), json!([69, 8, {}]));
        assert_eq!(Interrupt::decode(&interrupt.encode()).unwrap(), interrupt);
    }

    #[test]
    fn test_yield_round_trip() {
        let y = Yield::new(RequestId(8), Dict::new())
            .with_arguments(Arguments::Args(vec![json!("partial")]));
        assert_eq!(y.encode(), json!([70, 8, {}, ["partial"]]));
        assert_eq!(Yield::decode(&y.encode()).unwrap(), y);
    }

    #[test]
    fn test_yield_and_result_do_not_cross_decode() {
        // YIELD and RESULT share a layout; only the tag tells them
        // apart, and it must.
        let y = Yield::new(RequestId(8), Dict::new());
        let err = CallResult::decode(&y.encode()).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Tag { kind: "RESULT", expected: 50, got: 70 }
        ));
    }
}
