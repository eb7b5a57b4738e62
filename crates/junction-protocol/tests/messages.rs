//! Integration tests for the protocol crate's public surface.
//!
//! The unit tests in each module pin down individual contracts; these
//! tests exercise the crate the way a transport/session stack does —
//! building messages, pushing them through the codec, and decoding
//! whatever a peer might send, well-formed or not.

use junction_protocol::{
    Arguments, Call, CallResult, Codec, Dict, Hello, Invocation, JsonCodec, Message,
    ProtocolError, Register, Registered, RegistrationId, RequestId, SessionId, Welcome, Yield,
    MAX_ID,
};
use serde_json::json;

#[test]
fn invocation_without_payload_round_trips() {
    let decoded = Invocation::decode(&json!([68, 1, 2, {}])).unwrap();
    assert_eq!(decoded.request, RequestId(1));
    assert_eq!(decoded.registration, RegistrationId(2));
    assert!(decoded.details.is_empty());
    assert!(decoded.arguments.args().is_none());
    assert!(decoded.arguments.kwargs().is_none());
    assert_eq!(decoded.encode(), json!([68, 1, 2, {}]));
}

#[test]
fn invocation_with_args_round_trips() {
    let wire = json!([68, 1, 2, {}, [1, 2, 3]]);
    let decoded = Invocation::decode(&wire).unwrap();
    assert_eq!(
        decoded.arguments.args(),
        Some(&[json!(1), json!(2), json!(3)][..])
    );
    assert_eq!(decoded.encode(), wire);
}

#[test]
fn invocation_with_args_and_kwargs_round_trips() {
    let wire = json!([68, 1, 2, {}, [1], {"a": 1}]);
    let decoded = Invocation::decode(&wire).unwrap();
    assert_eq!(decoded.encode(), wire);
}

#[test]
fn invocation_rejects_non_list_args() {
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
fn direct_decoder_rejects_foreign_tag() {
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
fn dispatcher_names_unknown_tags() {
    let err = Message::decode(&json!([424242, 1, 2, {}])).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownTag(424242)));
}

#[test]
fn kwargs_cannot_be_built_without_args() {
    // The bad combination is caught when the payload is built, long
    // before any encode call could shift fields on the wire.
    let mut kwargs = Dict::new();
    kwargs.insert("a".into(), json!(1));
    let err = Arguments::from_parts(None, Some(kwargs)).unwrap_err();
    assert!(matches!(err, ProtocolError::KwargsWithoutArgs));
}

#[test]
fn identifiers_at_the_range_edges() {
    assert!(Welcome::decode(&json!([2, MAX_ID, {}])).is_ok());

    let err = Welcome::decode(&json!([2, MAX_ID + 1, {}])).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Field {
            kind: "WELCOME",
            field: "session ID",
            ..
        }
    ));
}

#[test]
fn malformed_input_fails_the_same_way_every_time() {
    let bad = json!([68, 1, 2, {}, "not-a-sequence"]);
    let first = Message::decode(&bad).unwrap_err().to_string();
    let second = Message::decode(&bad).unwrap_err().to_string();
    assert_eq!(first, second);
}

#[test]
fn rpc_exchange_through_the_codec() {
    // The full life of one call, as four hops over a byte transport:
    // caller CALLs, router INVOKEs the callee, callee YIELDs, router
    // RESULTs back to the caller.
    let codec = JsonCodec;

    let hops = vec![
        Message::Call(
            Call::new(RequestId(42), Dict::new(), "com.app.add")
                .with_arguments(Arguments::Args(vec![json!(2), json!(3)])),
        ),
        Message::Invocation(
            Invocation::new(RequestId(7001), RegistrationId(55), Dict::new())
                .with_arguments(Arguments::Args(vec![json!(2), json!(3)])),
        ),
        Message::Yield(
            Yield::new(RequestId(7001), Dict::new())
                .with_arguments(Arguments::Args(vec![json!(5)])),
        ),
        Message::Result(
            CallResult::new(RequestId(42), Dict::new())
                .with_arguments(Arguments::Args(vec![json!(5)])),
        ),
    ];

    for hop in hops {
        let bytes = codec.encode(&hop).unwrap();
        let received = codec.decode(&bytes).unwrap();
        assert_eq!(received, hop, "{} changed in transit", hop.name());
    }
}

#[test]
fn session_opening_through_the_codec() {
    let codec = JsonCodec;

    let mut details = Dict::new();
    details.insert("roles".into(), json!({"caller": {}, "callee": {}}));
    let hello = Message::Hello(Hello::new("com.app.realm", details));

    let bytes = codec.encode(&hello).unwrap();
    match codec.decode(&bytes).unwrap() {
        Message::Hello(received) => {
            assert_eq!(received.realm, "com.app.realm");
            assert!(received.details.contains_key("roles"));
        }
        other => panic!("expected HELLO, got {}", other.name()),
    }

    let welcome = Message::Welcome(Welcome::new(SessionId(881), Dict::new()));
    let bytes = codec.encode(&welcome).unwrap();
    assert_eq!(codec.decode(&bytes).unwrap(), welcome);
}

#[test]
fn registration_handshake_round_trips() {
    let register = Register::new(RequestId(1), Dict::new(), "com.app.add");
    let registered = Registered::new(RequestId(1), RegistrationId(2));

    assert_eq!(
        Message::decode(&register.encode()).unwrap(),
        Message::Register(register)
    );
    assert_eq!(
        Message::decode(&registered.encode()).unwrap(),
        Message::Registered(registered)
    );
}
