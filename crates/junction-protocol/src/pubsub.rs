//! Publish/subscribe message kinds.
//!
//! A publisher sends PUBLISH to a topic and may get PUBLISHED back; a
//! subscriber manages its interest with SUBSCRIBE/SUBSCRIBED and
//! UNSUBSCRIBE/UNSUBSCRIBED, and receives EVENT for each publication
//! routed to it. PUBLISH and EVENT carry the optional
//! [`Arguments`] payload tail; the rest are fixed-arity
//! acknowledgements.

use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::{Arguments, Dict, PublicationId, RequestId, SubscriptionId};
use crate::validate;

// ---------------------------------------------------------------------------
// PUBLISH
// ---------------------------------------------------------------------------

/// Publishes a payload to a topic.
///
/// Wire shape: `[16, request, options, topic, args?, kwargs?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Publish {
    /// Caller-assigned request identifier.
    pub request: RequestId,
    /// Publish options.
    pub options: Dict,
    /// The topic to publish to.
    pub topic: String,
    /// The application payload.
    pub arguments: Arguments,
}

impl Publish {
    /// PUBLISH's wire tag.
    pub const TAG: u64 = 16;
    pub(crate) const NAME: &'static str = "PUBLISH";

    /// Creates a payload-less PUBLISH.
    pub fn new(request: RequestId, options: Dict, topic: impl Into<String>) -> Self {
        Self {
            request,
            options,
            topic: topic.into(),
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes a PUBLISH from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 4, 6)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        let topic = validate::string_field(Self::NAME, "topic", &items[3])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 4)?;
        Ok(Self {
            request,
            options,
            topic,
            arguments,
        })
    }

    /// Encodes this PUBLISH to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
            Value::from(self.topic.clone()),
        ];
        self.arguments.append_to(&mut items);
        Value::Array(items)
    }
}

// ---------------------------------------------------------------------------
// PUBLISHED
// ---------------------------------------------------------------------------

/// Acknowledges a PUBLISH.
///
/// Wire shape: `[17, request, publication]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    /// The request being acknowledged.
    pub request: RequestId,
    /// The router-assigned publication identifier.
    pub publication: PublicationId,
}

impl Published {
    /// PUBLISHED's wire tag.
    pub const TAG: u64 = 17;
    pub(crate) const NAME: &'static str = "PUBLISHED";

    /// Creates a PUBLISHED acknowledgement.
    pub fn new(request: RequestId, publication: PublicationId) -> Self {
        Self {
            request,
            publication,
        }
    }

    /// Decodes a PUBLISHED from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let publication =
            PublicationId(validate::id_field(Self::NAME, "publication ID", &items[2])?);
        Ok(Self {
            request,
            publication,
        })
    }

    /// Encodes this PUBLISHED to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::from(self.publication.0),
        ])
    }
}

// ---------------------------------------------------------------------------
// SUBSCRIBE / SUBSCRIBED
// ---------------------------------------------------------------------------

/// Subscribes to a topic.
///
/// Wire shape: `[32, request, options, topic]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscribe {
    /// Caller-assigned request identifier.
    pub request: RequestId,
    /// Subscribe options.
    pub options: Dict,
    /// The topic to subscribe to.
    pub topic: String,
}

impl Subscribe {
    /// SUBSCRIBE's wire tag.
    pub const TAG: u64 = 32;
    pub(crate) const NAME: &'static str = "SUBSCRIBE";

    /// Creates a SUBSCRIBE for the given topic.
    pub fn new(request: RequestId, options: Dict, topic: impl Into<String>) -> Self {
        Self {
            request,
            options,
            topic: topic.into(),
        }
    }

    /// Decodes a SUBSCRIBE from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 4, 4)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let options = validate::dict_field(Self::NAME, "options", &items[2])?;
        let topic = validate::string_field(Self::NAME, "topic", &items[3])?;
        Ok(Self {
            request,
            options,
            topic,
        })
    }

    /// Encodes this SUBSCRIBE to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::Object(self.options.clone()),
            Value::from(self.topic.clone()),
        ])
    }
}

/// Acknowledges a SUBSCRIBE.
///
/// Wire shape: `[33, request, subscription]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscribed {
    /// The request being acknowledged.
    pub request: RequestId,
    /// The router-assigned subscription identifier.
    pub subscription: SubscriptionId,
}

impl Subscribed {
    /// SUBSCRIBED's wire tag.
    pub const TAG: u64 = 33;
    pub(crate) const NAME: &'static str = "SUBSCRIBED";

    /// Creates a SUBSCRIBED acknowledgement.
    pub fn new(request: RequestId, subscription: SubscriptionId) -> Self {
        Self {
            request,
            subscription,
        }
    }

    /// Decodes a SUBSCRIBED from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let subscription =
            SubscriptionId(validate::id_field(Self::NAME, "subscription ID", &items[2])?);
        Ok(Self {
            request,
            subscription,
        })
    }

    /// Encodes this SUBSCRIBED to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::from(self.subscription.0),
        ])
    }
}

// ---------------------------------------------------------------------------
// UNSUBSCRIBE / UNSUBSCRIBED
// ---------------------------------------------------------------------------

/// Drops a subscription.
///
/// Wire shape: `[34, request, subscription]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unsubscribe {
    /// Caller-assigned request identifier.
    pub request: RequestId,
    /// The subscription to drop.
    pub subscription: SubscriptionId,
}

impl Unsubscribe {
    /// UNSUBSCRIBE's wire tag.
    pub const TAG: u64 = 34;
    pub(crate) const NAME: &'static str = "UNSUBSCRIBE";

    /// Creates an UNSUBSCRIBE for the given subscription.
    pub fn new(request: RequestId, subscription: SubscriptionId) -> Self {
        Self {
            request,
            subscription,
        }
    }

    /// Decodes an UNSUBSCRIBE from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 3, 3)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let request = RequestId(validate::id_field(Self::NAME, "request ID", &items[1])?);
        let subscription =
            SubscriptionId(validate::id_field(Self::NAME, "subscription ID", &items[2])?);
        Ok(Self {
            request,
            subscription,
        })
    }

    /// Encodes this UNSUBSCRIBE to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![
            Value::from(Self::TAG),
            Value::from(self.request.0),
            Value::from(self.subscription.0),
        ])
    }
}

/// Acknowledges an UNSUBSCRIBE.
///
/// Wire shape: `[35, request]` — the smallest message in the protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct Unsubscribed {
    /// The request being acknowledged.
    pub request: RequestId,
}

impl Unsubscribed {
    /// UNSUBSCRIBED's wire tag.
    pub const TAG: u64 = 35;
    pub(crate) const NAME: &'static str = "UNSUBSCRIBED";

    /// Creates an UNSUBSCRIBED acknowledgement.
    pub fn new(request: RequestId) -> Self {
        Self { request }
    }

    /// Decodes an UNSUBSCRIBED from its wire sequence.
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

    /// Encodes this UNSUBSCRIBED to its wire sequence.
    pub fn encode(&self) -> Value {
        Value::Array(vec![Value::from(Self::TAG), Value::from(self.request.0)])
    }
}

// ---------------------------------------------------------------------------
// EVENT
// ---------------------------------------------------------------------------

/// Delivers a publication to a subscriber.
///
/// Wire shape: `[36, subscription, publication, details, args?, kwargs?]`.
/// Unlike the request kinds, EVENT is correlated by subscription and
/// publication identifiers — the subscriber never asked for this
/// specific message.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The subscription this event is delivered under.
    pub subscription: SubscriptionId,
    /// The publication that produced it.
    pub publication: PublicationId,
    /// Delivery details.
    pub details: Dict,
    /// The application payload.
    pub arguments: Arguments,
}

impl Event {
    /// EVENT's wire tag.
    pub const TAG: u64 = 36;
    pub(crate) const NAME: &'static str = "EVENT";

    /// Creates a payload-less EVENT.
    pub fn new(subscription: SubscriptionId, publication: PublicationId, details: Dict) -> Self {
        Self {
            subscription,
            publication,
            details,
            arguments: Arguments::None,
        }
    }

    /// Attaches an application payload.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Decodes an EVENT from its wire sequence.
    ///
    /// # Errors
    /// Returns the first violation found, in decode order.
    pub fn decode(value: &Value) -> Result<Self, ProtocolError> {
        let items = validate::message_list(value)?;
        validate::check_arity(Self::NAME, items, 4, 6)?;
        validate::check_tag(Self::NAME, items, Self::TAG)?;
        let subscription =
            SubscriptionId(validate::id_field(Self::NAME, "subscription ID", &items[1])?);
        let publication =
            PublicationId(validate::id_field(Self::NAME, "publication ID", &items[2])?);
        let details = validate::dict_field(Self::NAME, "details", &items[3])?;
        let arguments = validate::arguments_tail(Self::NAME, items, 4)?;
        Ok(Self {
            subscription,
            publication,
            details,
            arguments,
        })
    }

    /// Encodes this EVENT to its wire sequence.
    pub fn encode(&self) -> Value {
        let mut items = vec![
            Value::from(Self::TAG),
            Value::from(self.subscription.0),
            Value::from(self.publication.0),
            Value::Object(self.details.clone()),
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

    #[test]
    fn test_publish_round_trip_without_payload() {
        let publish = Publish::new(RequestId(1), Dict::new(), "com.app.topic");
        assert_eq!(publish.encode(), json!([16, 1, {}, "com.app.topic"]));
        assert_eq!(Publish::decode(&publish.encode()).unwrap(), publish);
    }

    #[test]
    fn test_publish_round_trip_with_payload() {
        let publish = Publish::new(RequestId(1), Dict::new(), "com.app.topic")
            .with_arguments(Arguments::Args(vec![json!("a"), json!(2)]));
        assert_eq!(publish.encode(), json!([16, 1, {}, "com.app.topic", ["a", 2]]));
        assert_eq!(Publish::decode(&publish.encode()).unwrap(), publish);
    }

    #[test]
    fn test_publish_arity_bounds() {
        assert!(matches!(
            Publish::decode(&json!([16, 1, {}])).unwrap_err(),
            ProtocolError::Arity { kind: "PUBLISH", min: 4, max: 6, len: 3 }
        ));
        assert!(matches!(
            Publish::decode(&json!([16, 1, {}, "t", [], {}, "extra"])).unwrap_err(),
            ProtocolError::Arity { len: 7, .. }
        ));
    }

    #[test]
    fn test_published_round_trip() {
        let published = Published::new(RequestId(1), PublicationId(99));
        assert_eq!(published.encode(), json!([17, 1, 99]));
        assert_eq!(Published::decode(&published.encode()).unwrap(), published);
    }

    #[test]
    fn test_subscribe_round_trip() {
        let subscribe = Subscribe::new(RequestId(2), Dict::new(), "com.app.topic");
        assert_eq!(subscribe.encode(), json!([32, 2, {}, "com.app.topic"]));
        assert_eq!(Subscribe::decode(&subscribe.encode()).unwrap(), subscribe);
    }

    #[test]
    fn test_subscribe_rejects_missing_topic() {
        let err = Subscribe::decode(&json!([32, 2, {}])).unwrap_err();
        assert!(matches!(err, ProtocolError::Arity { min: 4, max: 4, .. }));
    }

    #[test]
    fn test_subscribed_round_trip() {
        let subscribed = Subscribed::new(RequestId(2), SubscriptionId(7));
        assert_eq!(Subscribed::decode(&subscribed.encode()).unwrap(), subscribed);
    }

    #[test]
    fn test_unsubscribe_round_trip() {
        let unsubscribe = Unsubscribe::new(RequestId(3), SubscriptionId(7));
        assert_eq!(unsubscribe.encode(), json!([34, 3, 7]));
        assert_eq!(Unsubscribe::decode(&unsubscribe.encode()).unwrap(), unsubscribe);
    }

    #[test]
    fn test_unsubscribed_round_trip() {
        let unsubscribed = Unsubscribed::new(RequestId(3));
        assert_eq!(unsubscribed.encode(), json!([35, 3]));
        assert_eq!(
            Unsubscribed::decode(&unsubscribed.encode()).unwrap(),
            unsubscribed
        );
    }

    #[test]
    fn test_event_round_trip_with_kwargs() {
        let mut kwargs = Dict::new();
        kwargs.insert("color".into(), json!("orange"));
        let event = Event::new(SubscriptionId(7), PublicationId(99), Dict::new())
            .with_arguments(Arguments::ArgsKwargs(vec![json!(1)], kwargs));
        assert_eq!(
            event.encode(),
            json!([36, 7, 99, {}, [1], {"color": "orange"}])
        );
        assert_eq!(Event::decode(&event.encode()).unwrap(), event);
    }

    #[test]
    fn test_event_absent_and_empty_payload_differ() {
        let absent = Event::new(SubscriptionId(7), PublicationId(99), Dict::new());
        let empty = absent.clone().with_arguments(Arguments::Args(vec![]));

        assert_eq!(absent.encode(), json!([36, 7, 99, {}]));
        assert_eq!(empty.encode(), json!([36, 7, 99, {}, []]));
        assert_ne!(
            Event::decode(&absent.encode()).unwrap(),
            Event::decode(&empty.encode()).unwrap()
        );
    }

    #[test]
    fn test_event_validates_payload_shapes() {
        let err = Event::decode(&json!([36, 7, 99, {}, {"not": "a list"}])).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Field { kind: "EVENT", field: "args", expected: "a list", got: "a dict" }
        ));
    }

    #[test]
    fn test_event_wrong_tag_is_a_tag_error() {
        let publish = Publish::new(RequestId(1), Dict::new(), "t")
            .with_arguments(Arguments::Args(vec![]));
        // A PUBLISH has compatible arity but the wrong tag for EVENT.
        let err = Event::decode(&publish.encode()).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Tag { kind: "EVENT", expected: 36, got: 16 }
        ));
    }
}
