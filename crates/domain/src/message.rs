//! Inbound bus messages and the watched topic filter.

use std::borrow::Cow;

/// Topic filter the daemon watches. One wildcard segment for the sensor
/// name; the subject line of every notification quotes this filter.
pub const ACTION_TOPIC_FILTER: &str = "sensor/+/action";

/// Message-delivery quality-of-service level (0, 1, or 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QosLevel {
    /// Deliver at most once (fire and forget).
    #[default]
    AtMostOnce,
    /// Deliver at least once (acknowledged).
    AtLeastOnce,
    /// Deliver exactly once (assured).
    ExactlyOnce,
}

/// One message received from the bus.
///
/// The payload is opaque: no length or content validation anywhere, and
/// non-UTF-8 bytes are carried through untouched until rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Concrete topic the message arrived on, e.g. `sensor/kitchen/action`.
    pub topic: String,
    /// Raw payload bytes; may be empty.
    pub payload: Vec<u8>,
    /// Delivery quality-of-service.
    pub qos: QosLevel,
    /// Set when the broker re-delivers an earlier message.
    pub dup: bool,
    /// Set when the broker replays a retained message.
    pub retain: bool,
}

impl InboundMessage {
    /// Create a message with default delivery properties (QoS 0, not a
    /// duplicate, not retained).
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            qos: QosLevel::AtMostOnce,
            dup: false,
            retain: false,
        }
    }

    /// Payload as text. Invalid UTF-8 sequences are replaced, never
    /// rejected — a garbled notification beats a dropped one.
    #[must_use]
    pub fn payload_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}
