//! Wire payloads for the discovery protocol.
//!
//! Two fixed text payloads travel over the transport. Classification is
//! exact byte match; anything else is unrecognized and never fatal.

/// Group-wide presence announcement
pub const ANNOUNCE_PAYLOAD: &[u8] = b"Hello, I'm here!";

/// Unicast reply confirming receipt of an announcement
pub const ACK_PAYLOAD: &[u8] = b"announce_ack";

/// Kind of one inbound datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Announce,
    Ack,
    Unrecognized,
}

/// Classify an inbound payload by exact match against the known messages.
pub fn classify(payload: &[u8]) -> MessageKind {
    if payload == ANNOUNCE_PAYLOAD {
        MessageKind::Announce
    } else if payload == ACK_PAYLOAD {
        MessageKind::Ack
    } else {
        MessageKind::Unrecognized
    }
}
