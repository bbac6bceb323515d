//! What crosses the boundary in each direction.
//!
//! ```text
//! Front-end → Host:  OutboundMessage (structured)  →  JSON text  →  HostChannel::invoke
//! Host → Front-end:  InboundMessage  (text)        →  verbatim   →  inbound port
//! ```
//!
//! Neither direction has a schema.  Giving the text meaning is the job of the
//! host (for outbound requests) and of the front-end (for inbound replies).

/// An opaque structured value emitted by the front-end on its outbound port.
pub type OutboundMessage = serde_json::Value;

/// An opaque text value pushed by the host into the front-end's inbound port.
pub type InboundMessage = String;
