//! Protocol module containing message types and the JSON codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_action, encode_response, ProtocolError};
pub use messages::*;
