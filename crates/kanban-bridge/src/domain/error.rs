use thiserror::Error;

/// Errors surfaced by the bridge.
///
/// The bridge never recovers from any of these.  They are returned to whoever
/// triggered the failing step: the host for initialisation and registration,
/// the front-end emitter for outbound serialization.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The document has no element with the configured mount id.
    #[error("mount point #{0} not found in document")]
    MountPointMissing(String),

    /// An outbound message could not be encoded as JSON text.
    #[error("failed to serialize outbound message: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A configured channel, function, or path name cannot be used.
    #[error("invalid {field}: {value:?}")]
    InvalidName { field: &'static str, value: String },

    /// The host called an inbound function nobody registered.
    #[error("no inbound function registered as {0:?}")]
    UnknownFunction(String),
}
