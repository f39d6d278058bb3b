//! Metadata keys attached to every outgoing catalog call.

/// Key carrying the user token when authentication is enabled.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Key identifying the calling client.
pub const AGENT_HEADER: &str = "agent";

/// Value sent under [`AGENT_HEADER`].
pub const AGENT_VALUE: &str = "catalog";

/// Key carrying the client version.
pub const VERSION_HEADER: &str = "version";
