//! Messages and service stubs of the `catalog` package, generated from
//! `proto/catalog.proto` at build time.

use serde::Serializer;

tonic::include_proto!("catalog");

impl OpResponse {
    /// Build a successful outcome carrying `user_info`.
    #[must_use]
    pub fn success(user_info: impl Into<String>) -> Self {
        Self {
            status: OpStatus::Success as i32,
            status_name: OpStatus::Success.as_str_name().to_string(),
            user_info: user_info.into(),
        }
    }

    /// Whether the server reported success. Unknown status values count as failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(OpStatus::try_from(self.status), Ok(OpStatus::Success))
    }
}

/// README contents are shown as text even when they are not valid UTF-8.
fn lossy_utf8<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
