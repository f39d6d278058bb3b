//! Property-based tests for identifier parsing and address resolution.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use catalog_cli::domain::identifier::DEFAULT_TAG;
use catalog_cli::domain::{ApplicationId, CatalogError, ConnectionConfig, resolve_address};

const SEGMENT: &str = "[a-z0-9][a-z0-9-]{0,15}";

// ============================================================================
// ApplicationId::parse() property tests
// ============================================================================

proptest! {
    /// `namespace/app:tag` re-assembles to the same string.
    #[test]
    fn prop_two_segment_round_trip(ns in SEGMENT, app in SEGMENT, tag in SEGMENT) {
        let raw = format!("{ns}/{app}:{tag}");
        let id = ApplicationId::parse(&raw).unwrap();
        prop_assert!(id.host.is_none());
        prop_assert_eq!(id.to_string(), raw);
    }

    /// `host:port/namespace/app:tag` keeps the host verbatim.
    #[test]
    fn prop_three_segment_round_trip(
        host in SEGMENT,
        port in 1u16..,
        ns in SEGMENT,
        app in SEGMENT,
        tag in SEGMENT,
    ) {
        let raw = format!("{host}:{port}/{ns}/{app}:{tag}");
        let id = ApplicationId::parse(&raw).unwrap();
        prop_assert_eq!(id.host.clone(), Some(format!("{host}:{port}")));
        prop_assert_eq!(id.to_string(), raw);
    }

    /// A missing tag always becomes the default one.
    #[test]
    fn prop_missing_tag_defaults(ns in SEGMENT, app in SEGMENT) {
        let id = ApplicationId::parse(&format!("{ns}/{app}")).unwrap();
        prop_assert_eq!(id.tag, DEFAULT_TAG);
    }

    /// Segment counts other than two or three are rejected.
    #[test]
    fn prop_wrong_segment_count_rejected(segments in proptest::collection::vec(SEGMENT, 1..8)) {
        prop_assume!(segments.len() != 2 && segments.len() != 3);
        let result = ApplicationId::parse(&segments.join("/"));
        prop_assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }

    /// More than one `:` in the last segment is rejected.
    #[test]
    fn prop_double_tag_rejected(ns in SEGMENT, app in SEGMENT, a in SEGMENT, b in SEGMENT) {
        let result = ApplicationId::parse(&format!("{ns}/{app}:{a}:{b}"));
        prop_assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }
}

// ============================================================================
// resolve_address() property tests
// ============================================================================

proptest! {
    /// A host without a port gets the configured port appended.
    #[test]
    fn prop_colonless_override_gets_default_port(host in SEGMENT, port in 1u16..) {
        let cfg = ConnectionConfig { catalog_port: port, ..ConnectionConfig::default() };
        prop_assert_eq!(resolve_address(&cfg, Some(host.as_str())), format!("{host}:{port}"));
    }

    /// A host that already carries a port is used verbatim.
    #[test]
    fn prop_override_with_port_is_unchanged(host in SEGMENT, port in 1u16..) {
        let raw = format!("{host}:{port}");
        prop_assert_eq!(resolve_address(&ConnectionConfig::default(), Some(raw.as_str())), raw);
    }
}

#[test]
fn test_default_address_used_without_override() {
    let cfg = ConnectionConfig {
        catalog_address: "catalog.example.com".to_string(),
        ..ConnectionConfig::default()
    };
    assert_eq!(resolve_address(&cfg, None), "catalog.example.com:7060");
}
