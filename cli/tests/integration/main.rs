//! Integration tests for the catalog CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They never reach a live catalog-manager.
