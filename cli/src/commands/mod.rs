//! Command implementations

pub mod deploy;
pub mod info;
pub mod list;
pub mod pull;
pub mod push;
pub mod remove;
pub mod summary;
pub mod version;
pub mod visibility;
