#[allow(clippy::pedantic, missing_docs)]
pub mod proto;
pub mod metadata;

pub use proto::applications_client::ApplicationsClient;
pub use proto::catalog_client::CatalogClient;
pub use proto::*;
