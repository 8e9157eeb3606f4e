// cfusage-api: Async Rust client for the Cloud Foundry Cloud Controller v2 API

pub mod error;
pub mod transport;
pub mod v2;

pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use v2::CfClient;
pub use v2::models as v2_models;
