// Cloud Controller v2 client modules
//
// Hand-written client for the `/v2/` REST surface. Every list endpoint
// is wrapped in the `{ total_results, next_url, resources: [...] }`
// envelope; `client.rs` owns transport and pagination, the remaining
// files add endpoint methods as inherent impls.

pub mod client;
pub mod models;
pub mod organizations;
pub mod services;

pub use client::CfClient;
