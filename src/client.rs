//! Tuteliq API client.
//!
//! Keep the public surface small: [`TuteliqClient`] and its builder. Endpoint
//! groups are split into submodules under `src/client/`, each adding methods
//! to the same client type.

pub mod builder;
pub mod core;

mod account;
mod analysis;
mod policy;
mod safety;
mod usage;
mod validation;
mod webhooks;

pub use builder::{TuteliqClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::core::TuteliqClient;
