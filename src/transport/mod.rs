//! Transport layer: single-attempt HTTP execution and API error mapping.
//!
//! Retries, payload shaping and usage bookkeeping live in the client; this
//! module only moves bytes and turns failures into [`crate::Error`].

pub mod http;

pub use http::{HttpReply, HttpTransport};
