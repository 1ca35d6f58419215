//! # tuteliq
//!
//! Typed Rust client for the Tuteliq child-safety API: text moderation over
//! HTTP and real-time voice moderation over WebSocket.
//!
//! ## Overview
//!
//! The client builds correctly-shaped requests, attaches authentication,
//! enforces input limits before anything goes on the wire, retries transient
//! failures with backoff, and turns responses into typed results or typed
//! errors.
//!
//! ## Key Features
//!
//! - **Detection**: bullying, grooming and unsafe content, plus a combined [`TuteliqClient::analyze`]
//! - **Guidance**: emotion analysis, action plans and incident reports
//! - **Management**: moderation policy, webhooks, pricing and GDPR account data
//! - **Voice**: streaming sessions with typed server events via [`voice`]
//! - **Resilience**: capped exponential backoff honoring `Retry-After` via [`resilience`]
//! - **Errors**: one flat [`Error`] enum; dispatch on [`Error::kind`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tuteliq::{DetectionInput, TuteliqClient};
//!
//! #[tokio::main]
//! async fn main() -> tuteliq::Result<()> {
//!     let client = TuteliqClient::new("your-api-key")?;
//!
//!     let result = client
//!         .detect_bullying(DetectionInput::new("nobody likes you").with_context("chat"))
//!         .await?;
//!     println!("bullying: {} (risk {:.2})", result.is_bullying, result.risk_score);
//!
//!     if let Some(usage) = client.usage() {
//!         println!("{} messages left this month", usage.remaining);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and endpoint methods |
//! | [`types`] | Request inputs and response shapes |
//! | [`voice`] | Voice stream session, handler trait and connectors |
//! | [`resilience`] | Retry engine |
//! | [`transport`] | Single-attempt HTTP execution and error mapping |
//! | [`error_code`] | Error kind discriminator |

pub mod client;
pub mod error_code;
pub mod resilience;
pub mod transport;
pub mod types;
pub mod voice;

pub use client::{TuteliqClient, TuteliqClientBuilder};
pub use error_code::ErrorKind;
pub use resilience::{with_retry, RetryPolicy};
pub use types::{
    AnalysisContext, AnalysisResult, AnalyzeEmotionsInput, AnalyzeInput, Audience,
    ContextInput, DetectGroomingInput, DetectionInput, GenerateReportInput, GetActionPlanInput,
    GroomingMessage, RateLimitInfo, Usage, VoiceStreamConfig,
};
pub use voice::{VoiceSession, VoiceStreamHandler};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorMeta};
