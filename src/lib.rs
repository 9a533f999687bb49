//! # Soundslice API Client
//!
//! An async Rust client library for the Soundslice data API.
//!
//! ## Features
//!
//! - Slices, recordings, syncpoints and folders
//! - HTTP basic auth with the password kept out of `Debug` output
//! - Typed errors for permission, validation and rate-limit responses
//! - Two-phase media uploads with an explicit upload state
//! - Request tracing through `reqwest-tracing`
//!
//! The client never retries. A [`SoundsliceError::RateLimited`] is the
//! caller's signal to back off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soundslice_api_client::rest::SoundsliceClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SoundsliceClient::new("my_app_id", "my_password");
//!     let slices = client.list_slices().await?;
//!     println!("{} slices", slices.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::SoundsliceError;
pub use rest::{SoundsliceApi, SoundsliceClient};
pub use types::common::{EmbedStatus, ROOT_FOLDER_ID, RecordingSource, SourceKind};

/// Result type alias using SoundsliceError
pub type Result<T> = std::result::Result<T, SoundsliceError>;
