//! Soundslice REST API client.
//!
//! Provides access to the slice, recording, syncpoint and folder endpoints of
//! the Soundslice data API.
//!
//! # Trait-based API
//!
//! The [`SoundsliceApi`] trait abstracts all operations, so callers can be
//! generic over the client and substitute a mock in tests.
//!
//! ```rust,ignore
//! use soundslice_api_client::rest::{SoundsliceApi, SoundsliceClient};
//!
//! async fn use_client<C: SoundsliceApi>(client: &C) -> Result<(), soundslice_api_client::SoundsliceError> {
//!     for folder in client.list_folders(None).await? {
//!         println!("{}: {}", folder.id, folder.name.as_deref().unwrap_or("-"));
//!     }
//!     Ok(())
//! }
//! ```

mod client;
pub mod endpoints;
mod traits;
pub mod types;
pub mod upload;

pub use client::{ApiMethod, SoundsliceClient, SoundsliceClientBuilder};
pub use endpoints::SOUNDSLICE_BASE_URL;
pub use traits::SoundsliceApi;
pub use types::{
    ApiObject, ChangeRecordingRequest, CreateRecordingRequest, CreateSliceRequest, Folder,
    Recording, Slice, Syncpoint,
};
pub use upload::{Created, MediaUploaded, RecordingUpload, UploadBody};
