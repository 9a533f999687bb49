//! Trait definition for the Soundslice REST API client.
//!
//! [`SoundsliceApi`] abstracts every resource operation so code can be
//! written against the trait and tested with a mock implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use soundslice_api_client::rest::SoundsliceApi;
//!
//! async fn count_slices<C: SoundsliceApi>(client: &C) -> soundslice_api_client::Result<usize> {
//!     Ok(client.list_slices().await?.len())
//! }
//! ```

use std::future::Future;

use crate::error::SoundsliceError;
use crate::rest::client::SoundsliceClient;
use crate::rest::types::{
    ApiObject, ChangeRecordingRequest, CreateRecordingRequest, CreateSliceRequest, Folder,
    Recording, Slice, Syncpoint,
};
use crate::rest::upload::UploadBody;

/// Trait defining all Soundslice REST API operations.
///
/// All methods are async and return `Result<T, SoundsliceError>`.
pub trait SoundsliceApi: Send + Sync {
    // ========== Slices ==========

    /// Create a slice.
    fn create_slice(
        &self,
        request: &CreateSliceRequest,
    ) -> impl Future<Output = Result<Slice, SoundsliceError>> + Send;

    /// Delete a slice.
    fn delete_slice(
        &self,
        scorehash: &str,
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    /// List all slices.
    fn list_slices(&self) -> impl Future<Output = Result<Vec<Slice>, SoundsliceError>> + Send;

    /// Get a slice.
    fn get_slice(
        &self,
        scorehash: &str,
    ) -> impl Future<Output = Result<Slice, SoundsliceError>> + Send;

    /// Get a download URL for the slice's original notation file.
    fn get_original_slice_notation_file(
        &self,
        scorehash: &str,
    ) -> impl Future<Output = Result<String, SoundsliceError>> + Send;

    /// Upload a notation file into a slice.
    fn upload_slice_notation(
        &self,
        scorehash: &str,
        notation: UploadBody,
        callback_url: Option<&str>,
    ) -> impl Future<Output = Result<(), SoundsliceError>> + Send;

    /// Get the slice as MusicXML, `None` if unavailable.
    fn get_slice_musicxml(
        &self,
        scorehash: &str,
    ) -> impl Future<Output = Result<Option<String>, SoundsliceError>> + Send;

    /// Move a slice to a folder (`None` is the root folder).
    fn move_slice_to_folder(
        &self,
        scorehash: &str,
        folder_id: Option<u64>,
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    /// Duplicate a slice.
    fn duplicate_slice(
        &self,
        scorehash: &str,
    ) -> impl Future<Output = Result<Slice, SoundsliceError>> + Send;

    // ========== Recordings ==========

    /// Create a recording.
    fn create_recording(
        &self,
        scorehash: &str,
        request: CreateRecordingRequest,
    ) -> impl Future<Output = Result<Recording, SoundsliceError>> + Send;

    /// List a slice's recordings.
    fn get_slice_recordings(
        &self,
        scorehash: &str,
    ) -> impl Future<Output = Result<Vec<Recording>, SoundsliceError>> + Send;

    /// Set the order of a slice's recordings.
    fn reorder_slice_recordings(
        &self,
        scorehash: &str,
        order: &[u64],
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    /// Change a recording.
    fn change_recording(
        &self,
        recording_id: u64,
        request: &ChangeRecordingRequest,
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    /// Delete a recording.
    fn delete_recording(
        &self,
        recording_id: u64,
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    // ========== Syncpoints ==========

    /// Get a recording's syncpoints.
    fn get_recording_syncpoints(
        &self,
        recording_id: u64,
    ) -> impl Future<Output = Result<Vec<Syncpoint>, SoundsliceError>> + Send;

    /// Replace a recording's syncpoints.
    fn put_recording_syncpoints(
        &self,
        recording_id: u64,
        syncpoints: &[Syncpoint],
        crop_start: Option<f64>,
        crop_end: Option<f64>,
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    // ========== Folders ==========

    /// Create a folder.
    fn create_folder(
        &self,
        name: &str,
        parent_id: Option<u64>,
    ) -> impl Future<Output = Result<Folder, SoundsliceError>> + Send;

    /// Rename a folder.
    fn rename_folder(
        &self,
        folder_id: u64,
        name: &str,
    ) -> impl Future<Output = Result<Folder, SoundsliceError>> + Send;

    /// Delete a folder.
    fn delete_folder(
        &self,
        folder_id: u64,
    ) -> impl Future<Output = Result<ApiObject, SoundsliceError>> + Send;

    /// List folders.
    fn list_folders(
        &self,
        parent_id: Option<u64>,
    ) -> impl Future<Output = Result<Vec<Folder>, SoundsliceError>> + Send;
}

impl SoundsliceApi for SoundsliceClient {
    async fn create_slice(&self, request: &CreateSliceRequest) -> Result<Slice, SoundsliceError> {
        SoundsliceClient::create_slice(self, request).await
    }

    async fn delete_slice(&self, scorehash: &str) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::delete_slice(self, scorehash).await
    }

    async fn list_slices(&self) -> Result<Vec<Slice>, SoundsliceError> {
        SoundsliceClient::list_slices(self).await
    }

    async fn get_slice(&self, scorehash: &str) -> Result<Slice, SoundsliceError> {
        SoundsliceClient::get_slice(self, scorehash).await
    }

    async fn get_original_slice_notation_file(
        &self,
        scorehash: &str,
    ) -> Result<String, SoundsliceError> {
        SoundsliceClient::get_original_slice_notation_file(self, scorehash).await
    }

    async fn upload_slice_notation(
        &self,
        scorehash: &str,
        notation: UploadBody,
        callback_url: Option<&str>,
    ) -> Result<(), SoundsliceError> {
        SoundsliceClient::upload_slice_notation(self, scorehash, notation, callback_url).await
    }

    async fn get_slice_musicxml(&self, scorehash: &str) -> Result<Option<String>, SoundsliceError> {
        SoundsliceClient::get_slice_musicxml(self, scorehash).await
    }

    async fn move_slice_to_folder(
        &self,
        scorehash: &str,
        folder_id: Option<u64>,
    ) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::move_slice_to_folder(self, scorehash, folder_id).await
    }

    async fn duplicate_slice(&self, scorehash: &str) -> Result<Slice, SoundsliceError> {
        SoundsliceClient::duplicate_slice(self, scorehash).await
    }

    async fn create_recording(
        &self,
        scorehash: &str,
        request: CreateRecordingRequest,
    ) -> Result<Recording, SoundsliceError> {
        SoundsliceClient::create_recording(self, scorehash, request).await
    }

    async fn get_slice_recordings(&self, scorehash: &str) -> Result<Vec<Recording>, SoundsliceError> {
        SoundsliceClient::get_slice_recordings(self, scorehash).await
    }

    async fn reorder_slice_recordings(
        &self,
        scorehash: &str,
        order: &[u64],
    ) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::reorder_slice_recordings(self, scorehash, order).await
    }

    async fn change_recording(
        &self,
        recording_id: u64,
        request: &ChangeRecordingRequest,
    ) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::change_recording(self, recording_id, request).await
    }

    async fn delete_recording(&self, recording_id: u64) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::delete_recording(self, recording_id).await
    }

    async fn get_recording_syncpoints(
        &self,
        recording_id: u64,
    ) -> Result<Vec<Syncpoint>, SoundsliceError> {
        SoundsliceClient::get_recording_syncpoints(self, recording_id).await
    }

    async fn put_recording_syncpoints(
        &self,
        recording_id: u64,
        syncpoints: &[Syncpoint],
        crop_start: Option<f64>,
        crop_end: Option<f64>,
    ) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::put_recording_syncpoints(self, recording_id, syncpoints, crop_start, crop_end)
            .await
    }

    async fn create_folder(&self, name: &str, parent_id: Option<u64>) -> Result<Folder, SoundsliceError> {
        SoundsliceClient::create_folder(self, name, parent_id).await
    }

    async fn rename_folder(&self, folder_id: u64, name: &str) -> Result<Folder, SoundsliceError> {
        SoundsliceClient::rename_folder(self, folder_id, name).await
    }

    async fn delete_folder(&self, folder_id: u64) -> Result<ApiObject, SoundsliceError> {
        SoundsliceClient::delete_folder(self, folder_id).await
    }

    async fn list_folders(&self, parent_id: Option<u64>) -> Result<Vec<Folder>, SoundsliceError> {
        SoundsliceClient::list_folders(self, parent_id).await
    }
}
