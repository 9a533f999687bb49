//! Media transfer for the two-phase upload flows.
//!
//! Uploading a recording is: create the recording record, ask the API for a
//! temporary upload target, PUT the bytes there. [`RecordingUpload`] tracks
//! which of those phases has completed so a caller can act on a record left
//! behind by a failed transfer. Nothing is rolled back or retried.

use std::marker::PhantomData;
use std::path::PathBuf;

use tokio::io::AsyncReadExt;

use crate::error::SoundsliceError;
use crate::rest::client::SoundsliceClient;
use crate::rest::types::Recording;

/// Bytes to transfer to a pre-signed upload target.
#[derive(Debug)]
pub enum UploadBody {
    /// Read the file at this path.
    Path(PathBuf),
    /// Read an already opened file to its end.
    File(tokio::fs::File),
    /// Send these bytes.
    Bytes(Vec<u8>),
}

impl UploadBody {
    /// Load the whole body into memory.
    pub async fn into_bytes(self) -> Result<Vec<u8>, SoundsliceError> {
        match self {
            UploadBody::Path(path) => Ok(tokio::fs::read(path).await?),
            UploadBody::File(mut file) => {
                let mut buf = Vec::new();
                file.read_to_end(&mut buf).await?;
                Ok(buf)
            }
            UploadBody::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<PathBuf> for UploadBody {
    fn from(path: PathBuf) -> Self {
        UploadBody::Path(path)
    }
}

impl From<&std::path::Path> for UploadBody {
    fn from(path: &std::path::Path) -> Self {
        UploadBody::Path(path.to_path_buf())
    }
}

impl From<tokio::fs::File> for UploadBody {
    fn from(file: tokio::fs::File) -> Self {
        UploadBody::File(file)
    }
}

impl From<Vec<u8>> for UploadBody {
    fn from(bytes: Vec<u8>) -> Self {
        UploadBody::Bytes(bytes)
    }
}

impl From<&[u8]> for UploadBody {
    fn from(bytes: &[u8]) -> Self {
        UploadBody::Bytes(bytes.to_vec())
    }
}

/// The recording record exists; its media has not been transferred.
#[derive(Debug)]
pub struct Created;

/// The media bytes were accepted by the upload target.
#[derive(Debug)]
pub struct MediaUploaded;

/// A recording upload in progress, typed by the phase it has reached.
#[derive(Debug)]
pub struct RecordingUpload<S> {
    recording: Recording,
    _state: PhantomData<S>,
}

impl<S> RecordingUpload<S> {
    /// The recording record as returned when it was created.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Id of the recording record.
    pub fn recording_id(&self) -> u64 {
        self.recording.id
    }

    /// Give up the phase tracking and keep the record.
    pub fn into_recording(self) -> Recording {
        self.recording
    }
}

impl RecordingUpload<Created> {
    pub(crate) fn created(recording: Recording) -> Self {
        Self {
            recording,
            _state: PhantomData,
        }
    }

    /// Request a temporary upload target and transfer `media` to it.
    ///
    /// On failure the recording record stays on the server without media;
    /// the error is returned unchanged. Delete the record with
    /// [`SoundsliceClient::delete_recording`] or retry with a fresh upload
    /// if that is what the caller wants.
    pub async fn upload_media(
        self,
        client: &SoundsliceClient,
        media: impl Into<UploadBody>,
    ) -> Result<RecordingUpload<MediaUploaded>, SoundsliceError> {
        let recording_id = self.recording.id;
        match client.transfer_recording_media(recording_id, media.into()).await {
            Ok(()) => Ok(RecordingUpload {
                recording: self.recording,
                _state: PhantomData,
            }),
            Err(err) => {
                tracing::warn!(
                    recording_id,
                    error = %err,
                    "recording created but media upload failed; record left without media"
                );
                Err(err)
            }
        }
    }
}
