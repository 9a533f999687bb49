//! Request and response types for the Soundslice REST endpoints.

use serde::{Deserialize, Serialize, Serializer};

use crate::rest::upload::UploadBody;
use crate::types::serde_helpers::json_string;
use crate::types::{EmbedStatus, PRINT_STATUS_ALLOWED, RecordingSource, STATUS_URL_SHAREABLE};

/// Loosely-typed JSON object returned by endpoints whose payload the client
/// does not interpret.
pub type ApiObject = serde_json::Map<String, serde_json::Value>;

/// A slice (score) as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Slice {
    /// Content-derived identifier of the slice.
    pub scorehash: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Title of the piece.
    #[serde(default)]
    pub name: Option<String>,
    /// Artist or composer.
    #[serde(default)]
    pub artist: Option<String>,
    /// Public URL of the slice.
    #[serde(default)]
    pub url: Option<String>,
    /// Every other field the API returned.
    #[serde(flatten)]
    pub extra: ApiObject,
}

/// A recording attached to a slice.
#[derive(Debug, Clone, Deserialize)]
pub struct Recording {
    /// Numeric recording id.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw source code, see [`Recording::recording_source`].
    #[serde(default)]
    pub source: Option<u8>,
    /// Source-specific payload (provider token or media URL).
    #[serde(default)]
    pub source_data: Option<String>,
    /// HLS stream URL for video-URL recordings.
    #[serde(default)]
    pub hls_url: Option<String>,
    /// Every other field the API returned.
    #[serde(flatten)]
    pub extra: ApiObject,
}

impl Recording {
    /// The source type, if the API reported a code this client knows.
    pub fn recording_source(&self) -> Option<RecordingSource> {
        self.source.and_then(|code| RecordingSource::try_from(code).ok())
    }
}

/// A folder of slices.
#[derive(Debug, Clone, Deserialize)]
pub struct Folder {
    /// Numeric folder id.
    pub id: u64,
    /// Folder name; write endpoints may answer with the id only.
    #[serde(default)]
    pub name: Option<String>,
    /// Parent folder id; absent for top-level folders.
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Every other field the API returned.
    #[serde(flatten)]
    pub extra: ApiObject,
}

/// Response carrying a single URL (download link or pre-signed upload target).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UrlResponse {
    pub url: String,
}

/// A marker aligning a bar of the notation with a time in the recording.
///
/// Travels as `[bar, time]` or `[bar, time, percent]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Syncpoint {
    /// Zero-based bar index.
    pub bar: u32,
    /// Time in the recording, in seconds.
    pub time: f64,
    /// Position within the bar, 0.0 to 1.0; `None` means the bar start.
    pub percent: Option<f64>,
}

impl Syncpoint {
    /// Syncpoint at the start of `bar`.
    pub fn new(bar: u32, time: f64) -> Self {
        Self {
            bar,
            time,
            percent: None,
        }
    }

    /// Syncpoint partway through `bar`.
    pub fn within_bar(bar: u32, time: f64, percent: f64) -> Self {
        Self {
            bar,
            time,
            percent: Some(percent),
        }
    }
}

impl Serialize for Syncpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.percent {
            Some(percent) => (self.bar, self.time, percent).serialize(serializer),
            None => (self.bar, self.time).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Syncpoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            WithinBar(u32, f64, f64),
            BarStart(u32, f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::WithinBar(bar, time, percent) => Syncpoint::within_bar(bar, time, percent),
            Raw::BarStart(bar, time) => Syncpoint::new(bar, time),
        })
    }
}

/// Parameters for creating a slice. Unset fields are left to the API defaults.
#[derive(Debug, Clone, Default)]
pub struct CreateSliceRequest {
    /// Title of the piece.
    pub name: Option<String>,
    /// Artist or composer.
    pub artist: Option<String>,
    /// Make the slice reachable through its URL.
    pub has_shareable_url: bool,
    /// Embed policy.
    pub embed_status: Option<EmbedStatus>,
    /// Allow printing.
    pub can_print: bool,
    /// Folder to create the slice in; `0` is the root folder.
    pub folder_id: Option<u64>,
}

impl CreateSliceRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the artist.
    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Make the slice shareable by URL.
    pub fn shareable(mut self) -> Self {
        self.has_shareable_url = true;
        self
    }

    /// Set the embed policy.
    pub fn embed_status(mut self, embed_status: EmbedStatus) -> Self {
        self.embed_status = Some(embed_status);
        self
    }

    /// Allow printing.
    pub fn printable(mut self) -> Self {
        self.can_print = true;
        self
    }

    /// Place the slice in a folder.
    pub fn folder_id(mut self, folder_id: u64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub(crate) fn form(&self) -> CreateSliceForm<'_> {
        CreateSliceForm {
            name: self.name.as_deref(),
            artist: self.artist.as_deref(),
            status: self.has_shareable_url.then_some(STATUS_URL_SHAREABLE),
            embed_status: self.embed_status,
            print_status: self.can_print.then_some(PRINT_STATUS_ALLOWED),
            folder_id: self.folder_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSliceForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artist: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embed_status: Option<EmbedStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    print_status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_id: Option<u64>,
}

/// Parameters for creating a recording.
///
/// Which fields are sent depends on the [`RecordingSource`]: linked sources
/// send `source_data`, video URLs send `source_data` and `hls_url`, uploads
/// send neither and transfer `media` after the record exists.
#[derive(Debug)]
pub struct CreateRecordingRequest {
    /// Source type.
    pub source: RecordingSource,
    /// Display name.
    pub name: Option<String>,
    /// Provider token or media URL.
    pub source_data: Option<String>,
    /// HLS stream URL (video URL sources only).
    pub hls_url: Option<String>,
    /// Media to transfer (upload sources only).
    pub media: Option<UploadBody>,
}

impl CreateRecordingRequest {
    /// Create a request for the given source type.
    pub fn new(source: RecordingSource) -> Self {
        Self {
            source,
            name: None,
            source_data: None,
            hls_url: None,
            media: None,
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the source data.
    pub fn source_data(mut self, source_data: impl Into<String>) -> Self {
        self.source_data = Some(source_data.into());
        self
    }

    /// Set the HLS stream URL.
    pub fn hls_url(mut self, hls_url: impl Into<String>) -> Self {
        self.hls_url = Some(hls_url.into());
        self
    }

    /// Set the media to upload.
    pub fn media(mut self, media: impl Into<UploadBody>) -> Self {
        self.media = Some(media.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordingForm<'a> {
    pub source: RecordingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hls_url: Option<&'a str>,
}

/// Fields to change on an existing recording. Empty values are not sent.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecordingRequest {
    /// New display name.
    pub name: Option<String>,
    /// New source data.
    pub source_data: Option<String>,
    /// New HLS stream URL.
    pub hls_url: Option<String>,
}

impl ChangeRecordingRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the source data.
    pub fn source_data(mut self, source_data: impl Into<String>) -> Self {
        self.source_data = Some(source_data.into());
        self
    }

    /// Set the HLS stream URL.
    pub fn hls_url(mut self, hls_url: impl Into<String>) -> Self {
        self.hls_url = Some(hls_url.into());
        self
    }

    pub(crate) fn form(&self) -> ChangeRecordingForm<'_> {
        ChangeRecordingForm {
            name: non_empty(&self.name),
            source_data: non_empty(&self.source_data),
            hls_url: non_empty(&self.hls_url),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChangeRecordingForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hls_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SyncpointsForm<'a> {
    #[serde(serialize_with = "json_string::serialize")]
    pub syncpoints: &'a [Syncpoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_start: Option<f64>,
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
