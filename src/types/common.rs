//! Common domain types for the Soundslice API.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Id of the account's top-level folder.
pub const ROOT_FOLDER_ID: u64 = 0;

/// Slice `status` value that makes the slice reachable through its URL.
pub(crate) const STATUS_URL_SHAREABLE: u8 = 3;

/// Slice `print_status` value that allows printing.
pub(crate) const PRINT_STATUS_ALLOWED: u8 = 3;

/// Embed policy of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EmbedStatus {
    /// Embeddable only on the account's allowlisted domains
    OnAllowlist,
}

impl EmbedStatus {
    /// Integer code used on the wire.
    pub fn code(self) -> u8 {
        match self {
            EmbedStatus::OnAllowlist => 4,
        }
    }
}

impl TryFrom<u8> for EmbedStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            4 => Ok(EmbedStatus::OnAllowlist),
            other => Err(other),
        }
    }
}

impl Serialize for EmbedStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for EmbedStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        EmbedStatus::try_from(code)
            .map_err(|c| de::Error::custom(format!("unknown embed status {c}")))
    }
}

/// Where a recording's media comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingSource {
    /// MP3 file uploaded through the API
    Mp3Upload,
    /// Video file uploaded through the API
    VideoUpload,
    /// Video hosted at an arbitrary URL, optionally with an HLS stream
    VideoUrl,
    /// MP3 hosted at a URL
    Mp3Url,
    /// YouTube video
    YouTube,
    /// Vimeo video
    Vimeo,
    /// Wistia video
    Wistia,
}

/// Payload shape required by a [`RecordingSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Provider token or media URL passed as `source_data`
    Linked,
    /// Generic video URL with optional `source_data` and `hls_url`
    VideoUrl,
    /// Media bytes transferred after the recording is created
    Upload,
}

impl RecordingSource {
    /// Integer code used on the wire.
    pub fn code(self) -> u8 {
        match self {
            RecordingSource::YouTube => 1,
            RecordingSource::Mp3Upload => 2,
            RecordingSource::VideoUrl => 3,
            RecordingSource::VideoUpload => 4,
            RecordingSource::Vimeo => 6,
            RecordingSource::Wistia => 7,
            RecordingSource::Mp3Url => 8,
        }
    }

    /// Payload shape this source requires.
    pub fn kind(self) -> SourceKind {
        match self {
            RecordingSource::YouTube
            | RecordingSource::Vimeo
            | RecordingSource::Wistia
            | RecordingSource::Mp3Url => SourceKind::Linked,
            RecordingSource::VideoUrl => SourceKind::VideoUrl,
            RecordingSource::Mp3Upload | RecordingSource::VideoUpload => SourceKind::Upload,
        }
    }
}

impl TryFrom<u8> for RecordingSource {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(RecordingSource::YouTube),
            2 => Ok(RecordingSource::Mp3Upload),
            3 => Ok(RecordingSource::VideoUrl),
            4 => Ok(RecordingSource::VideoUpload),
            6 => Ok(RecordingSource::Vimeo),
            7 => Ok(RecordingSource::Wistia),
            8 => Ok(RecordingSource::Mp3Url),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for RecordingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordingSource::Mp3Upload => "mp3-upload",
            RecordingSource::VideoUpload => "video-upload",
            RecordingSource::VideoUrl => "video-url",
            RecordingSource::Mp3Url => "mp3-url",
            RecordingSource::YouTube => "youtube",
            RecordingSource::Vimeo => "vimeo",
            RecordingSource::Wistia => "wistia",
        };
        write!(f, "{}", s)
    }
}

impl Serialize for RecordingSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for RecordingSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        RecordingSource::try_from(code)
            .map_err(|c| de::Error::custom(format!("unknown recording source {c}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_source_codes() {
        assert_eq!(RecordingSource::YouTube.code(), 1);
        assert_eq!(RecordingSource::Mp3Upload.code(), 2);
        assert_eq!(RecordingSource::VideoUrl.code(), 3);
        assert_eq!(RecordingSource::VideoUpload.code(), 4);
        assert_eq!(RecordingSource::Vimeo.code(), 6);
        assert_eq!(RecordingSource::Wistia.code(), 7);
        assert_eq!(RecordingSource::Mp3Url.code(), 8);
        assert_eq!(RecordingSource::try_from(5), Err(5));
    }

    #[test]
    fn test_recording_source_kinds() {
        assert_eq!(RecordingSource::Mp3Url.kind(), SourceKind::Linked);
        assert_eq!(RecordingSource::Wistia.kind(), SourceKind::Linked);
        assert_eq!(RecordingSource::VideoUrl.kind(), SourceKind::VideoUrl);
        assert_eq!(RecordingSource::VideoUpload.kind(), SourceKind::Upload);
    }

    #[test]
    fn test_recording_source_deserialize() {
        let source: RecordingSource = serde_json::from_str("6").unwrap();
        assert_eq!(source, RecordingSource::Vimeo);
        assert!(serde_json::from_str::<RecordingSource>("9").is_err());
    }

    #[test]
    fn test_embed_status_serializes_as_code() {
        assert_eq!(serde_json::to_string(&EmbedStatus::OnAllowlist).unwrap(), "4");
    }
}
