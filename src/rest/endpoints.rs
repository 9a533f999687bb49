//! Soundslice REST API endpoint paths.
//!
//! Paths are relative to [`SOUNDSLICE_BASE_URL`] and always end with `/`.

/// Base URL for the Soundslice data API.
pub const SOUNDSLICE_BASE_URL: &str = "https://www.soundslice.com/api/v1";

/// Slice collection.
pub const SLICES: &str = "/slices/";
/// Folder collection.
pub const FOLDERS: &str = "/folders/";

/// A single slice.
pub fn slice(scorehash: &str) -> String {
    format!("/slices/{scorehash}/")
}

/// The notation file of a slice (download URL on GET, upload URL on POST).
pub fn slice_notation_file(scorehash: &str) -> String {
    format!("/slices/{scorehash}/notation-file/")
}

/// MusicXML export of a slice.
pub fn slice_musicxml(scorehash: &str) -> String {
    format!("/slices/{scorehash}/musicxml/")
}

/// Move a slice between folders.
pub fn slice_move(scorehash: &str) -> String {
    format!("/slices/{scorehash}/move/")
}

/// Duplicate a slice.
pub fn slice_duplicate(scorehash: &str) -> String {
    format!("/slices/{scorehash}/duplicate/")
}

/// Recordings attached to a slice.
pub fn slice_recordings(scorehash: &str) -> String {
    format!("/slices/{scorehash}/recordings/")
}

/// Ordering of a slice's recordings.
pub fn slice_recordings_order(scorehash: &str) -> String {
    format!("/slices/{scorehash}/recordings/order/")
}

/// A single recording.
pub fn recording(recording_id: u64) -> String {
    format!("/recordings/{recording_id}/")
}

/// Temporary media upload target of a recording.
pub fn recording_media(recording_id: u64) -> String {
    format!("/recordings/{recording_id}/media/")
}

/// Syncpoints of a recording.
pub fn recording_syncpoints(recording_id: u64) -> String {
    format!("/recordings/{recording_id}/syncpoints/")
}

/// A single folder.
pub fn folder(folder_id: u64) -> String {
    format!("/folders/{folder_id}/")
}

/// Folder listing, optionally restricted to the children of `parent_id`.
///
/// A parent of `0` (the root folder) lists without a filter.
pub fn folders(parent_id: Option<u64>) -> String {
    match parent_id {
        Some(parent_id) if parent_id != 0 => format!("{FOLDERS}?parent_id={parent_id}"),
        _ => FOLDERS.to_string(),
    }
}
