//! Soundslice REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{CredentialsProvider, StaticCredentials};
use crate::error::SoundsliceError;
use crate::rest::endpoints::{self, SOUNDSLICE_BASE_URL};
use crate::rest::types::*;
use crate::rest::upload::{Created, RecordingUpload, UploadBody};
use crate::types::{ROOT_FOLDER_ID, SourceKind};

/// HTTP verbs accepted by the Soundslice API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// Create or modify
    Post,
    /// Read
    Get,
    /// Remove
    Delete,
}

/// The Soundslice REST API client.
///
/// Every call is authenticated with HTTP basic auth using the application id
/// and password. Responses with status 403, 422 and 429 become
/// [`SoundsliceError::PermissionDenied`], [`SoundsliceError::Validation`] and
/// [`SoundsliceError::RateLimited`]; nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use soundslice_api_client::rest::{CreateSliceRequest, SoundsliceClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SoundsliceClient::new("my_app_id", "my_password");
///
///     let slice = client
///         .create_slice(&CreateSliceRequest::new().name("Etude No. 1").artist("Sor"))
///         .await?;
///     println!("Created {}", slice.scorehash);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SoundsliceClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
}

impl SoundsliceClient {
    /// Create a client for the production API with the given credentials.
    pub fn new(app_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self::builder()
            .credentials(Arc::new(StaticCredentials::new(app_id, password)))
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> SoundsliceClientBuilder {
        SoundsliceClientBuilder::new()
    }

    // Request primitives.

    /// Send an authenticated request and apply the status policy.
    ///
    /// 403, 422 and 429 are turned into errors. Every other response,
    /// including non-2xx ones, is returned for the caller to interpret.
    pub async fn request_raw<P>(
        &self,
        method: ApiMethod,
        endpoint: &str,
        form: Option<&P>,
    ) -> Result<reqwest::Response, SoundsliceError>
    where
        P: Serialize + ?Sized,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SoundsliceError::MissingCredentials)?;
        let creds = credentials.get_credentials();

        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(?method, %url, "soundslice api request");

        let request = match method {
            ApiMethod::Get => self.http_client.get(&url),
            ApiMethod::Delete => self.http_client.delete(&url),
            ApiMethod::Post => {
                let form_data = match form {
                    Some(form) => serde_urlencoded::to_string(form)
                        .map_err(|e| SoundsliceError::InvalidRequest(e.to_string()))?,
                    None => String::new(),
                };
                self.http_client
                    .post(&url)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(form_data)
            }
        };

        let response = request
            .basic_auth(&creds.app_id, Some(creds.expose_secret()))
            .send()
            .await?;

        match response.status() {
            StatusCode::FORBIDDEN => Err(SoundsliceError::PermissionDenied),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let detail = response.bytes().await?.to_vec();
                Err(SoundsliceError::Validation { detail })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(SoundsliceError::RateLimited),
            _ => Ok(response),
        }
    }

    /// Send an authenticated request and decode the JSON body.
    pub async fn request_json<T, P>(
        &self,
        method: ApiMethod,
        endpoint: &str,
        form: Option<&P>,
    ) -> Result<T, SoundsliceError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.request_raw(method, endpoint, form).await?;
        self.parse_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SoundsliceError> {
        self.request_json::<T, ()>(ApiMethod::Get, endpoint, None)
            .await
    }

    async fn delete_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SoundsliceError> {
        self.request_json::<T, ()>(ApiMethod::Delete, endpoint, None)
            .await
    }

    async fn post_json<T, P>(&self, endpoint: &str, form: &P) -> Result<T, SoundsliceError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.request_json(ApiMethod::Post, endpoint, Some(form))
            .await
    }

    async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SoundsliceError> {
        self.request_json::<T, ()>(ApiMethod::Post, endpoint, None)
            .await
    }

    /// Parse a JSON response body.
    ///
    /// An empty body decodes as `null`, so endpoints that answer with no
    /// content still produce an [`ApiObject`] or `()`.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, SoundsliceError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };

        serde_json::from_str::<T>(text)
            .or_else(|e| {
                // `null` is not a map.
                if text == "null" {
                    serde_json::from_str::<T>("{}").map_err(|_| e)
                } else {
                    Err(e)
                }
            })
            .map_err(|e| {
                if !status.is_success() {
                    SoundsliceError::InvalidResponse(format!("HTTP {}: {}", status, body))
                } else {
                    SoundsliceError::InvalidResponse(format!(
                        "Failed to parse response: {}. Body: {}",
                        e, body
                    ))
                }
            })
    }

    /// PUT bytes to a pre-signed upload target. No API credentials are sent.
    async fn put_to_upload_target(
        &self,
        target: &str,
        body: UploadBody,
    ) -> Result<(), SoundsliceError> {
        let target = url::Url::parse(target)?;
        let bytes = body.into_bytes().await?;
        tracing::debug!(%target, len = bytes.len(), "uploading to pre-signed target");

        let response = self.http_client.put(target).body(bytes).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SoundsliceError::UploadFailed {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    // Slices.

    /// Create a slice.
    pub async fn create_slice(&self, request: &CreateSliceRequest) -> Result<Slice, SoundsliceError> {
        self.post_json(endpoints::SLICES, &request.form()).await
    }

    /// Delete a slice.
    pub async fn delete_slice(&self, scorehash: &str) -> Result<ApiObject, SoundsliceError> {
        self.delete_json(&endpoints::slice(scorehash)).await
    }

    /// List all slices in the account.
    pub async fn list_slices(&self) -> Result<Vec<Slice>, SoundsliceError> {
        self.get_json(endpoints::SLICES).await
    }

    /// Get a single slice.
    pub async fn get_slice(&self, scorehash: &str) -> Result<Slice, SoundsliceError> {
        self.get_json(&endpoints::slice(scorehash)).await
    }

    /// Get a download URL for the notation file the slice was created from.
    pub async fn get_original_slice_notation_file(
        &self,
        scorehash: &str,
    ) -> Result<String, SoundsliceError> {
        let response: UrlResponse = self
            .get_json(&endpoints::slice_notation_file(scorehash))
            .await?;
        Ok(response.url)
    }

    /// Upload a notation file (MusicXML, Guitar Pro, ...) into a slice.
    ///
    /// The API hands out an upload target and processes the file after the
    /// transfer. If `callback_url` is given, the API notifies it when
    /// processing has finished.
    pub async fn upload_slice_notation(
        &self,
        scorehash: &str,
        notation: impl Into<UploadBody>,
        callback_url: Option<&str>,
    ) -> Result<(), SoundsliceError> {
        #[derive(Serialize)]
        struct Params<'a> {
            callback_url: &'a str,
        }
        let endpoint = endpoints::slice_notation_file(scorehash);
        let target: UrlResponse = match callback_url.filter(|u| !u.is_empty()) {
            Some(callback_url) => self.post_json(&endpoint, &Params { callback_url }).await?,
            None => self.post_empty(&endpoint).await?,
        };
        self.put_to_upload_target(&target.url, notation.into()).await
    }

    /// Get the slice as MusicXML text.
    ///
    /// Returns `Ok(None)` when the API has no MusicXML for the slice (404).
    pub async fn get_slice_musicxml(
        &self,
        scorehash: &str,
    ) -> Result<Option<String>, SoundsliceError> {
        let response = self
            .request_raw::<()>(ApiMethod::Get, &endpoints::slice_musicxml(scorehash), None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }

    /// Move a slice to a folder. `None` moves it to the root folder.
    pub async fn move_slice_to_folder(
        &self,
        scorehash: &str,
        folder_id: Option<u64>,
    ) -> Result<ApiObject, SoundsliceError> {
        #[derive(Serialize)]
        struct Params {
            folder_id: u64,
        }
        let folder_id = folder_id.unwrap_or(ROOT_FOLDER_ID);
        self.post_json(&endpoints::slice_move(scorehash), &Params { folder_id })
            .await
    }

    /// Duplicate a slice.
    pub async fn duplicate_slice(&self, scorehash: &str) -> Result<Slice, SoundsliceError> {
        self.post_empty(&endpoints::slice_duplicate(scorehash)).await
    }

    // Recordings.

    /// Create a recording on a slice.
    ///
    /// Linked and video-URL sources take a single request. Upload sources
    /// create the record, request a temporary upload target and transfer
    /// `request.media` to it; see [`SoundsliceClient::begin_recording_upload`]
    /// for driving those phases separately. If the record was created but the
    /// media steps fail, the error is [`SoundsliceError::UploadIncomplete`]
    /// carrying the id of the record left behind.
    pub async fn create_recording(
        &self,
        scorehash: &str,
        request: CreateRecordingRequest,
    ) -> Result<Recording, SoundsliceError> {
        match request.source.kind() {
            SourceKind::Linked | SourceKind::VideoUrl => {
                self.post_json(&endpoints::slice_recordings(scorehash), &recording_form(&request))
                    .await
            }
            SourceKind::Upload => {
                let mut request = request;
                let media = request.media.take().ok_or_else(|| {
                    SoundsliceError::InvalidRequest(format!(
                        "{} recordings need media to upload",
                        request.source
                    ))
                })?;
                let upload = self.begin_recording_upload(scorehash, &request).await?;
                let recording_id = upload.recording_id();
                let uploaded = upload.upload_media(self, media).await.map_err(|err| {
                    SoundsliceError::UploadIncomplete {
                        recording_id,
                        source: Box::new(err),
                    }
                })?;
                Ok(uploaded.into_recording())
            }
        }
    }

    /// Create the record for an upload-source recording without sending media.
    ///
    /// Continue with [`RecordingUpload::upload_media`].
    pub async fn begin_recording_upload(
        &self,
        scorehash: &str,
        request: &CreateRecordingRequest,
    ) -> Result<RecordingUpload<Created>, SoundsliceError> {
        if request.source.kind() != SourceKind::Upload {
            return Err(SoundsliceError::InvalidRequest(format!(
                "{} recordings are not uploaded",
                request.source
            )));
        }
        let recording: Recording = self
            .post_json(&endpoints::slice_recordings(scorehash), &recording_form(request))
            .await?;
        Ok(RecordingUpload::created(recording))
    }

    /// Ask for a temporary media target and PUT `media` to it.
    pub(crate) async fn transfer_recording_media(
        &self,
        recording_id: u64,
        media: UploadBody,
    ) -> Result<(), SoundsliceError> {
        let target: UrlResponse = self
            .post_empty(&endpoints::recording_media(recording_id))
            .await?;
        self.put_to_upload_target(&target.url, media).await
    }

    /// List a slice's recordings.
    pub async fn get_slice_recordings(
        &self,
        scorehash: &str,
    ) -> Result<Vec<Recording>, SoundsliceError> {
        self.get_json(&endpoints::slice_recordings(scorehash)).await
    }

    /// Set the order of a slice's recordings. `order` lists every recording id.
    pub async fn reorder_slice_recordings(
        &self,
        scorehash: &str,
        order: &[u64],
    ) -> Result<ApiObject, SoundsliceError> {
        #[derive(Serialize)]
        struct Params<'a> {
            #[serde(serialize_with = "crate::types::serde_helpers::comma_separated::serialize")]
            order: &'a [u64],
        }
        self.post_json(&endpoints::slice_recordings_order(scorehash), &Params { order })
            .await
    }

    /// Change a recording's name, source data or HLS URL.
    pub async fn change_recording(
        &self,
        recording_id: u64,
        request: &ChangeRecordingRequest,
    ) -> Result<ApiObject, SoundsliceError> {
        self.post_json(&endpoints::recording(recording_id), &request.form())
            .await
    }

    /// Delete a recording.
    pub async fn delete_recording(&self, recording_id: u64) -> Result<ApiObject, SoundsliceError> {
        self.delete_json(&endpoints::recording(recording_id)).await
    }

    // Syncpoints.

    /// Get a recording's syncpoints.
    pub async fn get_recording_syncpoints(
        &self,
        recording_id: u64,
    ) -> Result<Vec<Syncpoint>, SoundsliceError> {
        self.get_json(&endpoints::recording_syncpoints(recording_id))
            .await
    }

    /// Replace a recording's syncpoints.
    ///
    /// Crop bounds of zero are not sent. Both bounds travel in the
    /// `crop_start` field, so a non-zero `crop_end` replaces `crop_start`.
    pub async fn put_recording_syncpoints(
        &self,
        recording_id: u64,
        syncpoints: &[Syncpoint],
        crop_start: Option<f64>,
        crop_end: Option<f64>,
    ) -> Result<ApiObject, SoundsliceError> {
        let crop_start = crop_start.filter(|v| *v != 0.0);
        let crop_end = crop_end.filter(|v| *v != 0.0);
        if crop_start.is_some() && crop_end.is_some() {
            tracing::warn!(
                recording_id,
                "crop_end is sent as crop_start; the crop start value is dropped"
            );
        }
        let form = SyncpointsForm {
            syncpoints,
            crop_start: crop_end.or(crop_start),
        };
        self.post_json(&endpoints::recording_syncpoints(recording_id), &form)
            .await
    }

    // Folders.

    /// Create a folder, optionally inside `parent_id`.
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<u64>,
    ) -> Result<Folder, SoundsliceError> {
        #[derive(Serialize)]
        struct Params<'a> {
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            parent_id: Option<u64>,
        }
        let parent_id = parent_id.filter(|id| *id != ROOT_FOLDER_ID);
        self.post_json(endpoints::FOLDERS, &Params { name, parent_id })
            .await
    }

    /// Rename a folder.
    pub async fn rename_folder(&self, folder_id: u64, name: &str) -> Result<Folder, SoundsliceError> {
        #[derive(Serialize)]
        struct Params<'a> {
            name: &'a str,
        }
        self.post_json(&endpoints::folder(folder_id), &Params { name })
            .await
    }

    /// Delete a folder.
    pub async fn delete_folder(&self, folder_id: u64) -> Result<ApiObject, SoundsliceError> {
        self.delete_json(&endpoints::folder(folder_id)).await
    }

    /// List folders, optionally only the children of `parent_id`.
    pub async fn list_folders(&self, parent_id: Option<u64>) -> Result<Vec<Folder>, SoundsliceError> {
        self.get_json(&endpoints::folders(parent_id)).await
    }
}

fn recording_form(request: &CreateRecordingRequest) -> CreateRecordingForm<'_> {
    let (source_data, hls_url) = match request.source.kind() {
        SourceKind::Linked => (request.source_data.as_deref(), None),
        SourceKind::VideoUrl => (non_empty(&request.source_data), non_empty(&request.hls_url)),
        SourceKind::Upload => (None, None),
    };
    CreateRecordingForm {
        source: request.source,
        name: request.name.as_deref(),
        source_data,
        hls_url,
    }
}

impl std::fmt::Debug for SoundsliceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundsliceClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`SoundsliceClient`].
pub struct SoundsliceClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl SoundsliceClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: SOUNDSLICE_BASE_URL.to_string(),
            credentials: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider used for basic auth.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Abort any single HTTP request that takes longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> SoundsliceClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("soundslice-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("soundslice-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = http_client(headers, self.timeout).unwrap_or_else(|err| {
            tracing::warn!(
                error = %err,
                timeout = ?self.timeout,
                "failed to build configured HTTP client; falling back to defaults without timeout"
            );
            reqwest::Client::new()
        });

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        SoundsliceClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
        }
    }
}

fn http_client(
    headers: HeaderMap,
    timeout: Option<Duration>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

impl Default for SoundsliceClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
