use std::sync::Arc;

use wiremock::matchers::{basic_auth, body_string, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use soundslice_api_client::auth::StaticCredentials;
use soundslice_api_client::error::SoundsliceError;
use soundslice_api_client::rest::{
    ChangeRecordingRequest, CreateRecordingRequest, CreateSliceRequest, SoundsliceApi,
    SoundsliceClient, Syncpoint,
};
use soundslice_api_client::{EmbedStatus, RecordingSource};

fn build_client(server: &MockServer) -> SoundsliceClient {
    let credentials = Arc::new(StaticCredentials::new("test_app", "test_secret"));
    SoundsliceClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .build()
}

async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

fn form_fields(request: &Request) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(&request.body).unwrap()
}

#[tokio::test]
async fn test_every_request_uses_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slices/"))
        .and(basic_auth("test_app", "test_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "scorehash": "abc", "name": "Etude" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/folders/3/"))
        .and(basic_auth("test_app", "test_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/move/"))
        .and(basic_auth("test_app", "test_secret"))
        .and(body_string("folder_id=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let slices = client.list_slices().await.unwrap();
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].scorehash, "abc");
    client.delete_folder(3).await.unwrap();
    client.move_slice_to_folder("abc", None).await.unwrap();
    assert_eq!(received(&server).await.len(), 3);
}

#[tokio::test]
async fn test_missing_credentials() {
    let server = MockServer::start().await;
    let client = SoundsliceClient::builder().base_url(server.uri()).build();

    let err = client.list_slices().await.unwrap_err();
    assert!(matches!(err, SoundsliceError::MissingCredentials));
    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_403_is_permission_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slices/abc/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = build_client(&server).get_slice("abc").await.unwrap_err();
    assert!(matches!(err, SoundsliceError::PermissionDenied));
}

#[tokio::test]
async fn test_422_carries_exact_body() {
    let server = MockServer::start().await;
    let body = br#"{"folder_id": ["Invalid folder."]}"#.to_vec();
    Mock::given(method("POST"))
        .and(path("/slices/"))
        .respond_with(ResponseTemplate::new(422).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let err = build_client(&server)
        .create_slice(&CreateSliceRequest::new().folder_id(99))
        .await
        .unwrap_err();
    match err {
        SoundsliceError::Validation { detail } => assert_eq!(detail, body),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_429_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/folders/"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = build_client(&server).list_folders(None).await.unwrap_err();
    assert!(matches!(err, SoundsliceError::RateLimited));
}

#[tokio::test]
async fn test_unexpected_status_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slices/abc/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = build_client(&server).get_slice("abc").await.unwrap_err();
    match err {
        SoundsliceError::InvalidResponse(msg) => assert!(msg.contains("500")),
        other => panic!("expected invalid response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_slice_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slices/"))
        .and(body_string(
            "name=Etude&artist=Sor&status=3&embed_status=4&print_status=3",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "scorehash": "xyz",
            "slug": "12345",
            "url": "/slices/xyz/"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateSliceRequest::new()
        .name("Etude")
        .artist("Sor")
        .shareable()
        .embed_status(EmbedStatus::OnAllowlist)
        .printable();
    let slice = build_client(&server).create_slice(&request).await.unwrap();
    assert_eq!(slice.scorehash, "xyz");
    assert_eq!(slice.slug.as_deref(), Some("12345"));
}

#[tokio::test]
async fn test_move_slice_defaults_to_root_folder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/move/"))
        .and(body_string("folder_id=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/move/"))
        .and(body_string("folder_id=5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let root = client.move_slice_to_folder("abc", None).await.unwrap();
    assert_eq!(root["id"], 0);
    let folder = client.move_slice_to_folder("abc", Some(5)).await.unwrap();
    assert_eq!(folder["id"], 5);
}

#[tokio::test]
async fn test_musicxml_404_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slices/missing/musicxml/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slices/abc/musicxml/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<score-partwise/>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert_eq!(client.get_slice_musicxml("missing").await.unwrap(), None);
    assert_eq!(
        client.get_slice_musicxml("abc").await.unwrap().as_deref(),
        Some("<score-partwise/>")
    );
}

#[tokio::test]
async fn test_original_notation_file_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slices/abc/notation-file/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "https://files.example/abc.gp5"
        })))
        .mount(&server)
        .await;

    let url = build_client(&server)
        .get_original_slice_notation_file("abc")
        .await
        .unwrap();
    assert_eq!(url, "https://files.example/abc.gp5");
}

#[tokio::test]
async fn test_upload_slice_notation_with_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/notation-file/"))
        .and(body_string("callback_url=https%3A%2F%2Fapp.example%2Fdone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": format!("{}/upload/notation", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/upload/notation"))
        .and(body_string("<score-partwise/>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    build_client(&server)
        .upload_slice_notation(
            "abc",
            b"<score-partwise/>".to_vec(),
            Some("https://app.example/done"),
        )
        .await
        .unwrap();

    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_duplicate_slice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/duplicate/"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "scorehash": "def"
        })))
        .mount(&server)
        .await;

    let slice = build_client(&server).duplicate_slice("abc").await.unwrap();
    assert_eq!(slice.scorehash, "def");
}

#[tokio::test]
async fn test_create_youtube_recording_is_single_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/recordings/"))
        .and(body_string("source=1&source_data=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "source": 1,
            "source_data": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateRecordingRequest::new(RecordingSource::YouTube).source_data("abc123");
    let recording = build_client(&server)
        .create_recording("abc", request)
        .await
        .unwrap();

    assert_eq!(recording.id, 7);
    assert_eq!(recording.recording_source(), Some(RecordingSource::YouTube));
    assert_eq!(received(&server).await.len(), 1);
}

async fn mount_mp3_upload(server: &MockServer, media_status: u16, put_status: u16) {
    Mock::given(method("POST"))
        .and(path("/slices/abc/recordings/"))
        .and(body_string("source=2&name=Take+1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "name": "Take 1",
            "source": 2
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/recordings/42/media/"))
        .respond_with(ResponseTemplate::new(media_status).set_body_json(serde_json::json!({
            "url": format!("{}/upload/42", server.uri())
        })))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/upload/42"))
        .respond_with(ResponseTemplate::new(put_status).set_body_string("upload target says no"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_mp3_upload_runs_three_steps_in_order() {
    let server = MockServer::start().await;
    mount_mp3_upload(&server, 200, 200).await;

    let media_path = std::env::temp_dir().join("soundslice-api-client-test-take1.mp3");
    std::fs::write(&media_path, b"ID3 fake mp3").unwrap();

    let request = CreateRecordingRequest::new(RecordingSource::Mp3Upload)
        .name("Take 1")
        .media(media_path.clone());
    let recording = build_client(&server)
        .create_recording("abc", request)
        .await
        .unwrap();
    let _ = std::fs::remove_file(&media_path);

    assert_eq!(recording.id, 42);
    let requests = received(&server).await;
    let steps: Vec<(String, String)> = requests
        .iter()
        .map(|r| (r.method.to_string(), r.url.path().to_string()))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("POST".to_string(), "/slices/abc/recordings/".to_string()),
            ("POST".to_string(), "/recordings/42/media/".to_string()),
            ("PUT".to_string(), "/upload/42".to_string()),
        ]
    );
    assert_eq!(requests[2].body, b"ID3 fake mp3");
    assert!(requests[2].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_mp3_upload_surfaces_create_failure() {
    let server = MockServer::start().await;
    let body = br#"{"name": ["Ensure this field has no more than 100 characters."]}"#.to_vec();
    Mock::given(method("POST"))
        .and(path("/slices/abc/recordings/"))
        .respond_with(ResponseTemplate::new(422).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/recordings/\d+/media/$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = CreateRecordingRequest::new(RecordingSource::Mp3Upload)
        .name("Take 1")
        .media(b"ID3".to_vec());
    let err = build_client(&server)
        .create_recording("abc", request)
        .await
        .unwrap_err();

    match err {
        SoundsliceError::Validation { detail } => assert_eq!(detail, body),
        other => panic!("expected validation error, got {other:?}"),
    }
    let requests = received(&server).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/slices/abc/recordings/");
}

#[tokio::test]
async fn test_mp3_upload_stops_when_media_target_fails() {
    let server = MockServer::start().await;
    mount_mp3_upload(&server, 429, 200).await;

    let request = CreateRecordingRequest::new(RecordingSource::Mp3Upload)
        .name("Take 1")
        .media(b"ID3".to_vec());
    let err = build_client(&server)
        .create_recording("abc", request)
        .await
        .unwrap_err();

    match err {
        SoundsliceError::UploadIncomplete {
            recording_id,
            source,
        } => {
            assert_eq!(recording_id, 42);
            assert!(matches!(*source, SoundsliceError::RateLimited));
        }
        other => panic!("expected incomplete upload, got {other:?}"),
    }
    assert_eq!(received(&server).await.len(), 2);
}

#[tokio::test]
async fn test_mp3_upload_surfaces_transfer_failure_without_retry() {
    let server = MockServer::start().await;
    mount_mp3_upload(&server, 200, 500).await;

    let request = CreateRecordingRequest::new(RecordingSource::Mp3Upload)
        .name("Take 1")
        .media(b"ID3".to_vec());
    let err = build_client(&server)
        .create_recording("abc", request)
        .await
        .unwrap_err();

    assert_eq!(err.orphaned_recording_id(), Some(42));
    match err {
        SoundsliceError::UploadIncomplete { source, .. } => match *source {
            SoundsliceError::UploadFailed { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upload target says no");
            }
            other => panic!("expected upload failure, got {other:?}"),
        },
        other => panic!("expected incomplete upload, got {other:?}"),
    }
    assert_eq!(received(&server).await.len(), 3);
}

#[tokio::test]
async fn test_upload_without_media_sends_nothing() {
    let server = MockServer::start().await;
    let request = CreateRecordingRequest::new(RecordingSource::VideoUpload);

    let err = build_client(&server)
        .create_recording("abc", request)
        .await
        .unwrap_err();

    assert!(matches!(err, SoundsliceError::InvalidRequest(_)));
    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_recording_upload_phases() {
    let server = MockServer::start().await;
    mount_mp3_upload(&server, 200, 200).await;
    let client = build_client(&server);

    let request = CreateRecordingRequest::new(RecordingSource::Mp3Upload).name("Take 1");
    let created = client.begin_recording_upload("abc", &request).await.unwrap();
    assert_eq!(created.recording_id(), 42);
    assert_eq!(received(&server).await.len(), 1);

    let uploaded = created.upload_media(&client, b"ID3".to_vec()).await.unwrap();
    assert_eq!(uploaded.recording().name.as_deref(), Some("Take 1"));
    assert_eq!(received(&server).await.len(), 3);
}

#[tokio::test]
async fn test_reorder_and_change_recordings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slices/abc/recordings/order/"))
        .and(body_string("order=3%2C1%2C2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/recordings/3/"))
        .and(body_string("name=Studio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/recordings/1/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.reorder_slice_recordings("abc", &[3, 1, 2]).await.unwrap();
    client
        .change_recording(3, &ChangeRecordingRequest::new().name("Studio").source_data(""))
        .await
        .unwrap();
    let deleted = client.delete_recording(1).await.unwrap();
    assert!(deleted.is_empty());
}

#[tokio::test]
async fn test_get_syncpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recordings/9/syncpoints/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            [0, 0.0],
            [1, 2.5, 0.5]
        ])))
        .mount(&server)
        .await;

    let points = build_client(&server).get_recording_syncpoints(9).await.unwrap();
    assert_eq!(
        points,
        vec![Syncpoint::new(0, 0.0), Syncpoint::within_bar(1, 2.5, 0.5)]
    );
}

#[tokio::test]
async fn test_put_syncpoints_writes_crop_end_into_crop_start() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recordings/9/syncpoints/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let points = [Syncpoint::new(0, 1.0), Syncpoint::new(4, 9.5)];
    build_client(&server)
        .put_recording_syncpoints(9, &points, Some(1.0), Some(30.0))
        .await
        .unwrap();

    let requests = received(&server).await;
    let fields = form_fields(&requests[0]);
    assert_eq!(
        fields,
        vec![
            ("syncpoints".to_string(), "[[0,1.0],[4,9.5]]".to_string()),
            ("crop_start".to_string(), "30.0".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_folder_operations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/folders/"))
        .and(body_string("name=Etudes&parent_id=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 11, "name": "Etudes", "parent_id": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/folders/11/"))
        .and(body_string("name=Studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 11, "name": "Studies", "parent_id": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let folder = client.create_folder("Etudes", Some(2)).await.unwrap();
    assert_eq!(folder.id, 11);
    assert_eq!(folder.parent_id, Some(2));
    let renamed = client.rename_folder(11, "Studies").await.unwrap();
    assert_eq!(renamed.name.as_deref(), Some("Studies"));
}

#[tokio::test]
async fn test_folder_writes_accept_id_only_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/folders/"))
        .and(body_string("name=Etudes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/folders/12/"))
        .and(body_string("name=Studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let created = client.create_folder("Etudes", None).await.unwrap();
    assert_eq!(created.id, 12);
    assert_eq!(created.name, None);
    assert_eq!(created.parent_id, None);
    let renamed = client.rename_folder(12, "Studies").await.unwrap();
    assert_eq!(renamed.id, 12);
    assert_eq!(renamed.name, None);
}

#[tokio::test]
async fn test_create_root_folder_omits_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/folders/"))
        .and(body_string("name=Top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12, "name": "Top"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let folder = build_client(&server).create_folder("Top", Some(0)).await.unwrap();
    assert_eq!(folder.parent_id, None);
}

#[tokio::test]
async fn test_list_folders_parent_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/folders/"))
        .and(query_param("parent_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 8, "name": "Child", "parent_id": 7 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/folders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 7, "name": "Parent" },
            { "id": 8, "name": "Child", "parent_id": 7 }
        ])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let all = client.list_folders(None).await.unwrap();
    assert_eq!(all.len(), 2);
    let children = client.list_folders(Some(7)).await.unwrap();
    assert_eq!(children.len(), 1);

    let requests = received(&server).await;
    assert_eq!(requests[0].url.path(), "/folders/");
    assert_eq!(requests[0].url.query(), None);
    assert_eq!(requests[1].url.query(), Some("parent_id=7"));
}

async fn slice_names<C: SoundsliceApi>(client: &C) -> soundslice_api_client::Result<Vec<String>> {
    Ok(client
        .list_slices()
        .await?
        .into_iter()
        .filter_map(|s| s.name)
        .collect())
}

#[tokio::test]
async fn test_client_through_trait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "scorehash": "a", "name": "One" },
            { "scorehash": "b" }
        ])))
        .mount(&server)
        .await;

    let names = slice_names(&build_client(&server)).await.unwrap();
    assert_eq!(names, vec!["One".to_string()]);
}
