//! Example: Upload an MP3 recording and set its syncpoints.
//!
//! Run with: cargo run --example recording_upload -- <scorehash> <file.mp3>

use std::path::PathBuf;
use std::sync::Arc;

use soundslice_api_client::auth::EnvCredentials;
use soundslice_api_client::rest::{CreateRecordingRequest, SoundsliceClient, Syncpoint};
use soundslice_api_client::{RecordingSource, SoundsliceError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let mut args = std::env::args().skip(1);
    let (Some(scorehash), Some(media)) = (args.next(), args.next()) else {
        eprintln!("usage: recording_upload <scorehash> <file.mp3>");
        return Ok(());
    };

    let credentials = EnvCredentials::try_from_env()
        .ok_or("set SOUNDSLICE_APP_ID and SOUNDSLICE_PASSWORD")?;
    let client = SoundsliceClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    // Drive the two phases separately so a failed transfer can be cleaned up.
    let request = CreateRecordingRequest::new(RecordingSource::Mp3Upload).name("Demo take");
    let created = client.begin_recording_upload(&scorehash, &request).await?;
    let recording_id = created.recording_id();

    let uploaded = match created.upload_media(&client, PathBuf::from(media)).await {
        Ok(uploaded) => uploaded,
        Err(err) => {
            eprintln!("upload failed ({err}); deleting recording {recording_id}");
            client.delete_recording(recording_id).await?;
            return Err(err.into());
        }
    };
    println!("Recording {} uploaded", uploaded.recording_id());

    let points = [
        Syncpoint::new(0, 0.0),
        Syncpoint::new(1, 2.1),
        Syncpoint::within_bar(2, 3.2, 0.5),
    ];
    match client
        .put_recording_syncpoints(recording_id, &points, None, None)
        .await
    {
        Err(SoundsliceError::RateLimited) => eprintln!("rate limited; try again later"),
        other => {
            other?;
        }
    }

    let stored = client.get_recording_syncpoints(recording_id).await?;
    println!("{} syncpoints stored", stored.len());
    Ok(())
}
