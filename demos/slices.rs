//! Example: Create, inspect and file a slice.
//!
//! Run with: cargo run --example slices
//! Requires SOUNDSLICE_APP_ID and SOUNDSLICE_PASSWORD.

use std::sync::Arc;

use soundslice_api_client::auth::EnvCredentials;
use soundslice_api_client::rest::{CreateSliceRequest, SoundsliceClient};
use soundslice_api_client::EmbedStatus;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let credentials = EnvCredentials::try_from_env()
        .ok_or("set SOUNDSLICE_APP_ID and SOUNDSLICE_PASSWORD")?;
    let client = SoundsliceClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    let folder = client.create_folder("API demo", None).await?;
    println!("Folder {} created", folder.id);

    let request = CreateSliceRequest::new()
        .name("Etude in B minor")
        .artist("Fernando Sor")
        .shareable()
        .embed_status(EmbedStatus::OnAllowlist)
        .folder_id(folder.id);
    let slice = client.create_slice(&request).await?;
    println!("Slice {} created", slice.scorehash);

    match client.get_slice_musicxml(&slice.scorehash).await? {
        Some(xml) => println!("MusicXML: {} bytes", xml.len()),
        None => println!("No MusicXML yet (no notation uploaded)"),
    }

    client.move_slice_to_folder(&slice.scorehash, None).await?;
    for folder in client.list_folders(None).await? {
        println!("Folder {}: {}", folder.id, folder.name.as_deref().unwrap_or("-"));
    }

    client.delete_slice(&slice.scorehash).await?;
    client.delete_folder(folder.id).await?;
    Ok(())
}
