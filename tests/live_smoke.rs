use std::sync::Arc;

use soundslice_api_client::auth::EnvCredentials;
use soundslice_api_client::rest::SoundsliceClient;

fn live_tests_enabled() -> bool {
    std::env::var("SOUNDSLICE_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_read_only_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let client = SoundsliceClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    let slices = client.list_slices().await?;
    let _folders = client.list_folders(None).await?;
    if let Some(slice) = slices.first() {
        let fetched = client.get_slice(&slice.scorehash).await?;
        assert_eq!(fetched.scorehash, slice.scorehash);
    }

    Ok(())
}
