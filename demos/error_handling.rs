//! Example: Reacting to the API's error statuses.
//!
//! Run with: cargo run --example error_handling

use soundslice_api_client::SoundsliceError;
use soundslice_api_client::rest::{CreateSliceRequest, SoundsliceClient};

#[tokio::main]
async fn main() {
    let client = SoundsliceClient::new("invalid_app", "invalid_password");

    match client.create_slice(&CreateSliceRequest::new().folder_id(1)).await {
        Ok(slice) => println!("Created {}", slice.scorehash),
        Err(SoundsliceError::PermissionDenied) => println!("Credentials rejected"),
        Err(err @ SoundsliceError::Validation { .. }) => {
            println!(
                "Rejected input: {}",
                err.validation_detail().unwrap_or_default()
            );
        }
        Err(SoundsliceError::RateLimited) => println!("Rate limited, back off and retry later"),
        Err(err) => println!("Request failed: {err}"),
    }
}
