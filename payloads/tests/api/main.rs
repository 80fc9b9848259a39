mod renthouse;
mod upload;

use payloads::{APIClient, ClientError};

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> anyhow::Result<()> {
    let client = APIClient {
        address: "http://127.0.0.1:9/api".to_string(),
        auth_token: None,
        inner_client: reqwest::Client::new(),
    };

    let err = client.list_my_renthouses().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.to_string(), "Network error. Please check your connection.");

    Ok(())
}
