use payloads::{APIClient, Renthouse, RenthouseId, responses::ApiResponse};
use rust_decimal::Decimal;
use std::sync::LazyLock;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, prelude::*};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Logs are only printed when TEST_LOG is set, so test output stays quiet.
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_err() {
        return;
    }
    let _ = LogTracer::init();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(tracing_subscriber::fmt::layer().with_test_writer());
    let _ = tracing::subscriber::set_global_default(subscriber);
});

pub struct TestApp {
    pub server: MockServer,
    pub client: APIClient,
}

/// Start a mock backend and a client authenticated against it.
pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let server = MockServer::start().await;
    let client = APIClient {
        address: format!("{}/api", server.uri()),
        auth_token: Some(TEST_TOKEN.to_string()),
        inner_client: reqwest::Client::new(),
    };

    TestApp { server, client }
}

/// A renthouse as the backend would return it.
pub fn sample_renthouse(id: i64) -> Renthouse {
    Renthouse {
        id: RenthouseId(id),
        name: "Sunny Apartments".to_string(),
        description: Some("Close to the river".to_string()),
        latitude: 40.7128,
        longitude: -74.006,
        address: "123 Main Street".to_string(),
        base_rent: Decimal::new(150050, 2),
        water_fee: Decimal::new(125, 1),
        electricity_fee: Decimal::new(30, 0),
        image_url: Some("/api/upload/files/photo.png".to_string()),
        qr_code_image: None,
    }
}

impl TestApp {
    /// Answer `method path` with a successful envelope around `data`.
    pub async fn respond_ok<T: serde::Serialize>(
        &self,
        http_method: &str,
        url_path: &str,
        data: T,
    ) {
        Mock::given(method(http_method))
            .and(path(url_path))
            .and(header("authorization", format!("Bearer {TEST_TOKEN}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                ApiResponse::success("Request completed successfully", data),
            ))
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` with a failure envelope and the given status.
    pub async fn respond_error(
        &self,
        http_method: &str,
        url_path: &str,
        status: u16,
        message: &str,
    ) {
        Mock::given(method(http_method))
            .and(path(url_path))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(ApiResponse::<()>::error(message)),
            )
            .mount(&self.server)
            .await;
    }

    /// Request bodies the server has seen for `method path`, parsed as JSON.
    pub async fn received_json(
        &self,
        http_method: &str,
        url_path: &str,
    ) -> anyhow::Result<Vec<serde_json::Value>> {
        let requests = self
            .server
            .received_requests()
            .await
            .ok_or_else(|| anyhow::anyhow!("request recording is disabled"))?;

        requests
            .iter()
            .filter(|r| {
                r.method.as_str().eq_ignore_ascii_case(http_method)
                    && r.url.path() == url_path
            })
            .map(|r| -> anyhow::Result<serde_json::Value> {
                Ok(serde_json::from_slice(&r.body)?)
            })
            .collect()
    }

    /// Number of requests received for `method path`.
    pub async fn request_count(
        &self,
        http_method: &str,
        url_path: &str,
    ) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| {
                r.method.as_str().eq_ignore_ascii_case(http_method)
                    && r.url.path() == url_path
            })
            .count()
    }
}
