use payloads::{ClientError, requests::ImageUpload};
use reqwest::StatusCode;
use test_helpers::spawn_app;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn png_upload() -> ImageUpload {
    ImageUpload {
        file_name: "front.png".to_string(),
        content_type: "image/png".to_string(),
        data: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
    }
}

#[tokio::test]
async fn upload_image_returns_stored_path() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_ok("POST", "/api/upload/image", "/api/upload/files/abc.png")
        .await;

    let stored = app.client.upload_image(png_upload()).await?;
    assert_eq!(stored, "/api/upload/files/abc.png");
    assert_eq!(
        app.client.asset_url(&stored),
        format!("{}/api/upload/files/abc.png", app.server.uri())
    );

    let requests = app.server.received_requests().await.unwrap_or_default();
    let upload = requests
        .iter()
        .find(|r| r.url.path() == "/api/upload/image")
        .expect("upload request was sent");
    let content_type = upload
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"front.png\""));
    assert!(body.contains("Content-Type: image/png"));

    Ok(())
}

#[tokio::test]
async fn rejected_upload_reports_server_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_error(
        "POST",
        "/api/upload/image",
        400,
        "Only image files are allowed",
    )
    .await;

    let err = app.client.upload_image(png_upload()).await.unwrap_err();
    assert_eq!(err.to_string(), "Only image files are allowed");

    Ok(())
}

#[tokio::test]
async fn proxy_error_page_is_not_surfaced_as_a_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/upload/image"))
        .respond_with(ResponseTemplate::new(413).set_body_string(
            "<html><body><h1>413 Request Entity Too Large</h1></body></html>",
        ))
        .mount(&app.server)
        .await;

    let err = app.client.upload_image(png_upload()).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedResponse(StatusCode::PAYLOAD_TOO_LARGE)
    ));
    assert!(!err.to_string().contains("<html>"));

    Ok(())
}
