use payloads::{ClientError, RenthouseId, requests};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{sample_renthouse, spawn_app};

fn create_details() -> requests::CreateRenthouse {
    requests::CreateRenthouse {
        name: "Sunny Apartments".to_string(),
        description: None,
        latitude: 40.7128,
        longitude: -74.006,
        address: "123 Main Street".to_string(),
        base_rent: dec!(1500.50),
        water_fee: dec!(12.5),
        electricity_fee: dec!(30),
        image_url: None,
        qr_code_image: None,
    }
}

#[tokio::test]
async fn get_renthouse_unwraps_envelope() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_ok("GET", "/api/owner/renthouses/7", sample_renthouse(7))
        .await;

    let renthouse = app.client.get_renthouse(&RenthouseId(7)).await?;
    assert_eq!(renthouse, sample_renthouse(7));
    assert_eq!(renthouse.base_rent.to_string(), "1500.50");

    Ok(())
}

#[tokio::test]
async fn list_my_renthouses() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_ok(
        "GET",
        "/api/owner/renthouses",
        vec![sample_renthouse(1), sample_renthouse(2)],
    )
    .await;

    let renthouses = app.client.list_my_renthouses().await?;
    assert_eq!(renthouses.len(), 2);
    assert_eq!(renthouses[1].id, RenthouseId(2));

    Ok(())
}

#[tokio::test]
async fn create_posts_camel_case_body() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_ok("POST", "/api/owner/renthouses", sample_renthouse(3))
        .await;

    let created = app.client.create_renthouse(&create_details()).await?;
    assert_eq!(created.id, RenthouseId(3));

    let bodies = app.received_json("POST", "/api/owner/renthouses").await?;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], "Sunny Apartments");
    assert_eq!(bodies[0]["baseRent"], serde_json::json!(1500.5));
    assert_eq!(bodies[0]["waterFee"], "12.5");
    assert_eq!(bodies[0]["electricityFee"], "30");

    Ok(())
}

#[tokio::test]
async fn update_puts_to_renthouse_path() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_ok("PUT", "/api/owner/renthouses/9", sample_renthouse(9))
        .await;

    app.client
        .update_renthouse(&RenthouseId(9), &create_details())
        .await?;

    assert_eq!(app.request_count("PUT", "/api/owner/renthouses/9").await, 1);
    assert_eq!(app.request_count("POST", "/api/owner/renthouses").await, 0);

    Ok(())
}

#[tokio::test]
async fn delete_renthouse() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_ok("DELETE", "/api/owner/renthouses/4", ()).await;

    app.client.delete_renthouse(&RenthouseId(4)).await?;
    assert_eq!(
        app.request_count("DELETE", "/api/owner/renthouses/4").await,
        1
    );

    Ok(())
}

#[tokio::test]
async fn error_envelope_surfaces_server_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.respond_error(
        "POST",
        "/api/owner/renthouses",
        400,
        "Failed to create renthouse: Name is required",
    )
    .await;

    let err = app
        .client
        .create_renthouse(&create_details())
        .await
        .unwrap_err();
    match err {
        ClientError::APIError(status, message) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Failed to create renthouse: Name is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn unsuccessful_envelope_with_ok_status_is_an_error() -> anyhow::Result<()>
{
    let app = spawn_app().await;
    app.respond_error("GET", "/api/owner/renthouses/5", 200, "Renthouse not found")
        .await;

    let err = app
        .client
        .get_renthouse(&RenthouseId(5))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Renthouse not found");

    Ok(())
}

#[tokio::test]
async fn failure_without_message_is_an_unexpected_response() -> anyhow::Result<()>
{
    let app = spawn_app().await;
    app.respond_error("GET", "/api/owner/renthouses/6", 500, "").await;

    let err = app
        .client
        .get_renthouse(&RenthouseId(6))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedResponse(StatusCode::INTERNAL_SERVER_ERROR)
    ));

    Ok(())
}
