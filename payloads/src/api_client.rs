use crate::{Renthouse, RenthouseId, requests, responses::ApiResponse};
use reqwest::{StatusCode, multipart};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    /// Base URL of the API, including its `/api` segment.
    pub address: String,
    /// Bearer token issued by the auth system, if the user is logged in.
    pub auth_token: Option<String>,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ReqwestResult {
        let request = self.authorize(request);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.send(self.inner_client.get(self.format_url(path))).await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.send(self.inner_client.post(self.format_url(path)).json(body))
            .await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.send(self.inner_client.put(self.format_url(path)).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.send(self.inner_client.delete(self.format_url(path)))
            .await
    }

    async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> ReqwestResult {
        self.send(
            self.inner_client.post(self.format_url(path)).multipart(form),
        )
        .await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Get the renthouses owned by the current user.
    pub async fn list_my_renthouses(
        &self,
    ) -> Result<Vec<Renthouse>, ClientError> {
        let response = self.empty_get("owner/renthouses").await?;
        ok_body(response).await
    }

    pub async fn get_renthouse(
        &self,
        renthouse_id: &RenthouseId,
    ) -> Result<Renthouse, ClientError> {
        let response = self
            .empty_get(&format!("owner/renthouses/{renthouse_id}"))
            .await?;
        ok_body(response).await
    }

    pub async fn create_renthouse(
        &self,
        details: &requests::CreateRenthouse,
    ) -> Result<Renthouse, ClientError> {
        let response = self.post("owner/renthouses", details).await?;
        ok_body(response).await
    }

    pub async fn update_renthouse(
        &self,
        renthouse_id: &RenthouseId,
        details: &requests::CreateRenthouse,
    ) -> Result<Renthouse, ClientError> {
        let response = self
            .put(&format!("owner/renthouses/{renthouse_id}"), details)
            .await?;
        ok_body(response).await
    }

    pub async fn delete_renthouse(
        &self,
        renthouse_id: &RenthouseId,
    ) -> Result<(), ClientError> {
        let response = self
            .delete(&format!("owner/renthouses/{renthouse_id}"))
            .await?;
        ok_empty(response).await
    }

    /// Upload an image and return the path the backend stored it under.
    /// Pass the path to [`APIClient::asset_url`] for an `<img src>`.
    pub async fn upload_image(
        &self,
        upload: requests::ImageUpload,
    ) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = multipart::Form::new().part("file", part);
        let response = self.post_multipart("upload/image", form).await?;
        ok_body(response).await
    }

    /// Returns the URL an uploaded file is served from.
    pub fn asset_url(&self, path: &str) -> String {
        asset_url(&self.address, path)
    }
}

/// Join a stored upload path onto the server root.
///
/// Upload paths already carry the `/api` prefix, so a trailing `/api`
/// segment is dropped from `api_base` first. Absolute URLs pass through.
pub fn asset_url(api_base: &str, path: &str) -> String {
    if ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| path.starts_with(scheme))
    {
        return path.to_string();
    }

    let base = api_base.trim_end_matches('/');
    let root = base.strip_suffix("/api").unwrap_or(base);
    if path.starts_with('/') {
        format!("{root}{path}")
    } else {
        format!("{root}/{path}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the server's message.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// The server failed without a readable message, e.g. a proxy error
    /// page or an envelope with no message.
    #[error("Unexpected response from server ({0})")]
    UnexpectedResponse(StatusCode),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Unwrap the response envelope into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let envelope = read_envelope::<T>(response).await?;
    envelope.data.ok_or_else(|| {
        tracing::warn!(%status, "Response envelope contained no data");
        ClientError::UnexpectedResponse(status)
    })
}

/// Check that a response without data is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    read_envelope::<serde_json::Value>(response).await?;
    Ok(())
}

/// Only a message the server put in its envelope ever reaches
/// [`ClientError::APIError`]; raw bodies are logged, not surfaced.
async fn read_envelope<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    let text = response.text().await?;

    let envelope = match serde_json::from_str::<ApiResponse<T>>(&text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(%status, body = %text, "Unreadable response body: {e}");
            return Err(ClientError::UnexpectedResponse(status));
        }
    };

    if !status.is_success() || !envelope.success {
        return Err(match envelope.message.filter(|m| !m.is_empty()) {
            Some(message) => ClientError::APIError(status, message),
            None => ClientError::UnexpectedResponse(status),
        });
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_url_strips_only_trailing_api_segment() {
        assert_eq!(
            asset_url("http://localhost:8080/api", "/api/upload/files/a.png"),
            "http://localhost:8080/api/upload/files/a.png"
        );
        assert_eq!(
            asset_url("https://rent.example/api/", "/api/upload/files/b.png"),
            "https://rent.example/api/upload/files/b.png"
        );
        assert_eq!(
            asset_url("https://api.rent.example/api", "/files/c.png"),
            "https://api.rent.example/files/c.png"
        );
        assert_eq!(
            asset_url("https://rent.example/apiv2", "files/d.png"),
            "https://rent.example/apiv2/files/d.png"
        );
    }

    #[test]
    fn asset_url_passes_absolute_urls_through() {
        assert_eq!(
            asset_url("http://localhost:8080/api", "https://cdn.example/x.png"),
            "https://cdn.example/x.png"
        );
    }
}
