//! HTTP client abstraction for testability.

use async_trait::async_trait;

use super::error::ApiError;

/// HTTP response from a request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over the HTTP transport. The `?Send` relaxation keeps the
/// trait usable from the browser event loop, where futures are local.
#[async_trait(?Send)]
pub trait HttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;

    async fn post_json(
        &self,
        url: &str,
        body: &str,
        bearer: Option<&str>,
    ) -> Result<HttpResponse, ApiError>;

    async fn delete(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, ApiError>;
}

/// Production transport backed by reqwest, which compiles for both the
/// server binary and the WASM bundle.
#[derive(Default, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

async fn read_response(
    verb: &str,
    url: &str,
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<HttpResponse, ApiError> {
    let response =
        response.map_err(|e| ApiError::Network(format!("{} {} failed: {}", verb, url, e)))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("reading response body: {}", e)))?;

    Ok(HttpResponse { status, body })
}

#[async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        read_response("GET", url, self.client.get(url).send().await).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &str,
        bearer: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        read_response("POST", url, request.send().await).await
    }

    async fn delete(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, ApiError> {
        let mut request = self.client.delete(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        read_response("DELETE", url, request.send().await).await
    }
}
