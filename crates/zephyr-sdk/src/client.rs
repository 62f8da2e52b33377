//! Async Zephyr Scale API client.
//!
//! The primary entry point for interacting with the Zephyr Scale Cloud REST
//! API. Construct a [`Client`] via [`Client::from_token`] or
//! [`Client::from_env`], then call the resource methods (`folders()`,
//! `test_case()`, `create_test_cycle()`, ...).

use crate::auth;
use crate::error::ZephyrError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Default API root for Zephyr Scale Cloud.
pub const ZEPHYR_API_URL: &str = "https://api.zephyrscale.smartbear.com/v2";

/// The Zephyr Scale API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl Client {
    /// Create a client with an explicit API token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, ZephyrError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ZephyrError::AuthConfig("Token cannot be empty".to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            token,
            base_url: ZEPHYR_API_URL.to_string(),
        })
    }

    /// Create a client from the `ZEPHYR_API_TOKEN` environment variable.
    pub fn from_env() -> Result<Self, ZephyrError> {
        Self::from_token(auth::token_from_env()?)
    }

    /// Point the client at another API root (EU region, mock servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Allow integration tests (in tests/ directory) to set base URL.
    #[doc(hidden)]
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }

    /// The API root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request URL from path segments (each percent-encoded) and query pairs.
    pub(crate) fn url(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<Url, ZephyrError> {
        let invalid = |reason: String| {
            ZephyrError::InvalidInput(format!("Invalid base URL '{}': {}", self.base_url, reason))
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `GET` a resource and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<T, ZephyrError> {
        let url = self.url(segments, query)?;
        tracing::debug!(%url, "GET");
        let response = self.send(self.http.get(url)).await?;
        decode(response).await
    }

    /// `POST` a JSON body and decode the JSON answer.
    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ZephyrError> {
        let url = self.url(segments, &[])?;
        tracing::debug!(%url, "POST");
        let response = self.send(self.http.post(url).json(body)).await?;
        decode(response).await
    }

    /// `PUT` a JSON body. Update endpoints answer without a meaningful body.
    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), ZephyrError> {
        let url = self.url(segments, &[])?;
        tracing::debug!(%url, "PUT");
        self.send(self.http.put(url).json(body)).await?;
        Ok(())
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ZephyrError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .header(
                "User-Agent",
                format!("zephyr-sdk/{}", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok());
            let text = response.text().await.unwrap_or_default();
            return Err(ZephyrError::RateLimited {
                retry_after,
                message: text,
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            400 => ZephyrError::InvalidInput(body),
            401 => ZephyrError::Authentication(body),
            403 => ZephyrError::Forbidden(body),
            404 => ZephyrError::NotFound(body),
            code => ZephyrError::HttpError { status: code, body },
        })
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ZephyrError> {
    let url = response.url().clone();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ZephyrError::Decode(format!("{} ({})", e, url.path())))
}
