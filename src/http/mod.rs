use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::{AuthError, NoToken, TokenProvider};
use crate::config::{config, AppConfig};
use crate::error::ClientError;
use crate::query::{QueryBuilder, QueryOptions, QueryParams};

/// JSON client for the administration API.
///
/// Cheap to clone; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    query_options: QueryOptions,
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Client using the configured request timeout.
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, tokens, Duration::from_secs(config().api.timeout_secs))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let mut client = Self::with_http(http, base_url, tokens);
        client.timeout = Some(timeout);
        Ok(client)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            query_options: QueryOptions::default(),
            timeout: None,
        }
    }

    /// Client configured from [`AppConfig`]: base URL, timeout and query options.
    pub fn from_config(config: &AppConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ClientError> {
        let timeout = Duration::from_secs(config.api.timeout_secs);
        Ok(Self::with_timeout(config.base_url(), tokens, timeout)?.with_query_options(config.query.options))
    }

    /// Client without credentials.
    pub fn anonymous(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(base_url, Arc::new(NoToken))
    }

    pub fn with_query_options(mut self, options: QueryOptions) -> Self {
        self.query_options = options;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn query_options(&self) -> &QueryOptions {
        &self.query_options
    }

    /// Request timeout, when this client built its own HTTP client.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Underlying client, for requests that must not carry the bearer token.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `path` with the rendered query string appended.
    pub fn path_with_query(&self, path: &str, params: &QueryParams) -> String {
        format!("{}{}", path, QueryBuilder::build(params, self.query_options))
    }

    /// Absolute URLs pass through, anything else is appended to the base URL.
    pub fn resolve(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        let full = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        };
        reqwest::Url::parse(&full).map_err(|source| ClientError::InvalidUrl { url: full, source })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.fetch(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        self.fetch(Method::POST, path, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        self.fetch(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        self.fetch(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.fetch(Method::DELETE, path, None::<&()>).await
    }

    /// JSON request with bearer auth; decodes the JSON body into `T`.
    pub async fn fetch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut request = self
            .request(method, path)
            .await?
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Authorized request builder for calls that are not plain JSON
    /// (multipart uploads, binary downloads).
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.resolve(path)?;
        tracing::debug!("{} {}", method, url);
        let mut headers = HeaderMap::new();
        if let Some(token) = self.tokens.access_token().await? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                tracing::warn!("Access token is not a valid header value");
                AuthError::Unavailable("access token contains characters not allowed in a header".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(self.http.request(method, url).headers(headers))
    }

    /// Send and turn any non-success status into [`ClientError::Api`].
    /// A 401 also signs the token provider out.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("API answered 401; signing out");
            if let Err(e) = self.tokens.sign_out().await {
                tracing::warn!("Sign-out after 401 failed: {}", e);
            }
        }

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let err = ClientError::from_response(status.as_u16(), &body);
            tracing::debug!("Request failed with {}: {}", status, err);
            return Err(err);
        }

        Ok(response)
    }

    /// Non-JSON bodies decode as `null`, so `()` and `Option<T>` succeed on
    /// empty responses.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if !is_json {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
