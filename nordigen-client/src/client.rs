//! Core Nordigen client implementation.

use crate::auth::{AccessToken, Credentials};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{ClientError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("nordigen-client-rust/", env!("CARGO_PKG_VERSION"));

/// A client for the Nordigen open-banking API.
///
/// Read operations take `&self`; [`authenticate`](Client::authenticate) and
/// [`refresh_access_token`](Client::refresh_access_token) take `&mut self`,
/// so a token cannot change while requests borrow the client. Clones share
/// the connection pool but each carries its own token.
///
/// # Example
///
/// ```no_run
/// use nordigen_client::{Client, Credentials};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = Client::new(Credentials::new("secret-id", "secret-key"))?;
/// client.authenticate().await?;
///
/// let banks = client.list_institutions("NL").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    /// Base URL including the API version prefix.
    base_url: String,
    /// HTTP client carrying the fixed headers.
    http: HttpClient,
    /// Secret pair used by `authenticate`.
    credentials: Credentials,
    /// Bearer token, set by `authenticate`.
    bearer: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("authenticated", &self.bearer.is_some())
            .finish_non_exhaustive()
    }
}

/// Untyped response returned by [`Client::request`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body (`null` when the body was empty).
    pub body: Value,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Client {
    /// Create a client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client for an alternate endpoint.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Secret id/key pair
    /// * `base_url` - Base URL including the version prefix (e.g. "https://ob.nordigen.com/api/v2")
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            http: build_http(None)?,
            credentials,
            bearer: None,
        })
    }

    /// Create a client from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let timeout = config.timeout();
        let client = Self::with_base_url(config.credentials().clone(), config.base_url())?;

        match timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => Ok(client),
        }
    }

    /// Set a timeout for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_http(Some(timeout))?;
        Ok(self)
    }

    /// Use a token obtained earlier instead of calling `authenticate`.
    #[must_use]
    pub fn with_access_token(mut self, token: &AccessToken) -> Self {
        self.bearer = Some(token.access.clone());
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is attached to requests.
    pub fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn set_bearer(&mut self, access: String) {
        self.bearer = Some(access);
    }

    /// Send a request to any endpoint and return the untyped JSON body.
    ///
    /// The body, when given, is serialized as-is. The status code is not
    /// checked: provider errors come back as ordinary [`RawResponse`]s.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nordigen_client::{Client, Credentials, Method};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new(Credentials::new("id", "key"))?;
    /// let response = client.request(Method::GET, "/institutions/?country=GB", None).await?;
    /// if response.is_success() {
    ///     println!("{}", response.body);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let mut request = self.builder(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ClientError::Http)?;
        let status = response.status().as_u16();
        tracing::debug!(status, "Received untyped response");

        let bytes = response.bytes().await.map_err(ClientError::Http)?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(RawResponse { status, body })
    }

    /// Build a full URL from a path.
    fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Start a request with the bearer token attached, if any.
    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "Sending Nordigen request");

        let request = self.http.request(method, self.url(path));
        match self.bearer {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        self.builder(Method::GET, path)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        self.builder(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        self.builder(Method::PUT, path)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        self.builder(Method::DELETE, path)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Handle a response and deserialize JSON.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received Nordigen response");

        if status.is_success() {
            let bytes = response.bytes().await.map_err(ClientError::Http)?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let body = response.text().await.map_err(ClientError::Http)?;

            let error = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %error, "Nordigen request failed");
            Err(error)
        }
    }
}

/// Percent-encode a caller-supplied path segment or query value.
pub(crate) fn encode(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

fn build_http(timeout: Option<Duration>) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut builder = HttpClient::builder()
        .default_headers(headers)
        .user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("id", "key")
    }

    #[test]
    fn test_client_new() {
        let client = Client::new(credentials()).unwrap();
        assert_eq!(client.base_url, "https://ob.nordigen.com/api/v2");
        assert!(client.bearer.is_none());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_with_access_token() {
        let token = AccessToken {
            access: "T".to_string(),
            access_expires: 86400,
            refresh: "R".to_string(),
            refresh_expires: 2592000,
        };
        let client = Client::new(credentials()).unwrap().with_access_token(&token);
        assert_eq!(client.bearer, Some("T".to_string()));
    }

    #[test]
    fn test_client_invalid_url() {
        let result = Client::with_base_url(credentials(), "ob.nordigen.com");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_building() {
        let client = Client::new(credentials()).unwrap();
        assert_eq!(
            client.url("/institutions/?country=NL"),
            "https://ob.nordigen.com/api/v2/institutions/?country=NL"
        );
        assert_eq!(
            client.url("requisitions/"),
            "https://ob.nordigen.com/api/v2/requisitions/"
        );
    }

    #[test]
    fn test_url_building_with_trailing_slash() {
        let client = Client::with_base_url(credentials(), "http://localhost:8080/api/v2/").unwrap();
        assert_eq!(
            client.url("/requisitions/"),
            "http://localhost:8080/api/v2/requisitions/"
        );
    }

    #[test]
    fn test_from_config_applies_base_url() {
        let config = ClientConfig::builder()
            .credentials(credentials())
            .base_url("http://localhost:9000")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let client = Client::from_config(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode("abc-123"), "abc-123");
        assert_eq!(encode("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_raw_response_success() {
        let ok = RawResponse {
            status: 201,
            body: Value::Null,
        };
        let err = RawResponse {
            status: 401,
            body: Value::Null,
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
