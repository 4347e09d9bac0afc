//! Client configuration.

use crate::auth::Credentials;
use crate::error::{ClientError, Result};
use std::env;
use std::time::Duration;

/// Production endpoint of the Nordigen v2 API.
pub const DEFAULT_BASE_URL: &str = "https://ob.nordigen.com/api/v2";

/// Configuration for building a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Secret id/key pair exchanged for a token.
    credentials: Credentials,
    /// Base URL including the API version prefix.
    base_url: String,
    /// Optional per-request timeout. None means no timeout.
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for the production endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NORDIGEN_SECRET_ID`: secret id (required)
    /// - `NORDIGEN_SECRET_KEY`: secret key (required)
    /// - `NORDIGEN_BASE_URL`: alternate endpoint
    /// - `NORDIGEN_TIMEOUT_SECS`: request timeout in whole seconds
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if a required variable is missing or
    /// the timeout is not a positive integer. Empty variables count as unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ClientError::config(format!("{key} is not set")))
        };

        let mut builder = Self::builder()
            .secret_id(required("NORDIGEN_SECRET_ID")?)
            .secret_key(required("NORDIGEN_SECRET_KEY")?);

        if let Some(url) = lookup("NORDIGEN_BASE_URL").filter(|v| !v.is_empty()) {
            builder = builder.base_url(url);
        }

        if let Some(raw) = lookup("NORDIGEN_TIMEOUT_SECS").filter(|v| !v.is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or_else(|| {
                    ClientError::config(format!(
                        "NORDIGEN_TIMEOUT_SECS must be a positive whole number of seconds, got: {raw}"
                    ))
                })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    secret_id: Option<String>,
    secret_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the secret id.
    pub fn secret_id(mut self, id: impl Into<String>) -> Self {
        self.secret_id = Some(id.into());
        self
    }

    /// Set the secret key.
    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Set both halves of the credential pair.
    pub fn credentials(self, credentials: Credentials) -> Self {
        let (id, key) = credentials.into_parts();
        self.secret_id(id).secret_key(key)
    }

    /// Override the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if either credential half is missing.
    pub fn build(self) -> Result<ClientConfig> {
        let secret_id = self
            .secret_id
            .ok_or_else(|| ClientError::config("secret_id is required"))?;
        let secret_key = self
            .secret_key
            .ok_or_else(|| ClientError::config("secret_key is required"))?;

        Ok(ClientConfig {
            credentials: Credentials::new(secret_id, secret_key),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("NORDIGEN_SECRET_ID", "id"),
            ("NORDIGEN_SECRET_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(config.credentials().secret_id(), "id");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("NORDIGEN_SECRET_ID", "id"),
            ("NORDIGEN_SECRET_KEY", "key"),
            ("NORDIGEN_BASE_URL", "http://localhost:9000/api/v2"),
            ("NORDIGEN_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "http://localhost:9000/api/v2");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_lookup_missing_secret() {
        let result = ClientConfig::from_lookup(lookup_from(&[("NORDIGEN_SECRET_ID", "id")]));

        match result {
            Err(ClientError::Config(msg)) => assert!(msg.contains("NORDIGEN_SECRET_KEY")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            ("NORDIGEN_SECRET_ID", "id"),
            ("NORDIGEN_SECRET_KEY", "key"),
            ("NORDIGEN_TIMEOUT_SECS", "soon"),
        ]));

        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_from_lookup_zero_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            ("NORDIGEN_SECRET_ID", "id"),
            ("NORDIGEN_SECRET_KEY", "key"),
            ("NORDIGEN_TIMEOUT_SECS", "0"),
        ]));

        match result {
            Err(ClientError::Config(msg)) => assert!(msg.contains("positive")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_from_lookup_empty_optionals_are_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("NORDIGEN_SECRET_ID", "id"),
            ("NORDIGEN_SECRET_KEY", "key"),
            ("NORDIGEN_BASE_URL", ""),
            ("NORDIGEN_TIMEOUT_SECS", ""),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_requires_credentials() {
        assert!(ClientConfig::builder().secret_id("id").build().is_err());
        assert!(
            ClientConfig::builder()
                .credentials(Credentials::new("id", "key"))
                .build()
                .is_ok()
        );
    }
}
