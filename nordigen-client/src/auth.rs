//! Token exchange operations.

use crate::client::Client;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Secret id/key pair issued in the Nordigen user portal.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    secret_id: String,
    secret_key: String,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Get the secret id.
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.secret_id, self.secret_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Token pair returned by `/token/new/`.
///
/// Expiry values are lifetimes in seconds as reported by the provider; the
/// client does not track them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Bearer token for API calls.
    pub access: String,
    /// Seconds until `access` expires.
    pub access_expires: u64,
    /// Token for `/token/refresh/`.
    pub refresh: String,
    /// Seconds until `refresh` expires.
    pub refresh_expires: u64,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access", &"<redacted>")
            .field("access_expires", &self.access_expires)
            .field("refresh", &"<redacted>")
            .field("refresh_expires", &self.refresh_expires)
            .finish()
    }
}

/// Access token returned by `/token/refresh/`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshedToken {
    /// New bearer token.
    pub access: String,
    /// Seconds until `access` expires.
    pub access_expires: u64,
}

impl fmt::Debug for RefreshedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshedToken")
            .field("access", &"<redacted>")
            .field("access_expires", &self.access_expires)
            .finish()
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

impl Client {
    /// Exchange the credentials for a token pair.
    ///
    /// On success the access token is stored on this client and sent as
    /// `Authorization: Bearer <access>` with every later request. The token
    /// is not refreshed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects the
    /// credentials.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nordigen_client::{Client, Credentials};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut client = Client::new(Credentials::new("secret-id", "secret-key"))?;
    /// let token = client.authenticate().await?;
    /// println!("Token valid for {}s", token.access_expires);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn authenticate(&mut self) -> Result<AccessToken> {
        let response = self.post("token/new/", self.credentials()).await?;
        let token: AccessToken = self.handle_response(response).await?;

        tracing::info!(
            access_expires = token.access_expires,
            "Obtained Nordigen access token"
        );
        self.set_bearer(token.access.clone());

        Ok(token)
    }

    /// Trade a refresh token for a new access token.
    ///
    /// The new access token replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the refresh token has expired.
    pub async fn refresh_access_token(&mut self, refresh: &str) -> Result<RefreshedToken> {
        let response = self
            .post("token/refresh/", &RefreshRequest { refresh })
            .await?;
        let token: RefreshedToken = self.handle_response(response).await?;

        tracing::info!(
            access_expires = token.access_expires,
            "Refreshed Nordigen access token"
        );
        self.set_bearer(token.access.clone());

        Ok(token)
    }
}
