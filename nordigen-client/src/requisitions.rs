//! Requisition operations.

use crate::client::{Client, encode};
use crate::error::Result;
use crate::types::{Page, Requisition, StatusMessage};
use serde::{Deserialize, Serialize};

/// Body of `POST /requisitions/`.
///
/// Optional fields are left out of the JSON body when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequisitionParams {
    /// Where the user lands after bank authentication.
    pub redirect: String,
    /// Institution the user logs in to.
    pub institution_id: String,
    /// Caller-side reference, unique per requisition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// End-user agreement id. The provider applies a default agreement if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,
    /// Two-letter ISO 639-1 language of the consent screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_language: Option<String>,
    /// Let the user pick accounts at the bank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_selection: Option<bool>,
}

impl RequisitionParams {
    pub fn new(redirect: impl Into<String>, institution_id: impl Into<String>) -> Self {
        Self {
            redirect: redirect.into(),
            institution_id: institution_id.into(),
            reference: None,
            agreement: None,
            user_language: None,
            account_selection: None,
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    #[must_use]
    pub fn with_agreement(mut self, agreement_id: impl Into<String>) -> Self {
        self.agreement = Some(agreement_id.into());
        self
    }

    #[must_use]
    pub fn with_user_language(mut self, language: impl Into<String>) -> Self {
        self.user_language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_account_selection(mut self, enabled: bool) -> Self {
        self.account_selection = Some(enabled);
        self
    }
}

impl Client {
    /// Create a requisition and get the bank authentication link.
    ///
    /// Send the user to [`Requisition::link`]; once they return to the
    /// redirect URL, poll [`get_requisition`](Client::get_requisition) for
    /// the linked accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects the
    /// parameters (e.g. a reused reference).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nordigen_client::{Client, Credentials, RequisitionParams};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new(Credentials::new("id", "key"))?;
    /// # client.authenticate().await?;
    /// let params = RequisitionParams::new("https://example.com/done", "SANDBOXFINANCE_SFIN0000")
    ///     .with_reference("user-42");
    /// let requisition = client.create_requisition(&params).await?;
    /// println!("Open {}", requisition.link);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_requisition(&self, params: &RequisitionParams) -> Result<Requisition> {
        let response = self.post("requisitions/", params).await?;
        self.handle_response(response).await
    }

    /// List requisitions. Only the first page is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_requisitions(&self) -> Result<Page<Requisition>> {
        let response = self.get("requisitions/").await?;
        self.handle_response(response).await
    }

    /// Get a requisition by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the requisition is not found or the request fails.
    pub async fn get_requisition(&self, requisition_id: &str) -> Result<Requisition> {
        let path = format!("requisitions/{}/", encode(requisition_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Delete a requisition together with its agreement and account links.
    ///
    /// # Errors
    ///
    /// Returns an error if the requisition is not found or the request fails.
    pub async fn delete_requisition(&self, requisition_id: &str) -> Result<StatusMessage> {
        let path = format!("requisitions/{}/", encode(requisition_id));
        let response = self.delete(&path).await?;
        self.handle_response(response).await
    }
}
