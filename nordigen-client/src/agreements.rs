//! End-user agreement operations.

use crate::client::{Client, encode};
use crate::error::Result;
use crate::types::{AccessScope, EndUserAgreement, Page, StatusMessage};
use serde::{Deserialize, Serialize};

/// Body of `POST /agreements/enduser/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndUserAgreementParams {
    /// Institution the agreement applies to.
    pub institution_id: String,
    /// Days of transaction history to grant.
    pub max_historical_days: u32,
    /// Days the access stays valid.
    pub access_valid_for_days: u32,
    /// Data categories to grant.
    pub access_scope: Vec<AccessScope>,
}

impl EndUserAgreementParams {
    /// Params with the provider defaults: 90 days of history, valid for 90
    /// days, all scopes.
    pub fn new(institution_id: impl Into<String>) -> Self {
        Self {
            institution_id: institution_id.into(),
            max_historical_days: 90,
            access_valid_for_days: 90,
            access_scope: AccessScope::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn with_max_historical_days(mut self, days: u32) -> Self {
        self.max_historical_days = days;
        self
    }

    #[must_use]
    pub fn with_access_valid_for_days(mut self, days: u32) -> Self {
        self.access_valid_for_days = days;
        self
    }

    #[must_use]
    pub fn with_access_scope(mut self, scope: impl IntoIterator<Item = AccessScope>) -> Self {
        self.access_scope = scope.into_iter().collect();
        self
    }
}

/// Body of `PUT /agreements/enduser/{id}/accept/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptAgreementParams {
    /// User agent of the end user's browser.
    pub user_agent: String,
    /// IP address of the end user.
    pub ip_address: String,
}

impl Client {
    /// Create an end-user agreement.
    ///
    /// The returned id can be passed to
    /// [`RequisitionParams::with_agreement`](crate::RequisitionParams::with_agreement).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects the
    /// parameters (e.g. more history than the bank supports).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nordigen_client::{Client, Credentials, EndUserAgreementParams};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new(Credentials::new("id", "key"))?;
    /// # client.authenticate().await?;
    /// let params = EndUserAgreementParams::new("SANDBOXFINANCE_SFIN0000")
    ///     .with_max_historical_days(30);
    /// let agreement = client.create_end_user_agreement(&params).await?;
    /// println!("Agreement {} created at {}", agreement.id, agreement.created);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_end_user_agreement(
        &self,
        params: &EndUserAgreementParams,
    ) -> Result<EndUserAgreement> {
        let response = self.post("agreements/enduser/", params).await?;
        self.handle_response(response).await
    }

    /// List end-user agreements. Only the first page is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_end_user_agreements(&self) -> Result<Page<EndUserAgreement>> {
        let response = self.get("agreements/enduser/").await?;
        self.handle_response(response).await
    }

    /// Get an end-user agreement by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the agreement is not found or the request fails.
    pub async fn get_end_user_agreement(&self, agreement_id: &str) -> Result<EndUserAgreement> {
        let path = format!("agreements/enduser/{}/", encode(agreement_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Accept an end-user agreement on the user's behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the account is not allowed
    /// to accept agreements through the API.
    pub async fn accept_end_user_agreement(
        &self,
        agreement_id: &str,
        params: &AcceptAgreementParams,
    ) -> Result<EndUserAgreement> {
        let path = format!("agreements/enduser/{}/accept/", encode(agreement_id));
        let response = self.put(&path, params).await?;
        self.handle_response(response).await
    }

    /// Delete an end-user agreement.
    ///
    /// # Errors
    ///
    /// Returns an error if the agreement is not found or the request fails.
    pub async fn delete_end_user_agreement(&self, agreement_id: &str) -> Result<StatusMessage> {
        let path = format!("agreements/enduser/{}/", encode(agreement_id));
        let response = self.delete(&path).await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_params_body() {
        let body = serde_json::to_value(EndUserAgreementParams::new("SANDBOXFINANCE_SFIN0000")).unwrap();
        assert_eq!(
            body,
            json!({
                "institution_id": "SANDBOXFINANCE_SFIN0000",
                "max_historical_days": 90,
                "access_valid_for_days": 90,
                "access_scope": ["balances", "details", "transactions"]
            })
        );
    }

    #[test]
    fn test_custom_params_body() {
        let params = EndUserAgreementParams::new("X")
            .with_max_historical_days(30)
            .with_access_valid_for_days(10)
            .with_access_scope([AccessScope::Balances]);

        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["max_historical_days"], 30);
        assert_eq!(body["access_valid_for_days"], 10);
        assert_eq!(body["access_scope"], json!(["balances"]));
    }
}
