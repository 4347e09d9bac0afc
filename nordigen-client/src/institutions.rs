//! Institution lookup operations.

use crate::client::{Client, encode};
use crate::error::Result;
use crate::types::Institution;

impl Client {
    /// List the banks available in a country.
    ///
    /// # Arguments
    ///
    /// * `country` - ISO 3166 two-letter country code (e.g. "NL")
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the country is not supported.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nordigen_client::{Client, Credentials};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new(Credentials::new("id", "key"))?;
    /// # client.authenticate().await?;
    /// for bank in client.list_institutions("NL").await? {
    ///     println!("{}: {} days of history", bank.name, bank.transaction_total_days);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_institutions(&self, country: &str) -> Result<Vec<Institution>> {
        let path = format!("institutions/?country={}", encode(country));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Get a single institution by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the institution is not found or the request fails.
    pub async fn get_institution(&self, institution_id: &str) -> Result<Institution> {
        let path = format!("institutions/{}/", encode(institution_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }
}
