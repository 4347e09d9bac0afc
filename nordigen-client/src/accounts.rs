//! Account data operations.
//!
//! Account ids come from [`Requisition::accounts`](crate::Requisition::accounts)
//! once the requisition is linked.

use crate::client::{Client, encode};
use crate::error::Result;
use crate::types::{AccountDetailData, AccountMetadata, BalanceData, TransactionData};
use chrono::NaiveDate;

impl Client {
    /// Get account metadata (status, IBAN, institution).
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found or the request fails.
    pub async fn get_account_metadata(&self, account_id: &str) -> Result<AccountMetadata> {
        let path = format!("accounts/{}/", encode(account_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Get account balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found, access has expired, or
    /// the request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nordigen_client::{Client, Credentials};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new(Credentials::new("id", "key"))?;
    /// # client.authenticate().await?;
    /// let data = client.get_account_balances("7e944232-bda9-40bc-b784-660c7ab5fe78").await?;
    /// for balance in data.balances {
    ///     println!(
    ///         "{}: {} {}",
    ///         balance.balance_type, balance.balance_amount.amount, balance.balance_amount.currency
    ///     );
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_account_balances(&self, account_id: &str) -> Result<BalanceData> {
        let path = format!("accounts/{}/balances/", encode(account_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Get booked and pending transactions for the full agreed history.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found, access has expired, or
    /// the request fails.
    pub async fn get_account_transactions(&self, account_id: &str) -> Result<TransactionData> {
        let path = format!("accounts/{}/transactions/", encode(account_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Get transactions booked between two dates, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the range lies outside the agreed history or the
    /// request fails.
    pub async fn get_account_transactions_between(
        &self,
        account_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<TransactionData> {
        let path = format!(
            "accounts/{}/transactions/?date_from={}&date_to={}",
            encode(account_id),
            date_from.format("%Y-%m-%d"),
            date_to.format("%Y-%m-%d"),
        );
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }

    /// Get account details (IBAN, owner, product).
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found, access has expired, or
    /// the request fails.
    pub async fn get_account_details(&self, account_id: &str) -> Result<AccountDetailData> {
        let path = format!("accounts/{}/details/", encode(account_id));
        let response = self.get(&path).await?;
        self.handle_response(response).await
    }
}
