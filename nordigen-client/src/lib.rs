//! Type-safe Rust client for the Nordigen open-banking API.
//!
//! This crate wraps the Nordigen (GoCardless Bank Account Data) v2 REST API
//! with typed records for institutions, end-user agreements, requisitions
//! and account data.
//!
//! # Features
//!
//! - Token exchange with the secret id/key pair (Bearer token)
//! - Institution lookup by country
//! - End-user agreements (create, list, get, accept, delete)
//! - Requisitions (create, list, get, delete)
//! - Account metadata, balances, transactions and details
//! - Untyped [`Client::request`] for endpoints without a typed method
//!
//! # Example
//!
//! ```no_run
//! use nordigen_client::{Client, ClientConfig, RequisitionParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads NORDIGEN_SECRET_ID and NORDIGEN_SECRET_KEY
//! let mut client = Client::from_config(ClientConfig::from_env()?)?;
//! client.authenticate().await?;
//!
//! // Start a bank login
//! let params = RequisitionParams::new("https://example.com/callback", "SANDBOXFINANCE_SFIN0000");
//! let requisition = client.create_requisition(&params).await?;
//! println!("Send the user to {}", requisition.link);
//!
//! // After the user returns
//! let requisition = client.get_requisition(&requisition.id).await?;
//! for account in &requisition.accounts {
//!     let balances = client.get_account_balances(account).await?;
//!     println!("{account}: {:?}", balances.balances);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Typed operations return `Result<T, ClientError>` and turn non-2xx
//! responses into [`ClientError::Api`]:
//!
//! ```no_run
//! # use nordigen_client::{Client, ClientError, Credentials};
//! # async fn example() -> Result<(), ClientError> {
//! # let client = Client::new(Credentials::new("id", "key"))?;
//! match client.get_requisition("unknown").await {
//!     Ok(requisition) => println!("Status: {:?}", requisition.status),
//!     Err(ClientError::Api { status: 404, .. }) => println!("No such requisition"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod accounts;
mod agreements;
mod auth;
mod client;
mod config;
mod error;
mod institutions;
mod requisitions;
mod types;

// Re-export the main types
pub use agreements::{AcceptAgreementParams, EndUserAgreementParams};
pub use auth::{AccessToken, Credentials, RefreshedToken};
pub use client::{Client, RawResponse, USER_AGENT};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use requisitions::RequisitionParams;
pub use reqwest::Method;
pub use types::{
    AccessScope, AccountDetail, AccountDetailData, AccountMetadata, AccountReference, Amount,
    Balance, BalanceData, BookedTransaction, Counterparty, DayCount, EndUserAgreement, Extra,
    Institution, Page, PendingTransaction, Requisition, RequisitionStatus, StatusMessage,
    TransactionData, Transactions,
};
