//! Type definitions for Nordigen API resources.
//!
//! Account data (balances, transactions, details) uses the provider's
//! camelCase field names and keeps amounts and dates as strings, so a record
//! re-serializes to the JSON it was read from. Optional fields are omitted
//! when absent, and fields without a typed counterpart are kept in `extra`.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Provider fields this client does not model, kept for re-serialization.
pub type Extra = Map<String, Value>;

/// A bank available for account aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Institution identifier, used when creating agreements and requisitions.
    pub id: String,
    /// Display name.
    pub name: String,
    /// BIC/SWIFT code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bic: String,
    /// Days of transaction history the bank supports.
    pub transaction_total_days: DayCount,
    /// ISO 3166 country codes the bank operates in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo: String,
    /// Longest access validity the bank grants, in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_access_valid_for_days: Option<DayCount>,
    /// Unmodelled fields (e.g. `supported_features`).
    #[serde(flatten)]
    pub extra: Extra,
}

/// A day count the provider sends either as `"90"` or as `90`.
///
/// Serializes back in the form it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCount {
    days: u32,
    quoted: bool,
}

impl DayCount {
    /// A day count that serializes as a JSON number.
    pub fn new(days: u32) -> Self {
        Self {
            days,
            quoted: false,
        }
    }

    /// Number of days.
    pub fn days(&self) -> u32 {
        self.days
    }
}

impl From<DayCount> for u32 {
    fn from(count: DayCount) -> Self {
        count.days
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.days.fmt(f)
    }
}

impl Serialize for DayCount {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if self.quoted {
            s.collect_str(&self.days)
        } else {
            s.serialize_u32(self.days)
        }
    }
}

impl<'de> Deserialize<'de> for DayCount {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StrOrInt {
            Int(u32),
            Str(String),
        }

        match StrOrInt::deserialize(d)? {
            StrOrInt::Int(days) => Ok(Self::new(days)),
            StrOrInt::Str(s) => {
                let days = s.parse().map_err(|_| {
                    D::Error::custom(format!("expected a day count, got {s:?}"))
                })?;
                Ok(Self { days, quoted: true })
            }
        }
    }
}

/// Data categories an end-user agreement can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessScope {
    /// Account balances.
    Balances,
    /// Account details (IBAN, owner, product).
    Details,
    /// Booked and pending transactions.
    Transactions,
}

impl AccessScope {
    /// All scopes.
    pub const ALL: [AccessScope; 3] = [Self::Balances, Self::Details, Self::Transactions];
}

/// Scope and duration contract for a user's data access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndUserAgreement {
    /// Agreement identifier, referenced when creating a requisition.
    pub id: String,
    /// When the agreement was created.
    pub created: DateTime<Utc>,
    /// When the user accepted it. None until accepted.
    #[serde(default)]
    pub accepted: Option<DateTime<Utc>>,
    /// Days of transaction history accessible.
    pub max_historical_days: u32,
    /// Days the access stays valid.
    pub access_valid_for_days: u32,
    /// Granted data categories.
    pub access_scope: Vec<AccessScope>,
    /// Institution the agreement applies to.
    pub institution_id: String,
}

impl EndUserAgreement {
    /// Whether the user has accepted the agreement.
    pub fn is_accepted(&self) -> bool {
        self.accepted.is_some()
    }
}

/// Lifecycle state of a requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequisitionStatus {
    /// Requisition has been created.
    #[serde(rename = "CR")]
    Created,
    /// End user is giving consent.
    #[serde(rename = "GC")]
    GivingConsent,
    /// End user is redirected to the bank for authentication.
    #[serde(rename = "UA")]
    UndergoingAuthentication,
    /// Either SSN verification failed or the user cancelled.
    #[serde(rename = "RJ")]
    Rejected,
    /// End user is selecting accounts.
    #[serde(rename = "SA")]
    SelectingAccounts,
    /// End user is granting access to account information.
    #[serde(rename = "GA")]
    GrantingAccess,
    /// Account has been successfully linked.
    #[serde(rename = "LN")]
    Linked,
    /// Access to accounts has expired.
    #[serde(rename = "EX")]
    Expired,
    /// Requisition was suspended due to repeated errors.
    #[serde(rename = "SU")]
    Suspended,
    /// Status code this client does not know.
    #[serde(other)]
    Unknown,
}

/// A bank-login session granting account access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisition {
    /// Requisition identifier.
    pub id: String,
    /// ISO 8601 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Where the user is sent after bank authentication.
    pub redirect: String,
    /// Current status.
    pub status: RequisitionStatus,
    /// Institution the user logs in to.
    pub institution_id: String,
    /// Linked end-user agreement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,
    /// Caller-supplied reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Account ids, populated once the user has linked.
    #[serde(default)]
    pub accounts: Vec<String>,
    /// Language of the consent screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_language: Option<String>,
    /// Bank authentication URL to send the user to.
    pub link: String,
    /// Whether the user picks accounts at the bank.
    #[serde(default)]
    pub account_selection: bool,
    /// Whether the bank redirects without a confirmation screen.
    #[serde(default)]
    pub redirect_immediate: bool,
}

impl Requisition {
    /// Whether accounts are available for data calls.
    pub fn is_linked(&self) -> bool {
        self.status == RequisitionStatus::Linked
    }
}

/// A single page of a list endpoint, returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    pub count: u64,
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the previous page.
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<T>,
}

/// Acknowledgement returned by delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Short outcome summary.
    pub summary: String,
    /// Longer description.
    #[serde(default)]
    pub detail: String,
}

/// Account metadata from `/accounts/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountMetadata {
    /// Account identifier.
    pub id: String,
    /// ISO 8601 timestamp of first link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// ISO 8601 timestamp of the last data access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<String>,
    /// Account IBAN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Institution holding the account.
    pub institution_id: String,
    /// Processing status (e.g. "READY", "EXPIRED").
    pub status: String,
    /// Account owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

/// Monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Decimal amount as sent by the bank.
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Balances of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceData {
    /// One entry per balance type the bank reports.
    pub balances: Vec<Balance>,
}

/// A balance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Balance amount.
    pub balance_amount: Amount,
    /// E.g. "expected", "interimAvailable", "closingBooked".
    pub balance_type: String,
    /// Whether a credit line is part of the amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit_included: Option<bool>,
    /// ISO 8601 timestamp of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_change_date_time: Option<String>,
    /// Date the balance refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Counterparty account reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountReference {
    /// Account IBAN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Domestic account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bban: Option<String>,
    /// Account currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Unmodelled fields (e.g. `maskedPan`).
    #[serde(flatten)]
    pub extra: Extra,
}

/// Transactions of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    /// Booked and pending lists.
    pub transactions: Transactions,
}

/// Booked and pending transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transactions {
    /// Transactions the bank has booked.
    #[serde(default)]
    pub booked: Vec<BookedTransaction>,
    /// Transactions awaiting booking.
    #[serde(default)]
    pub pending: Vec<PendingTransaction>,
}

/// A transaction the bank has booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedTransaction {
    /// Bank-assigned transaction id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Provider-assigned transaction id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_transaction_id: Option<String>,
    /// Bank entry reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_reference: Option<String>,
    /// Date the transaction was booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<String>,
    /// Timestamp the transaction was booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date_time: Option<String>,
    /// Date the funds became available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    /// Timestamp the funds became available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date_time: Option<String>,
    /// Signed amount.
    pub transaction_amount: Amount,
    /// Counterparty and remittance information.
    #[serde(flatten)]
    pub counterparty: Counterparty,
    /// Unmodelled fields (e.g. `balanceAfterTransaction`, `mandateId`).
    #[serde(flatten)]
    pub extra: Extra,
}

/// A transaction not yet booked. Carries no booking dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    /// Bank-assigned transaction id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Provider-assigned transaction id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_transaction_id: Option<String>,
    /// Date the funds become available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    /// Signed amount.
    pub transaction_amount: Amount,
    /// Counterparty and remittance information.
    #[serde(flatten)]
    pub counterparty: Counterparty,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Counterparty and remittance fields shared by booked and pending transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counterparty {
    /// Name of the payee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_name: Option<String>,
    /// Account of the payee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountReference>,
    /// Name of the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_name: Option<String>,
    /// Account of the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountReference>,
    /// Free-text payment description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remittance_information_unstructured: Option<String>,
    /// Free-text payment description split into lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remittance_information_unstructured_array: Option<Vec<String>>,
    /// Structured payment reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remittance_information_structured: Option<String>,
    /// ISO 20022 bank transaction code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_transaction_code: Option<String>,
    /// Bank-specific transaction code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proprietary_bank_transaction_code: Option<String>,
    /// Extra bank-supplied information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

/// Details of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetailData {
    /// The account record.
    pub account: AccountDetail,
}

/// Account metadata as reported by the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    /// Bank-side account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Account IBAN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Domestic account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bban: Option<String>,
    /// BIC of the account servicer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    /// Account currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Account owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// Bank-assigned account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// ISO 20022 cash account type (e.g. "CACC").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_account_type: Option<String>,
    /// Account status (e.g. "enabled").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// "PRIV" or "ORGA".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Unmodelled fields (e.g. `ownerAddressUnstructured`, `details`).
    #[serde(flatten)]
    pub extra: Extra,
}
