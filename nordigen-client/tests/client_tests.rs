//! Integration tests for nordigen-client.
//!
//! These tests verify the client API surface without requiring a running server.

use nordigen_client::{
    Client, ClientConfig, ClientError, Credentials, DEFAULT_BASE_URL, EndUserAgreementParams,
    RequisitionParams,
};
use serde_json::json;
use std::time::Duration;

fn credentials() -> Credentials {
    Credentials::new("secret-id", "secret-key")
}

#[test]
fn test_client_construction() {
    let client = Client::new(credentials()).unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    assert!(!client.is_authenticated());

    let client = Client::with_base_url(credentials(), "http://localhost:8080/api/v2");
    assert!(client.is_ok());
}

#[test]
fn test_client_invalid_url() {
    let result = Client::with_base_url(credentials(), "localhost:8080");

    match result {
        Err(ClientError::InvalidUrl(msg)) => {
            assert!(msg.contains("http://"));
        }
        _ => panic!("Expected InvalidUrl error"),
    }
}

#[test]
fn test_client_with_timeout() {
    let client = Client::new(credentials())
        .unwrap()
        .with_timeout(Duration::from_secs(10));
    assert!(client.is_ok());
}

#[test]
fn test_client_from_config() {
    let config = ClientConfig::builder()
        .secret_id("secret-id")
        .secret_key("secret-key")
        .base_url("https://bankaccountdata.gocardless.com/api/v2")
        .build()
        .unwrap();

    let client = Client::from_config(config).unwrap();
    assert_eq!(
        client.base_url(),
        "https://bankaccountdata.gocardless.com/api/v2"
    );
}

#[test]
fn test_client_from_config_invalid_url() {
    let config = ClientConfig::builder()
        .credentials(credentials())
        .base_url("ftp://example.com")
        .build()
        .unwrap();

    assert!(matches!(
        Client::from_config(config),
        Err(ClientError::InvalidUrl(_))
    ));
}

#[test]
fn test_error_display() {
    let err = ClientError::Api {
        status: 404,
        summary: "Not found.".to_string(),
        detail: "Not found.".to_string(),
    };
    assert!(err.to_string().contains("404"));
    assert!(err.is_not_found());

    let err = ClientError::InvalidUrl("bad url".to_string());
    assert!(err.to_string().contains("bad url"));
}

#[test]
fn test_params_serialize_snake_case() {
    let agreement = serde_json::to_value(EndUserAgreementParams::new("BANK")).unwrap();
    assert!(agreement.get("max_historical_days").is_some());
    assert!(agreement.get("access_valid_for_days").is_some());

    let requisition = RequisitionParams::new("https://example.com", "BANK").with_account_selection(true);
    assert_eq!(
        serde_json::to_value(&requisition).unwrap(),
        json!({
            "redirect": "https://example.com",
            "institution_id": "BANK",
            "account_selection": true
        })
    );
}

#[test]
fn test_credentials_debug_redacted() {
    let printed = format!("{:?}", Client::new(credentials()).unwrap());
    assert!(!printed.contains("secret-key"));
}
