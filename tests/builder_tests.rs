mod common;

use common::{amount, eur, sandbox_client, test_card};
use dccflow::{
    Amount, BuilderError, Currency, DccRateData, GatewayError, OperationKind, RequestBuilder,
    ResponseCode, TransactionResult, TransactionStatus,
};
use rust_decimal_macros::dec;

fn sample_rate() -> DccRateData {
    DccRateData {
        dcc_id: "DCC_test".to_string(),
        cardholder_currency: Currency::new("USD").unwrap(),
        cardholder_amount: dec!(16.38),
        cardholder_rate: dec!(1.0843),
        margin_rate_percentage: None,
        exchange_rate_source: None,
    }
}

fn result_in(status: TransactionStatus) -> TransactionResult {
    TransactionResult {
        response_code: ResponseCode::Success,
        status,
        transaction_id: Some("TRN_parent".to_string()),
        rate_data: None,
        token: None,
        raw_code: "SUCCESS".to_string(),
        raw_message: String::new(),
    }
}

#[test]
fn missing_currency_fails_before_dispatch() {
    let result = RequestBuilder::charge(&test_card(), amount()).finalize();
    assert!(matches!(
        result,
        Err(GatewayError::Builder(BuilderError::MissingCurrency))
    ));
}

#[test]
fn negative_amount_is_rejected_at_construction() {
    assert!(matches!(
        Amount::new(dec!(-15.11)),
        Err(GatewayError::Builder(BuilderError::NegativeAmount))
    ));
}

#[test]
fn lowercase_currency_is_rejected_at_construction() {
    assert!(matches!(
        Currency::new("eur"),
        Err(GatewayError::Builder(BuilderError::InvalidCurrency))
    ));
}

#[test]
fn rate_data_on_tokenize_is_a_validation_error() {
    let result = RequestBuilder::tokenize(&test_card())
        .with_dcc_rate_data(sample_rate())
        .finalize();
    assert!(matches!(
        result,
        Err(GatewayError::Builder(BuilderError::RateDataNotAccepted(
            "tokenize"
        )))
    ));
}

#[test]
fn capture_is_only_legal_off_an_authorization() {
    for state in [
        TransactionStatus::Captured,
        TransactionStatus::Reversed,
        TransactionStatus::Declined,
        TransactionStatus::Error,
    ] {
        assert!(
            matches!(
                RequestBuilder::capture(&result_in(state.clone())),
                Err(GatewayError::Builder(BuilderError::IllegalChain {
                    operation: "capture",
                    ..
                }))
            ),
            "capture off {state} should be rejected"
        );
    }
    assert!(RequestBuilder::capture(&result_in(TransactionStatus::PreAuthorized)).is_ok());
}

#[test]
fn refund_chain_needs_captured_funds() {
    assert!(RequestBuilder::refund_of(&result_in(TransactionStatus::Captured)).is_ok());
    assert!(matches!(
        RequestBuilder::refund_of(&result_in(TransactionStatus::PreAuthorized)),
        Err(GatewayError::Builder(BuilderError::IllegalChain { .. }))
    ));
}

#[test]
fn chained_request_without_parent_id_is_rejected() {
    let mut parent = result_in(TransactionStatus::Captured);
    parent.transaction_id = None;
    assert!(matches!(
        RequestBuilder::reverse(&parent),
        Err(GatewayError::Builder(BuilderError::MissingParentTransaction))
    ));
}

#[tokio::test]
async fn validation_failure_makes_no_network_call() {
    let (client, gateway) = sandbox_client();
    // a transport-level failure would surface if the wire were touched
    gateway.set_fail_transport(true).await;

    let result = RequestBuilder::charge(&test_card(), amount())
        .execute(&client)
        .await;
    assert!(matches!(
        result,
        Err(GatewayError::Builder(BuilderError::MissingCurrency))
    ));
}

#[test]
fn finalized_request_reflects_the_draft() {
    let request = RequestBuilder::charge(&test_card(), amount())
        .with_currency(eur())
        .with_allow_duplicates(true)
        .with_dcc_rate_data(sample_rate())
        .with_client_transaction_id("order-9")
        .finalize()
        .unwrap();

    assert_eq!(request.kind, OperationKind::Charge);
    assert_eq!(request.amount.unwrap().value(), dec!(15.11));
    assert_eq!(request.currency.unwrap().as_str(), "EUR");
    assert!(request.allow_duplicates);
    assert_eq!(request.rate_data.unwrap().dcc_id, "DCC_test");
    assert_eq!(request.client_transaction_id.as_deref(), Some("order-9"));
}
