mod common;

use common::{amount, eur, money, sandbox_client, test_card};
use dccflow::{
    generate_order_id, GatewayError, PaymentMethod, QuoteStatus, RequestBuilder, ResponseCode,
    TransactionStatus,
};

#[tokio::test]
async fn tokenize_then_pay_with_token() {
    let (client, _gateway) = sandbox_client();
    let card = test_card();

    let tokenized = RequestBuilder::tokenize(&card).execute(&client).await.unwrap();
    assert_eq!(tokenized.response_code, ResponseCode::Success);
    assert_eq!(tokenized.status, TransactionStatus::Active);
    let token = tokenized.token.clone().unwrap();
    assert!(token.starts_with("PMT_"));

    let tokenized_card = PaymentMethod::from_token(token, Some("James Mason".to_string()));

    // the token drives the quote/charge path exactly like the raw card
    let quote = client.quote_rate(&tokenized_card, money()).await.unwrap();
    assert_eq!(quote.status, QuoteStatus::Available);

    client.settle().await;

    let response = RequestBuilder::charge(&tokenized_card, amount())
        .with_currency(eur())
        .with_rate_quote(&quote)
        .unwrap()
        .with_client_transaction_id(generate_order_id())
        .execute(&client)
        .await
        .unwrap();

    assert_eq!(response.response_code, ResponseCode::Success);
    assert_eq!(response.status, TransactionStatus::Captured);
}

#[tokio::test]
async fn unknown_token_is_a_business_error_not_a_transport_one() {
    let (client, _gateway) = sandbox_client();
    let forged = PaymentMethod::from_token("PMT_never_issued", None);

    let response = RequestBuilder::charge(&forged, amount())
        .with_currency(eur())
        .execute(&client)
        .await
        .unwrap();

    assert_eq!(response.response_code, ResponseCode::Error);
    assert_eq!(response.status, TransactionStatus::Error);
    assert_eq!(response.raw_code, "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn tokenizing_a_token_is_rejected_by_the_gateway() {
    let (client, _gateway) = sandbox_client();
    let card = test_card();

    let tokenized = RequestBuilder::tokenize(&card).execute(&client).await.unwrap();
    let token_method = PaymentMethod::from_token(tokenized.token.unwrap(), None);

    let response = RequestBuilder::tokenize(&token_method)
        .execute(&client)
        .await
        .unwrap();
    assert_eq!(response.response_code, ResponseCode::Error);
    assert_eq!(response.raw_message, "ALREADY_TOKENIZED");
}

#[tokio::test]
async fn token_reuse_across_transaction_chains() {
    let (client, _gateway) = sandbox_client();
    let card = test_card();

    let tokenized = RequestBuilder::tokenize(&card).execute(&client).await.unwrap();
    let token_method = PaymentMethod::from_token(tokenized.token.unwrap(), None);

    // one stored method, several independent chains
    for _ in 0..2 {
        let charge = RequestBuilder::charge(&token_method, amount())
            .with_currency(eur())
            .execute(&client)
            .await
            .unwrap();
        assert_eq!(charge.status, TransactionStatus::Captured);

        let reversal = RequestBuilder::reverse(&charge)
            .unwrap()
            .execute(&client)
            .await
            .unwrap();
        assert_eq!(reversal.status, TransactionStatus::Reversed);
    }
}

#[tokio::test]
async fn builder_error_implements_display_through_gateway_error() {
    let quote = dccflow::RateQuote {
        status: QuoteStatus::Error,
        rate_data: None,
        raw_code: "SYSTEM_ERROR".to_string(),
        raw_message: "TIMEOUT".to_string(),
    };
    let err = RequestBuilder::charge(&test_card(), amount())
        .with_currency(eur())
        .with_rate_quote(&quote)
        .unwrap_err();
    assert!(matches!(err, GatewayError::Builder(_)));
    assert!(err.to_string().contains("not available"));
}
