use clap::Parser;
use dccflow::{
    generate_order_id, Amount, Currency, GatewayClient, GatewayConfig, Money, PaymentMethod,
    RequestBuilder, SandboxGateway,
};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Amount to charge
    #[arg(default_value = "15.11")]
    amount: Decimal,

    /// ISO-4217 currency of the charge
    #[arg(default_value = "EUR")]
    currency: String,

    /// Reverse the charge after it is captured
    #[arg(long)]
    reverse: bool,

    /// Tokenize the card first and pay with the token
    #[arg(long)]
    tokenize: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let client = GatewayClient::new(
        Arc::new(SandboxGateway::new()),
        GatewayConfig::sandbox(),
    );

    let mut method = PaymentMethod::card("4006097467207025", 12, 2030, "James Mason");
    if cli.tokenize {
        let tokenized = RequestBuilder::tokenize(&method)
            .execute(&client)
            .await
            .into_diagnostic()?;
        println!(
            "tokenize: {} {}",
            tokenized.raw_code, tokenized.raw_message
        );
        let token = tokenized
            .token
            .ok_or_else(|| miette::miette!("gateway returned no token"))?;
        method = PaymentMethod::from_token(token, Some("James Mason".to_string()));
    }

    let amount = Amount::new(cli.amount).into_diagnostic()?;
    let currency = Currency::new(&cli.currency).into_diagnostic()?;

    let quote = client
        .quote_rate(&method, Money::new(amount, currency.clone()))
        .await
        .into_diagnostic()?;
    println!("quote: {} {}", quote.raw_code, quote.raw_message);
    if let Some(rate) = &quote.rate_data {
        println!(
            "  cardholder pays {} {} at rate {}",
            rate.cardholder_amount, rate.cardholder_currency, rate.cardholder_rate
        );
    }

    client.settle().await;

    let charge = RequestBuilder::charge(&method, amount)
        .with_currency(currency)
        .with_allow_duplicates(true)
        .with_rate_quote(&quote)
        .into_diagnostic()?
        .with_client_transaction_id(generate_order_id())
        .execute(&client)
        .await
        .into_diagnostic()?;
    println!("charge: {} {}", charge.raw_code, charge.raw_message);

    if cli.reverse {
        let reversal = RequestBuilder::reverse(&charge)
            .into_diagnostic()?
            .with_dcc_rate_data(
                charge
                    .rate_data
                    .clone()
                    .ok_or_else(|| miette::miette!("charge carried no rate data"))?,
            )
            .execute(&client)
            .await
            .into_diagnostic()?;
        println!("reverse: {} {}", reversal.raw_code, reversal.raw_message);
    }

    Ok(())
}
