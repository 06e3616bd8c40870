use dccflow::{
    Amount, Currency, GatewayClient, GatewayConfig, Money, PaymentMethod, SandboxGateway,
};
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Client wired to a fresh sandbox gateway with no settling delay.
/// The gateway handle is returned too so tests can flip its switches.
pub fn sandbox_client() -> (GatewayClient, SandboxGateway) {
    let gateway = SandboxGateway::new();
    let client = GatewayClient::new(Arc::new(gateway.clone()), GatewayConfig::sandbox());
    (client, gateway)
}

pub fn test_card() -> PaymentMethod {
    PaymentMethod::card("4006097467207025", 12, 2030, "James Mason")
}

pub fn eur() -> Currency {
    Currency::new("EUR").unwrap()
}

pub fn amount() -> Amount {
    Amount::new(dec!(15.11)).unwrap()
}

pub fn money() -> Money {
    Money::new(amount(), eur())
}
