//! Client-side orchestration for Dynamic Currency Conversion payment flows.
//!
//! The crate models the workflow of quoting a DCC rate for a card payment and
//! then consuming that rate in a charge, authorization, capture, refund or
//! reversal: a fluent [`RequestBuilder`] accumulates per-operation parameters,
//! the [`GatewayClient`] serializes each finalized request and performs
//! exactly one exchange with the remote gateway, and the raw response is
//! classified into the closed [`TransactionStatus`] vocabulary. Business
//! declines come back as ordinary [`TransactionResult`] values; only transport
//! and pre-dispatch validation failures are errors.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::builder::RequestBuilder;
pub use application::client::GatewayClient;
pub use config::{Channel, Environment, GatewayConfig};
pub use domain::identity::generate_order_id;
pub use domain::money::{Amount, Currency, Money};
pub use domain::payment_method::{CardData, PaymentMethod, TokenData};
pub use domain::ports::{GatewayTransport, GatewayTransportArc};
pub use domain::rate::{DccRateData, QuoteStatus, RateQuote};
pub use domain::transaction::{
    OperationKind, ResponseCode, TransactionRequest, TransactionResult, TransactionStatus,
};
pub use error::{BuilderError, GatewayError, Result};
pub use infrastructure::sandbox::SandboxGateway;
