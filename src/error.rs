use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures that interrupt the request path before a business outcome exists.
///
/// Business declines and gateway-side processing errors are not represented
/// here: a well-formed gateway response always comes back as an ordinary
/// `TransactionResult`, so chained operations can inspect the outcome instead
/// of unwinding through an error path.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Network or connectivity failure before any response was obtained.
    /// Never retried implicitly.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request draft was rejected before dispatch. No network call was made.
    #[error("invalid request: {0}")]
    Builder(#[from] BuilderError),

    /// The request or response could not be encoded/decoded on the wire.
    #[error("wire encoding error: {0}")]
    Wire(#[from] serde_json::Error),
}

/// Pre-dispatch validation failures raised while assembling a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Amount field is required for this operation
    #[error("missing amount for this operation")]
    MissingAmount,

    /// Currency field is required for this operation
    #[error("missing currency for this operation")]
    MissingCurrency,

    /// Amounts are non-negative for quote and payment operations
    #[error("amount must not be negative")]
    NegativeAmount,

    /// Currency codes are three uppercase ASCII letters (ISO 4217)
    #[error("invalid ISO-4217 currency code")]
    InvalidCurrency,

    /// Rate data only applies to monetary operations
    #[error("{0} does not accept DCC rate data")]
    RateDataNotAccepted(&'static str),

    /// The quote being consumed did not report an available rate
    #[error("rate quote is not available for consumption")]
    QuoteNotAvailable,

    /// The parent transaction's state does not permit this follow-up
    #[error("cannot {operation} a transaction in state {state}")]
    IllegalChain {
        operation: &'static str,
        state: String,
    },

    /// Chained operations need the parent's gateway-assigned id
    #[error("parent transaction carries no gateway transaction id")]
    MissingParentTransaction,
}
