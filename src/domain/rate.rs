use crate::domain::money::Currency;
use crate::domain::transaction::{ResponseCode, TransactionResult, TransactionStatus};
use rust_decimal::Decimal;

/// Availability of a DCC rate for the quoted method and amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStatus {
    Available,
    Unavailable,
    Error,
}

/// Gateway-issued conversion rate reference.
///
/// Must be attached unchanged to the operation it was quoted for; whether it
/// matches that operation's amount and currency is the gateway's call, not
/// validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct DccRateData {
    /// The rate identifier threaded into the consuming operation.
    pub dcc_id: String,
    /// Currency the cardholder would pay in.
    pub cardholder_currency: Currency,
    /// Converted amount in the cardholder's currency.
    pub cardholder_amount: Decimal,
    pub cardholder_rate: Decimal,
    pub margin_rate_percentage: Option<Decimal>,
    pub exchange_rate_source: Option<String>,
}

/// Outcome of a rate-quote exchange. Immutable; consumed, never mutated.
#[derive(Debug, Clone)]
pub struct RateQuote {
    pub status: QuoteStatus,
    /// Present exactly when `status` is `Available`.
    pub rate_data: Option<DccRateData>,
    pub raw_code: String,
    pub raw_message: String,
}

impl RateQuote {
    /// Builds a quote from a raw exchange outcome.
    ///
    /// Available only for the exact (SUCCESS, AVAILABLE) pair with rate data
    /// present; other successful outcomes are Unavailable, everything else is
    /// an Error. Rate data is dropped unless the quote is Available.
    pub fn from_result(result: &TransactionResult) -> Self {
        let available = result.response_code == ResponseCode::Success
            && result.status == TransactionStatus::Available
            && result.rate_data.is_some();
        let status = if available {
            QuoteStatus::Available
        } else if result.response_code == ResponseCode::Success {
            QuoteStatus::Unavailable
        } else {
            QuoteStatus::Error
        };
        Self {
            rate_data: available.then(|| result.rate_data.clone()).flatten(),
            status,
            raw_code: result.raw_code.clone(),
            raw_message: result.raw_message.clone(),
        }
    }
}
