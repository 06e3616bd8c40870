use crate::domain::money::{Amount, Currency};
use crate::domain::payment_method::PaymentMethod;
use crate::domain::rate::DccRateData;
use std::fmt;

/// Operations the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    QuoteRate,
    Charge,
    Authorize,
    Capture,
    Refund,
    Reverse,
    Tokenize,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::QuoteRate => "quote_rate",
            OperationKind::Charge => "charge",
            OperationKind::Authorize => "authorize",
            OperationKind::Capture => "capture",
            OperationKind::Refund => "refund",
            OperationKind::Reverse => "reverse",
            OperationKind::Tokenize => "tokenize",
        }
    }

    /// Operations that consume a DCC rate reference.
    pub fn accepts_rate_data(self) -> bool {
        !matches!(self, OperationKind::QuoteRate | OperationKind::Tokenize)
    }

    /// Operations that must carry an amount and currency on the wire.
    /// Chained follow-ups inherit the parent's monetary context instead.
    pub fn requires_money(self) -> bool {
        matches!(
            self,
            OperationKind::QuoteRate
                | OperationKind::Charge
                | OperationKind::Authorize
                | OperationKind::Refund
        )
    }
}

/// Immutable dispatch descriptor.
///
/// Produced only by `RequestBuilder::finalize`, dispatched exactly once,
/// then discarded.
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub kind: OperationKind,
    pub method: Option<PaymentMethod>,
    pub amount: Option<Amount>,
    pub currency: Option<Currency>,
    /// Asks the gateway to bypass its duplicate-detection heuristic.
    /// Forwarded as-is, never interpreted client-side.
    pub allow_duplicates: bool,
    pub rate_data: Option<DccRateData>,
    pub client_transaction_id: Option<String>,
    /// Gateway id of the transaction a capture/refund/reverse chains off.
    pub parent_transaction_id: Option<String>,
}

/// Coarse gateway verdict for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    Declined,
    Error,
}

/// Closed lifecycle vocabulary for transaction outcomes.
///
/// The gateway's response messages are free-form strings from the caller's
/// perspective; everything recognized maps into this set, and successful
/// responses with a message this build does not know map to `Unknown` so new
/// gateway statuses degrade visibly instead of breaking callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// A DCC rate is available for the quoted method and amount.
    Available,
    /// No DCC rate could be offered.
    Unavailable,
    /// Funds reserved, not yet captured.
    PreAuthorized,
    /// Funds captured (also reported for settled refunds).
    Captured,
    /// A prior authorization or capture was undone.
    Reversed,
    /// A stored payment token is live (tokenization outcome).
    Active,
    Declined,
    Error,
    /// Successful response with an unrecognized status message.
    Unknown(String),
}

impl TransactionStatus {
    /// Whether a chained follow-up may be built off a result in this state.
    ///
    /// Capture applies to authorizations only; reversal undoes either an
    /// authorization or a capture; a chained refund needs captured funds.
    pub fn accepts_chained(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Capture => matches!(self, TransactionStatus::PreAuthorized),
            OperationKind::Reverse => matches!(
                self,
                TransactionStatus::PreAuthorized | TransactionStatus::Captured
            ),
            OperationKind::Refund => matches!(self, TransactionStatus::Captured),
            _ => false,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Available => "AVAILABLE",
            TransactionStatus::Unavailable => "NOT_AVAILABLE",
            TransactionStatus::PreAuthorized => "PREAUTHORIZED",
            TransactionStatus::Captured => "CAPTURED",
            TransactionStatus::Reversed => "REVERSED",
            TransactionStatus::Active => "ACTIVE",
            TransactionStatus::Declined => "DECLINED",
            TransactionStatus::Error => "ERROR",
            TransactionStatus::Unknown(raw) => raw,
        };
        f.write_str(label)
    }
}

/// Classifies a raw gateway (code, message) pair into the typed vocabulary.
pub fn classify_response(code: &str, message: &str) -> (ResponseCode, TransactionStatus) {
    match code {
        "SUCCESS" => {
            let status = match message {
                "AVAILABLE" => TransactionStatus::Available,
                "NOT_AVAILABLE" => TransactionStatus::Unavailable,
                "PREAUTHORIZED" | "PENDING" => TransactionStatus::PreAuthorized,
                "CAPTURED" => TransactionStatus::Captured,
                "REVERSED" => TransactionStatus::Reversed,
                "ACTIVE" => TransactionStatus::Active,
                other => TransactionStatus::Unknown(other.to_string()),
            };
            (ResponseCode::Success, status)
        }
        "DECLINED" => (ResponseCode::Declined, TransactionStatus::Declined),
        _ => (ResponseCode::Error, TransactionStatus::Error),
    }
}

/// Outcome of one dispatched request.
///
/// An immutable snapshot owned by the caller. "Transitioning" a transaction
/// means building a new chained request from this snapshot's identity, never
/// mutating it.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub response_code: ResponseCode,
    pub status: TransactionStatus,
    /// Gateway-assigned transaction id, the anchor for chained operations.
    pub transaction_id: Option<String>,
    /// Rate reference carried through so reversals and refunds can re-attach it.
    pub rate_data: Option<DccRateData>,
    /// Stored payment token, present on tokenization outcomes.
    pub token: Option<String>,
    pub raw_code: String,
    pub raw_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_recognized_pairs() {
        let cases = [
            ("SUCCESS", "AVAILABLE", TransactionStatus::Available),
            ("SUCCESS", "NOT_AVAILABLE", TransactionStatus::Unavailable),
            ("SUCCESS", "PREAUTHORIZED", TransactionStatus::PreAuthorized),
            ("SUCCESS", "PENDING", TransactionStatus::PreAuthorized),
            ("SUCCESS", "CAPTURED", TransactionStatus::Captured),
            ("SUCCESS", "REVERSED", TransactionStatus::Reversed),
            ("SUCCESS", "ACTIVE", TransactionStatus::Active),
        ];
        for (code, message, expected) in cases {
            let (response_code, status) = classify_response(code, message);
            assert_eq!(response_code, ResponseCode::Success);
            assert_eq!(status, expected, "{code}/{message}");
        }
    }

    #[test]
    fn test_classify_unknown_success_message() {
        let (code, status) = classify_response("SUCCESS", "SETTLED");
        assert_eq!(code, ResponseCode::Success);
        assert_eq!(status, TransactionStatus::Unknown("SETTLED".to_string()));
    }

    #[test]
    fn test_classify_non_success_codes() {
        assert_eq!(
            classify_response("DECLINED", "INSUFFICIENT_FUNDS"),
            (ResponseCode::Declined, TransactionStatus::Declined)
        );
        assert_eq!(
            classify_response("SYSTEM_ERROR", "TIMEOUT"),
            (ResponseCode::Error, TransactionStatus::Error)
        );
    }

    #[test]
    fn test_chaining_rules() {
        use OperationKind::{Capture, Refund, Reverse};

        assert!(TransactionStatus::PreAuthorized.accepts_chained(Capture));
        assert!(TransactionStatus::PreAuthorized.accepts_chained(Reverse));
        assert!(!TransactionStatus::PreAuthorized.accepts_chained(Refund));

        assert!(TransactionStatus::Captured.accepts_chained(Reverse));
        assert!(TransactionStatus::Captured.accepts_chained(Refund));
        assert!(!TransactionStatus::Captured.accepts_chained(Capture));

        for terminal in [
            TransactionStatus::Reversed,
            TransactionStatus::Declined,
            TransactionStatus::Error,
            TransactionStatus::Active,
        ] {
            assert!(!terminal.accepts_chained(Capture), "{terminal}");
            assert!(!terminal.accepts_chained(Reverse), "{terminal}");
            assert!(!terminal.accepts_chained(Refund), "{terminal}");
        }
    }

    #[test]
    fn test_rate_data_acceptance_per_kind() {
        assert!(OperationKind::Charge.accepts_rate_data());
        assert!(OperationKind::Authorize.accepts_rate_data());
        assert!(OperationKind::Capture.accepts_rate_data());
        assert!(OperationKind::Refund.accepts_rate_data());
        assert!(OperationKind::Reverse.accepts_rate_data());
        assert!(!OperationKind::Tokenize.accepts_rate_data());
        assert!(!OperationKind::QuoteRate.accepts_rate_data());
    }
}
