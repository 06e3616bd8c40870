use crate::domain::ports::GatewayTransport;
use crate::error::{GatewayError, Result};
use crate::interfaces::wire::{RequestEnvelope, ResponseEnvelope, WirePaymentMethod, WireRateData};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process stand-in for the remote Gateway Service.
///
/// Implements the full quote/charge/authorize/capture/refund/reverse/tokenize
/// contract with per-client-id duplicate detection, so integration tests and
/// the demo binary run without a network. Uses `Arc<RwLock<..>>` for shared
/// concurrent access; clones share state.
#[derive(Clone)]
pub struct SandboxGateway {
    state: Arc<RwLock<SandboxState>>,
}

struct SandboxState {
    /// Lifecycle per gateway-assigned transaction id.
    transactions: HashMap<String, Lifecycle>,
    /// Client transaction id to the gateway id it first produced.
    client_ids: HashMap<String, String>,
    tokens: HashSet<String>,
    quotes_available: bool,
    fail_transport: bool,
}

impl Default for SandboxState {
    fn default() -> Self {
        Self {
            transactions: HashMap::new(),
            client_ids: HashMap::new(),
            tokens: HashSet::new(),
            quotes_available: true,
            fail_transport: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    PreAuthorized,
    Captured,
    Reversed,
    Refunded,
}

impl Lifecycle {
    fn as_str(self) -> &'static str {
        match self {
            Lifecycle::PreAuthorized => "PREAUTHORIZED",
            Lifecycle::Captured => "CAPTURED",
            Lifecycle::Reversed => "REVERSED",
            Lifecycle::Refunded => "REFUNDED",
        }
    }
}

impl Default for SandboxGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(SandboxState::default())),
        }
    }

    /// Makes subsequent quote requests report NOT_AVAILABLE.
    pub async fn set_quotes_available(&self, available: bool) {
        self.state.write().await.quotes_available = available;
    }

    /// Makes subsequent exchanges fail at the transport level.
    pub async fn set_fail_transport(&self, fail: bool) {
        self.state.write().await.fail_transport = fail;
    }

    async fn handle(&self, envelope: RequestEnvelope) -> ResponseEnvelope {
        let mut state = self.state.write().await;
        if envelope.auth.app_id.is_empty() || envelope.auth.app_key.is_empty() {
            return reply("NOT_AUTHENTICATED", "UNAUTHORIZED_ACCESS");
        }
        match envelope.operation.as_str() {
            "quote_rate" => Self::quote(&state, &envelope),
            "charge" => Self::payment(&mut state, &envelope, Lifecycle::Captured),
            "authorize" => Self::payment(&mut state, &envelope, Lifecycle::PreAuthorized),
            // a refund is standalone unless it references a parent transaction
            "refund" if envelope.parent_transaction_id.is_none() => {
                Self::payment(&mut state, &envelope, Lifecycle::Captured)
            }
            "refund" => Self::follow_up(&mut state, &envelope, Lifecycle::Refunded),
            "capture" => Self::follow_up(&mut state, &envelope, Lifecycle::Captured),
            "reverse" => Self::follow_up(&mut state, &envelope, Lifecycle::Reversed),
            "tokenize" => Self::tokenize(&mut state, &envelope),
            _ => reply("INVALID_REQUEST", "UNKNOWN_OPERATION"),
        }
    }

    fn quote(state: &SandboxState, envelope: &RequestEnvelope) -> ResponseEnvelope {
        if let Some(rejection) = Self::verify_method(state, envelope) {
            return rejection;
        }
        let (Some(amount), Some(currency)) = (envelope.amount, envelope.currency.as_deref())
        else {
            return reply("INVALID_REQUEST", "MANDATORY_DATA_MISSING");
        };
        let conversion = state
            .quotes_available
            .then(|| conversion_for(currency))
            .flatten();
        match conversion {
            Some((cardholder_currency, rate)) => ResponseEnvelope {
                dcc_rate_data: Some(WireRateData {
                    dcc_id: format!("DCC_{}", Uuid::new_v4().simple()),
                    cardholder_currency: cardholder_currency.to_string(),
                    cardholder_amount: (amount * rate).round_dp(2),
                    cardholder_rate: rate,
                    margin_rate_percentage: Some(dec!(3.75)),
                    exchange_rate_source: Some("ECB".to_string()),
                }),
                ..reply("SUCCESS", "AVAILABLE")
            },
            None => reply("SUCCESS", "NOT_AVAILABLE"),
        }
    }

    fn payment(
        state: &mut SandboxState,
        envelope: &RequestEnvelope,
        outcome: Lifecycle,
    ) -> ResponseEnvelope {
        if let Some(rejection) = Self::verify_method(state, envelope) {
            return rejection;
        }
        if envelope.amount.is_none() || envelope.currency.is_none() {
            return reply("INVALID_REQUEST", "MANDATORY_DATA_MISSING");
        }
        if let Some(client_id) = &envelope.client_transaction_id {
            if !envelope.allow_duplicates {
                if let Some(original) = state.client_ids.get(client_id) {
                    return ResponseEnvelope {
                        transaction_id: Some(original.clone()),
                        ..reply("DECLINED", "DUPLICATE_TRANSACTION")
                    };
                }
            }
        }
        let transaction_id = format!("TRN_{}", Uuid::new_v4().simple());
        state.transactions.insert(transaction_id.clone(), outcome);
        if let Some(client_id) = &envelope.client_transaction_id {
            state
                .client_ids
                .entry(client_id.clone())
                .or_insert_with(|| transaction_id.clone());
        }
        ResponseEnvelope {
            transaction_id: Some(transaction_id),
            dcc_rate_data: envelope.dcc_rate_data.clone(),
            ..reply("SUCCESS", outcome.as_str())
        }
    }

    fn follow_up(
        state: &mut SandboxState,
        envelope: &RequestEnvelope,
        outcome: Lifecycle,
    ) -> ResponseEnvelope {
        let Some(parent_id) = envelope.parent_transaction_id.as_deref() else {
            return reply("INVALID_REQUEST", "MANDATORY_DATA_MISSING");
        };
        let Some(&current) = state.transactions.get(parent_id) else {
            return reply("RESOURCE_NOT_FOUND", "TRANSACTION_NOT_FOUND");
        };
        let legal = match outcome {
            Lifecycle::Captured => current == Lifecycle::PreAuthorized,
            Lifecycle::Reversed => {
                matches!(current, Lifecycle::PreAuthorized | Lifecycle::Captured)
            }
            Lifecycle::Refunded => current == Lifecycle::Captured,
            Lifecycle::PreAuthorized => false,
        };
        if !legal {
            return reply("INVALID_ACTION", current.as_str());
        }
        state.transactions.insert(parent_id.to_string(), outcome);
        // refunds settle as their own captured transaction
        let (transaction_id, message) = if outcome == Lifecycle::Refunded {
            let refund_id = format!("TRN_{}", Uuid::new_v4().simple());
            state.transactions.insert(refund_id.clone(), Lifecycle::Captured);
            (refund_id, "CAPTURED")
        } else {
            (parent_id.to_string(), outcome.as_str())
        };
        ResponseEnvelope {
            transaction_id: Some(transaction_id),
            dcc_rate_data: envelope.dcc_rate_data.clone(),
            ..reply("SUCCESS", message)
        }
    }

    fn tokenize(state: &mut SandboxState, envelope: &RequestEnvelope) -> ResponseEnvelope {
        match &envelope.payment_method {
            Some(WirePaymentMethod::Card { .. }) => {
                let token = format!("PMT_{}", Uuid::new_v4().simple());
                state.tokens.insert(token.clone());
                ResponseEnvelope {
                    token: Some(token),
                    ..reply("SUCCESS", "ACTIVE")
                }
            }
            Some(WirePaymentMethod::Token { .. }) => {
                reply("INVALID_REQUEST", "ALREADY_TOKENIZED")
            }
            None => reply("INVALID_REQUEST", "MANDATORY_DATA_MISSING"),
        }
    }

    fn verify_method(state: &SandboxState, envelope: &RequestEnvelope) -> Option<ResponseEnvelope> {
        match &envelope.payment_method {
            None => Some(reply("INVALID_REQUEST", "MANDATORY_DATA_MISSING")),
            Some(WirePaymentMethod::Token { token }) if !state.tokens.contains(token) => {
                Some(reply("RESOURCE_NOT_FOUND", "TOKEN_NOT_FOUND"))
            }
            Some(_) => None,
        }
    }
}

fn reply(code: &str, message: &str) -> ResponseEnvelope {
    ResponseEnvelope {
        response_code: code.to_string(),
        response_message: message.to_string(),
        transaction_id: None,
        dcc_rate_data: None,
        token: None,
    }
}

/// Fixed conversion table: merchant currency to the simulated cardholder
/// home currency.
fn conversion_for(currency: &str) -> Option<(&'static str, Decimal)> {
    match currency {
        "EUR" => Some(("USD", dec!(1.0843))),
        "GBP" => Some(("USD", dec!(1.2704))),
        "USD" => Some(("EUR", dec!(0.9221))),
        _ => None,
    }
}

#[async_trait]
impl GatewayTransport for SandboxGateway {
    async fn exchange(&self, request: serde_json::Value) -> Result<serde_json::Value> {
        if self.state.read().await.fail_transport {
            return Err(GatewayError::Transport(
                "sandbox transport unavailable".to_string(),
            ));
        }
        let envelope: RequestEnvelope = serde_json::from_value(request)?;
        let response = self.handle(envelope).await;
        Ok(serde_json::to_value(response)?)
    }
}
