use crate::application::client::GatewayClient;
use crate::domain::money::{Amount, Currency, Money};
use crate::domain::payment_method::PaymentMethod;
use crate::domain::rate::{DccRateData, QuoteStatus, RateQuote};
use crate::domain::transaction::{OperationKind, TransactionRequest, TransactionResult};
use crate::error::{BuilderError, Result};

/// Staged construction of one gateway request.
///
/// Entry points fix the operation kind; `with_*` refiners fill in optional
/// parameters; `finalize` validates the combination and freezes it into a
/// [`TransactionRequest`]. Refiners consume and return the builder, so every
/// draft owns its state exclusively. They never touch the payment method or a
/// prior result.
///
/// Follow-ups to a completed transaction are built with [`capture`],
/// [`refund_of`] and [`reverse`], which take the prior [`TransactionResult`]
/// and inherit its gateway-assigned identity. Building a follow-up off a
/// result whose state does not permit it fails before any network call.
///
/// [`capture`]: RequestBuilder::capture
/// [`refund_of`]: RequestBuilder::refund_of
/// [`reverse`]: RequestBuilder::reverse
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    kind: OperationKind,
    method: Option<PaymentMethod>,
    amount: Option<Amount>,
    currency: Option<Currency>,
    allow_duplicates: bool,
    rate_data: Option<DccRateData>,
    client_transaction_id: Option<String>,
    parent_transaction_id: Option<String>,
}

impl RequestBuilder {
    fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            method: None,
            amount: None,
            currency: None,
            allow_duplicates: false,
            rate_data: None,
            client_transaction_id: None,
            parent_transaction_id: None,
        }
    }

    fn standalone(kind: OperationKind, method: &PaymentMethod, amount: Amount) -> Self {
        Self {
            method: Some(method.clone()),
            amount: Some(amount),
            ..Self::new(kind)
        }
    }

    /// Requests a DCC rate for the method and amount/currency pair.
    pub fn quote_rate(method: &PaymentMethod, money: Money) -> Self {
        Self {
            currency: Some(money.currency),
            ..Self::standalone(OperationKind::QuoteRate, method, money.amount)
        }
    }

    /// Sale: authorization and capture in one step.
    pub fn charge(method: &PaymentMethod, amount: Amount) -> Self {
        Self::standalone(OperationKind::Charge, method, amount)
    }

    /// Reserves funds without capturing them.
    pub fn authorize(method: &PaymentMethod, amount: Amount) -> Self {
        Self::standalone(OperationKind::Authorize, method, amount)
    }

    /// Standalone refund, not tied to a prior transaction.
    pub fn refund(method: &PaymentMethod, amount: Amount) -> Self {
        Self::standalone(OperationKind::Refund, method, amount)
    }

    /// Exchanges raw card data for a reusable gateway token.
    pub fn tokenize(method: &PaymentMethod) -> Self {
        Self {
            method: Some(method.clone()),
            ..Self::new(OperationKind::Tokenize)
        }
    }

    /// Capture chained off a prior authorization.
    pub fn capture(parent: &TransactionResult) -> Result<Self> {
        Self::chained(OperationKind::Capture, parent)
    }

    /// Refund chained off a captured transaction.
    pub fn refund_of(parent: &TransactionResult) -> Result<Self> {
        Self::chained(OperationKind::Refund, parent)
    }

    /// Reversal of a prior authorization or capture.
    pub fn reverse(parent: &TransactionResult) -> Result<Self> {
        Self::chained(OperationKind::Reverse, parent)
    }

    fn chained(kind: OperationKind, parent: &TransactionResult) -> Result<Self> {
        if !parent.status.accepts_chained(kind) {
            return Err(BuilderError::IllegalChain {
                operation: kind.as_str(),
                state: parent.status.to_string(),
            }
            .into());
        }
        let parent_id = parent
            .transaction_id
            .clone()
            .ok_or(BuilderError::MissingParentTransaction)?;
        Ok(Self {
            parent_transaction_id: Some(parent_id),
            ..Self::new(kind)
        })
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Asks the gateway to bypass its duplicate-detection heuristic for this
    /// request. This is a signal to the gateway, not a client-side retry
    /// policy.
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Attaches a rate reference obtained from a quote. Whether it matches
    /// this operation's amount and currency is left to the gateway.
    pub fn with_dcc_rate_data(mut self, rate_data: DccRateData) -> Self {
        self.rate_data = Some(rate_data);
        self
    }

    /// Consumes an available quote's rate data.
    ///
    /// Fails when the quote reported Unavailable or Error, so an absent rate
    /// reference is caught here instead of travelling to the gateway.
    pub fn with_rate_quote(self, quote: &RateQuote) -> Result<Self> {
        match (quote.status, &quote.rate_data) {
            (QuoteStatus::Available, Some(rate_data)) => {
                Ok(self.with_dcc_rate_data(rate_data.clone()))
            }
            _ => Err(BuilderError::QuoteNotAvailable.into()),
        }
    }

    /// Client-supplied id for idempotency correlation, one per logical
    /// transaction. See [`crate::domain::identity::generate_order_id`].
    pub fn with_client_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.client_transaction_id = Some(id.into());
        self
    }

    /// Validates the draft and freezes it into an immutable request.
    pub fn finalize(self) -> Result<TransactionRequest> {
        if self.kind.requires_money() {
            if self.amount.is_none() {
                return Err(BuilderError::MissingAmount.into());
            }
            if self.currency.is_none() {
                return Err(BuilderError::MissingCurrency.into());
            }
        }
        if self.rate_data.is_some() && !self.kind.accepts_rate_data() {
            return Err(BuilderError::RateDataNotAccepted(self.kind.as_str()).into());
        }
        Ok(TransactionRequest {
            kind: self.kind,
            method: self.method,
            amount: self.amount,
            currency: self.currency,
            allow_duplicates: self.allow_duplicates,
            rate_data: self.rate_data,
            client_transaction_id: self.client_transaction_id,
            parent_transaction_id: self.parent_transaction_id,
        })
    }

    /// Finalizes the draft and dispatches it. Exactly one network exchange.
    pub async fn execute(self, client: &GatewayClient) -> Result<TransactionResult> {
        client.dispatch(self.finalize()?).await
    }
}
