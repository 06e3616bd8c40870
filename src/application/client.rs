use crate::application::builder::RequestBuilder;
use crate::config::GatewayConfig;
use crate::domain::money::Money;
use crate::domain::payment_method::PaymentMethod;
use crate::domain::ports::GatewayTransportArc;
use crate::domain::rate::{DccRateData, RateQuote};
use crate::domain::transaction::{
    classify_response, TransactionRequest, TransactionResult, TransactionStatus,
};
use crate::error::Result;
use crate::interfaces::wire::{RequestEnvelope, ResponseEnvelope};
use tracing::{debug, warn};

/// Dispatcher for finalized requests.
///
/// Owns the transport seam and the static gateway context. Each dispatch
/// serializes the request, attaches the authentication context, performs
/// exactly one exchange, and classifies the raw reply into a
/// [`TransactionResult`]. Transport failures surface as errors; business
/// declines come back as ordinary results.
pub struct GatewayClient {
    transport: GatewayTransportArc,
    config: GatewayConfig,
}

impl GatewayClient {
    pub fn new(transport: GatewayTransportArc, config: GatewayConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serializes, sends, and classifies one request.
    pub async fn dispatch(&self, request: TransactionRequest) -> Result<TransactionResult> {
        debug!(
            operation = request.kind.as_str(),
            client_transaction_id = request.client_transaction_id.as_deref(),
            parent_transaction_id = request.parent_transaction_id.as_deref(),
            "dispatching gateway request"
        );
        let envelope = RequestEnvelope::from_request(&request, &self.config);
        let payload = serde_json::to_value(&envelope)?;
        let reply = self.transport.exchange(payload).await?;
        let response: ResponseEnvelope = serde_json::from_value(reply)?;
        self.classify(&request, response)
    }

    fn classify(
        &self,
        request: &TransactionRequest,
        response: ResponseEnvelope,
    ) -> Result<TransactionResult> {
        let (response_code, status) =
            classify_response(&response.response_code, &response.response_message);
        if let TransactionStatus::Unknown(raw) = &status {
            warn!(message = raw.as_str(), "unrecognized gateway status");
        }
        // The rate reference rides along for chained reversals and refunds:
        // prefer the gateway's echo, fall back to what the request carried.
        let rate_data = match response.dcc_rate_data {
            Some(wire) => Some(DccRateData::try_from(wire)?),
            None => request.rate_data.clone(),
        };
        Ok(TransactionResult {
            response_code,
            status,
            transaction_id: response.transaction_id,
            rate_data,
            token: response.token,
            raw_code: response.response_code,
            raw_message: response.response_message,
        })
    }

    /// Rate-quote workflow: one exchange, no caching, no retry, no
    /// client-side expiry. The gateway is the source of truth for staleness.
    pub async fn quote_rate(&self, method: &PaymentMethod, money: Money) -> Result<RateQuote> {
        let result = RequestBuilder::quote_rate(method, money).execute(self).await?;
        Ok(RateQuote::from_result(&result))
    }

    /// Awaits the configured quote settling interval.
    ///
    /// Callers wait this long between obtaining a quote and consuming it so
    /// the gateway's quote propagation can finish. A zero-delay config makes
    /// this a no-op.
    pub async fn settle(&self) {
        let delay = self.config.settle_delay;
        if !delay.is_zero() {
            debug!(?delay, "waiting for quote settlement");
            tokio::time::sleep(delay).await;
        }
    }
}
