//! JSON envelopes for the Gateway Service protocol.
//!
//! Only the logical fields are load-bearing; the encoding mirrors the
//! gateway's camelCase JSON. This module is the single place where typed
//! domain values meet wire field names.

use crate::config::GatewayConfig;
use crate::domain::money::Currency;
use crate::domain::payment_method::PaymentMethod;
use crate::domain::rate::DccRateData;
use crate::domain::transaction::TransactionRequest;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Authentication context attached to every request. Opaque to the gateway
/// client; credential acquisition happens outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub app_id: String,
    pub app_key: String,
    pub environment: String,
    pub channel: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_account: Option<String>,
}

impl AuthContext {
    fn from_config(config: &GatewayConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
            environment: config.environment.as_str().to_string(),
            channel: config.channel.as_str().to_string(),
            country: config.country.clone(),
            processing_account: config.processing_account.clone(),
        }
    }
}

/// Payment method reference on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WirePaymentMethod {
    #[serde(rename_all = "camelCase")]
    Card {
        number: String,
        exp_month: u8,
        exp_year: u16,
        holder_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Token { token: String },
}

impl From<&PaymentMethod> for WirePaymentMethod {
    fn from(method: &PaymentMethod) -> Self {
        match method {
            PaymentMethod::Card(card) => WirePaymentMethod::Card {
                number: card.number.clone(),
                exp_month: card.exp_month,
                exp_year: card.exp_year,
                holder_name: card.holder_name.clone(),
            },
            PaymentMethod::Token(token) => WirePaymentMethod::Token {
                token: token.token.clone(),
            },
        }
    }
}

/// DCC rate reference on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateData {
    pub dcc_id: String,
    pub cardholder_currency: String,
    pub cardholder_amount: Decimal,
    pub cardholder_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_rate_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate_source: Option<String>,
}

impl From<&DccRateData> for WireRateData {
    fn from(rate: &DccRateData) -> Self {
        Self {
            dcc_id: rate.dcc_id.clone(),
            cardholder_currency: rate.cardholder_currency.as_str().to_string(),
            cardholder_amount: rate.cardholder_amount,
            cardholder_rate: rate.cardholder_rate,
            margin_rate_percentage: rate.margin_rate_percentage,
            exchange_rate_source: rate.exchange_rate_source.clone(),
        }
    }
}

impl TryFrom<WireRateData> for DccRateData {
    type Error = crate::error::GatewayError;

    fn try_from(wire: WireRateData) -> Result<Self> {
        Ok(Self {
            dcc_id: wire.dcc_id,
            cardholder_currency: Currency::new(&wire.cardholder_currency)?,
            cardholder_amount: wire.cardholder_amount,
            cardholder_rate: wire.cardholder_rate,
            margin_rate_percentage: wire.margin_rate_percentage,
            exchange_rate_source: wire.exchange_rate_source,
        })
    }
}

/// One serialized request to the Gateway Service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub operation: String,
    pub auth: AuthContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<WirePaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub allow_duplicates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcc_rate_data: Option<WireRateData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_transaction_id: Option<String>,
}

impl RequestEnvelope {
    pub fn from_request(request: &TransactionRequest, config: &GatewayConfig) -> Self {
        Self {
            operation: request.kind.as_str().to_string(),
            auth: AuthContext::from_config(config),
            payment_method: request.method.as_ref().map(WirePaymentMethod::from),
            amount: request.amount.map(|a| a.value()),
            currency: request.currency.as_ref().map(|c| c.as_str().to_string()),
            allow_duplicates: request.allow_duplicates,
            dcc_rate_data: request.rate_data.as_ref().map(WireRateData::from),
            client_transaction_id: request.client_transaction_id.clone(),
            parent_transaction_id: request.parent_transaction_id.clone(),
        }
    }
}

/// Raw reply from the Gateway Service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub response_code: String,
    pub response_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcc_rate_data: Option<WireRateData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
