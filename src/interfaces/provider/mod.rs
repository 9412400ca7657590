//! Outbound integration with the mobile-money payment provider. Bearer-token
//! authenticated JSON over HTTP; no retry layer, transport failures surface
//! to the caller directly.

use crate::config::ProviderConfig;
use crate::domain::deposit::{DepositMetadata, DepositOutcome, DepositStatus, NewDeposit};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

/// Per-country provider availability, as reported by the active-conf
/// endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryConfig {
    pub country: String,
    pub correspondents: Vec<Correspondent>,
}

/// A mobile-money channel available in a country, with its deposit bounds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correspondent {
    pub correspondent: String,
    pub currency: String,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub decimals_in_amount: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveConfResponse {
    countries: Vec<CountryConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DepositRequestBody<'a> {
    deposit_id: &'a str,
    amount: String,
    currency: &'a str,
    country: &'a str,
    correspondent: &'a str,
    payer: Payer<'a>,
    customer_timestamp: DateTime<Utc>,
    metadata: &'a DepositMetadata,
}

#[derive(Serialize)]
struct Payer<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    address: PayerAddress<'a>,
}

#[derive(Serialize)]
struct PayerAddress<'a> {
    value: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepositAck {
    deposit_id: Option<String>,
    status: DepositStatus,
    rejection_reason: Option<RejectionReason>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectionReason {
    rejection_message: Option<String>,
}

#[derive(Deserialize)]
struct DepositStatusRow {
    status: DepositStatus,
}

const GENERIC_REJECTION: &str = "Deposit request was not accepted by the payment provider";

pub struct ProviderGateway {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ProviderGateway {
    /// Builds a gateway from explicit configuration sourced once at process
    /// start. Blank credentials are a configuration error up front rather
    /// than an authentication failure on first use.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "provider base URL is not set".to_string(),
            ));
        }
        if config.api_token.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "provider API token is not set".to_string(),
            ));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    /// Fetches channel availability and deposit bounds for a country.
    /// `Ok(None)` when the provider does not serve the country at all.
    pub async fn country_config(&self, country: &str) -> Result<Option<CountryConfig>> {
        let response = self
            .http
            .get(format!("{}/v2/active-conf", self.base_url))
            .query(&[("country", country), ("operationType", "DEPOSIT")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PaymentError::Configuration(format!(
                "provider active-conf returned {}",
                response.status()
            )));
        }
        let body: ActiveConfResponse = response.json().await?;
        Ok(body.countries.into_iter().find(|c| c.country == country))
    }

    /// Submits a deposit request. Assigns a client-side UUID when the caller
    /// did not pick a deposit id, formats the amount to two decimals and
    /// stamps the customer timestamp. Provider-level declines come back as
    /// `DepositOutcome::Rejected`, never as an error.
    pub async fn initiate_deposit(&self, deposit: NewDeposit) -> Result<DepositOutcome> {
        let deposit_id = deposit
            .deposit_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let body = DepositRequestBody {
            deposit_id: &deposit_id,
            amount: wire_amount(deposit.amount),
            currency: &deposit.currency,
            country: &deposit.country,
            correspondent: &deposit.correspondent,
            payer: Payer {
                kind: "MSISDN",
                address: PayerAddress {
                    value: &deposit.payer_msisdn,
                },
            },
            customer_timestamp: Utc::now(),
            metadata: &deposit.metadata,
        };

        let response = self
            .http
            .post(format!("{}/deposits", self.base_url))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body: Value = response.json().await.unwrap_or(Value::Null);
            let message =
                extract_provider_message(&error_body).unwrap_or_else(|| GENERIC_REJECTION.into());
            debug!(deposit_id, %status, message, "deposit request declined");
            return Ok(DepositOutcome::Rejected { message });
        }

        let ack: DepositAck = response.json().await?;
        if ack.status == DepositStatus::Rejected {
            let message = ack
                .rejection_reason
                .and_then(|r| r.rejection_message)
                .unwrap_or_else(|| GENERIC_REJECTION.into());
            info!(deposit_id, message, "deposit rejected by provider");
            return Ok(DepositOutcome::Rejected { message });
        }

        let deposit_id = ack.deposit_id.unwrap_or(deposit_id);
        info!(deposit_id, status = %ack.status, "deposit accepted by provider");
        Ok(DepositOutcome::Accepted { deposit_id })
    }

    /// Polls the current status of a deposit. An empty result set means the
    /// provider has not decided yet and reads as `Pending`.
    pub async fn deposit_status(&self, deposit_id: &str) -> Result<DepositStatus> {
        let rows: Vec<DepositStatusRow> = self
            .http
            .get(format!("{}/deposits/{deposit_id}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows
            .first()
            .map(|row| row.status)
            .unwrap_or(DepositStatus::Pending))
    }
}

/// Two-decimal wire rendering of an amount, midpoints to even.
fn wire_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Digs the human-readable reason out of the provider's structured error
/// body. The provider is inconsistent about where it puts the message.
fn extract_provider_message(body: &Value) -> Option<String> {
    for path in [
        &["rejectionReason", "rejectionMessage"][..],
        &["failureReason", "failureMessage"],
        &["errorMessage"],
        &["message"],
    ] {
        let mut cursor = body;
        for key in path {
            match cursor.get(key) {
                Some(next) => cursor = next,
                None => {
                    cursor = &Value::Null;
                    break;
                }
            }
        }
        if let Some(message) = cursor.as_str() {
            return Some(message.to_string());
        }
    }
    None
}
