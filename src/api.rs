use std::time::Duration;

use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BridgeConfig;

const API_KEY_HEADER: &str = "x-lifi-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Every token is scaled as if it had 18 decimals.
const TOKEN_DECIMALS: i32 = 18;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("invalid api key: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("empty quote response")]
    EmptyQuote,
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct BridgeClient {
    http: reqwest::Client,
    config: BridgeConfig,
}

impl BridgeClient {
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(api_key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(BridgeClient { http, config })
    }

    pub async fn list_chains(&self) -> Result<Vec<Chain>, BridgeError> {
        let url = format!("{}/chains", self.config.api_url);
        info!("Fetching chains. Url={}", url);
        let list = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<ChainList>()
            .await?;
        debug!("Received {} chains", list.chains.len());
        Ok(list.chains)
    }

    pub async fn get_quote(
        &self,
        from_chain: &str,
        to_chain: &str,
        token: &str,
        amount: &str,
    ) -> Result<Quote, BridgeError> {
        let from_amount = to_base_units(amount)?.to_string();
        let url = format!("{}/quote", self.config.api_url);
        info!(
            "Requesting quote. From={}. To={}. Token={}. FromAmount={}",
            from_chain, to_chain, token, from_amount
        );

        let body = self
            .http
            .get(&url)
            .query(&[
                ("fromChain", from_chain),
                ("toChain", to_chain),
                ("fromToken", token),
                ("toToken", token),
                ("fromAmount", from_amount.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        if body.as_object().map_or(true, |fields| fields.is_empty()) {
            return Err(BridgeError::EmptyQuote);
        }
        let quote = serde_json::from_value::<Quote>(body)?;
        debug!("Quote has {} steps", quote.step_count());
        Ok(quote)
    }
}

/// Converts a decimal amount into the token's smallest unit, truncating
/// anything below it.
pub fn to_base_units(amount: &str) -> Result<u128, BridgeError> {
    let invalid = || BridgeError::InvalidAmount(amount.to_string());
    let value = amount.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    let scaled = (value * 10f64.powi(TOKEN_DECIMALS)).trunc();
    if scaled >= u128::MAX as f64 {
        return Err(invalid());
    }
    Ok(scaled as u128)
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChainList {
    pub chains: Vec<Chain>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Chain {
    pub key: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Quote {
    pub estimate: Option<Estimate>,
    #[serde(rename = "includedSteps")]
    pub included_steps: Option<Vec<serde_json::Value>>,
    pub tool: Option<serde_json::Value>,
}

impl Quote {
    pub fn gas_costs(&self) -> Option<&serde_json::Value> {
        self.estimate.as_ref()?.gas_costs.as_ref()
    }

    pub fn step_count(&self) -> usize {
        self.included_steps.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Estimate {
    #[serde(rename = "gasCosts")]
    pub gas_costs: Option<serde_json::Value>,
    #[serde(rename = "toAmount")]
    pub to_amount: Option<serde_json::Value>,
    #[serde(rename = "executionDuration")]
    pub execution_duration: Option<serde_json::Value>,
}
