use super::TxnSubmitter;
use super::config::ClientConfig;
use super::wire::{WireErrorBody, WireTxnRequest, WireTxnResponse};
use crate::core::{Result, TxnError};
use crate::txn::TxnRequest;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Url};

const TXN_PATH: &str = "v3/kv/txn";

/// Store client speaking the JSON gateway of an etcd v3 compatible server
pub struct HttpTxnClient {
    client: Client,
    txn_url: Url,
    config: ClientConfig,
}

impl HttpTxnClient {
    /// Build a client for the configured endpoint.
    ///
    /// No request is sent here; an unreachable server surfaces on `submit`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        config.validate().map_err(TxnError::ConnectionFailure)?;

        let base_url = Url::parse(&format!("{}/", config.endpoint_url())).map_err(|e| {
            TxnError::ConnectionFailure(format!("invalid endpoint '{}': {}", config.endpoint, e))
        })?;
        let txn_url = base_url
            .join(TXN_PATH)
            .map_err(|e| TxnError::ConnectionFailure(e.to_string()))?;

        let client = Client::builder()
            .connect_timeout(config.dial_timeout)
            .timeout(config.command_timeout)
            .build()
            .map_err(|e| TxnError::ConnectionFailure(e.to_string()))?;

        debug!("txn client ready for {}", txn_url);
        Ok(Self {
            client,
            txn_url,
            config,
        })
    }

    pub fn txn_url(&self) -> &Url {
        &self.txn_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> TxnError {
        if e.is_connect() {
            TxnError::ConnectionFailure(format!("{} unreachable: {}", self.config.endpoint, e))
        } else if e.is_timeout() {
            TxnError::SubmissionFailure(format!(
                "request timeout after {:?}",
                self.config.command_timeout
            ))
        } else {
            TxnError::SubmissionFailure(format!("network error: {}", e))
        }
    }
}

#[async_trait]
impl TxnSubmitter for HttpTxnClient {
    async fn submit(&self, txn: TxnRequest) -> Result<bool> {
        let body = WireTxnRequest::from(&txn);
        info!(
            "submitting txn to {} ({} compares, {} success ops, {} failure ops)",
            self.txn_url,
            txn.compare.len(),
            txn.success.len(),
            txn.failure.len()
        );

        let response = self
            .client
            .post(self.txn_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<WireErrorBody>(&text)
                .ok()
                .and_then(|body| body.describe())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!("txn rejected with HTTP {}: {}", status.as_u16(), detail);
            return Err(TxnError::SubmissionFailure(format!(
                "HTTP error {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let resp: WireTxnResponse = response
            .json()
            .await
            .map_err(|e| TxnError::SubmissionFailure(format!("failed to parse response: {}", e)))?;

        debug!("txn succeeded={}", resp.succeeded);
        Ok(resp.succeeded)
    }
}
