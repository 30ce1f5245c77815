//! JSON form of transactions as accepted by the store's HTTP gateway.
//!
//! Byte fields travel base64 encoded and 64-bit integers as decimal strings.

use crate::txn::{Compare, CompareResult, CompareTarget, RequestOp, TxnRequest};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[derive(Debug, Serialize)]
pub struct WireTxnRequest {
    pub compare: Vec<WireCompare>,
    pub success: Vec<WireRequestOp>,
    pub failure: Vec<WireRequestOp>,
}

#[derive(Debug, Serialize)]
pub struct WireCompare {
    pub result: &'static str,
    pub target: &'static str,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WireRequestOp {
    RequestRange(WireKeyRange),
    RequestPut(WirePut),
    RequestDeleteRange(WireKeyRange),
}

#[derive(Debug, Serialize)]
pub struct WireKeyRange {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WirePut {
    pub key: String,
    pub value: String,
}

/// Only the outcome is consumed; `succeeded` is omitted by the gateway when false
#[derive(Debug, Deserialize)]
pub struct WireTxnResponse {
    #[serde(default)]
    pub succeeded: bool,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Default, Deserialize)]
pub struct WireErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl WireErrorBody {
    pub fn describe(&self) -> Option<String> {
        let text = self.message.as_ref().or(self.error.as_ref())?;
        Some(match self.code {
            Some(code) => format!("{} (code {})", text, code),
            None => text.clone(),
        })
    }
}

impl From<&Compare> for WireCompare {
    fn from(compare: &Compare) -> Self {
        let result = match compare.result {
            CompareResult::Greater => "GREATER",
            CompareResult::Equal => "EQUAL",
            CompareResult::Less => "LESS",
        };

        let (target, version, create_revision, mod_revision, value) = match &compare.target {
            CompareTarget::Version(v) => ("VERSION", Some(v.to_string()), None, None, None),
            CompareTarget::CreateRevision(rev) => ("CREATE", None, Some(rev.to_string()), None, None),
            CompareTarget::ModRevision(rev) => ("MOD", None, None, Some(rev.to_string()), None),
            CompareTarget::Value(value) => ("VALUE", None, None, None, Some(encode(value))),
        };

        WireCompare {
            result,
            target,
            key: encode(&compare.key),
            version,
            create_revision,
            mod_revision,
            value,
        }
    }
}

impl From<&RequestOp> for WireRequestOp {
    fn from(op: &RequestOp) -> Self {
        match op {
            RequestOp::Range(r) => WireRequestOp::RequestRange(WireKeyRange {
                key: encode(&r.key),
                range_end: r.range_end.as_deref().map(encode),
            }),
            RequestOp::Put(p) => WireRequestOp::RequestPut(WirePut {
                key: encode(&p.key),
                value: encode(&p.value),
            }),
            RequestOp::DeleteRange(d) => WireRequestOp::RequestDeleteRange(WireKeyRange {
                key: encode(&d.key),
                range_end: d.range_end.as_deref().map(encode),
            }),
        }
    }
}

impl From<&TxnRequest> for WireTxnRequest {
    fn from(txn: &TxnRequest) -> Self {
        Self {
            compare: txn.compare.iter().map(WireCompare::from).collect(),
            success: txn.success.iter().map(WireRequestOp::from).collect(),
            failure: txn.failure.iter().map(WireRequestOp::from).collect(),
        }
    }
}
