pub mod config;
pub mod http;
pub mod wire;

use crate::core::{Result, TxnError};
use crate::txn::TxnRequest;
use async_trait::async_trait;
use std::io::Write;

pub use config::ClientConfig;
pub use http::HttpTxnClient;

pub const SUCCESS_MESSAGE: &str = "executed success request list";
pub const FAILURE_MESSAGE: &str = "executed failure request list";

/// Consumer of a completed transaction.
///
/// `submit` is called exactly once per transaction and is never retried:
/// the branch requests are not assumed to be idempotent.
#[async_trait]
pub trait TxnSubmitter: Send + Sync {
    /// Execute `txn` atomically; `true` when every comparison held
    async fn submit(&self, txn: TxnRequest) -> Result<bool>;
}

/// Fixed result line for a transaction outcome
pub fn outcome_message(succeeded: bool) -> &'static str {
    if succeeded {
        SUCCESS_MESSAGE
    } else {
        FAILURE_MESSAGE
    }
}

/// Print the result line for a transaction outcome
pub fn report_outcome<W: Write>(succeeded: bool, mut output: W) -> Result<()> {
    writeln!(output, "{}", outcome_message(succeeded)).map_err(TxnError::OutputFailure)
}
