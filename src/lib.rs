// ============================================================================
// kvtxn Library
// ============================================================================

pub mod client;
pub mod command;
pub mod core;
pub mod txn;

// Re-export main types for convenience
pub use client::{ClientConfig, HttpTxnClient, TxnSubmitter, report_outcome};
pub use command::{check_no_args, collect_txn, run_txn, submit_txn};
pub use crate::core::{LineKind, Result, TxnError};
pub use txn::{
    CollectState, Collector, Compare, CompareResult, CompareTarget, RequestOp, TxnRequest,
    collect,
};
