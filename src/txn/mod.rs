// ============================================================================
// Transaction Building Module
// ============================================================================
//
// Turns line-oriented directives into a TxnRequest:
// - request:   compare / request-op model of a conditional transaction
// - grammar:   the two line grammars (comparison, sub-request)
// - collector: state machine that feeds lines to the grammars
//
// ============================================================================

pub mod collector;
pub mod grammar;
pub mod request;

pub use collector::{CollectState, Collector, collect};
pub use grammar::{parse_compare, parse_request_op};
pub use request::{
    Compare, CompareResult, CompareTarget, DeleteRangeRequest, PutRequest, RangeRequest,
    RequestOp, TargetKind, TxnRequest,
};
