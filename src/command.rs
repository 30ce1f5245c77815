// ============================================================================
// txn Command
// ============================================================================
//
// collect -> connect -> submit -> report
//
// The store is only contacted once the whole transaction has been read. Any
// error aborts the pipeline; nothing is submitted from partial input.
//
// ============================================================================

use crate::client::{TxnSubmitter, report_outcome};
use crate::core::{Result, TxnError};
use crate::txn::{TxnRequest, collect};
use log::debug;
use std::io::{BufRead, Write};

/// `txn` reads everything from stdin and takes no positional arguments
pub fn check_no_args(args: &[String]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(TxnError::BadArgs(
            "txn command does not accept argument.".to_string(),
        ))
    }
}

/// Hand a collected transaction to the store and print the result line.
///
/// `connect` is invoked once; the submission is never retried.
pub async fn submit_txn<W, S, F>(txn: TxnRequest, mut output: W, connect: F) -> Result<bool>
where
    W: Write,
    S: TxnSubmitter,
    F: FnOnce() -> Result<S>,
{
    let submitter = connect()?;
    let succeeded = submitter.submit(txn).await?;
    report_outcome(succeeded, &mut output)?;
    Ok(succeeded)
}

/// Run the whole `txn` command and return the transaction outcome.
///
/// `connect` is invoked only after collection finished without error.
pub async fn run_txn<R, W, S, F>(input: R, mut output: W, connect: F) -> Result<bool>
where
    R: BufRead,
    W: Write,
    S: TxnSubmitter,
    F: FnOnce() -> Result<S>,
{
    let txn = collect_txn(input, &mut output)?;
    submit_txn(txn, output, connect).await
}

/// Blocking half of the command: read the transaction from `input`
pub fn collect_txn<R: BufRead, W: Write>(input: R, output: W) -> Result<TxnRequest> {
    let txn = collect(input, output)?;
    debug!(
        "collected txn: {} compares, {} success ops, {} failure ops",
        txn.compare.len(),
        txn.success.len(),
        txn.failure.len()
    );
    Ok(txn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Cursor;

    struct FixedOutcome(bool);

    #[async_trait]
    impl TxnSubmitter for FixedOutcome {
        async fn submit(&self, txn: TxnRequest) -> Result<bool> {
            assert_eq!(txn.success.len(), 1);
            Ok(self.0)
        }
    }

    #[test]
    fn test_collect_then_submit_on_fresh_runtime() {
        let mut out = Vec::<u8>::new();
        let txn = collect_txn(Cursor::new(&b"\np k v\n\n\n"[..]), &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("executed"));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let succeeded = runtime
            .block_on(submit_txn(txn, &mut out, || Ok(FixedOutcome(false))))
            .unwrap();

        assert!(!succeeded);
        assert_eq!(
            String::from_utf8(out).unwrap().lines().last(),
            Some("executed failure request list")
        );
    }

    #[test]
    fn test_check_no_args() {
        assert!(check_no_args(&[]).is_ok());

        let err = check_no_args(&["extra".to_string()]).unwrap_err();
        assert!(matches!(err, TxnError::BadArgs(_)));
        assert_eq!(err.exit_code(), crate::core::error::EXIT_BAD_ARGS);
    }
}
