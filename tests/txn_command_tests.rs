/// txn command tests
///
/// Drives the full collect -> submit -> report pipeline against an
/// in-memory submitter.
/// Run with: cargo test --test txn_command_tests

use async_trait::async_trait;
use kvtxn::txn::{DeleteRangeRequest, PutRequest};
use kvtxn::{
    CompareResult, CompareTarget, LineKind, RequestOp, TxnError, TxnRequest, TxnSubmitter, run_txn,
};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct RecordingSubmitter {
    outcome: Result<bool, String>,
    submitted: Arc<Mutex<Vec<TxnRequest>>>,
}

impl RecordingSubmitter {
    fn new(outcome: Result<bool, String>) -> Self {
        Self {
            outcome,
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn submitted(&self) -> Vec<TxnRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TxnSubmitter for RecordingSubmitter {
    async fn submit(&self, txn: TxnRequest) -> kvtxn::Result<bool> {
        self.submitted.lock().unwrap().push(txn);
        self.outcome.clone().map_err(TxnError::SubmissionFailure)
    }
}

async fn run_with(
    input: &str,
    submitter: &RecordingSubmitter,
) -> (kvtxn::Result<bool>, String, bool) {
    let mut out = Vec::new();
    let mut connected = false;
    let result = run_txn(Cursor::new(input.as_bytes()), &mut out, || {
        connected = true;
        Ok(submitter.clone())
    })
    .await;
    (result, String::from_utf8(out).unwrap(), connected)
}

#[tokio::test]
async fn test_end_to_end_success_branch() {
    let submitter = RecordingSubmitter::new(Ok(true));
    let (result, out, connected) =
        run_with("k1 ver g 1\n\np k1 v1\n\nd k1\n\n", &submitter).await;

    assert!(result.unwrap());
    assert!(connected);
    assert_eq!(out.lines().last(), Some("executed success request list"));

    let submitted = submitter.submitted();
    assert_eq!(submitted.len(), 1);
    let txn = &submitted[0];
    assert_eq!(txn.compare.len(), 1);
    assert_eq!(txn.compare[0].key, b"k1");
    assert_eq!(txn.compare[0].target, CompareTarget::Version(1));
    assert_eq!(txn.compare[0].result, CompareResult::Greater);
    assert_eq!(
        txn.success,
        vec![RequestOp::Put(PutRequest {
            key: b"k1".to_vec(),
            value: b"v1".to_vec(),
        })]
    );
    assert_eq!(
        txn.failure,
        vec![RequestOp::DeleteRange(DeleteRangeRequest {
            key: b"k1".to_vec(),
            range_end: None,
        })]
    );
}

#[tokio::test]
async fn test_failure_branch_message() {
    let submitter = RecordingSubmitter::new(Ok(false));
    let (result, out, _) = run_with("k val e v\n\n\nr k\n\n", &submitter).await;

    assert!(!result.unwrap());
    assert_eq!(out.lines().last(), Some("executed failure request list"));
}

#[tokio::test]
async fn test_result_line_printed_once() {
    let submitter = RecordingSubmitter::new(Ok(true));
    let (_, out, _) = run_with("\n\n\n", &submitter).await;

    let results = out.lines().filter(|l| l.starts_with("executed")).count();
    assert_eq!(results, 1);
    // three prompts and the result
    assert_eq!(out.lines().count(), 4);
}

#[tokio::test]
async fn test_invalid_line_never_reaches_store() {
    for input in [
        "foo bad g 3\n\n\n\n",
        "foo ver g abc\n\n\n\n",
        "x y\n\n\n\n",
        "\np foo\n\n\n",
    ] {
        let submitter = RecordingSubmitter::new(Ok(true));
        let (result, out, connected) = run_with(input, &submitter).await;

        assert!(
            matches!(result, Err(TxnError::InvalidInputLine { .. })),
            "input {:?} should be rejected",
            input
        );
        assert!(!connected);
        assert!(submitter.submitted().is_empty());
        assert!(!out.contains("executed"));
    }
}

#[tokio::test]
async fn test_invalid_line_carries_raw_text() {
    let submitter = RecordingSubmitter::new(Ok(true));
    let (result, _, _) = run_with("a ver g 1\n\nr a\nq a b\n", &submitter).await;

    match result {
        Err(TxnError::InvalidInputLine { kind, line }) => {
            assert_eq!(kind, LineKind::SubRequest);
            assert_eq!(line, "q a b");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_truncated_input_never_reaches_store() {
    let submitter = RecordingSubmitter::new(Ok(true));
    let (result, _, connected) = run_with("k1 ver g 1\n\np k1 v1\n", &submitter).await;

    let err = result.unwrap_err();
    assert!(matches!(err, TxnError::InputReadFailure(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(!connected);
}

#[tokio::test]
async fn test_connection_failure_aborts() {
    let mut out = Vec::new();
    let result = run_txn(
        Cursor::new(&b"\n\n\n"[..]),
        &mut out,
        || -> kvtxn::Result<RecordingSubmitter> {
            Err(TxnError::ConnectionFailure("refused".to_string()))
        },
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, TxnError::ConnectionFailure(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(!String::from_utf8(out).unwrap().contains("executed"));
}

#[tokio::test]
async fn test_submission_failure_is_not_retried() {
    let submitter = RecordingSubmitter::new(Err("etcdserver: request timed out".to_string()));
    let (result, out, _) = run_with("\np a b\n\n\n", &submitter).await;

    let err = result.unwrap_err();
    assert!(matches!(err, TxnError::SubmissionFailure(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(submitter.submitted().len(), 1);
    assert!(!out.contains("executed"));
}
