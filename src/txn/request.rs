// ============================================================================
// Transaction Request Model
// ============================================================================

/// Which attribute of a key a comparison checks, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Version,
    CreateRevision,
    ModRevision,
    Value,
}

/// Comparison target together with the expected value for it.
///
/// The payload kind always matches the target: revision-like targets carry
/// an integer, `Value` carries raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareTarget {
    Version(i64),
    CreateRevision(i64),
    ModRevision(i64),
    Value(Vec<u8>),
}

impl CompareTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            CompareTarget::Version(_) => TargetKind::Version,
            CompareTarget::CreateRevision(_) => TargetKind::CreateRevision,
            CompareTarget::ModRevision(_) => TargetKind::ModRevision,
            CompareTarget::Value(_) => TargetKind::Value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Greater,
    Equal,
    Less,
}

/// One conditional check of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compare {
    pub key: Vec<u8>,
    pub result: CompareResult,
    pub target: CompareTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRequest {
    pub key: Vec<u8>,
    /// Exclusive upper bound; `None` targets `key` alone
    pub range_end: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRangeRequest {
    pub key: Vec<u8>,
    /// Exclusive upper bound; `None` targets `key` alone
    pub range_end: Option<Vec<u8>>,
}

/// A request executed by one of the transaction branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOp {
    Range(RangeRequest),
    Put(PutRequest),
    DeleteRange(DeleteRangeRequest),
}

impl RequestOp {
    pub fn key(&self) -> &[u8] {
        match self {
            RequestOp::Range(r) => &r.key,
            RequestOp::Put(p) => &p.key,
            RequestOp::DeleteRange(d) => &d.key,
        }
    }
}

/// An atomic conditional transaction.
///
/// If every entry of `compare` holds the store executes `success`,
/// otherwise `failure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxnRequest {
    pub compare: Vec<Compare>,
    pub success: Vec<RequestOp>,
    pub failure: Vec<RequestOp>,
}

impl TxnRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.compare.is_empty() && self.success.is_empty() && self.failure.is_empty()
    }
}
