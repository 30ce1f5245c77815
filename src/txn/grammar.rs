// ============================================================================
// Transaction Line Grammar
// ============================================================================
//
// Comparison line:  key target operator expected_value
// Sub-request line: method key [range_end | value]
//
// Fields are separated by single spaces; two spaces in a row yield an empty
// field. There is no quoting or escaping.
//
// ============================================================================

use super::request::{
    Compare, CompareResult, CompareTarget, DeleteRangeRequest, PutRequest, RangeRequest,
    RequestOp,
};
use crate::core::{Result, TxnError};

fn fields(line: &[u8]) -> Vec<&[u8]> {
    line.split(|b| *b == b' ').collect()
}

/// Parse one comparison line, e.g. `foo ver g 3` or `bar value e hello`.
///
/// Key and value fields are taken as raw bytes; only revision-like
/// expected values must be decimal text.
pub fn parse_compare(line: impl AsRef<[u8]>) -> Result<Compare> {
    let line = line.as_ref();
    let parts = fields(line);
    let [key, target, operator, expected] = parts.as_slice() else {
        return Err(TxnError::invalid_comparison(line));
    };

    let revision = || {
        std::str::from_utf8(expected)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| TxnError::invalid_comparison(line))
    };

    let target = match *target {
        b"ver" | b"version" => CompareTarget::Version(revision()?),
        b"c" | b"create" => CompareTarget::CreateRevision(revision()?),
        b"m" | b"mod" => CompareTarget::ModRevision(revision()?),
        b"val" | b"value" => CompareTarget::Value(expected.to_vec()),
        _ => return Err(TxnError::invalid_comparison(line)),
    };

    let result = match *operator {
        b"g" | b"greater" => CompareResult::Greater,
        b"e" | b"equal" => CompareResult::Equal,
        b"l" | b"less" => CompareResult::Less,
        _ => return Err(TxnError::invalid_comparison(line)),
    };

    Ok(Compare {
        key: key.to_vec(),
        result,
        target,
    })
}

/// Parse one sub-request line, e.g. `p foo bar`, `r foo zzz` or `d foo`
pub fn parse_request_op(line: impl AsRef<[u8]>) -> Result<RequestOp> {
    let line = line.as_ref();
    let parts = fields(line);
    // Stricter than "at least two fields": a fourth field would otherwise be
    // dropped without notice, so it is rejected.
    let (method, key, extra) = match parts.as_slice() {
        [method, key] => (*method, *key, None),
        [method, key, extra] => (*method, *key, Some(*extra)),
        _ => return Err(TxnError::invalid_sub_request(line)),
    };

    let key = key.to_vec();
    let extra = extra.map(<[u8]>::to_vec);

    let op = match method {
        b"r" | b"range" => RequestOp::Range(RangeRequest {
            key,
            range_end: extra,
        }),
        b"p" | b"put" => {
            let value = extra.ok_or_else(|| TxnError::invalid_sub_request(line))?;
            RequestOp::Put(PutRequest { key, value })
        }
        b"d" | b"deleteRange" => RequestOp::DeleteRange(DeleteRangeRequest {
            key,
            range_end: extra,
        }),
        _ => return Err(TxnError::invalid_sub_request(line)),
    };

    Ok(op)
}
