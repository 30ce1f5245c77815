pub mod error;

pub use error::{LineKind, Result, TxnError};
