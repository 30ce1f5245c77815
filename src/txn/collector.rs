// ============================================================================
// Transaction Collector
// ============================================================================
//
// Reads directives line by line and fills a TxnRequest section by section:
//
//   Compare --""--> Success --""--> Failure --""--> Done
//
// A non-empty line is parsed with the grammar of the current state and
// appended to that state's section. An empty line moves to the next state.
//
// ============================================================================

use super::grammar::{parse_compare, parse_request_op};
use super::request::TxnRequest;
use crate::core::{Result, TxnError};
use log::debug;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectState {
    Compare,
    Success,
    Failure,
    Done,
}

impl CollectState {
    /// State entered after an empty line
    pub fn next(self) -> CollectState {
        match self {
            CollectState::Compare => CollectState::Success,
            CollectState::Success => CollectState::Failure,
            CollectState::Failure | CollectState::Done => CollectState::Done,
        }
    }

    /// Instruction written before every read in this state
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            CollectState::Compare => Some(
                "entry comparison[key target expected_result compare_value] (end with empty line):",
            ),
            CollectState::Success => {
                Some("entry success request[method key value(end_range)] (end with empty line):")
            }
            CollectState::Failure => {
                Some("entry failure request[method key value(end_range)] (end with empty line):")
            }
            CollectState::Done => None,
        }
    }

    pub fn is_done(self) -> bool {
        self == CollectState::Done
    }
}

/// Drives the state machine over an input stream, echoing prompts to `output`
pub struct Collector<R, W> {
    input: R,
    output: W,
    state: CollectState,
    txn: TxnRequest,
}

impl<R: BufRead, W: Write> Collector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: CollectState::Compare,
            txn: TxnRequest::new(),
        }
    }

    pub fn state(&self) -> CollectState {
        self.state
    }

    /// Run until every section was closed by an empty line.
    ///
    /// Consumes the collector: on error the partially built request is
    /// dropped along with it.
    pub fn run(mut self) -> Result<TxnRequest> {
        while !self.state.is_done() {
            self.step()?;
        }
        Ok(self.txn)
    }

    /// Prompt, read and apply a single line
    pub fn step(&mut self) -> Result<CollectState> {
        let Some(prompt) = self.state.prompt() else {
            return Ok(self.state);
        };
        writeln!(self.output, "{}", prompt).map_err(TxnError::OutputFailure)?;
        self.output.flush().map_err(TxnError::OutputFailure)?;

        let line = self.read_line()?;
        if line.is_empty() {
            let next = self.state.next();
            debug!("txn collector: {:?} -> {:?}", self.state, next);
            self.state = next;
            return Ok(next);
        }

        match self.state {
            CollectState::Compare => {
                let compare = parse_compare(&line)?;
                debug!("txn collector: compare {:?}", compare);
                self.txn.compare.push(compare);
            }
            CollectState::Success => {
                let op = parse_request_op(&line)?;
                debug!("txn collector: success op {:?}", op);
                self.txn.success.push(op);
            }
            CollectState::Failure => {
                let op = parse_request_op(&line)?;
                debug!("txn collector: failure op {:?}", op);
                self.txn.failure.push(op);
            }
            CollectState::Done => {}
        }
        Ok(self.state)
    }

    /// Read one `\n` terminated line as raw bytes and strip the terminator.
    ///
    /// Input ending before the terminator is a read failure, a partial last
    /// line is never parsed.
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        let n = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(TxnError::InputReadFailure)?;

        if n == 0 || line.last() != Some(&b'\n') {
            return Err(TxnError::InputReadFailure(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input ended in {:?} section", self.state),
            )));
        }

        line.pop();
        Ok(line)
    }
}

/// Collect a full transaction from `input`, writing prompts to `output`
pub fn collect<R: BufRead, W: Write>(input: R, output: W) -> Result<TxnRequest> {
    Collector::new(input, output).run()
}
