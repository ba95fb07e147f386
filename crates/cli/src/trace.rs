//! Access trace parsing.
//!
//! A trace is plain text with one operation per line:
//!
//! ```text
//! # comment
//! w 0x100 0xdeadbeef
//! r 0x100
//! r 256
//! ```
//!
//! Blank lines and everything after `#` are ignored. Numbers are decimal or
//! `0x`-prefixed hexadecimal.

use thiserror::Error;

/// One operation of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Read the word at the address.
    Read(u32),
    /// Write a value to the word at the address.
    Write(u32, u32),
}

/// Errors raised while parsing a trace, tagged with the 1-based line number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// The first token is not `r` or `w`.
    #[error("line {line}: unknown operation `{op}` (expected `r` or `w`)")]
    UnknownOp {
        /// Line number.
        line: usize,
        /// Offending token.
        op: String,
    },

    /// Wrong number of operands for the operation.
    #[error("line {line}: `{op}` takes {expected} operand(s), found {found}")]
    Arity {
        /// Line number.
        line: usize,
        /// Operation token.
        op: String,
        /// Operands required.
        expected: usize,
        /// Operands present.
        found: usize,
    },

    /// An operand is not a 32-bit number.
    #[error("line {line}: invalid number `{token}`")]
    BadNumber {
        /// Line number.
        line: usize,
        /// Offending token.
        token: String,
    },
}

fn parse_number(token: &str, line: usize) -> Result<u32, TraceError> {
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => token.replace('_', "").parse(),
    };
    parsed.map_err(|_| TraceError::BadNumber {
        line,
        token: token.to_owned(),
    })
}

/// Parses a single trace line. Returns `Ok(None)` for blank and comment lines.
///
/// # Arguments
///
/// * `text` - The line without its terminator.
/// * `line` - 1-based line number for error messages.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Op>, TraceError> {
    let code = text.split_once('#').map_or(text, |(code, _)| code);
    let mut tokens = code.split_whitespace();
    let Some(op) = tokens.next() else {
        return Ok(None);
    };
    let operands: Vec<&str> = tokens.collect();

    let expected = match op {
        "r" | "R" => 1,
        "w" | "W" => 2,
        _ => {
            return Err(TraceError::UnknownOp {
                line,
                op: op.to_owned(),
            });
        }
    };
    if operands.len() != expected {
        return Err(TraceError::Arity {
            line,
            op: op.to_owned(),
            expected,
            found: operands.len(),
        });
    }

    let addr = parse_number(operands[0], line)?;
    Ok(Some(if expected == 1 {
        Op::Read(addr)
    } else {
        Op::Write(addr, parse_number(operands[1], line)?)
    }))
}

/// Parses a whole trace, stopping at the first malformed line.
pub fn parse(text: &str) -> Result<Vec<Op>, TraceError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, l)| parse_line(l, i + 1).transpose())
        .collect()
}
