//! Call Instrumentation
//!
//! Decorators that record how often an operation is called and what it was
//! called with, without touching the operation itself. Each decorator takes
//! an operation as a function value and returns a new function value, so the
//! two can be stacked in either order:
//!
//! ```ignore
//! let op = |value: Value| store_value(value);
//! let op = call_history(&conn, "Cache.store", op);
//! let op = count_calls(&conn, "Cache.store", op);
//! let key = op(Value::from("bar"))?;
//! ```
//!
//! Bookkeeping goes through the backend's own atomic primitives; nothing here
//! takes a lock. A bookkeeping failure is logged and never changes the
//! wrapped call's result.

use std::fmt::Display;

use serde::Serialize;
use tracing::warn;

use crate::backend::Connection;
use crate::error::Result;

/// Suffix of the list holding an operation's input reprs
pub const INPUTS_SUFFIX: &str = ":inputs";

/// Suffix of the list holding an operation's output reprs
pub const OUTPUTS_SUFFIX: &str = ":outputs";

/// Shown by `replay` in place of an output that cannot be attributed
pub const OUTPUT_NOT_RECORDED: &str = "<output not recorded>";

/// Name of the list holding `op`'s inputs.
pub fn inputs_key(op: &str) -> String {
    format!("{}{}", op, INPUTS_SUFFIX)
}

/// Name of the list holding `op`'s outputs.
pub fn outputs_key(op: &str) -> String {
    format!("{}{}", op, OUTPUTS_SUFFIX)
}

// == Count Calls ==
/// Wraps `op` so each call first increments the counter `name`.
///
/// The counter is bumped before `op` runs, so failed calls are counted too.
pub fn count_calls<'a, C, A, R, F>(conn: &'a C, name: &str, op: F) -> impl Fn(A) -> R + 'a
where
    C: Connection + ?Sized,
    A: 'a,
    R: 'a,
    F: Fn(A) -> R + 'a,
{
    let name = name.to_string();
    move |args: A| {
        if let Err(err) = conn.increment_counter(&name) {
            warn!(op = %name, error = %err, "Failed to count call");
        }
        op(args)
    }
}

// == Call History ==
/// Wraps `op` so each call's input and output reprs are appended to
/// `"<name>:inputs"` and `"<name>:outputs"`.
///
/// The input is recorded before `op` runs. The output is recorded only when
/// `op` returns `Ok`; an `Err` is passed through unchanged with nothing
/// appended to the outputs list.
pub fn call_history<'a, C, A, R, E, F>(
    conn: &'a C,
    name: &str,
    op: F,
) -> impl Fn(A) -> std::result::Result<R, E> + 'a
where
    C: Connection + ?Sized,
    A: Display + 'a,
    R: Display + 'a,
    E: 'a,
    F: Fn(A) -> std::result::Result<R, E> + 'a,
{
    let inputs = inputs_key(name);
    let outputs = outputs_key(name);
    move |args: A| {
        append_repr(conn, &inputs, args.to_string());
        let output = op(args)?;
        append_repr(conn, &outputs, output.to_string());
        Ok(output)
    }
}

fn append_repr<C: Connection + ?Sized>(conn: &C, list: &str, repr: String) {
    if let Err(err) = conn.append_to_list(list, repr.into_bytes()) {
        warn!(list = %list, error = %err, "Failed to record call history");
    }
}

// == Reading Back ==
/// Recorded input and output reprs of one operation, in call order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallHistory {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl CallHistory {
    /// True when every recorded input has a recorded output.
    pub fn is_complete(&self) -> bool {
        self.inputs.len() == self.outputs.len()
    }

    /// Pairs each input with the output of the same call.
    ///
    /// A failed call leaves an input with no output, and the lists carry no
    /// call ids, so once the lengths differ no output can be attributed to a
    /// call. In that case every input is paired with `None`.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        let complete = self.is_complete();
        self.inputs.iter().enumerate().map(move |(i, input)| {
            let output = if complete {
                self.outputs.get(i).map(String::as_str)
            } else {
                None
            };
            (input.as_str(), output)
        })
    }
}

/// Returns how many times `op` has been called. Zero if never.
pub fn call_count<C: Connection + ?Sized>(conn: &C, op: &str) -> Result<i64> {
    Ok(conn.counter(op)?.unwrap_or(0))
}

/// Returns the recorded history of `op`.
pub fn history<C: Connection + ?Sized>(conn: &C, op: &str) -> Result<CallHistory> {
    Ok(CallHistory {
        inputs: decode_list(conn.list_range(&inputs_key(op))?),
        outputs: decode_list(conn.list_range(&outputs_key(op))?),
    })
}

/// Renders the call log of `op` as display lines:
///
/// ```text
/// Cache.store was called 2 times:
/// Cache.store(b"foo") -> 6a0f...
/// Cache.store(123) -> 1c9e...
/// ```
///
/// If any recorded call failed, outputs cannot be matched to inputs and each
/// line ends in [`OUTPUT_NOT_RECORDED`] instead.
pub fn replay<C: Connection + ?Sized>(conn: &C, op: &str) -> Result<Vec<String>> {
    let count = call_count(conn, op)?;
    let history = history(conn, op)?;
    if !history.is_complete() {
        warn!(
            op = %op,
            inputs = history.inputs.len(),
            outputs = history.outputs.len(),
            "Call history has failed calls, outputs not attributed"
        );
    }

    let mut lines = Vec::with_capacity(history.inputs.len() + 1);
    lines.push(format!("{} was called {} times:", op, count));
    lines.extend(history.pairs().map(|(input, output)| {
        format!(
            "{}({}) -> {}",
            op,
            input,
            output.unwrap_or(OUTPUT_NOT_RECORDED)
        )
    }));
    Ok(lines)
}

fn decode_list(list: Vec<Vec<u8>>) -> Vec<String> {
    list.into_iter()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .collect()
}
