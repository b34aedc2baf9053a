//! Operation scripts for the command line.
//!
//! A script is a list of tokens such as `insert=5`, `change=2:40` or `pop`.
//! Each token parses into one operation; running a script applies the
//! operations in order and records what each one returned.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::HeapError;
use crate::max_heap::MaxHeap;
use crate::min_stack::StackWithMin;
use crate::types::{FinalState, Outcome, RunReport, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOp {
    Insert(i64),
    Extract,
    Max,
    Remove(usize),
    Change { index: usize, priority: i64 },
    SiftUp(usize),
    SiftDown(usize),
    Current(usize),
    Parent(usize),
    Left(usize),
    Right(usize),
    Last,
    Snapshot,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Push(i64),
    Pop,
    Min,
    Peek,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    UnknownOp(String),
    MissingArgument(String),
    UnexpectedArgument(String),
    BadNumber(String, ParseIntError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownOp(token) => write!(f, "Unknown operation: {}", token),
            ScriptError::MissingArgument(op) => write!(f, "Operation {} needs an argument", op),
            ScriptError::UnexpectedArgument(op) => {
                write!(f, "Operation {} takes no argument", op)
            }
            ScriptError::BadNumber(token, e) => write!(f, "Invalid number in {}: {}", token, e),
        }
    }
}

impl std::error::Error for ScriptError {}

fn split_token(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (token.trim(), None),
    }
}

fn number<T>(token: &str, arg: Option<&str>) -> Result<T, ScriptError>
where
    T: FromStr<Err = ParseIntError>,
{
    let arg = arg.ok_or_else(|| ScriptError::MissingArgument(token.to_string()))?;
    arg.parse()
        .map_err(|e| ScriptError::BadNumber(token.to_string(), e))
}

fn no_argument<T>(token: &str, arg: Option<&str>, op: T) -> Result<T, ScriptError> {
    match arg {
        Some(_) => Err(ScriptError::UnexpectedArgument(token.to_string())),
        None => Ok(op),
    }
}

impl FromStr for HeapOp {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, arg) = split_token(token);

        match name {
            "insert" => Ok(HeapOp::Insert(number(token, arg)?)),
            "remove" => Ok(HeapOp::Remove(number(token, arg)?)),
            "sift-up" => Ok(HeapOp::SiftUp(number(token, arg)?)),
            "sift-down" => Ok(HeapOp::SiftDown(number(token, arg)?)),
            "current" => Ok(HeapOp::Current(number(token, arg)?)),
            "parent" => Ok(HeapOp::Parent(number(token, arg)?)),
            "left" => Ok(HeapOp::Left(number(token, arg)?)),
            "right" => Ok(HeapOp::Right(number(token, arg)?)),
            "change" => {
                let arg = arg.ok_or_else(|| ScriptError::MissingArgument(token.to_string()))?;
                let (index, priority) = arg
                    .split_once(':')
                    .ok_or_else(|| ScriptError::MissingArgument(token.to_string()))?;
                Ok(HeapOp::Change {
                    index: number(token, Some(index.trim()))?,
                    priority: number(token, Some(priority.trim()))?,
                })
            }
            "extract" => no_argument(token, arg, HeapOp::Extract),
            "max" => no_argument(token, arg, HeapOp::Max),
            "last" => no_argument(token, arg, HeapOp::Last),
            "snapshot" => no_argument(token, arg, HeapOp::Snapshot),
            "check" => no_argument(token, arg, HeapOp::Check),
            _ => Err(ScriptError::UnknownOp(token.to_string())),
        }
    }
}

impl FromStr for StackOp {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, arg) = split_token(token);

        match name {
            "push" => Ok(StackOp::Push(number(token, arg)?)),
            "pop" => no_argument(token, arg, StackOp::Pop),
            "min" => no_argument(token, arg, StackOp::Min),
            "peek" => no_argument(token, arg, StackOp::Peek),
            "empty" => no_argument(token, arg, StackOp::Empty),
            _ => Err(ScriptError::UnknownOp(token.to_string())),
        }
    }
}

impl fmt::Display for HeapOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapOp::Insert(v) => write!(f, "insert={}", v),
            HeapOp::Extract => write!(f, "extract"),
            HeapOp::Max => write!(f, "max"),
            HeapOp::Remove(i) => write!(f, "remove={}", i),
            HeapOp::Change { index, priority } => write!(f, "change={}:{}", index, priority),
            HeapOp::SiftUp(i) => write!(f, "sift-up={}", i),
            HeapOp::SiftDown(i) => write!(f, "sift-down={}", i),
            HeapOp::Current(i) => write!(f, "current={}", i),
            HeapOp::Parent(i) => write!(f, "parent={}", i),
            HeapOp::Left(i) => write!(f, "left={}", i),
            HeapOp::Right(i) => write!(f, "right={}", i),
            HeapOp::Last => write!(f, "last"),
            HeapOp::Snapshot => write!(f, "snapshot"),
            HeapOp::Check => write!(f, "check"),
        }
    }
}

impl fmt::Display for StackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackOp::Push(v) => write!(f, "push={}", v),
            StackOp::Pop => write!(f, "pop"),
            StackOp::Min => write!(f, "min"),
            StackOp::Peek => write!(f, "peek"),
            StackOp::Empty => write!(f, "empty"),
        }
    }
}

/// Parse every token, stopping at the first one that is not an operation.
pub fn parse_ops<T>(tokens: &[String]) -> Result<Vec<T>, ScriptError>
where
    T: FromStr<Err = ScriptError>,
{
    tokens.iter().map(|t| t.parse()).collect()
}

fn into_outcome(result: Result<Outcome, HeapError>) -> Outcome {
    result.unwrap_or_else(|e| Outcome::Failed {
        error: e.to_string(),
    })
}

fn apply_heap_op(heap: &mut MaxHeap, op: HeapOp) -> Result<Outcome, HeapError> {
    let outcome = match op {
        HeapOp::Insert(value) => {
            heap.insert(value)?;
            Outcome::Done
        }
        HeapOp::Extract => Outcome::Value {
            value: heap.extract_max(),
        },
        HeapOp::Max => Outcome::Value {
            value: heap.get_max(),
        },
        HeapOp::Remove(index) => Outcome::Value {
            value: Some(heap.remove(index)?),
        },
        HeapOp::Change { index, priority } => {
            heap.change_priority(index, priority)?;
            Outcome::Done
        }
        HeapOp::SiftUp(index) => {
            heap.sift_up(index)?;
            Outcome::Done
        }
        HeapOp::SiftDown(index) => {
            heap.sift_down(index)?;
            Outcome::Done
        }
        HeapOp::Current(index) => Outcome::Value {
            value: heap.get_current(index)?,
        },
        HeapOp::Parent(index) => Outcome::Value {
            value: heap.get_parent(index)?,
        },
        HeapOp::Left(index) => Outcome::Value {
            value: heap.get_left_child(index)?,
        },
        HeapOp::Right(index) => Outcome::Value {
            value: heap.get_right_child(index)?,
        },
        HeapOp::Last => Outcome::Value {
            value: Some(heap.get_last_index() as i64),
        },
        HeapOp::Snapshot => Outcome::Snapshot {
            values: heap.get_heap(),
        },
        HeapOp::Check => Outcome::Flag {
            value: heap.is_heap(),
        },
    };

    Ok(outcome)
}

/// Apply `ops` to `heap` in order. A failing operation is recorded and the
/// run carries on with the next one.
pub fn run_heap(heap: &mut MaxHeap, ops: &[HeapOp]) -> RunReport {
    let steps = ops
        .iter()
        .map(|&op| {
            let outcome = into_outcome(apply_heap_op(heap, op));
            if let Outcome::Failed { error } = &outcome {
                log::debug!("{} failed: {}", op, error);
            }
            Step {
                op: op.to_string(),
                outcome,
            }
        })
        .collect();

    RunReport {
        structure: "heap".to_string(),
        steps,
        final_state: FinalState::Heap {
            size: heap.len(),
            capacity: heap.capacity(),
            mode: heap.mode(),
            storage: heap.get_heap(),
            valid: heap.is_heap(),
        },
    }
}

pub fn run_stack(stack: &mut StackWithMin, ops: &[StackOp]) -> RunReport {
    let steps = ops
        .iter()
        .map(|&op| {
            let outcome = match op {
                StackOp::Push(value) => {
                    stack.push(value);
                    Outcome::Done
                }
                StackOp::Pop => Outcome::Value { value: stack.pop() },
                StackOp::Min => Outcome::Value {
                    value: stack.get_min(),
                },
                StackOp::Peek => Outcome::Value {
                    value: stack.peek(),
                },
                StackOp::Empty => Outcome::Flag {
                    value: stack.is_empty(),
                },
            };
            Step {
                op: op.to_string(),
                outcome,
            }
        })
        .collect();

    RunReport {
        structure: "stack".to_string(),
        steps,
        final_state: FinalState::Stack {
            len: stack.len(),
            top: stack.peek(),
            min: stack.get_min(),
        },
    }
}
