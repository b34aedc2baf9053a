use serde::Serialize;

use crate::max_heap::SiftMode;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub structure: String,
    pub steps: Vec<Step>,
    pub final_state: FinalState,
}

impl RunReport {
    pub fn failed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, Outcome::Failed { .. }))
            .count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub op: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Done,
    Value { value: Option<i64> },
    Flag { value: bool },
    Snapshot { values: Vec<i64> },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FinalState {
    Heap {
        size: usize,
        capacity: usize,
        mode: SiftMode,
        storage: Vec<i64>,
        valid: bool,
    },
    Stack {
        len: usize,
        top: Option<i64>,
        min: Option<i64>,
    },
}
