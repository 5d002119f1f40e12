use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pipeline stage that gave up on an input it could not order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DateScheduling,
    GraphConstruction,
    ForwardPass,
    BackwardPass,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::DateScheduling => "date scheduling",
            Stage::GraphConstruction => "graph construction",
            Stage::ForwardPass => "forward pass",
            Stage::BackwardPass => "backward pass",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The predecessor relation is not a DAG, or a relaxation failed to settle
/// within its iteration bound.
///
/// The engine does not name the members of the cycle. `unresolved` counts the
/// tasks (or events) that were still pending when the stage stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("dependency cycle detected during {stage}: {unresolved} item(s) could not be resolved")]
pub struct CycleError {
    pub stage: Stage,
    pub unresolved: usize,
}

impl CycleError {
    pub fn new(stage: Stage, unresolved: usize) -> Self {
        Self { stage, unresolved }
    }
}
