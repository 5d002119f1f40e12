use crate::task::Task;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task {id} requires a non-empty name")]
    EmptyName { id: String },
    #[error("task {id} has non-positive duration {duration_days}")]
    NonPositiveDuration { id: String, duration_days: i64 },
    #[error("duplicate task id {0}")]
    DuplicateId(String),
    #[error("task {id} references unknown predecessors: {}", .missing.join(", "))]
    UnknownPredecessors { id: String, missing: Vec<String> },
    #[error("task {id} cannot be its own predecessor")]
    SelfPredecessor { id: String },
    #[error("task {id} cannot be removed, it is a predecessor of: {}", .dependents.join(", "))]
    PredecessorInUse { id: String, dependents: Vec<String> },
    #[error("task {0} not found")]
    NotFound(String),
}

pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    if task.name.trim().is_empty() {
        return Err(TaskValidationError::EmptyName {
            id: task.id.clone(),
        });
    }

    if task.duration_days <= 0 {
        return Err(TaskValidationError::NonPositiveDuration {
            id: task.id.clone(),
            duration_days: task.duration_days,
        });
    }

    if task.depends_on(&task.id) {
        return Err(TaskValidationError::SelfPredecessor {
            id: task.id.clone(),
        });
    }

    Ok(())
}

/// Checks `task` against the ids that already exist alongside it.
pub fn validate_predecessors<'a, I>(task: &Task, known_ids: I) -> Result<(), TaskValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let known: HashSet<&str> = known_ids.into_iter().collect();
    let missing: Vec<String> = task
        .unique_predecessors()
        .into_iter()
        .filter(|pred| !known.contains(pred))
        .map(ToOwned::to_owned)
        .collect();
    if !missing.is_empty() {
        return Err(TaskValidationError::UnknownPredecessors {
            id: task.id.clone(),
            missing,
        });
    }
    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id.as_str()) {
            return Err(TaskValidationError::DuplicateId(task.id.clone()));
        }
        validate_task(task)?;
    }
    for task in tasks {
        validate_predecessors(task, seen_ids.iter().copied())?;
    }
    Ok(())
}
