use crate::task::Task;
use crate::task_validation::{self, TaskValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Caller-owned, validated task list.
///
/// Every mutation goes through validation, so the engine only ever sees
/// tasks with a name, a positive duration and predecessors that exist.
/// Cycles can still be introduced by re-pointing an existing task and are
/// reported by the scheduling pipelines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TryFrom<Vec<Task>> for TaskRepository {
    type Error = TaskValidationError;

    fn try_from(tasks: Vec<Task>) -> Result<Self, Self::Error> {
        Self::from_tasks(tasks)
    }
}

impl From<TaskRepository> for Vec<Task> {
    fn from(repository: TaskRepository) -> Self {
        repository.tasks
    }
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, TaskValidationError> {
        task_validation::validate_task_collection(&tasks)?;
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned copy for a scheduling run.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.get(task_id).is_some()
    }

    /// One more than the largest numeric id; non-numeric ids count as zero.
    pub fn next_id(&self) -> String {
        let max = self
            .tasks
            .iter()
            .map(|task| task.id.trim().parse::<u64>().unwrap_or(0))
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Ids of the tasks that list `task_id` as a predecessor.
    pub fn dependents(&self, task_id: &str) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|task| task.depends_on(task_id))
            .map(|task| task.id.clone())
            .collect()
    }

    /// Appends a task under a generated id and returns that id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        duration_days: i64,
        predecessors: Vec<String>,
    ) -> Result<String, TaskValidationError> {
        let id = self.next_id();
        let task = Task::new(id.clone(), name, duration_days).with_predecessors(predecessors);
        self.upsert(task)?;
        Ok(id)
    }

    /// Inserts `task`, or replaces the task that has the same id in place.
    pub fn upsert(&mut self, task: Task) -> Result<(), TaskValidationError> {
        task_validation::validate_task(&task)?;
        task_validation::validate_predecessors(
            &task,
            self.tasks
                .iter()
                .filter(|existing| existing.id != task.id)
                .map(|existing| existing.id.as_str()),
        )?;

        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => {
                debug!(task_id = %task.id, "replacing task");
                *existing = task;
            }
            None => {
                debug!(task_id = %task.id, "adding task");
                self.tasks.push(task);
            }
        }
        Ok(())
    }

    /// Removes a task that no other task depends on.
    pub fn remove(&mut self, task_id: &str) -> Result<Task, TaskValidationError> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| TaskValidationError::NotFound(task_id.to_string()))?;

        let dependents = self.dependents(task_id);
        if !dependents.is_empty() {
            return Err(TaskValidationError::PredecessorInUse {
                id: task_id.to_string(),
                dependents,
            });
        }

        debug!(task_id, "removing task");
        Ok(self.tasks.remove(position))
    }
}
