use crate::calculations::date_scheduler::{DateScheduler, GanttChart};
use crate::error::CycleError;
use crate::metadata::{JoinStrategy, ProjectMetadata};
use crate::pert::{self, PertAnalysis};
use crate::repository::TaskRepository;
use crate::task::Task;
use crate::task_validation::TaskValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub task_count: usize,
    pub event_count: usize,
    pub activity_count: usize,
    pub fictitious_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<String>,
    pub project_duration_days: i64,
    pub project_start: NaiveDate,
    pub latest_finish: Option<NaiveDate>,
}

impl RefreshSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("events={}", self.event_count));
        parts.push(format!("activities={}", self.activity_count));
        if self.fictitious_count > 0 {
            parts.push(format!("dummies={}", self.fictitious_count));
        }
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}d", self.project_duration_days));
        parts.push(format!("start={}", self.project_start));
        if let Some(date) = self.latest_finish {
            parts.push(format!("finish={}", date));
        }
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
}

/// A task list together with the project settings it is scheduled under.
///
/// Both pipelines run on a snapshot of the tasks, so a `Schedule` can be
/// edited and recomputed as often as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    metadata: ProjectMetadata,
    tasks: TaskRepository,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_metadata(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            tasks: TaskRepository::new(),
        }
    }

    pub fn from_parts(metadata: ProjectMetadata, tasks: TaskRepository) -> Self {
        Self { metadata, tasks }
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: ProjectMetadata) {
        self.metadata = metadata;
    }

    pub fn project_start_date(&self) -> NaiveDate {
        self.metadata.project_start_date
    }

    pub fn set_project_start_date(&mut self, date: NaiveDate) {
        self.metadata.project_start_date = date;
    }

    pub fn join_strategy(&self) -> JoinStrategy {
        self.metadata.join_strategy
    }

    pub fn set_join_strategy(&mut self, strategy: JoinStrategy) {
        self.metadata.join_strategy = strategy;
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.tasks
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Adds a task under the next free numeric id and returns that id.
    pub fn add_task(
        &mut self,
        name: &str,
        duration_days: i64,
        predecessors: Vec<String>,
    ) -> Result<String, TaskValidationError> {
        self.tasks.add(name, duration_days, predecessors)
    }

    /// Inserts or updates a task. `None` keeps an existing task's
    /// predecessors (or none for a new task).
    pub fn upsert_task(
        &mut self,
        id: &str,
        name: &str,
        duration_days: i64,
        predecessors: Option<Vec<String>>,
    ) -> Result<(), TaskValidationError> {
        let predecessors = match predecessors {
            Some(preds) => preds,
            None => self
                .tasks
                .get(id)
                .map(|task| task.predecessors.clone())
                .unwrap_or_default(),
        };
        self.upsert_task_record(Task::new(id, name, duration_days).with_predecessors(predecessors))
    }

    pub fn upsert_task_record(&mut self, task: Task) -> Result<(), TaskValidationError> {
        self.tasks.upsert(task)
    }

    pub fn delete_task(&mut self, task_id: &str) -> Result<Task, TaskValidationError> {
        self.tasks.remove(task_id)
    }

    /// Calendar dates for every task from the project start.
    pub fn gantt(&self) -> Result<GanttChart, CycleError> {
        let tasks = self.tasks.snapshot();
        DateScheduler::new(&tasks).execute(self.metadata.project_start_date)
    }

    /// Event graph, event times and critical path.
    pub fn pert(&self) -> Result<PertAnalysis, CycleError> {
        let tasks = self.tasks.snapshot();
        pert::analyze(&tasks, self.metadata.join_strategy)
    }

    /// Runs both pipelines and summarises the outcome.
    pub fn refresh(&self) -> Result<RefreshSummary, ScheduleError> {
        let gantt = self.gantt()?;
        let analysis = self.pert()?;
        let graph = analysis.graph();

        let summary = RefreshSummary {
            task_count: self.tasks.len(),
            event_count: graph.event_count(),
            activity_count: graph.activity_count(),
            fictitious_count: graph.fictitious_activities().count(),
            critical_count: analysis.critical_activities().count(),
            critical_path: analysis.critical_path().to_vec(),
            project_duration_days: analysis.project_duration(),
            project_start: gantt.project_start(),
            latest_finish: gantt.project_end(),
        };
        info!(summary = %summary.to_cli_summary(), "schedule refreshed");
        Ok(summary)
    }
}
