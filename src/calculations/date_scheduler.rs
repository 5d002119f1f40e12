use crate::error::{CycleError, Stage};
use crate::task::Task;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A task placed on the calendar. `start_day`/`end_day` count whole days
/// from the project start; `end_day = start_day + duration_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: String,
    pub name: String,
    pub duration_days: i64,
    pub start_day: i64,
    pub end_day: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Output of the date scheduler, in input task order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    project_start: NaiveDate,
    tasks: Vec<ScheduledTask>,
}

impl GanttChart {
    pub fn new(project_start: NaiveDate, tasks: Vec<ScheduledTask>) -> Self {
        Self {
            project_start,
            tasks,
        }
    }

    pub fn project_start(&self) -> NaiveDate {
        self.project_start
    }

    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Latest end date, or `None` when nothing is scheduled.
    pub fn project_end(&self) -> Option<NaiveDate> {
        self.tasks.iter().map(|task| task.end_date).max()
    }

    /// Days from the project start to the latest end.
    pub fn duration_days(&self) -> i64 {
        self.tasks.iter().map(|task| task.end_day).max().unwrap_or(0)
    }
}

/// Relaxation scheduler over the predecessor relation.
///
/// Each pass walks the tasks in input order and places every task whose
/// predecessors are all placed. Passes stop once every task is placed, once
/// a pass places nothing, or after `2 × task count` passes; anything left
/// unplaced is reported as a cycle. An id that names no task is never
/// satisfied and ends the same way.
pub struct DateScheduler<'a> {
    tasks: &'a [Task],
}

impl<'a> DateScheduler<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }

    pub fn execute(&self, project_start: NaiveDate) -> Result<GanttChart, CycleError> {
        let spans = self.relax()?;

        let tasks = self
            .tasks
            .iter()
            .zip(spans)
            .map(|(task, (start_day, end_day))| ScheduledTask {
                id: task.id.clone(),
                name: task.name.clone(),
                duration_days: task.duration_days,
                start_day,
                end_day,
                start_date: offset_date(project_start, start_day),
                end_date: offset_date(project_start, end_day),
            })
            .collect::<Vec<_>>();

        let chart = GanttChart::new(project_start, tasks);
        info!(
            tasks = chart.len(),
            duration_days = chart.duration_days(),
            "scheduled task dates"
        );
        Ok(chart)
    }

    /// `(start_day, end_day)` per task, in input order.
    fn relax(&self) -> Result<Vec<(i64, i64)>, CycleError> {
        let task_count = self.tasks.len();
        let index: HashMap<&str, usize> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| (task.id.as_str(), idx))
            .collect();

        let mut spans: Vec<Option<(i64, i64)>> = vec![None; task_count];
        let mut remaining = task_count;
        let max_passes = 2 * task_count;
        let mut passes = 0;

        while remaining > 0 && passes < max_passes {
            passes += 1;
            let mut placed_this_pass = 0usize;

            for (idx, task) in self.tasks.iter().enumerate() {
                if spans[idx].is_some() {
                    continue;
                }
                if let Some(start) = ready_start(task, &index, &spans) {
                    spans[idx] = Some((start, start + task.duration_days));
                    placed_this_pass += 1;
                }
            }

            remaining -= placed_this_pass;
            debug!(pass = passes, placed = placed_this_pass, remaining, "date scheduling pass");
            if placed_this_pass == 0 {
                break;
            }
        }

        if remaining > 0 {
            warn!(
                remaining,
                passes, "tasks left unscheduled, dependency cycle suspected"
            );
            return Err(CycleError::new(Stage::DateScheduling, remaining));
        }

        Ok(spans.into_iter().flatten().collect())
    }
}

/// Start day of `task` if every predecessor is placed: the latest
/// predecessor end, or day 0 without predecessors.
fn ready_start(
    task: &Task,
    index: &HashMap<&str, usize>,
    spans: &[Option<(i64, i64)>],
) -> Option<i64> {
    let mut start = 0;
    for pred in &task.predecessors {
        let (_, end) = index.get(pred.as_str()).and_then(|&idx| spans[idx])?;
        start = start.max(end);
    }
    Some(start)
}

fn offset_date(project_start: NaiveDate, days: i64) -> NaiveDate {
    project_start
        .checked_add_signed(Duration::days(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Schedules `tasks` from `project_start`.
pub fn schedule(tasks: &[Task], project_start: NaiveDate) -> Result<GanttChart, CycleError> {
    DateScheduler::new(tasks).execute(project_start)
}
