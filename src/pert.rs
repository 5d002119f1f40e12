use crate::calculations::compute_times;
use crate::calculations::critical_path::{critical_sequence, mark_critical};
use crate::error::CycleError;
use crate::graph::builder::GraphBuilder;
use crate::graph::{Activity, EventId, PertGraph};
use crate::metadata::JoinStrategy;
use crate::task::Task;
use serde::Serialize;
use tracing::info;

/// The PERT side of the pipeline: the timed, marked graph plus the ordered
/// critical task names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PertAnalysis {
    graph: PertGraph,
    project_duration: i64,
    critical_path: Vec<String>,
}

impl PertAnalysis {
    pub fn graph(&self) -> &PertGraph {
        &self.graph
    }

    pub fn into_graph(self) -> PertGraph {
        self.graph
    }

    pub fn project_duration(&self) -> i64 {
        self.project_duration
    }

    /// Critical task names from the project start onwards.
    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    pub fn critical_activities(&self) -> impl Iterator<Item = &Activity> {
        self.graph.activities().filter(|activity| activity.is_critical)
    }

    pub fn slack(&self, event: EventId) -> Option<i64> {
        self.graph.event(event).map(|event| event.slack())
    }

    /// Slack of the event a task finishes at.
    pub fn task_slack(&self, task_id: &str) -> Option<i64> {
        self.graph
            .activity_for_task(task_id)
            .and_then(|activity| self.slack(activity.target))
    }
}

/// Builds the event graph for `tasks`, runs both passes and marks the
/// critical activities.
pub fn analyze(tasks: &[Task], strategy: JoinStrategy) -> Result<PertAnalysis, CycleError> {
    let graph = GraphBuilder::new(tasks).with_strategy(strategy).build()?;
    let graph = mark_critical(compute_times(graph)?);
    let critical_path = critical_sequence(&graph);
    let project_duration = graph.project_duration();

    info!(
        events = graph.event_count(),
        activities = graph.activity_count(),
        project_duration,
        critical = critical_path.len(),
        strategy = %strategy,
        "pert analysis complete"
    );

    Ok(PertAnalysis {
        graph,
        project_duration,
        critical_path,
    })
}
