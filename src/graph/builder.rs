use super::{ArcSpec, EventId, PertGraph};
use crate::error::{CycleError, Stage};
use crate::metadata::JoinStrategy;
use crate::task::Task;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Level of the events reached by tasks without predecessors.
const ROOT_LEVEL: u32 = 1;

/// Turns a predecessor list into an activity-on-arc network.
///
/// Tasks are placed wave by wave: a task joins the current wave once every
/// predecessor already has its activity. Within a wave tasks keep their
/// input order, so the same input always yields the same graph.
pub struct GraphBuilder<'a> {
    tasks: &'a [Task],
    strategy: JoinStrategy,
}

/// End point of a predecessor's real activity.
#[derive(Debug, Clone, Copy)]
struct PredecessorArc<'t> {
    task_id: &'t str,
    target: EventId,
    duration: i64,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            strategy: JoinStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: JoinStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn build(&self) -> Result<PertGraph, CycleError> {
        let mut graph = PertGraph::new();
        if self.tasks.is_empty() {
            return Ok(graph);
        }

        let start = graph.add_event(0);
        let mut placed: HashSet<&str> = HashSet::with_capacity(self.tasks.len());
        let mut pending: Vec<&Task> = Vec::new();

        for task in self.tasks {
            if task.has_predecessors() {
                pending.push(task);
                continue;
            }
            let target = graph.add_event(ROOT_LEVEL);
            graph.add_activity(
                start,
                target,
                ArcSpec::real(&task.id, &task.name, task.duration_days),
                ROOT_LEVEL,
            );
            placed.insert(task.id.as_str());
        }

        let mut level = ROOT_LEVEL + 1;
        while !pending.is_empty() {
            let (ready, blocked): (Vec<&Task>, Vec<&Task>) = pending.into_iter().partition(|task| {
                task.predecessors
                    .iter()
                    .all(|pred| placed.contains(pred.as_str()))
            });

            if ready.is_empty() {
                warn!(
                    blocked = blocked.len(),
                    wave = level,
                    "no task can be placed, predecessor graph is cyclic"
                );
                return Err(CycleError::new(Stage::GraphConstruction, blocked.len()));
            }

            debug!(wave = level, placed = ready.len(), blocked = blocked.len(), "graph wave");
            for task in &ready {
                self.attach(&mut graph, task, level);
            }
            placed.extend(ready.iter().map(|task| task.id.as_str()));
            pending = blocked;
            level += 1;
        }

        info!(
            events = graph.event_count(),
            activities = graph.activity_count(),
            dummies = graph.fictitious_activities().count(),
            strategy = %self.strategy,
            "built activity-on-arc graph"
        );
        Ok(graph)
    }

    /// Adds the activity for `task`, whose predecessors are all placed.
    fn attach(&self, graph: &mut PertGraph, task: &Task, level: u32) {
        let predecessor_arcs: Vec<PredecessorArc<'_>> = task
            .unique_predecessors()
            .into_iter()
            .filter_map(|pred| {
                graph.activity_for_task(pred).map(|arc| PredecessorArc {
                    task_id: pred,
                    target: arc.target,
                    duration: arc.duration,
                })
            })
            .collect();

        let target = graph.add_event(level);
        let real = ArcSpec::real(&task.id, &task.name, task.duration_days);

        match predecessor_arcs.as_slice() {
            [] => {
                graph.add_activity(EventId::START, target, real, level);
            }
            [only] => {
                graph.add_activity(only.target, target, real, level);
            }
            [first, rest @ ..] => {
                let anchor = select_anchor(first, rest);
                let anchored = self.strategy == JoinStrategy::LargestDurationAnchor
                    && !closes_loop(graph, anchor, &predecessor_arcs);
                if anchored {
                    graph.add_activity(anchor.target, target, real, level);
                    for arc in &predecessor_arcs {
                        if arc.task_id == anchor.task_id {
                            continue;
                        }
                        graph.add_activity(arc.target, anchor.target, dummy_arc(task, arc), level);
                    }
                } else {
                    let join = graph.add_event(level);
                    for arc in &predecessor_arcs {
                        graph.add_activity(arc.target, join, dummy_arc(task, arc), level);
                    }
                    graph.add_activity(join, target, real, level);
                }
            }
        }
    }
}

/// A dummy into the anchor's end event closes a loop when that event already
/// reaches the dummy's source, e.g. when one predecessor follows another.
fn closes_loop(
    graph: &PertGraph,
    anchor: &PredecessorArc<'_>,
    arcs: &[PredecessorArc<'_>],
) -> bool {
    arcs.iter()
        .filter(|arc| arc.task_id != anchor.task_id)
        .any(|arc| graph.has_path(anchor.target, arc.target))
}

/// Longest predecessor arc; ties go to the earliest declared predecessor.
fn select_anchor<'p, 't>(
    first: &'p PredecessorArc<'t>,
    rest: &'p [PredecessorArc<'t>],
) -> &'p PredecessorArc<'t> {
    rest.iter().fold(first, |best, arc| {
        if arc.duration > best.duration { arc } else { best }
    })
}

fn dummy_arc(task: &Task, predecessor: &PredecessorArc<'_>) -> ArcSpec {
    ArcSpec::dummy(
        format!("{}~{}", task.id, predecessor.task_id),
        format!("{}0", task.name),
    )
}

/// Builds the graph with the default join strategy.
pub fn build(tasks: &[Task]) -> Result<PertGraph, CycleError> {
    GraphBuilder::new(tasks).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(task_id: &str, duration: i64) -> PredecessorArc<'_> {
        PredecessorArc {
            task_id,
            target: EventId(0),
            duration,
        }
    }

    #[test]
    fn anchor_prefers_longest_then_first_declared() {
        let arcs = [arc("a", 3), arc("b", 5), arc("c", 5)];
        assert_eq!(select_anchor(&arcs[0], &arcs[1..]).task_id, "b");

        let tied = [arc("x", 4), arc("y", 4)];
        assert_eq!(select_anchor(&tied[0], &tied[1..]).task_id, "x");
    }
}
