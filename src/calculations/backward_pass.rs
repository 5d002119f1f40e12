use crate::error::{CycleError, Stage};
use crate::graph::PertGraph;
use tracing::{debug, warn};

/// Latest event times, given the early dates from the forward pass.
///
/// Every late date starts at the project duration. A terminal event keeps
/// its own early date as late date; any other event takes the tightest
/// `late(target) - duration` over its outgoing arcs. Sweeps run from the
/// newest event back to event `0` until nothing moves, bounded like the
/// forward pass.
pub struct BackwardPass<'a> {
    graph: &'a PertGraph,
    early: &'a [i64],
}

impl<'a> BackwardPass<'a> {
    pub fn new(graph: &'a PertGraph, early: &'a [i64]) -> Self {
        Self { graph, early }
    }

    /// Late dates indexed by [`crate::graph::EventId::index`].
    pub fn execute(&self) -> Result<Vec<i64>, CycleError> {
        let event_count = self.graph.event_count();
        let project_duration = self.early.iter().copied().max().unwrap_or(0);
        let mut late = vec![project_duration; event_count];
        let events: Vec<_> = self.graph.events().map(|event| event.id).collect();
        let max_sweeps = 2 * event_count;
        let mut sweeps = 0;
        let mut changed = event_count;

        while changed > 0 && sweeps < max_sweeps {
            sweeps += 1;
            changed = 0;

            for &id in events.iter().rev() {
                let early = self.early.get(id.index()).copied().unwrap_or(0);
                let candidate = self
                    .graph
                    .outgoing(id)
                    .map(|arc| late[arc.target.index()] - arc.duration)
                    .min()
                    .map_or(early, |tightest| tightest.min(project_duration));
                let slot = &mut late[id.index()];
                if *slot != candidate {
                    *slot = candidate;
                    changed += 1;
                }
            }
            debug!(sweep = sweeps, changed, "backward pass sweep");
        }

        if changed > 0 {
            warn!(sweeps, changed, "backward pass did not settle");
            return Err(CycleError::new(Stage::BackwardPass, changed));
        }
        Ok(late)
    }
}
