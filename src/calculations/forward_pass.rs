use crate::error::{CycleError, Stage};
use crate::graph::{EventId, PertGraph};
use tracing::{debug, warn};

/// Earliest event times by repeated relaxation.
///
/// Every sweep visits the events in creation order and raises each early date
/// to the best `early(source) + duration` over its incoming arcs. The result
/// does not depend on creation order, only the number of sweeps does. More
/// than `2 × event count` sweeps means the arcs contain a positive cycle.
pub struct ForwardPass<'a> {
    graph: &'a PertGraph,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a PertGraph) -> Self {
        Self { graph }
    }

    /// Early dates indexed by [`EventId::index`].
    pub fn execute(&self) -> Result<Vec<i64>, CycleError> {
        let event_count = self.graph.event_count();
        let mut early = vec![0i64; event_count];
        let max_sweeps = 2 * event_count;
        let mut sweeps = 0;
        let mut changed = event_count;

        while changed > 0 && sweeps < max_sweeps {
            sweeps += 1;
            changed = 0;

            for event in self.graph.events() {
                if event.id == EventId::START {
                    continue;
                }
                let Some(candidate) = self
                    .graph
                    .incoming(event.id)
                    .map(|arc| early[arc.source.index()] + arc.duration)
                    .max()
                else {
                    continue;
                };
                let candidate = candidate.max(0);
                let slot = &mut early[event.id.index()];
                if *slot != candidate {
                    *slot = candidate;
                    changed += 1;
                }
            }
            debug!(sweep = sweeps, changed, "forward pass sweep");
        }

        if changed > 0 {
            warn!(sweeps, changed, "forward pass did not settle");
            return Err(CycleError::new(Stage::ForwardPass, changed));
        }
        Ok(early)
    }
}
