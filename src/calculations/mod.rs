pub mod backward_pass;
pub mod critical_path;
pub mod date_scheduler;
pub mod forward_pass;

use crate::error::CycleError;
use crate::graph::PertGraph;
use backward_pass::BackwardPass;
use forward_pass::ForwardPass;

/// Runs both passes and returns `graph` with early and late dates filled in.
pub fn compute_times(mut graph: PertGraph) -> Result<PertGraph, CycleError> {
    let early = ForwardPass::new(&graph).execute()?;
    let late = BackwardPass::new(&graph, &early).execute()?;

    let ids: Vec<_> = graph.events().map(|event| event.id).collect();
    for id in ids {
        if let Some(event) = graph.event_mut(id) {
            event.early_date = early[id.index()];
            event.late_date = late[id.index()];
        }
    }
    Ok(graph)
}
