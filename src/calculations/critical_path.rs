use crate::graph::{Activity, Event, EventId, PertGraph};
use std::collections::HashSet;
use tracing::debug;

/// Whether `activity` sits on a zero-slack chain.
///
/// Dummy arcs carry no work and are never critical.
pub fn is_critical(activity: &Activity, source: &Event, target: &Event) -> bool {
    !activity.is_fictitious && is_tight(activity, source, target)
}

/// Both ends have zero slack and the arc is exactly as long as the gap
/// between them, early and late.
fn is_tight(activity: &Activity, source: &Event, target: &Event) -> bool {
    source.early_date + activity.duration == target.early_date
        && source.late_date + activity.duration == target.late_date
        && source.has_zero_slack()
        && target.has_zero_slack()
}

/// Returns `graph` with `is_critical` recomputed on every activity.
pub fn mark_critical(mut graph: PertGraph) -> PertGraph {
    let flags: Vec<_> = graph
        .activities()
        .map(|activity| {
            let critical = match (graph.event(activity.source), graph.event(activity.target)) {
                (Some(source), Some(target)) => is_critical(activity, source, target),
                _ => false,
            };
            (activity.id, critical)
        })
        .collect();

    for (id, critical) in flags {
        if let Some(activity) = graph.activity_mut(id) {
            activity.is_critical = critical;
        }
    }
    graph
}

/// Names of the critical tasks, from the project start towards the end.
///
/// The walk starts at event `0` (or the first zero-slack event) and keeps
/// taking the first unvisited critical activity that leaves the current
/// event. Visited activities are tracked by task id, so tasks that share a
/// name are all listed. Where a chain continues only through a tight dummy arc, the walk
/// crosses it without naming it. If the walk covers fewer than half of the
/// critical activities, every critical activity is listed in creation order
/// instead.
pub fn critical_sequence(graph: &PertGraph) -> Vec<String> {
    let critical: Vec<&Activity> = graph
        .activities()
        .filter(|activity| activity.is_critical && !activity.is_fictitious)
        .collect();
    if critical.is_empty() {
        return Vec::new();
    }

    let start_event = match graph.event(EventId::START) {
        Some(event) if event.has_zero_slack() => Some(event.id),
        _ => graph
            .events()
            .find(|event| event.has_zero_slack())
            .map(|event| event.id),
    };
    let first = start_event
        .and_then(|id| critical.iter().find(|activity| activity.source == id))
        .or_else(|| critical.first())
        .copied();

    let Some(first) = first else {
        return discovery_order(&critical);
    };

    let mut visited_tasks: HashSet<&str> = HashSet::from([first.task_id.as_str()]);
    let mut visited_events: HashSet<EventId> = HashSet::from([first.source, first.target]);
    let mut sequence = vec![first.task_name.clone()];
    let mut current = first.target;
    let max_steps = 2 * critical.len();

    for _ in 0..max_steps {
        if let Some(next) = critical
            .iter()
            .find(|activity| activity.source == current && !visited_tasks.contains(activity.task_id.as_str()))
        {
            visited_tasks.insert(next.task_id.as_str());
            visited_events.insert(next.target);
            sequence.push(next.task_name.clone());
            current = next.target;
            continue;
        }

        match tight_dummy_from(graph, current, &visited_events) {
            Some(bridge) => {
                visited_events.insert(bridge.target);
                current = bridge.target;
            }
            None => break,
        }
    }

    if sequence.len() * 2 < critical.len() {
        debug!(
            walked = sequence.len(),
            critical = critical.len(),
            "critical walk too short, listing critical activities"
        );
        return discovery_order(&critical);
    }
    sequence
}

fn tight_dummy_from<'g>(
    graph: &'g PertGraph,
    event: EventId,
    visited: &HashSet<EventId>,
) -> Option<&'g Activity> {
    graph
        .outgoing_in_order(event)
        .into_iter()
        .filter(|activity| activity.is_fictitious && !visited.contains(&activity.target))
        .find(|activity| {
            match (graph.event(activity.source), graph.event(activity.target)) {
                (Some(source), Some(target)) => is_tight(activity, source, target),
                _ => false,
            }
        })
}

fn discovery_order(critical: &[&Activity]) -> Vec<String> {
    critical
        .iter()
        .map(|activity| activity.task_name.clone())
        .collect()
}
