use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

pub mod builder;

/// Key of an event node. Event `0` is the synthetic project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    pub const START: EventId = EventId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn node(self) -> NodeIndex {
        NodeIndex::new(self.index())
    }

    fn from_node(node: NodeIndex) -> Self {
        Self(node.index() as u32)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u32);

impl ActivityId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn edge(self) -> EdgeIndex {
        EdgeIndex::new(self.index())
    }

    fn from_edge(edge: EdgeIndex) -> Self {
        Self(edge.index() as u32)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub early_date: i64,
    pub late_date: i64,
    pub level: u32,
}

impl Event {
    pub fn slack(&self) -> i64 {
        self.late_date - self.early_date
    }

    pub fn has_zero_slack(&self) -> bool {
        self.early_date == self.late_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub source: EventId,
    pub target: EventId,
    pub task_id: String,
    pub task_name: String,
    pub duration: i64,
    pub is_critical: bool,
    pub is_fictitious: bool,
    pub level: u32,
}

/// Activity-on-arc network: events are nodes, activities are edges.
///
/// Nodes and edges are only ever appended, so petgraph indices double as
/// [`EventId`] and [`ActivityId`].
#[derive(Debug, Clone, Default)]
pub struct PertGraph {
    graph: DiGraph<Event, Activity>,
    task_arcs: HashMap<String, ActivityId>,
}

impl PertGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn event_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn activity_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.graph.node_weight(id.node())
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.graph.edge_weight(id.edge())
    }

    /// Events in creation order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.graph.node_weights()
    }

    /// Activities in creation order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.graph.edge_weights()
    }

    pub fn real_activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities().filter(|activity| !activity.is_fictitious)
    }

    pub fn fictitious_activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities().filter(|activity| activity.is_fictitious)
    }

    /// The non-fictitious activity that carries `task_id`.
    pub fn activity_for_task(&self, task_id: &str) -> Option<&Activity> {
        self.task_arcs
            .get(task_id)
            .and_then(|id| self.activity(*id))
    }

    /// Arcs entering `id`, in no particular order.
    pub fn incoming(&self, id: EventId) -> impl Iterator<Item = &Activity> {
        self.graph
            .edges_directed(id.node(), Direction::Incoming)
            .map(|edge| edge.weight())
    }

    /// Arcs leaving `id`, in no particular order.
    pub fn outgoing(&self, id: EventId) -> impl Iterator<Item = &Activity> {
        self.graph
            .edges_directed(id.node(), Direction::Outgoing)
            .map(|edge| edge.weight())
    }

    /// Arcs leaving `id`, in creation order.
    pub fn outgoing_in_order(&self, id: EventId) -> Vec<&Activity> {
        let mut arcs: Vec<&Activity> = self.outgoing(id).collect();
        arcs.sort_by_key(|activity| activity.id);
        arcs
    }

    pub fn is_terminal(&self, id: EventId) -> bool {
        self.outgoing(id).next().is_none()
    }

    pub fn terminal_events(&self) -> impl Iterator<Item = &Event> {
        self.events().filter(|event| self.is_terminal(event.id))
    }

    /// Largest early date, i.e. the minimum project length once times are set.
    pub fn project_duration(&self) -> i64 {
        self.events()
            .map(|event| event.early_date)
            .max()
            .unwrap_or(0)
    }

    /// Whether `to` can be reached from `from` along the arcs.
    pub fn has_path(&self, from: EventId, to: EventId) -> bool {
        has_path_connecting(&self.graph, from.node(), to.node(), None)
    }

    pub(crate) fn add_event(&mut self, level: u32) -> EventId {
        let id = EventId(self.graph.node_count() as u32);
        let node = self.graph.add_node(Event {
            id,
            early_date: 0,
            late_date: 0,
            level,
        });
        debug_assert_eq!(EventId::from_node(node), id);
        id
    }

    pub(crate) fn add_activity(
        &mut self,
        source: EventId,
        target: EventId,
        arc: ArcSpec,
        level: u32,
    ) -> ActivityId {
        let id = ActivityId(self.graph.edge_count() as u32);
        let is_fictitious = arc.is_fictitious;
        let task_id = arc.task_id;
        let edge = self.graph.add_edge(
            source.node(),
            target.node(),
            Activity {
                id,
                source,
                target,
                task_id: task_id.clone(),
                task_name: arc.task_name,
                duration: arc.duration,
                is_critical: false,
                is_fictitious,
                level,
            },
        );
        debug_assert_eq!(ActivityId::from_edge(edge), id);
        if !is_fictitious {
            self.task_arcs.insert(task_id, id);
        }
        id
    }

    pub(crate) fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.graph.node_weight_mut(id.node())
    }

    pub(crate) fn activity_mut(&mut self, id: ActivityId) -> Option<&mut Activity> {
        self.graph.edge_weight_mut(id.edge())
    }
}

impl PartialEq for PertGraph {
    fn eq(&self, other: &Self) -> bool {
        self.events().eq(other.events()) && self.activities().eq(other.activities())
    }
}

impl Eq for PertGraph {}

impl Serialize for PertGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let events: Vec<&Event> = self.events().collect();
        let activities: Vec<&Activity> = self.activities().collect();
        let mut state = serializer.serialize_struct("PertGraph", 2)?;
        state.serialize_field("events", &events)?;
        state.serialize_field("activities", &activities)?;
        state.end()
    }
}

/// What the builder knows about an arc before it is placed in the graph.
#[derive(Debug, Clone)]
pub(crate) struct ArcSpec {
    pub task_id: String,
    pub task_name: String,
    pub duration: i64,
    pub is_fictitious: bool,
}

impl ArcSpec {
    pub fn real(task_id: &str, task_name: &str, duration: i64) -> Self {
        Self {
            task_id: task_id.to_string(),
            task_name: task_name.to_string(),
            duration,
            is_fictitious: false,
        }
    }

    pub fn dummy(task_id: String, task_name: String) -> Self {
        Self {
            task_id,
            task_name,
            duration: 0,
            is_fictitious: true,
        }
    }
}
