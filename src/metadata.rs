use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the graph builder wires a task that has several predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// The real activity leaves the end event of its longest predecessor;
    /// the other predecessors reach that event through dummy arcs.
    #[default]
    LargestDurationAnchor,
    /// Every predecessor reaches a fresh join event through a dummy arc and
    /// the real activity leaves the join event.
    JoinEvent,
}

impl JoinStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinStrategy::LargestDurationAnchor => "largest_duration_anchor",
            JoinStrategy::JoinEvent => "join_event",
        }
    }

    pub fn variants() -> &'static [(&'static str, &'static str)] {
        &[
            (
                "largest_duration_anchor",
                "Route the task from its longest predecessor (alias: anchor)",
            ),
            (
                "join_event",
                "Merge all predecessors into a dedicated join event (alias: join)",
            ),
        ]
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "largest_duration_anchor" | "anchor" => Ok(JoinStrategy::LargestDurationAnchor),
            "join_event" | "join" => Ok(JoinStrategy::JoinEvent),
            other => Err(format!("unknown join strategy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    pub project_start_date: NaiveDate,
    #[serde(default)]
    pub join_strategy: JoinStrategy,
}

impl ProjectMetadata {
    pub fn starting_on(project_start_date: NaiveDate) -> Self {
        Self {
            project_start_date,
            ..Self::default()
        }
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_description: "No description".to_string(),
            project_start_date: Local::now().date_naive(),
            join_strategy: JoinStrategy::default(),
        }
    }
}
