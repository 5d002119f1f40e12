use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A unit of work as supplied by the caller.
///
/// `predecessors` keeps the declared order: graph construction breaks ties
/// between equally long predecessors by that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub duration_days: i64,
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_days,
            predecessors: Vec::new(),
        }
    }

    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_predecessors(&self) -> bool {
        !self.predecessors.is_empty()
    }

    pub fn depends_on(&self, task_id: &str) -> bool {
        self.predecessors.iter().any(|pred| pred == task_id)
    }

    /// Predecessor ids in declared order with repeats dropped.
    pub fn unique_predecessors(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.predecessors.len());
        self.predecessors
            .iter()
            .map(String::as_str)
            .filter(|pred| seen.insert(*pred))
            .collect()
    }
}

/// Splits a comma separated predecessor list such as `"1, 2,3"`.
pub fn parse_predecessor_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

pub fn join_predecessor_list(predecessors: &[String]) -> String {
    predecessors.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_predecessors_keeps_declared_order() {
        let task = Task::new("4", "Integrate", 2).with_predecessors(["3", "1", "3", "2", "1"]);
        assert_eq!(task.unique_predecessors(), vec!["3", "1", "2"]);
    }

    #[test]
    fn parse_predecessor_list_trims_and_skips_blanks() {
        assert_eq!(parse_predecessor_list(" 1, 2,,3 "), vec!["1", "2", "3"]);
        assert!(parse_predecessor_list("").is_empty());
    }
}
