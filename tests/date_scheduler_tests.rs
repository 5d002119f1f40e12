use chrono::NaiveDate;
use pert_gantt::{CycleError, Stage, Task, schedule};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn span(chart: &pert_gantt::GanttChart, id: &str) -> (i64, i64) {
    let task = chart.get(id).unwrap();
    (task.start_day, task.end_day)
}

#[test]
fn chain_of_two_tasks() {
    let tasks = vec![
        Task::new("A", "A", 3),
        Task::new("B", "B", 2).with_predecessors(["A"]),
    ];
    let chart = schedule(&tasks, d(2025, 1, 6)).unwrap();

    assert_eq!(span(&chart, "A"), (0, 3));
    assert_eq!(span(&chart, "B"), (3, 5));
    assert_eq!(chart.get("B").unwrap().start_date, d(2025, 1, 9));
    assert_eq!(chart.get("B").unwrap().end_date, d(2025, 1, 11));
    assert_eq!(chart.duration_days(), 5);
}

#[test]
fn start_follows_latest_predecessor_end() {
    // 1(2) -> {2(3), 3(1)} -> 4(2)
    let tasks = vec![
        Task::new("1", "T1", 2),
        Task::new("2", "T2", 3).with_predecessors(["1"]),
        Task::new("3", "T3", 1).with_predecessors(["1"]),
        Task::new("4", "T4", 2).with_predecessors(["3", "2"]),
    ];
    let chart = schedule(&tasks, d(2025, 1, 6)).unwrap();

    assert_eq!(span(&chart, "2"), (2, 5));
    assert_eq!(span(&chart, "3"), (2, 3));
    assert_eq!(span(&chart, "4"), (5, 7));
    assert_eq!(chart.project_end(), Some(d(2025, 1, 13)));
}

#[test]
fn output_keeps_input_order() {
    let tasks = vec![
        Task::new("z", "Last", 1).with_predecessors(["a"]),
        Task::new("a", "First", 1),
    ];
    let chart = schedule(&tasks, d(2025, 1, 1)).unwrap();
    let ids: Vec<&str> = chart.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);
}

#[test]
fn mutual_dependency_is_a_cycle() {
    let tasks = vec![
        Task::new("A", "A", 1).with_predecessors(["B"]),
        Task::new("B", "B", 1).with_predecessors(["A"]),
    ];
    let err = schedule(&tasks, d(2025, 1, 1)).unwrap_err();
    assert_eq!(err, CycleError::new(Stage::DateScheduling, 2));
}

#[test]
fn self_predecessor_is_a_cycle() {
    let tasks = vec![
        Task::new("A", "A", 1),
        Task::new("B", "B", 1).with_predecessors(["B"]),
    ];
    let err = schedule(&tasks, d(2025, 1, 1)).unwrap_err();
    assert_eq!(err.stage, Stage::DateScheduling);
    assert_eq!(err.unresolved, 1);
}

#[test]
fn caller_tasks_are_not_modified() {
    let tasks = vec![
        Task::new("A", "A", 3),
        Task::new("B", "B", 2).with_predecessors(["A"]),
    ];
    let before = tasks.clone();
    schedule(&tasks, d(2025, 1, 1)).unwrap();
    assert_eq!(tasks, before);
}
