use pert_gantt::task_validation::validate_task_collection;
use pert_gantt::{Task, TaskRepository, TaskValidationError};

#[test]
fn task_json_defaults_missing_predecessors() {
    let task: Task = serde_json::from_str(r#"{"id":"7","name":"Paint","duration_days":2}"#).unwrap();
    assert_eq!(task, Task::new("7", "Paint", 2));
    assert!(!task.has_predecessors());
}

#[test]
fn collection_validation_reports_first_problem() {
    let duplicate = vec![Task::new("1", "A", 1), Task::new("1", "B", 1)];
    assert_eq!(
        validate_task_collection(&duplicate),
        Err(TaskValidationError::DuplicateId("1".into()))
    );

    let missing = vec![
        Task::new("1", "A", 1),
        Task::new("2", "B", 1).with_predecessors(["1", "7", "8"]),
    ];
    let err = validate_task_collection(&missing).unwrap_err();
    assert_eq!(err.to_string(), "task 2 references unknown predecessors: 7, 8");
}

#[test]
fn collection_validation_accepts_forward_references() {
    let tasks = vec![
        Task::new("2", "B", 1).with_predecessors(["1"]),
        Task::new("1", "A", 1),
    ];
    assert!(validate_task_collection(&tasks).is_ok());
}

#[test]
fn repository_next_id_skips_non_numeric_ids() {
    let repo = TaskRepository::from_tasks(vec![
        Task::new("alpha", "A", 1),
        Task::new("12", "B", 1),
        Task::new("3", "C", 1),
    ])
    .unwrap();
    assert_eq!(repo.next_id(), "13");
    assert_eq!(TaskRepository::new().next_id(), "1");
}

#[test]
fn repository_upsert_replaces_in_place() {
    let mut repo = TaskRepository::new();
    repo.add("A", 1, vec![]).unwrap();
    repo.add("B", 2, vec!["1".into()]).unwrap();
    repo.upsert(Task::new("1", "A2", 5)).unwrap();

    let names: Vec<&str> = repo.tasks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A2", "B"]);
    assert_eq!(repo.get("1").map(|t| t.duration_days), Some(5));
}

#[test]
fn repository_remove_unknown_task() {
    let mut repo = TaskRepository::new();
    assert_eq!(
        repo.remove("9"),
        Err(TaskValidationError::NotFound("9".into()))
    );
}

#[test]
fn repository_snapshot_is_independent() {
    let mut repo = TaskRepository::new();
    repo.add("A", 1, vec![]).unwrap();
    let snapshot = repo.snapshot();
    repo.upsert(Task::new("1", "Changed", 4)).unwrap();
    assert_eq!(snapshot[0].name, "A");
}
