use chrono::NaiveDate;
use pert_gantt::{
    ImportExportError, JoinStrategy, ProjectMetadata, Schedule, Task, TaskRepository,
    load_metadata_from_json, load_tasks_from_csv, load_tasks_from_json, save_gantt_to_csv,
    save_gantt_to_json, save_metadata_to_json, save_tasks_to_csv, save_tasks_to_json,
};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_tasks() -> TaskRepository {
    TaskRepository::from_tasks(vec![
        Task::new("1", "Design", 5),
        Task::new("2", "Build", 8).with_predecessors(["1"]),
        Task::new("3", "Review, final", 2).with_predecessors(["1", "2"]),
    ])
    .unwrap()
}

#[test]
fn tasks_json_round_trip() {
    let tmp = NamedTempFile::new().unwrap();
    let tasks = sample_tasks();
    save_tasks_to_json(&tasks, tmp.path()).unwrap();
    let loaded = load_tasks_from_json(tmp.path()).unwrap();
    assert_eq!(loaded, tasks);
}

#[test]
fn tasks_csv_keeps_predecessors_in_one_field() {
    let tmp = NamedTempFile::new().unwrap();
    let tasks = sample_tasks();
    save_tasks_to_csv(&tasks, tmp.path()).unwrap();

    let text = fs::read_to_string(tmp.path()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,name,duration_days,predecessors"));
    assert!(text.contains("3,\"Review, final\",2,\"1,2\""));

    let loaded = load_tasks_from_csv(tmp.path()).unwrap();
    assert_eq!(loaded, tasks);
}

#[test]
fn loading_rejects_invalid_task_lists() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"[{{"id":"1","name":"A","duration_days":2,"predecessors":["4"]}}]"#
    )
    .unwrap();
    let err = load_tasks_from_json(tmp.path()).unwrap_err();
    assert!(matches!(err, ImportExportError::Validation(_)), "{err}");

    let mut empty = NamedTempFile::new().unwrap();
    writeln!(empty, "id,name,duration_days,predecessors").unwrap();
    let err = load_tasks_from_csv(empty.path()).unwrap_err();
    assert!(matches!(err, ImportExportError::InvalidData(_)), "{err}");
}

#[test]
fn loading_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_tasks_from_json(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ImportExportError::Io(_)));
}

#[test]
fn gantt_exports_contain_dates() {
    let schedule = Schedule::from_parts(ProjectMetadata::starting_on(d(2025, 1, 6)), sample_tasks());
    let chart = schedule.gantt().unwrap();

    let csv_file = NamedTempFile::new().unwrap();
    save_gantt_to_csv(&chart, csv_file.path()).unwrap();
    let text = fs::read_to_string(csv_file.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "id,name,duration_days,start_day,end_day,start_date,end_date"
    );
    assert_eq!(lines[2], "2,Build,8,5,13,2025-01-11,2025-01-19");

    let json_file = NamedTempFile::new().unwrap();
    save_gantt_to_json(&chart, json_file.path()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(json_file.path()).unwrap()).unwrap();
    assert_eq!(value[2]["start_day"], 13);
    assert_eq!(value[2]["end_date"], "2025-01-21");
}

#[test]
fn metadata_json_round_trip() {
    let tmp = NamedTempFile::new().unwrap();
    let metadata = ProjectMetadata {
        project_name: "Warehouse".into(),
        project_description: "Phase one".into(),
        project_start_date: d(2025, 4, 1),
        join_strategy: JoinStrategy::JoinEvent,
    };
    save_metadata_to_json(&metadata, tmp.path()).unwrap();
    assert_eq!(load_metadata_from_json(tmp.path()).unwrap(), metadata);

    let text = fs::read_to_string(tmp.path()).unwrap();
    assert!(text.contains("\"join_strategy\": \"join_event\""));
    assert!(text.contains("\"project_start_date\": \"2025-04-01\""));
}

#[test]
fn metadata_defaults_join_strategy() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"{{"project_name":"P","project_start_date":"2025-01-01"}}"#
    )
    .unwrap();
    let metadata = load_metadata_from_json(tmp.path()).unwrap();
    assert_eq!(metadata.join_strategy, JoinStrategy::LargestDurationAnchor);
    assert_eq!(metadata.project_description, "");
}
