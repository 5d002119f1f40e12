use super::{ImportExportError, ImportExportResult};
use crate::calculations::date_scheduler::{GanttChart, ScheduledTask};
use crate::metadata::ProjectMetadata;
use crate::repository::TaskRepository;
use crate::task::{Task, join_predecessor_list, parse_predecessor_list};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> ImportExportResult<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)?)
}

pub fn save_tasks_to_json<P: AsRef<Path>>(
    tasks: &TaskRepository,
    path: P,
) -> ImportExportResult<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, tasks.tasks())?;
    info!(path = %path.as_ref().display(), tasks = tasks.len(), "saved tasks as json");
    Ok(())
}

pub fn load_tasks_from_json<P: AsRef<Path>>(path: P) -> ImportExportResult<TaskRepository> {
    let file = File::open(path.as_ref())?;
    let tasks: Vec<Task> = serde_json::from_reader(BufReader::new(file))?;
    let repository = TaskRepository::from_tasks(tasks)?;
    info!(path = %path.as_ref().display(), tasks = repository.len(), "loaded tasks from json");
    Ok(repository)
}

#[derive(Serialize, Deserialize)]
struct TaskCsvRecord {
    id: String,
    name: String,
    duration_days: i64,
    #[serde(default)]
    predecessors: String,
}

impl From<&Task> for TaskCsvRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            duration_days: task.duration_days,
            predecessors: join_predecessor_list(&task.predecessors),
        }
    }
}

impl From<TaskCsvRecord> for Task {
    fn from(record: TaskCsvRecord) -> Self {
        Task::new(record.id.trim(), record.name, record.duration_days)
            .with_predecessors(parse_predecessor_list(&record.predecessors))
    }
}

pub fn save_tasks_to_csv<P: AsRef<Path>>(
    tasks: &TaskRepository,
    path: P,
) -> ImportExportResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    for task in tasks.tasks() {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    info!(path = %path.as_ref().display(), tasks = tasks.len(), "saved tasks as csv");
    Ok(())
}

pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> ImportExportResult<TaskRepository> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskCsvRecord>() {
        tasks.push(Task::from(record?));
    }

    if tasks.is_empty() {
        return Err(ImportExportError::InvalidData(
            "CSV file contained no tasks".into(),
        ));
    }

    let repository = TaskRepository::from_tasks(tasks)?;
    info!(path = %path.as_ref().display(), tasks = repository.len(), "loaded tasks from csv");
    Ok(repository)
}

/// Flat row shared by the Gantt CSV and JSON exports.
#[derive(Debug, Serialize)]
struct GanttRecord<'a> {
    id: &'a str,
    name: &'a str,
    duration_days: i64,
    start_day: i64,
    end_day: i64,
    start_date: String,
    end_date: String,
}

impl<'a> From<&'a ScheduledTask> for GanttRecord<'a> {
    fn from(task: &'a ScheduledTask) -> Self {
        Self {
            id: &task.id,
            name: &task.name,
            duration_days: task.duration_days,
            start_day: task.start_day,
            end_day: task.end_day,
            start_date: task.start_date.format(DATE_FORMAT).to_string(),
            end_date: task.end_date.format(DATE_FORMAT).to_string(),
        }
    }
}

pub fn save_gantt_to_csv<P: AsRef<Path>>(chart: &GanttChart, path: P) -> ImportExportResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    for task in chart.tasks() {
        writer.serialize(GanttRecord::from(task))?;
    }
    writer.flush()?;
    info!(path = %path.as_ref().display(), tasks = chart.len(), "exported gantt as csv");
    Ok(())
}

pub fn save_gantt_to_json<P: AsRef<Path>>(chart: &GanttChart, path: P) -> ImportExportResult<()> {
    let records: Vec<GanttRecord<'_>> = chart.tasks().iter().map(GanttRecord::from).collect();
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &records)?;
    info!(path = %path.as_ref().display(), tasks = chart.len(), "exported gantt as json");
    Ok(())
}

pub fn save_metadata_to_json<P: AsRef<Path>>(
    metadata: &ProjectMetadata,
    path: P,
) -> ImportExportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, metadata)?;
    Ok(())
}

pub fn load_metadata_from_json<P: AsRef<Path>>(path: P) -> ImportExportResult<ProjectMetadata> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_record_splits_predecessors() {
        let record = TaskCsvRecord {
            id: " 3 ".into(),
            name: "Paint".into(),
            duration_days: 2,
            predecessors: "1, 2".into(),
        };
        let task = Task::from(record);
        assert_eq!(task.id, "3");
        assert_eq!(task.predecessors, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2025-02-30").is_err());
        assert!(matches!(
            parse_date("03/04/2025"),
            Err(ImportExportError::Date(_))
        ));
        assert_eq!(
            parse_date(" 2025-03-04 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
        );
    }
}
