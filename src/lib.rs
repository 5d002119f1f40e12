pub mod calculations;
pub mod error;
pub mod graph;
pub mod import_export;
pub mod logging;
pub mod metadata;
pub mod pert;
pub mod repository;
pub mod schedule;
pub mod table;
pub mod task;
pub mod task_validation;

pub use calculations::critical_path::{critical_sequence, mark_critical};
pub use calculations::date_scheduler::{DateScheduler, GanttChart, ScheduledTask, schedule};
pub use calculations::compute_times;
pub use error::{CycleError, Stage};
pub use graph::builder::{GraphBuilder, build};
pub use graph::{Activity, ActivityId, Event, EventId, PertGraph};
pub use import_export::{
    ImportExportError, load_metadata_from_json, load_tasks_from_csv, load_tasks_from_json,
    save_gantt_to_csv, save_gantt_to_json, save_metadata_to_json, save_tasks_to_csv,
    save_tasks_to_json,
};
pub use metadata::{JoinStrategy, ProjectMetadata};
pub use pert::{PertAnalysis, analyze};
pub use repository::TaskRepository;
pub use schedule::{RefreshSummary, Schedule, ScheduleError};
pub use task::Task;
pub use task_validation::TaskValidationError;
