use crate::calculations::date_scheduler::GanttChart;
use crate::graph::PertGraph;
use crate::task::{Task, join_predecessor_list};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the origin of polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn date_to_i32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn i32_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

fn column<T, Phantom: ?Sized>(name: &'static str, values: T) -> Column
where
    Series: NamedFrom<T, Phantom>,
{
    Series::new(PlSmallStr::from_static(name), values).into_column()
}

/// One row per task, predecessors comma joined.
pub fn tasks_dataframe(tasks: &[Task]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    let names: Vec<&str> = tasks.iter().map(|task| task.name.as_str()).collect();
    let durations: Vec<i64> = tasks.iter().map(|task| task.duration_days).collect();
    let predecessors: Vec<String> = tasks
        .iter()
        .map(|task| join_predecessor_list(&task.predecessors))
        .collect();

    DataFrame::new(vec![
        column("id", ids),
        column("name", names),
        column("duration_days", durations),
        column("predecessors", predecessors),
    ])
}

pub fn gantt_dataframe(chart: &GanttChart) -> PolarsResult<DataFrame> {
    let tasks = chart.tasks();
    let ids: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    let names: Vec<&str> = tasks.iter().map(|task| task.name.as_str()).collect();
    let durations: Vec<i64> = tasks.iter().map(|task| task.duration_days).collect();
    let start_days: Vec<i64> = tasks.iter().map(|task| task.start_day).collect();
    let end_days: Vec<i64> = tasks.iter().map(|task| task.end_day).collect();
    let start_dates: Vec<i32> = tasks.iter().map(|task| date_to_i32(task.start_date)).collect();
    let end_dates: Vec<i32> = tasks.iter().map(|task| date_to_i32(task.end_date)).collect();

    DataFrame::new(vec![
        column("id", ids),
        column("name", names),
        column("duration_days", durations),
        column("start_day", start_days),
        column("end_day", end_days),
        Series::new(PlSmallStr::from_static("start_date"), start_dates)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("end_date"), end_dates)
            .cast(&DataType::Date)?
            .into_column(),
    ])
}

/// One row per arc, dummies included.
pub fn activities_dataframe(graph: &PertGraph) -> PolarsResult<DataFrame> {
    let activities: Vec<_> = graph.activities().collect();
    let ids: Vec<String> = activities.iter().map(|a| a.id.to_string()).collect();
    let sources: Vec<i64> = activities.iter().map(|a| i64::from(a.source.0)).collect();
    let targets: Vec<i64> = activities.iter().map(|a| i64::from(a.target.0)).collect();
    let task_ids: Vec<&str> = activities.iter().map(|a| a.task_id.as_str()).collect();
    let task_names: Vec<&str> = activities.iter().map(|a| a.task_name.as_str()).collect();
    let durations: Vec<i64> = activities.iter().map(|a| a.duration).collect();
    let critical: Vec<bool> = activities.iter().map(|a| a.is_critical).collect();
    let fictitious: Vec<bool> = activities.iter().map(|a| a.is_fictitious).collect();
    let levels: Vec<i64> = activities.iter().map(|a| i64::from(a.level)).collect();

    DataFrame::new(vec![
        column("id", ids),
        column("source", sources),
        column("target", targets),
        column("task_id", task_ids),
        column("task_name", task_names),
        column("duration", durations),
        column("is_critical", critical),
        column("is_fictitious", fictitious),
        column("level", levels),
    ])
}

pub fn events_dataframe(graph: &PertGraph) -> PolarsResult<DataFrame> {
    let events: Vec<_> = graph.events().collect();
    let ids: Vec<i64> = events.iter().map(|e| i64::from(e.id.0)).collect();
    let early: Vec<i64> = events.iter().map(|e| e.early_date).collect();
    let late: Vec<i64> = events.iter().map(|e| e.late_date).collect();
    let slack: Vec<i64> = events.iter().map(|e| e.slack()).collect();
    let levels: Vec<i64> = events.iter().map(|e| i64::from(e.level)).collect();

    DataFrame::new(vec![
        column("id", ids),
        column("early_date", early),
        column("late_date", late),
        column("slack", slack),
        column("level", levels),
    ])
}

fn cell_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Boolean(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Date(days) => i32_to_date(*days)
            .map(|date| date.to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Renders `df` as a boxed ASCII table.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|col| col.get(row).map(|av| cell_text(&av)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (value, width) in values.iter().zip(&widths) {
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(width.saturating_sub(value.chars().count())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
