use clap::Parser;
use pert_gantt::import_export::{self, ImportExportError};
use pert_gantt::table::{
    activities_dataframe, events_dataframe, gantt_dataframe, render_text_table, tasks_dataframe,
};
use pert_gantt::task::parse_predecessor_list;
use pert_gantt::{JoinStrategy, ProjectMetadata, Schedule, TaskRepository, logging};
use std::io::{self, Write};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "cli",
    version,
    about = "Interactive Gantt and PERT scheduler",
    long_about = None
)]
struct Args {
    /// Task list to start from (.json or .csv).
    #[arg(short, long)]
    tasks: Option<String>,

    /// Project metadata JSON (name, start date, join strategy).
    #[arg(short, long)]
    metadata: Option<String>,

    /// Project start date, YYYY-MM-DD. Overrides the metadata file.
    #[arg(short, long)]
    start: Option<String>,

    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Csv,
}

impl Format {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }

    fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
            _ => Format::Json,
        }
    }
}

fn load_tasks(format: Format, path: &str) -> Result<TaskRepository, ImportExportError> {
    match format {
        Format::Json => import_export::load_tasks_from_json(path),
        Format::Csv => import_export::load_tasks_from_csv(path),
    }
}

fn initial_schedule(args: &Args) -> Result<Schedule, ImportExportError> {
    let mut metadata = match &args.metadata {
        Some(path) => import_export::load_metadata_from_json(path)?,
        None => ProjectMetadata::default(),
    };
    if let Some(start) = &args.start {
        metadata.project_start_date = import_export::parse_date(start)?;
    }
    let tasks = match &args.tasks {
        Some(path) => load_tasks(Format::from_path(path), path)?,
        None => TaskRepository::new(),
    };
    Ok(Schedule::from_parts(metadata, tasks))
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show tasks and project settings\n  add <name> <duration_days> [preds_csv]\n                                     Add a task under the next id (preds like 1,2,3)\n  upsert <id> <name> <duration_days> [preds_csv]\n                                     Insert or update a task\n  delete <id>                        Delete a task nothing depends on\n  start <YYYY-MM-DD>                 Set the project start date\n  strategy <anchor|join>             Set how multi-predecessor tasks are joined\n  gantt                              Show task dates\n  pert                               Show events and activities\n  critical                           Show the critical path\n  save <json|csv> <path>             Save the task list\n  load <json|csv> <path>             Replace the task list from a file\n  export <json|csv> <path>           Export the Gantt dates\n  quit|exit                          Exit"
    );
}

fn show_tasks(schedule: &Schedule) {
    let metadata = schedule.metadata();
    println!(
        "{} (start {}, strategy {})",
        metadata.project_name, metadata.project_start_date, metadata.join_strategy
    );
    match tasks_dataframe(schedule.tasks()) {
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Error: {}", e),
    }
}

fn show_gantt(schedule: &Schedule) {
    let chart = match schedule.gantt() {
        Ok(chart) => chart,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    match gantt_dataframe(&chart) {
        Ok(df) => {
            println!("{}", render_text_table(&df));
            if let Some(end) = chart.project_end() {
                println!("Project ends {} ({} days)", end, chart.duration_days());
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn show_pert(schedule: &Schedule) {
    let analysis = match schedule.pert() {
        Ok(analysis) => analysis,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let tables = events_dataframe(analysis.graph())
        .and_then(|events| Ok((events, activities_dataframe(analysis.graph())?)));
    match tables {
        Ok((events, activities)) => {
            println!("Events\n{}", render_text_table(&events));
            println!("Activities\n{}", render_text_table(&activities));
            println!("Project duration: {} days", analysis.project_duration());
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut schedule = match initial_schedule(&args) {
        Ok(schedule) => schedule,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("PERT/Gantt scheduler - type 'help' for commands\n");
    show_tasks(&schedule);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show_tasks(&schedule),
            "add" => {
                let name = parts.next();
                let dur_s = parts.next();
                let preds = parts.next().map(parse_predecessor_list).unwrap_or_default();
                match (name, dur_s) {
                    (Some(name), Some(dur_s)) => {
                        let duration_days: i64 = match dur_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid duration_days"); continue; } };
                        match schedule.add_task(name, duration_days, preds) {
                            Ok(id) => {
                                println!("Added task id={}", id);
                                show_tasks(&schedule);
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: add <name> <duration_days> [preds_csv]"),
                }
            }
            "upsert" => {
                let id = parts.next();
                let name = parts.next();
                let dur_s = parts.next();
                let preds = parts.next().map(parse_predecessor_list);
                match (id, name, dur_s) {
                    (Some(id), Some(name), Some(dur_s)) => {
                        let duration_days: i64 = match dur_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid duration_days"); continue; } };
                        match schedule.upsert_task(id, name, duration_days, preds) {
                            Ok(()) => {
                                println!("Task upserted.");
                                show_tasks(&schedule);
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: upsert <id> <name> <duration_days> [preds_csv]"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => match schedule.delete_task(id) {
                    Ok(task) => {
                        println!("Deleted task {} ({}).", task.id, task.name);
                        show_tasks(&schedule);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: delete <id>"),
            },
            "start" => match parts.next().map(import_export::parse_date) {
                Some(Ok(date)) => {
                    schedule.set_project_start_date(date);
                    println!("Project start set to {}.", date);
                }
                Some(Err(_)) => println!("Invalid date (YYYY-MM-DD)"),
                None => println!("Usage: start <YYYY-MM-DD>"),
            },
            "strategy" => match parts.next().map(str::parse::<JoinStrategy>) {
                Some(Ok(strategy)) => {
                    schedule.set_join_strategy(strategy);
                    println!("Join strategy set to {}.", strategy);
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Usage: strategy <anchor|join>"),
            },
            "gantt" => show_gantt(&schedule),
            "pert" => show_pert(&schedule),
            "critical" => match schedule.refresh() {
                Ok(summary) => {
                    println!("Refreshed ({})", summary.to_cli_summary());
                    if summary.critical_path.is_empty() {
                        println!("No critical path.");
                    } else {
                        println!("Critical path: {}", summary.critical_path.join(" -> "));
                    }
                }
                Err(e) => println!("Error: {}", e),
            },
            "save" | "load" | "export" => {
                let format = parts.next().and_then(Format::parse);
                let path = parts.next();
                let (Some(format), Some(path)) = (format, path) else {
                    println!("Usage: {} <json|csv> <path>", cmd);
                    continue;
                };
                let result = match cmd {
                    "save" => match format {
                        Format::Json => import_export::save_tasks_to_json(schedule.repository(), path),
                        Format::Csv => import_export::save_tasks_to_csv(schedule.repository(), path),
                    },
                    "load" => match load_tasks(format, path) {
                        Ok(tasks) => {
                            schedule = Schedule::from_parts(schedule.metadata().clone(), tasks);
                            Ok(())
                        }
                        Err(e) => Err(e),
                    },
                    _ => match schedule.gantt() {
                        Ok(chart) => match format {
                            Format::Json => import_export::save_gantt_to_json(&chart, path),
                            Format::Csv => import_export::save_gantt_to_csv(&chart, path),
                        },
                        Err(e) => {
                            println!("Error: {}", e);
                            continue;
                        }
                    },
                };
                match result {
                    Ok(()) => println!("{} {} done.", cmd, path),
                    Err(e) => println!("Error: {}", e),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
