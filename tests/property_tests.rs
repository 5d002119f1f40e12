use chrono::NaiveDate;
use pert_gantt::{JoinStrategy, Stage, Task, analyze, schedule};
use std::collections::HashMap;
use std::thread;

/// Small linear congruential generator so every run sees the same graphs.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Random DAG over `n` tasks, declared in a shuffled order.
fn random_dag(seed: u64, n: usize) -> Vec<Task> {
    let mut rng = Lcg(seed);
    let mut tasks: Vec<Task> = (0..n)
        .map(|i| {
            let mut preds = Vec::new();
            for j in 0..i {
                if rng.below(4) == 0 {
                    preds.push(format!("t{j}"));
                }
            }
            let duration = 1 + rng.below(9) as i64;
            Task::new(format!("t{i}"), format!("T{i}"), duration).with_predecessors(preds)
        })
        .collect();

    for i in (1..tasks.len()).rev() {
        let j = rng.below(i as u64 + 1) as usize;
        tasks.swap(i, j);
    }
    tasks
}

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn gantt_respects_every_predecessor() {
    for seed in 1..40 {
        let tasks = random_dag(seed, 25);
        let chart = schedule(&tasks, d(2025, 1, 1)).unwrap();
        for task in &tasks {
            let start = chart.get(&task.id).unwrap().start_day;
            for pred in &task.predecessors {
                assert!(
                    start >= chart.get(pred).unwrap().end_day,
                    "seed {seed}: {} starts before {pred} ends",
                    task.id
                );
            }
        }
    }
}

#[test]
fn join_event_graphs_satisfy_pert_properties() {
    for seed in 1..40 {
        let tasks = random_dag(seed, 25);
        let chart = schedule(&tasks, d(2025, 1, 1)).unwrap();
        let analysis = analyze(&tasks, JoinStrategy::JoinEvent).unwrap();
        let graph = analysis.graph();

        assert_eq!(graph.real_activities().count(), tasks.len());
        assert_eq!(analysis.project_duration(), chart.duration_days(), "seed {seed}");
        for event in graph.events() {
            assert!(event.early_date <= event.late_date, "seed {seed}");
        }

        let by_name: HashMap<&str, _> = graph
            .real_activities()
            .map(|activity| (activity.task_name.as_str(), activity))
            .collect();
        assert!(!analysis.critical_path().is_empty());
        for name in analysis.critical_path() {
            let activity = by_name[name.as_str()];
            assert!(graph.event(activity.source).unwrap().has_zero_slack());
            assert!(graph.event(activity.target).unwrap().has_zero_slack());
        }

        let again = analyze(&tasks, JoinStrategy::JoinEvent).unwrap();
        assert_eq!(again, analysis, "seed {seed}");
    }
}

#[test]
fn anchor_graphs_never_finish_earlier_than_the_gantt() {
    for seed in 1..40 {
        let tasks = random_dag(seed, 25);
        let chart = schedule(&tasks, d(2025, 1, 1)).unwrap();
        let analysis = analyze(&tasks, JoinStrategy::LargestDurationAnchor)
            .unwrap_or_else(|err| panic!("seed {seed}: {err}"));
        let graph = analysis.graph();
        assert_eq!(graph.real_activities().count(), tasks.len());
        assert!(analysis.project_duration() >= chart.duration_days(), "seed {seed}");
        for event in graph.events() {
            assert!(event.early_date <= event.late_date, "seed {seed}");
        }
    }
}

#[test]
fn cyclic_inputs_fail_both_pipelines() {
    for seed in 1..20 {
        let mut tasks = random_dag(seed, 12);
        // Close a loop: the first declared task now waits on every other task.
        let others: Vec<String> = tasks[1..].iter().map(|t| t.id.clone()).collect();
        tasks[0].predecessors.extend(others);
        let last = tasks.len() - 1;
        let first_id = tasks[0].id.clone();
        tasks[last].predecessors.push(first_id);

        assert!(schedule(&tasks, d(2025, 1, 1)).is_err(), "seed {seed}");
        for strategy in [JoinStrategy::LargestDurationAnchor, JoinStrategy::JoinEvent] {
            let err = analyze(&tasks, strategy).unwrap_err();
            assert_eq!(err.stage, Stage::GraphConstruction, "seed {seed}");
        }
    }
}

#[test]
fn concurrent_callers_get_identical_results() {
    let tasks = random_dag(7, 30);
    let expected = analyze(&tasks, JoinStrategy::JoinEvent).unwrap();
    let expected_chart = schedule(&tasks, d(2025, 1, 1)).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let snapshot = tasks.clone();
                    (
                        analyze(&snapshot, JoinStrategy::JoinEvent).unwrap(),
                        schedule(&snapshot, d(2025, 1, 1)).unwrap(),
                    )
                })
            })
            .collect();
        for handle in handles {
            let (analysis, chart) = handle.join().unwrap();
            assert_eq!(analysis, expected);
            assert_eq!(chart, expected_chart);
        }
    });
}
