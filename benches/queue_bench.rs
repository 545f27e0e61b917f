//! Benchmarks for the project scheduler.
//!
//! Benchmarks cover:
//! - Queue operations (push/pop with priority and FIFO ordering)
//! - Project execution with tool adaptation and material consumption
//! - End-to-end submission through the manager's worker

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use project_forge::config::SchedulerConfig;
use project_forge::core::{
    Blueprint, ManagerEvent, Material, MaterialKind, Project, ProjectManager, Tool, ToolKind,
};
use project_forge::infra::queue::memory::InMemoryQueue;

// ============================================================================
// Helper Functions
// ============================================================================

fn build_project(id: u64) -> Project {
    let priority = i32::try_from(id % 7).unwrap_or_default();
    Project::new(format!("project-{id}"), None, priority)
}

// ============================================================================
// Queue Benchmarks
// ============================================================================

fn bench_queue_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_push_pop");

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut q = InMemoryQueue::new();
                for i in 0..size {
                    q.push(build_project(i)).unwrap();
                }
                while let Some(project) = q.pop() {
                    black_box(project);
                }
            });
        });
    }
    group.finish();
}

// ============================================================================
// Execution Benchmarks
// ============================================================================

fn bench_project_execute(c: &mut Criterion) {
    let welder = Arc::new(Tool::new("Welder-01", ToolKind::Welder));
    let painter = Arc::new(Tool::new("Painter-03", ToolKind::Painter));
    let metal = Arc::new(Material::new("Metal", MaterialKind::Metal, f64::MAX / 2.0));
    let blueprint = Arc::new(
        Blueprint::builder("bench")
            .tool(&welder, [("power", "high"), ("mode", "spot")])
            .tool(&painter, [("color", "blue")])
            .material(&metal, 1.0)
            .build(),
    );

    c.bench_function("project_execute", |b| {
        b.iter(|| {
            let mut project = Project::new("bench", Some(Arc::clone(&blueprint)), 0);
            black_box(project.execute());
        });
    });
}

fn bench_manager_round_trip(c: &mut Criterion) {
    let manager = ProjectManager::new(SchedulerConfig::default()).unwrap();
    let events = manager.subscribe();
    let blueprint = Arc::new(Blueprint::builder("noop").build());

    let mut group = c.benchmark_group("manager_round_trip");
    group.measurement_time(Duration::from_secs(5));
    group.bench_function("submit_and_complete", |b| {
        b.iter(|| {
            manager
                .submit(Project::new("rt", Some(Arc::clone(&blueprint)), 0))
                .unwrap();
            loop {
                let record = events.recv().unwrap();
                if record.event == ManagerEvent::Completed {
                    break;
                }
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_queue_push_pop,
    bench_project_execute,
    bench_manager_round_trip
);
criterion_main!(benches);
