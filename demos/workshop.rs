//! Workshop demo: three projects sharing tools and materials on one manager.
//!
//! Run with `RUST_LOG=info cargo run --example workshop`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use project_forge::builders::ProjectManagerBuilder;
use project_forge::config::SchedulerConfig;
use project_forge::core::{
    AppResult, Blueprint, InMemoryAuditSink, ManagerEvent, Material, MaterialKind, Project,
    ProjectHandle, Tool, ToolKind,
};
use project_forge::util::init_tracing;

fn assembly_logic(handle: &mut ProjectHandle<'_>) {
    tracing::info!(project = handle.name(), "welding and assembling");
    thread::sleep(Duration::from_millis(200));
    tracing::info!(project = handle.name(), "painting final product");
    if handle.name() == "Project-Failable" {
        tracing::error!(project = handle.name(), "unexpected glitch encountered");
        handle.mark_failed();
    }
}

fn main() -> AppResult<()> {
    init_tracing();

    let welder = Arc::new(Tool::new("Welder-01", ToolKind::Welder));
    let assembler = Arc::new(Tool::new("Assembler-02", ToolKind::Assembler));
    let painter = Arc::new(Tool::new("Painter-03", ToolKind::Painter));
    let printer = Arc::new(Tool::new("Printer3D-04", ToolKind::Printer3d));

    let metal = Arc::new(Material::new("Metal", MaterialKind::Metal, 100.0));
    let plastic = Arc::new(Material::new("Plastic", MaterialKind::Plastic, 50.0));
    let paint = Arc::new(Material::new("Paint", MaterialKind::Liquid, 20.0));

    let assembly = |name: &str| {
        Arc::new(
            Blueprint::builder(name)
                .tool(&welder, [("power", "high"), ("mode", "spot")])
                .tool(&assembler, [("speed", "medium"), ("precision", "high")])
                .tool(&painter, [("color", "blue"), ("finish", "gloss")])
                .material(&metal, 20.0)
                .material(&plastic, 10.0)
                .material(&paint, 5.0)
                .logic(assembly_logic)
                .build(),
        )
    };
    let blueprint_01 = assembly("Blueprint-01");
    let blueprint_failable = assembly("Blueprint-Failable");
    let stock = Arc::clone(&plastic);
    let blueprint_02 = Arc::new(
        Blueprint::builder("Blueprint-02")
            .tool(&printer, [("resolution", "high"), ("material", "PLA")])
            .material(&plastic, 15.0)
            .logic(move |handle| {
                tracing::info!(project = handle.name(), "configuring 3D printer");
                if stock.quantity() < 10.0 {
                    tracing::error!(project = handle.name(), "insufficient plastic for printing");
                    handle.mark_failed();
                    return;
                }
                thread::sleep(Duration::from_millis(200));
                tracing::info!(project = handle.name(), "3D printing completed");
            })
            .build(),
    );

    let audit = Arc::new(Mutex::new(InMemoryAuditSink::new(64)));
    let manager = ProjectManagerBuilder::new()
        .with_config(SchedulerConfig::from_env()?)
        .with_audit(Arc::clone(&audit))
        .with_listener(|event, view| match event {
            ManagerEvent::Enqueued => println!("[Listener] Project {} was enqueued.", view.name),
            ManagerEvent::Started => println!("[Listener] Project {} started.", view.name),
            ManagerEvent::Completed => println!("[Listener] Project {} completed.", view.name),
            ManagerEvent::Failed => println!("[Listener] Project {} failed.", view.name),
        })
        .build()?;
    let events = manager.subscribe();

    manager.submit(Project::new("Project-01", Some(blueprint_01), 1))?;
    manager.submit(Project::new("Project-Failable", Some(blueprint_failable), 2))?;
    manager.submit(Project::new("Project-02", Some(blueprint_02), 5))?;

    let mut finished = 0;
    while finished < 3 {
        let record = events.recv_timeout(Duration::from_secs(10))?;
        if matches!(record.event, ManagerEvent::Completed | ManagerEvent::Failed) {
            finished += 1;
        }
    }
    manager.shutdown();

    println!(
        "Remaining stock: metal={} plastic={} paint={}",
        metal.quantity(),
        plastic.quantity(),
        paint.quantity()
    );
    println!("{}", serde_json::to_string_pretty(&manager.stats())?);
    println!("Audit trail: {} events", audit.lock().events().len());
    Ok(())
}
