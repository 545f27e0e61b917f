//! # Project Forge
//!
//! A priority-ordered, single-worker project scheduler for workshops whose jobs
//! must claim shared tools and materials before running their own logic.
//!
//! Callers build [`core::Tool`]s and [`core::Material`]s, bind them into
//! [`core::Blueprint`]s, create [`core::Project`]s from blueprints and hand the
//! projects to a [`core::ProjectManager`]. The manager's background worker always
//! takes the highest-priority project next, drives it through resource
//! acquisition and execution, and reports every lifecycle transition to the
//! registered listeners.
//!
//! ## Key Features
//!
//! - **Priority Queue**: Higher priority first, FIFO among equal priorities
//! - **Single Worker**: One dedicated OS thread, monitor-style wake-up (no polling)
//! - **Resource Acquisition**: Tools checked and adapted in order, then materials consumed
//! - **Lifecycle Events**: `Enqueued`, `Started`, `Completed`, `Failed` delivered synchronously
//! - **Scoped Lifetime**: Dropping the manager stops and joins the worker
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use project_forge::core::{
//!     Blueprint, Material, MaterialKind, Project, ProjectManager, Tool, ToolKind,
//! };
//! use project_forge::config::SchedulerConfig;
//!
//! let printer = Arc::new(Tool::new("Printer3D-04", ToolKind::Printer3d));
//! let plastic = Arc::new(Material::new("Plastic", MaterialKind::Plastic, 50.0));
//!
//! let blueprint = Arc::new(
//!     Blueprint::builder("Blueprint-02")
//!         .tool(&printer, [("resolution", "high")])
//!         .material(&plastic, 15.0)
//!         .logic(|handle| tracing::info!(project = handle.name(), "printing"))
//!         .build(),
//! );
//!
//! let manager = ProjectManager::new(SchedulerConfig::default())?;
//! manager.add_listener(|event, view| println!("{event}: {}", view.name));
//! manager.submit(Project::new("Project-02", Some(blueprint), 5))?;
//! ```
//!
//! For complete scenarios, see:
//! - `tests/scheduler_test.rs` - Worker ordering, events and shutdown
//! - `demos/workshop.rs` - A fully wired workshop

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Resources, blueprints, projects and the scheduler.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct a scheduler from configuration.
pub mod builders;
/// Queue containers backing the scheduler.
pub mod infra;
/// Runtime adapters bridging scheduler events into async code.
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
/// Shared utilities.
pub mod util;
