//! Projects and their lifecycle state machine.
//!
//! `InQueue → AcquiringResources → InProgress → Completed | Failed`
//!
//! Acquisition walks the blueprint's tools in declared order, then its
//! materials. The first failure aborts the run and the project ends `Failed`.
//! Anything already claimed at that point stays claimed; restitution is left
//! to the caller through [`Project::release_materials`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::{Adaptable, Blueprint, Material, Nameable, ResourceError, Tool};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Waiting in the scheduler queue.
    InQueue,
    /// Claiming tools and materials.
    AcquiringResources,
    /// Execution logic is running.
    InProgress,
    /// Declared for completeness; the scheduler never enters it.
    Paused,
    /// Finished successfully.
    Completed,
    /// Acquisition or execution failed.
    Failed,
}

impl ProjectStatus {
    /// Whether the state is `Completed` or `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InQueue => "in_queue",
            Self::AcquiringResources => "acquiring_resources",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Immutable snapshot of a project, carried by manager events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    /// Unique project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Status at snapshot time.
    pub status: ProjectStatus,
    /// Scheduling priority.
    pub priority: i32,
}

/// One schedulable unit of work bound to a blueprint.
#[derive(Debug)]
pub struct Project {
    id: Uuid,
    name: String,
    blueprint: Option<Arc<Blueprint>>,
    priority: i32,
    status: ProjectStatus,
    acquired_tools: Vec<Arc<Tool>>,
    acquired_materials: Vec<(Arc<Material>, f64)>,
}

impl Project {
    /// Create a queued project. Higher `priority` is served first.
    pub fn new(name: impl Into<String>, blueprint: Option<Arc<Blueprint>>, priority: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            blueprint,
            priority,
            status: ProjectStatus::InQueue,
            acquired_tools: Vec::new(),
            acquired_materials: Vec::new(),
        }
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Bound blueprint, if any.
    #[must_use]
    pub const fn blueprint(&self) -> Option<&Arc<Blueprint>> {
        self.blueprint.as_ref()
    }

    /// Tools claimed so far, in acquisition order.
    #[must_use]
    pub fn acquired_tools(&self) -> &[Arc<Tool>] {
        &self.acquired_tools
    }

    /// Materials consumed so far, with the amounts taken.
    #[must_use]
    pub fn acquired_materials(&self) -> &[(Arc<Material>, f64)] {
        &self.acquired_materials
    }

    /// Snapshot for event delivery.
    #[must_use]
    pub fn view(&self) -> ProjectView {
        ProjectView {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            priority: self.priority,
        }
    }

    /// Run the lifecycle: acquire tools, acquire materials, run the blueprint's
    /// logic, then settle on `Completed` unless something marked the project `Failed`.
    ///
    /// Errors never escape; they are logged and reflected in the returned status.
    pub fn execute(&mut self) -> ProjectStatus {
        info!(project = %self.name, priority = self.priority, "executing project");

        let blueprint = match self.acquire_resources() {
            Ok(blueprint) => blueprint,
            Err(err) => {
                warn!(project = %self.name, error = %err, "project failed");
                self.status = ProjectStatus::Failed;
                return self.status;
            }
        };

        self.status = ProjectStatus::InProgress;
        let logic = Arc::clone(blueprint.execution_logic());
        logic(&mut ProjectHandle { project: &mut *self });

        if self.status == ProjectStatus::Failed {
            warn!(project = %self.name, "execution logic reported failure");
        } else {
            self.status = ProjectStatus::Completed;
            info!(project = %self.name, "project completed");
        }
        self.status
    }

    fn acquire_resources(&mut self) -> Result<Arc<Blueprint>, ResourceError> {
        let blueprint = self
            .blueprint
            .clone()
            .ok_or_else(|| ResourceError::MissingBlueprint(self.name.clone()))?;

        self.status = ProjectStatus::AcquiringResources;

        for req in blueprint.required_tools() {
            let tool = req
                .tool
                .upgrade()
                .ok_or(ResourceError::InvalidReference("tool"))?;
            debug!(project = %self.name, tool = tool.name(), "acquiring tool");
            if !tool.is_operational() {
                return Err(ResourceError::NotOperational(tool.name().to_string()));
            }
            tool.adapt(&req.params)?;
            self.acquired_tools.push(tool);
        }

        for req in blueprint.required_materials() {
            let material = req
                .material
                .upgrade()
                .ok_or(ResourceError::InvalidReference("material"))?;
            debug!(
                project = %self.name,
                material = material.name(),
                quantity = req.quantity,
                "acquiring material"
            );
            material.consume(req.quantity)?;
            self.acquired_materials.push((material, req.quantity));
        }

        Ok(blueprint)
    }

    /// Return every consumed material to its stock and forget the claimed tools.
    ///
    /// The scheduler never calls this; it is available to callers that want
    /// restitution after a failed or finished run.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ResourceError`] from [`Material::release`]; the
    /// entries not yet released stay recorded.
    pub fn release_materials(&mut self) -> Result<(), ResourceError> {
        while let Some((material, amount)) = self.acquired_materials.pop() {
            if let Err(err) = material.release(amount) {
                self.acquired_materials.push((material, amount));
                return Err(err);
            }
        }
        self.acquired_tools.clear();
        Ok(())
    }
}

/// Mutable access handed to execution logic while the project is `InProgress`.
pub struct ProjectHandle<'a> {
    project: &'a mut Project,
}

impl ProjectHandle<'_> {
    /// Project identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.project.id
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.project.name
    }

    /// Project priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.project.priority
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ProjectStatus {
        self.project.status
    }

    /// Overwrite the status. Only `Failed` survives finalization; any other
    /// value is replaced by `Completed` when the logic returns.
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.project.status = status;
    }

    /// Report a runtime failure.
    pub fn mark_failed(&mut self) {
        self.set_status(ProjectStatus::Failed);
    }
}
