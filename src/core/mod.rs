//! Workshop resources, blueprints, projects and the scheduler that runs them.

pub mod audit;
pub mod blueprint;
pub mod error;
pub mod manager;
pub mod project;
pub mod resource;

pub use audit::{audit_listener, build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink};
pub use blueprint::{
    Blueprint, BlueprintBuilder, ExecutionLogic, MaterialRequirement, ToolRequirement,
};
pub use error::{AppResult, ResourceError, SchedulerError};
pub use manager::{EventRecord, Listener, ManagerEvent, ManagerStats, ProjectManager};
pub use project::{Project, ProjectHandle, ProjectStatus, ProjectView};
pub use resource::{Adaptable, Material, MaterialKind, Nameable, Tool, ToolKind};
