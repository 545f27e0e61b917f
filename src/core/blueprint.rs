//! Blueprints: immutable recipes naming the tools, materials and logic a project needs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::core::{Material, ProjectHandle, Tool};

/// Domain routine run once a project holds all of its resources.
///
/// The routine may call [`ProjectHandle::mark_failed`] to report a runtime failure.
pub type ExecutionLogic = Arc<dyn Fn(&mut ProjectHandle<'_>) + Send + Sync>;

/// A tool the blueprint needs, with the configuration to apply to it.
#[derive(Debug, Clone)]
pub struct ToolRequirement {
    /// Weak reference; the tool is owned elsewhere.
    pub tool: Weak<Tool>,
    /// Parameters passed verbatim to [`Adaptable::adapt`](crate::core::Adaptable::adapt).
    pub params: BTreeMap<String, String>,
}

/// A material the blueprint consumes, with the amount.
#[derive(Debug, Clone)]
pub struct MaterialRequirement {
    /// Weak reference; the material is owned elsewhere.
    pub material: Weak<Material>,
    /// Units consumed per project run.
    pub quantity: f64,
}

/// Recipe shared by any number of projects.
pub struct Blueprint {
    name: String,
    tools: Vec<ToolRequirement>,
    materials: Vec<MaterialRequirement>,
    logic: ExecutionLogic,
}

impl Blueprint {
    /// Create a blueprint from requirement lists. Order is preserved and is the
    /// order in which resources are acquired.
    pub fn new(
        name: impl Into<String>,
        tools: Vec<ToolRequirement>,
        materials: Vec<MaterialRequirement>,
        logic: ExecutionLogic,
    ) -> Self {
        Self {
            name: name.into(),
            tools,
            materials,
            logic,
        }
    }

    /// Start a builder with no requirements and no-op logic.
    pub fn builder(name: impl Into<String>) -> BlueprintBuilder {
        BlueprintBuilder {
            name: name.into(),
            tools: Vec::new(),
            materials: Vec::new(),
            logic: None,
        }
    }

    /// Blueprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required tools in acquisition order.
    #[must_use]
    pub fn required_tools(&self) -> &[ToolRequirement] {
        &self.tools
    }

    /// Required materials in acquisition order.
    #[must_use]
    pub fn required_materials(&self) -> &[MaterialRequirement] {
        &self.materials
    }

    /// The execution routine.
    #[must_use]
    pub fn execution_logic(&self) -> &ExecutionLogic {
        &self.logic
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("tools", &self.tools)
            .field("materials", &self.materials)
            .finish_non_exhaustive()
    }
}

/// Fluent construction of a [`Blueprint`].
pub struct BlueprintBuilder {
    name: String,
    tools: Vec<ToolRequirement>,
    materials: Vec<MaterialRequirement>,
    logic: Option<ExecutionLogic>,
}

impl BlueprintBuilder {
    /// Require `tool`, adapted with `params`.
    #[must_use]
    pub fn tool<I, K, V>(mut self, tool: &Arc<Tool>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tools.push(ToolRequirement {
            tool: Arc::downgrade(tool),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }

    /// Require `quantity` units of `material`.
    #[must_use]
    pub fn material(mut self, material: &Arc<Material>, quantity: f64) -> Self {
        self.materials.push(MaterialRequirement {
            material: Arc::downgrade(material),
            quantity,
        });
        self
    }

    /// Set the execution routine.
    #[must_use]
    pub fn logic<F>(mut self, logic: F) -> Self
    where
        F: Fn(&mut ProjectHandle<'_>) + Send + Sync + 'static,
    {
        self.logic = Some(Arc::new(logic));
        self
    }

    /// Finish the blueprint.
    #[must_use]
    pub fn build(self) -> Blueprint {
        let logic: ExecutionLogic = match self.logic {
            Some(logic) => logic,
            None => Arc::new(no_op),
        };
        Blueprint::new(self.name, self.tools, self.materials, logic)
    }
}

fn no_op(_: &mut ProjectHandle<'_>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MaterialKind, Nameable, ToolKind};

    #[test]
    fn test_builder_preserves_order() {
        let welder = Arc::new(Tool::new("Welder-01", ToolKind::Welder));
        let painter = Arc::new(Tool::new("Painter-03", ToolKind::Painter));
        let metal = Arc::new(Material::new("Metal", MaterialKind::Metal, 100.0));
        let paint = Arc::new(Material::new("Paint", MaterialKind::Liquid, 20.0));

        let bp = Blueprint::builder("Blueprint-01")
            .tool(&welder, [("power", "high"), ("mode", "spot")])
            .tool(&painter, [("color", "blue")])
            .material(&metal, 20.0)
            .material(&paint, 5.0)
            .build();

        assert_eq!(bp.name(), "Blueprint-01");
        let tool_names: Vec<_> = bp
            .required_tools()
            .iter()
            .map(|req| req.tool.upgrade().unwrap().name().to_string())
            .collect();
        assert_eq!(tool_names, ["Welder-01", "Painter-03"]);
        assert_eq!(bp.required_tools()[0].params["mode"], "spot");
        assert_eq!(bp.required_materials()[1].quantity, 5.0);
    }

    #[test]
    fn test_blueprint_does_not_own_resources() {
        let cutter = Arc::new(Tool::new("Cutter-07", ToolKind::Cutter));
        let bp = Blueprint::builder("Cut").tool(&cutter, Vec::<(String, String)>::new()).build();

        assert_eq!(Arc::strong_count(&cutter), 1);
        drop(cutter);
        assert!(bp.required_tools()[0].tool.upgrade().is_none());
    }
}
