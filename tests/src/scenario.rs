//! Scenario definition and builder.

use polyedge_codec::CodecConfig;
use polyedge_registry::EdgeTypeDef;

use crate::assertion::{Assertion, AssertionBuilder, Outcome};
use crate::error::ScenarioResult;
use crate::runner::Runner;
use crate::world::World;

/// The action a step performs against the world.
pub type Action = Box<dyn Fn(&mut World) -> ScenarioResult<Outcome>>;

/// A step in a scenario with its assertion.
pub struct Step {
    /// Step name, also the key its anchor is remembered under.
    pub name: String,
    pub action: Action,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("assertion", &self.assertion)
            .finish()
    }
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    config: CodecConfig,
    /// Edge types registered before the first step.
    definitions: Vec<EdgeTypeDef>,
    /// Vertices created before the first step.
    vertices: Vec<String>,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: CodecConfig::default(),
            definitions: Vec::new(),
            vertices: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Set the codec configuration the world is built with.
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an edge type before the steps run.
    pub fn define(mut self, def: EdgeTypeDef) -> Self {
        self.definitions.push(def);
        self
    }

    /// Create named vertices before the steps run.
    pub fn vertices(mut self, names: &[&str]) -> Self {
        self.vertices.extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Add a step with an assertion.
    pub fn step<A, F>(mut self, name: impl Into<String>, action: A, assertion_fn: F) -> Self
    where
        A: Fn(&mut World) -> ScenarioResult<Outcome> + 'static,
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let name = name.into();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name,
            action: Box::new(action),
            assertion,
        });
        self
    }

    /// Run the scenario and return the final world.
    pub fn run(&self) -> ScenarioResult<World> {
        Runner::new(self).run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec_config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn definitions(&self) -> &[EdgeTypeDef] {
        &self.definitions
    }

    pub fn vertex_names(&self) -> &[String] {
        &self.vertices
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyedge_registry::ConnectionMode;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .define(EdgeTypeDef::hyper("Sale").role("buyer", ConnectionMode::General))
            .vertices(&["alice"])
            .step("relate", |w| w.relate("Sale", &[("buyer", "alice")]), |a| a.created())
            .step("query", |w| w.has_role("alice", "buyer", &["Sale"]), |a| a.is(true));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.definitions().len(), 1);
        assert_eq!(scenario.vertex_names(), &["alice".to_string()]);
        assert_eq!(scenario.steps().len(), 2);
        assert_eq!(scenario.steps()[0].name, "relate");
        assert_eq!(scenario.steps()[1].name, "query");
    }
}
