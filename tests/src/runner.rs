//! Scenario runner.

use crate::assertion::Outcome;
use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::Scenario;
use crate::world::World;

/// Runs a scenario against a fresh in-memory hypergraph.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<World> {
        // 1. Build the world
        let mut world = World::with_config(self.scenario.codec_config().clone());

        // 2. Register edge types and named vertices
        for def in self.scenario.definitions() {
            world.define(def.clone())?;
        }
        for name in self.scenario.vertex_names() {
            world.vertex(name)?;
        }

        // 3. Execute each step, verify its assertion and the stored encoding
        for step in self.scenario.steps() {
            let result = (step.action)(&mut world).map_err(|e| e.to_string());

            step.assertion.verify(&step.name, &world, &result)?;

            if let Ok(Outcome::Created(rel)) = &result {
                world.remember_anchor(&step.name, rel.anchor);
            }

            world
                .verify_encoding()
                .map_err(|message| ScenarioError::encoding_broken(&step.name, message))?;
        }

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;
    use polyedge_registry::{ConnectionMode, EdgeTypeDef};

    #[test]
    fn test_runner_remembers_anchors() {
        let world = Scenario::new("test")
            .define(EdgeTypeDef::hyper("Sale").role("buyer", ConnectionMode::General))
            .step("sale", |w| w.relate("Sale", &[("buyer", "alice")]), |a| a.created())
            .step("delete", |w| w.unrelate("sale"), |a| a.deleted().participants(1))
            .run()
            .unwrap();

        assert!(world.anchor("sale").is_ok());
        assert!(world.anchor("delete").is_err());
    }

    #[test]
    fn test_runner_reports_failed_assertion() {
        let err = Scenario::new("test")
            .define(EdgeTypeDef::hyper("Sale").role("buyer", ConnectionMode::General))
            .step("sale", |w| w.relate("Sale", &[("buyer", "alice")]), |a| a.participants(2))
            .run()
            .unwrap_err();

        assert!(err.to_string().contains("step 'sale'"));
    }
}
