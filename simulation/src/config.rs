//! Scenario configuration
//!
//! JSON description of a run: arena size, species with their rules, and
//! starting populations. Validation happens when the world is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::components::{DemographicEvent, SteeringBehavior};
use crate::error::Result;
use crate::species::Species;
use crate::vector::Vector2;
use crate::world::SimulationWorld;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringRuleConfig {
    pub kind: SteeringBehavior,
    pub range: f64,
    pub weight: f64,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicRuleConfig {
    pub kind: DemographicEvent,
    pub range: f64,
    pub probability: f64,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub name: String,
    pub max_speed: f64,
    pub color: String,
    #[serde(default)]
    pub steering: Vec<SteeringRuleConfig>,
    #[serde(default)]
    pub demographics: Vec<DemographicRuleConfig>,
}

impl SpeciesConfig {
    pub fn to_species(&self) -> Species {
        let mut species = Species::new(self.name.clone(), self.max_speed, self.color.clone());
        for rule in &self.steering {
            species.add_steering_rule(rule.kind, rule.range, rule.weight, rule.targets.iter().cloned());
        }
        for rule in &self.demographics {
            species.add_demographic_rule(rule.kind, rule.range, rule.probability, rule.targets.iter().cloned());
        }
        species
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Arena `[width, height]`
    pub bounds: [f64; 2],
    pub species: Vec<SpeciesConfig>,
    pub initial_populations: BTreeMap<String, u32>,
    /// Fixed RNG seed; omitted means a fresh random run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build_species(&self) -> Vec<Species> {
        self.species.iter().map(SpeciesConfig::to_species).collect()
    }

    /// Validate and populate a world for this scenario.
    pub fn build_world(&self) -> Result<SimulationWorld> {
        let bounds = Vector2::from(self.bounds);
        match self.seed {
            Some(seed) => {
                SimulationWorld::with_seed(bounds, self.build_species(), &self.initial_populations, seed)
            }
            None => SimulationWorld::new(bounds, self.build_species(), &self.initial_populations),
        }
    }

    /// Two prey species sharing a flock, hunted by one predator.
    pub fn predator_prey() -> Self {
        fn steer(kind: SteeringBehavior, range: f64, weight: f64, targets: &[&str]) -> SteeringRuleConfig {
            SteeringRuleConfig {
                kind,
                range,
                weight,
                targets: targets.iter().map(|t| t.to_string()).collect(),
            }
        }
        fn demo(kind: DemographicEvent, range: f64, probability: f64, targets: &[&str]) -> DemographicRuleConfig {
            DemographicRuleConfig {
                kind,
                range,
                probability,
                targets: targets.iter().map(|t| t.to_string()).collect(),
            }
        }

        use DemographicEvent::*;
        use SteeringBehavior::*;

        let flock = ["prey1", "prey2"];
        let prey = |name: &str, max_speed: f64, color: &str, flee_range: f64, kin: &[&str]| SpeciesConfig {
            name: name.to_string(),
            max_speed,
            color: color.to_string(),
            steering: vec![
                steer(Flee, flee_range, 2.0, &["predator"]),
                steer(Cohesion, 60.0, 0.5, &flock),
                steer(Separate, 10.0, 0.5, &flock),
                steer(Alignment, 25.0, 1.0, &flock),
            ],
            demographics: vec![demo(Birth, 30.0, 0.07, kin), demo(Death, 0.0, 0.05, &[])],
        };

        let predator = SpeciesConfig {
            name: "predator".to_string(),
            max_speed: 12.0,
            color: "red".to_string(),
            steering: vec![
                steer(Seek, 120.0, 2.0, &flock),
                steer(Cohesion, 60.0, 0.5, &["predator"]),
                steer(Separate, 10.0, 0.5, &["predator"]),
                steer(Alignment, 25.0, 1.0, &["predator"]),
            ],
            demographics: vec![demo(Eat, 30.0, 0.2, &flock), demo(Death, 0.0, 0.05, &[])],
        };

        Self {
            bounds: [700.0, 500.0],
            species: vec![
                prey("prey1", 10.0, "blue", 120.0, &flock),
                prey("prey2", 9.0, "green", 150.0, &["prey2"]),
                predator,
            ],
            initial_populations: BTreeMap::from([
                ("prey1".to_string(), 50),
                ("prey2".to_string(), 50),
                ("predator".to_string(), 20),
            ]),
            seed: None,
        }
    }
}
