//! Species templates
//!
//! A species bundles movement limits, display color and the rule lists every
//! one of its vehicles reacts with.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::components::{
    DemographicEvent, InteractionRule, RuleKind, SteeringBehavior, Vehicle, VehicleId,
};
use crate::error::{ConfigError, Result};
use crate::vector::Vector2;

#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub max_speed: f64,
    pub color: String,
    pub steering_rules: Vec<InteractionRule>,
    pub demographic_rules: Vec<InteractionRule>,
}

impl Species {
    pub fn new(name: impl Into<String>, max_speed: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_speed,
            color: color.into(),
            steering_rules: Vec::new(),
            demographic_rules: Vec::new(),
        }
    }

    pub fn add_steering_rule<I, S>(
        &mut self,
        behavior: SteeringBehavior,
        range: f64,
        weight: f64,
        targets: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steering_rules
            .push(InteractionRule::steering(behavior, range, weight, targets));
        self
    }

    pub fn add_demographic_rule<I, S>(
        &mut self,
        event: DemographicEvent,
        range: f64,
        probability: f64,
        targets: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.demographic_rules
            .push(InteractionRule::demographic(event, range, probability, targets));
        self
    }

    /// Stamp out a new vehicle moving at full speed along `heading`.
    pub fn create_instance(self: &Arc<Self>, id: VehicleId, pos: Vector2, heading: Vector2) -> Vehicle {
        Vehicle {
            id,
            species: Arc::clone(self),
            pos,
            velocity: heading * self.max_speed,
            heading,
            dead: false,
            birthing: false,
            pending_force: None,
        }
    }

    /// Check parameters and that every rule only names species in `known`.
    pub fn validate(&self, known: &BTreeSet<String>) -> Result<()> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(ConfigError::InvalidMaxSpeed {
                name: self.name.clone(),
                max_speed: self.max_speed,
            });
        }

        for rule in &self.steering_rules {
            match rule.kind {
                RuleKind::Steering { weight, .. } if !weight.is_finite() => {
                    return Err(ConfigError::InvalidWeight {
                        species: self.name.clone(),
                        kind: rule.name(),
                        weight,
                    });
                }
                RuleKind::Steering { .. } => {}
                RuleKind::Demographic { .. } => {
                    return Err(ConfigError::MisplacedRule {
                        species: self.name.clone(),
                        kind: rule.name(),
                        list: "steering",
                    });
                }
            }
            self.validate_common(rule, known)?;
        }

        for rule in &self.demographic_rules {
            match rule.kind {
                RuleKind::Demographic { probability, .. } if !(0.0..=1.0).contains(&probability) => {
                    return Err(ConfigError::InvalidProbability {
                        species: self.name.clone(),
                        kind: rule.name(),
                        probability,
                    });
                }
                RuleKind::Demographic { .. } => {}
                RuleKind::Steering { .. } => {
                    return Err(ConfigError::MisplacedRule {
                        species: self.name.clone(),
                        kind: rule.name(),
                        list: "demographic",
                    });
                }
            }
            self.validate_common(rule, known)?;
        }

        Ok(())
    }

    fn validate_common(&self, rule: &InteractionRule, known: &BTreeSet<String>) -> Result<()> {
        if !(rule.range.is_finite() && rule.range >= 0.0) {
            return Err(ConfigError::InvalidRange {
                species: self.name.clone(),
                kind: rule.name(),
                range: rule.range,
            });
        }
        if let Some(target) = rule.targets.iter().find(|t| !known.contains(*t)) {
            return Err(ConfigError::UnknownTarget {
                species: self.name.clone(),
                kind: rule.name(),
                target: target.clone(),
            });
        }
        Ok(())
    }
}
