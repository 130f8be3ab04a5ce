//! Core records for simulation entities
//!
//! Interaction rules are immutable once built and shared between every
//! vehicle of a species.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::species::Species;
use crate::vector::Vector2;

// ============================================================================
// Identity
// ============================================================================

/// Unique within one world, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub u64);

// ============================================================================
// Interaction Rules
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SteeringBehavior {
    Seek,
    Flee,
    Cohesion,
    #[serde(alias = "seperate")]
    Separate,
    #[serde(alias = "align")]
    Alignment,
}

impl SteeringBehavior {
    pub fn name(&self) -> &'static str {
        match self {
            SteeringBehavior::Seek => "seek",
            SteeringBehavior::Flee => "flee",
            SteeringBehavior::Cohesion => "cohesion",
            SteeringBehavior::Separate => "separate",
            SteeringBehavior::Alignment => "alignment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemographicEvent {
    Birth,
    Death,
    Eat,
}

impl DemographicEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DemographicEvent::Birth => "birth",
            DemographicEvent::Death => "death",
            DemographicEvent::Eat => "eat",
        }
    }
}

/// What a rule does, together with its rule-class parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleKind {
    /// Steering force scaled by `weight`
    Steering { behavior: SteeringBehavior, weight: f64 },
    /// Lotka-Volterra event firing with `probability` per tick
    Demographic { event: DemographicEvent, probability: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRule {
    pub kind: RuleKind,
    /// Sensing distance; targets farther than this are ignored
    pub range: f64,
    /// Species names this rule reacts to
    pub targets: BTreeSet<String>,
}

impl InteractionRule {
    pub fn steering<I, S>(behavior: SteeringBehavior, range: f64, weight: f64, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: RuleKind::Steering { behavior, weight },
            range,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn demographic<I, S>(event: DemographicEvent, range: f64, probability: f64, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: RuleKind::Demographic { event, probability },
            range,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            RuleKind::Steering { behavior, .. } => behavior.name(),
            RuleKind::Demographic { event, .. } => event.name(),
        }
    }

    /// Alignment averages over the whole flock, the querying vehicle included.
    pub fn includes_self(&self) -> bool {
        matches!(
            self.kind,
            RuleKind::Steering {
                behavior: SteeringBehavior::Alignment,
                ..
            }
        )
    }

    pub fn targets_species(&self, species: &str) -> bool {
        self.targets.contains(species)
    }
}

// ============================================================================
// Vehicle
// ============================================================================

/// One individual agent.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub species: Arc<Species>,
    pub pos: Vector2,
    pub velocity: Vector2,
    /// Unit orientation; follows the velocity whenever it is non-zero
    pub heading: Vector2,
    pub dead: bool,
    pub birthing: bool,
    /// Steering force computed during the current tick, applied on update
    pub pending_force: Option<Vector2>,
}

impl Vehicle {
    pub fn species_name(&self) -> &str {
        &self.species.name
    }

    pub fn max_speed(&self) -> f64 {
        self.species.max_speed
    }

    pub fn color(&self) -> &str {
        &self.species.color
    }

    pub fn steering_rules(&self) -> &[InteractionRule] {
        &self.species.steering_rules
    }

    pub fn demographic_rules(&self) -> &[InteractionRule] {
        &self.species.demographic_rules
    }

    /// Offspring: same species and shared rules, fresh id and placement.
    pub fn copy(&self, id: VehicleId, pos: Vector2, heading: Vector2) -> Vehicle {
        self.species.create_instance(id, pos, heading)
    }
}
