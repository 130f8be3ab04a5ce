//! Demographics System
//!
//! Lotka-Volterra events: spontaneous death, neighbor-gated birth, and
//! predation where every successful kill earns the predator an offspring.

use rand::Rng;

use crate::components::{DemographicEvent, RuleKind, Vehicle};
use crate::world::Arena;

/// Flags one vehicle's demographic rules raised this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemographicOutcome {
    pub dead: bool,
    pub birthing: bool,
    /// Arena indices of prey this vehicle killed
    pub kills: Vec<usize>,
}

/// Roll every demographic rule of `vehicle` once against the current arena.
///
/// Prey already flagged dead in `arena` (or killed earlier in this same
/// evaluation) cannot be eaten again.
pub fn roll_demographics<R: Rng + ?Sized>(vehicle: &Vehicle, arena: &Arena, rng: &mut R) -> DemographicOutcome {
    let mut outcome = DemographicOutcome::default();

    for rule in vehicle.demographic_rules() {
        let RuleKind::Demographic { event, probability } = rule.kind else {
            continue;
        };

        match event {
            // Independent of neighbors
            DemographicEvent::Death => {
                if rng.gen::<f64>() <= probability {
                    outcome.dead = true;
                }
            }
            DemographicEvent::Birth => {
                if arena.target_indices(vehicle, rule).is_empty() {
                    continue;
                }
                if rng.gen::<f64>() <= probability {
                    outcome.birthing = true;
                }
            }
            DemographicEvent::Eat => {
                for idx in arena.target_indices(vehicle, rule) {
                    let roll = rng.gen::<f64>();
                    let alive = !arena.agents[idx].dead && !outcome.kills.contains(&idx);
                    if roll <= probability && alive {
                        outcome.kills.push(idx);
                        outcome.birthing = true;
                    }
                }
            }
        }
    }

    outcome
}
