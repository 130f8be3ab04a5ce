//! Steering System
//!
//! Sums the weighted steering forces of every steering rule a vehicle has.
//! Works on the pre-tick arena only, so every vehicle steers from the same
//! snapshot.

use crate::components::{InteractionRule, RuleKind, SteeringBehavior, Vehicle};
use crate::vector::Vector2;
use crate::world::Arena;

/// Combined steering force of all of `vehicle`'s steering rules.
pub fn steering_force(vehicle: &Vehicle, arena: &Arena) -> Vector2 {
    vehicle
        .steering_rules()
        .iter()
        .map(|rule| rule_force(vehicle, arena, rule))
        .sum()
}

fn rule_force(vehicle: &Vehicle, arena: &Arena, rule: &InteractionRule) -> Vector2 {
    let RuleKind::Steering { behavior, weight } = rule.kind else {
        return Vector2::ZERO;
    };

    let targets = arena.get_targets(vehicle, rule);
    if targets.is_empty() {
        return Vector2::ZERO;
    }

    let force = match behavior {
        SteeringBehavior::Seek => targets.iter().map(|t| seek(vehicle, t.pos)).sum(),
        SteeringBehavior::Flee => targets.iter().map(|t| -seek(vehicle, t.pos)).sum(),
        SteeringBehavior::Cohesion => toward_centroid(vehicle, &targets) - vehicle.velocity,
        SteeringBehavior::Separate => -toward_centroid(vehicle, &targets) - vehicle.velocity,
        SteeringBehavior::Alignment => {
            let sum_dir: Vector2 = targets.iter().map(|t| t.heading).sum();
            // Opposing headings cancel out to no preferred direction
            match sum_dir.set_magnitude(vehicle.max_speed()) {
                Some(desired) => desired - vehicle.velocity,
                None => Vector2::ZERO,
            }
        }
    };

    force * weight
}

/// Full-speed desired velocity at `target`, minus the current velocity.
fn seek(vehicle: &Vehicle, target: Vector2) -> Vector2 {
    // A target on top of us gives no direction to head in
    let desired = (target - vehicle.pos)
        .set_magnitude(vehicle.max_speed())
        .unwrap_or(Vector2::ZERO);
    desired - vehicle.velocity
}

/// Offset to the mean position of `targets`, capped at max speed.
fn toward_centroid(vehicle: &Vehicle, targets: &[&Vehicle]) -> Vector2 {
    let centroid = targets.iter().map(|t| t.pos).sum::<Vector2>() / targets.len() as f64;
    (centroid - vehicle.pos).clamp_magnitude(vehicle.max_speed())
}
