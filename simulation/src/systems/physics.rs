//! Physics System
//!
//! Apply-phase motion update plus the random placement helpers used when
//! spawning vehicles.

use rand::Rng;
use rand_distr::{Distribution, Uniform, UnitCircle};

use crate::components::Vehicle;
use crate::vector::Vector2;

/// Every vehicle has unit mass, so acceleration equals the steering force.
pub const MASS: f64 = 1.0;

/// Offspring land this far from the parent along each axis.
const OFFSPRING_MIN_OFFSET: f64 = 10.0;
const OFFSPRING_MAX_OFFSET: f64 = 25.0;

/// Apply the pending steering force and move `vehicle` one step on the torus.
pub fn integrate(vehicle: &mut Vehicle, bounds: Vector2) {
    let force = vehicle.pending_force.take().unwrap_or(Vector2::ZERO);
    let acceleration = force / MASS;

    vehicle.velocity = (vehicle.velocity + acceleration).clamp_magnitude(vehicle.max_speed());
    vehicle.pos = (vehicle.pos + vehicle.velocity).wrap(&bounds);

    // Standing still keeps the last heading
    if let Some(heading) = vehicle.velocity.unit() {
        vehicle.heading = heading;
    }
}

/// Uniformly distributed unit heading.
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Vector2 {
    let [x, y]: [f64; 2] = UnitCircle.sample(rng);
    Vector2::new(x, y)
}

/// Per-axis offset in `[10, 25]` with an independent random sign.
pub fn offspring_offset<R: Rng + ?Sized>(rng: &mut R) -> Vector2 {
    let magnitude = Uniform::new_inclusive(OFFSPRING_MIN_OFFSET, OFFSPRING_MAX_OFFSET);
    let axis = |rng: &mut R| {
        let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
        sign * magnitude.sample(rng)
    };
    let x = axis(rng);
    let y = axis(rng);
    Vector2::new(x, y)
}
