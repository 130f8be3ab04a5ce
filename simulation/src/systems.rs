//! Per-vehicle computations run by the world each tick
//!
//! `steering` and `demographics` only read the arena; `physics` is the
//! apply-phase integration step.

pub mod demographics;
pub mod physics;
pub mod steering;

pub use demographics::{roll_demographics, DemographicOutcome};
pub use physics::{integrate, offspring_offset, random_heading, MASS};
pub use steering::steering_force;
