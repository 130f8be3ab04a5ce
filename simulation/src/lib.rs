//! Predator/Prey Simulation Engine
//!
//! Boid-style steering vehicles grouped into species, with stochastic
//! Lotka-Volterra birth, death and predation applied in synchronous ticks.

pub mod components;
pub mod config;
pub mod error;
pub mod history;
pub mod species;
pub mod systems;
pub mod vector;
pub mod world;

#[cfg(feature = "node")]
pub mod napi_bindings;

pub use components::*;
pub use config::ScenarioConfig;
pub use error::{ConfigError, Result};
pub use history::{History, HistoryEntry};
pub use species::Species;
pub use vector::Vector2;
pub use world::{AgentState, Arena, SimulationWorld, TickResult, WorldState};
