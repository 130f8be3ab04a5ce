//! N-API bindings for Node.js
//!
//! The host owns the world handle and passes it into every call; starting a
//! new simulation just means creating a new handle.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ScenarioConfig;
use crate::world::SimulationWorld;

type WorldHandle = Arc<Mutex<SimulationWorld>>;

fn lock(world: &External<WorldHandle>) -> Result<MutexGuard<'_, SimulationWorld>> {
    world
        .lock()
        .map_err(|_| Error::from_reason("simulation world lock poisoned"))
}

/// JS numbers handed out as `u32`; anything wider is an error, not a wrap.
fn to_js_u32<T: TryInto<u32>>(value: T, what: &str) -> Result<u32> {
    value
        .try_into()
        .map_err(|_| Error::from_reason(format!("{} exceeds u32 range", what)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::from_reason(e.to_string()))
}

/// Build a world from a scenario JSON document.
#[napi]
pub fn create_world(scenario_json: String) -> Result<External<WorldHandle>> {
    let world = ScenarioConfig::from_json_str(&scenario_json)
        .and_then(|config| config.build_world())
        .map_err(|e| Error::from_reason(e.to_string()))?;
    Ok(External::new(Arc::new(Mutex::new(world))))
}

/// Advance one tick; returns the new state as JSON.
#[napi]
pub fn step(world: External<WorldHandle>) -> Result<String> {
    let mut w = lock(&world)?;
    to_json(&w.run_step())
}

#[napi]
pub fn step_many(world: External<WorldHandle>, count: u32) -> Result<String> {
    let mut w = lock(&world)?;
    for _ in 0..count {
        w.step();
    }
    to_json(&w.get_state())
}

#[napi]
pub fn get_state(world: External<WorldHandle>) -> Result<String> {
    to_json(&lock(&world)?.get_state())
}

#[napi]
pub fn get_history(world: External<WorldHandle>) -> Result<String> {
    to_json(&lock(&world)?.get_history())
}

#[napi]
pub fn get_population(world: External<WorldHandle>) -> Result<u32> {
    to_js_u32(lock(&world)?.population(), "population")
}

#[napi]
pub fn get_timestep(world: External<WorldHandle>) -> Result<u32> {
    to_js_u32(lock(&world)?.timestep(), "timestep")
}
