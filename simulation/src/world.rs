//! Simulation World - main orchestrator
//!
//! A tick runs in two passes over the same snapshot of live vehicles: a
//! compute pass where every vehicle decides its steering force and
//! demographic flags from the pre-tick state, then an apply pass that
//! removes the dead, spawns offspring and moves everyone else.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::components::{InteractionRule, Vehicle, VehicleId};
use crate::error::{ConfigError, Result};
use crate::history::{History, HistoryEntry};
use crate::species::Species;
use crate::systems::{integrate, offspring_offset, random_heading, roll_demographics, steering_force};
use crate::vector::{angle_of, Vector2};

// ============================================================================
// Arena
// ============================================================================

/// Bounded torus and the vehicles living on it, in creation order.
#[derive(Debug, Clone)]
pub struct Arena {
    pub bounds: Vector2,
    pub agents: Vec<Vehicle>,
}

impl Arena {
    pub fn new(bounds: Vector2, agents: Vec<Vehicle>) -> Self {
        Self { bounds, agents }
    }

    /// Indices of the vehicles `rule` applies to when sensed from `vehicle`.
    ///
    /// Distance is plain Euclidean; ranges do not reach across the wrapped
    /// edges.
    pub fn target_indices(&self, vehicle: &Vehicle, rule: &InteractionRule) -> Vec<usize> {
        let include_self = rule.includes_self();
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, other)| {
                (include_self || other.id != vehicle.id)
                    && rule.targets_species(other.species_name())
                    && vehicle.pos.distance(&other.pos) <= rule.range
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn get_targets(&self, vehicle: &Vehicle, rule: &InteractionRule) -> Vec<&Vehicle> {
        self.target_indices(vehicle, rule)
            .into_iter()
            .map(|idx| &self.agents[idx])
            .collect()
    }
}

// ============================================================================
// Read-only projections
// ============================================================================

/// What a renderer needs to draw one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentState {
    pub pos: Vector2,
    pub heading: Vector2,
    pub color: String,
}

impl AgentState {
    /// Drawing rotation of this vehicle
    pub fn angle(&self) -> f64 {
        angle_of(&self.heading)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldState {
    pub timestep: u64,
    pub agents: Vec<AgentState>,
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickResult {
    pub timestep: u64,
    pub births: u32,
    pub deaths: u32,
    pub population: usize,
}

// ============================================================================
// World
// ============================================================================

pub struct SimulationWorld {
    arena: Arena,
    species: BTreeMap<String, Arc<Species>>,
    counts: BTreeMap<String, u32>,
    history: History,
    timestep: u64,
    next_vehicle_id: u64,
    rng: StdRng,
}

impl SimulationWorld {
    /// Build and populate a world with an entropy-seeded generator.
    pub fn new(
        bounds: Vector2,
        species: impl IntoIterator<Item = Species>,
        initial_populations: &BTreeMap<String, u32>,
    ) -> Result<Self> {
        Self::with_rng(bounds, species, initial_populations, StdRng::from_entropy())
    }

    /// Same as [`SimulationWorld::new`] but reproducible.
    pub fn with_seed(
        bounds: Vector2,
        species: impl IntoIterator<Item = Species>,
        initial_populations: &BTreeMap<String, u32>,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(bounds, species, initial_populations, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        bounds: Vector2,
        species: impl IntoIterator<Item = Species>,
        initial_populations: &BTreeMap<String, u32>,
        rng: StdRng,
    ) -> Result<Self> {
        if !(bounds.x.is_finite() && bounds.y.is_finite() && bounds.x > 0.0 && bounds.y > 0.0) {
            return Err(ConfigError::InvalidBounds {
                width: bounds.x,
                height: bounds.y,
            });
        }

        let mut by_name = BTreeMap::new();
        for s in species {
            if by_name.contains_key(&s.name) {
                return Err(ConfigError::DuplicateSpecies(s.name));
            }
            by_name.insert(s.name.clone(), Arc::new(s));
        }

        let known: BTreeSet<String> = by_name.keys().cloned().collect();
        for s in by_name.values() {
            s.validate(&known)?;
        }
        if let Some(name) = initial_populations.keys().find(|n| !known.contains(*n)) {
            return Err(ConfigError::UnknownSpecies(name.clone()));
        }

        let counts = known.iter().map(|name| (name.clone(), 0)).collect();
        let mut world = Self {
            arena: Arena::new(bounds, Vec::new()),
            species: by_name,
            counts,
            history: History::new(),
            timestep: 0,
            next_vehicle_id: 1,
            rng,
        };
        world.populate(initial_populations);

        info!(
            "World {}x{} populated with {} vehicles across {} species",
            bounds.x,
            bounds.y,
            world.population(),
            world.species.len()
        );

        Ok(world)
    }

    /// Scatter the initial populations uniformly and record `t = 0`.
    fn populate(&mut self, initial_populations: &BTreeMap<String, u32>) {
        let bounds = self.arena.bounds;
        for (name, &count) in initial_populations {
            for _ in 0..count {
                let pos = Vector2::new(
                    self.rng.gen_range(0.0..bounds.x),
                    self.rng.gen_range(0.0..bounds.y),
                );
                let heading = random_heading(&mut self.rng);
                self.spawn(name, pos, heading);
            }
        }
        self.history.record(self.timestep, &self.counts);
    }

    fn allocate_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;
        id
    }

    /// Add a vehicle of a known species. Returns `None` for unknown species.
    pub fn spawn(&mut self, species: &str, pos: Vector2, heading: Vector2) -> Option<VehicleId> {
        let template = Arc::clone(self.species.get(species)?);
        let id = self.allocate_id();
        self.arena.agents.push(template.create_instance(id, pos, heading));
        *self.counts.entry(template.name.clone()).or_insert(0) += 1;
        Some(id)
    }

    /// Vehicles the rule applies to, as sensed by `vehicle`.
    pub fn get_targets(&self, vehicle: &Vehicle, rule: &InteractionRule) -> Vec<&Vehicle> {
        self.arena.get_targets(vehicle, rule)
    }

    /// Roll the demographic rules of the vehicle at `index` and raise the
    /// resulting flags on it and on any prey it caught.
    pub fn evaluate_demographics(&mut self, index: usize) {
        let Some(vehicle) = self.arena.agents.get(index) else {
            return;
        };
        let outcome = roll_demographics(vehicle, &self.arena, &mut self.rng);

        for idx in outcome.kills {
            self.arena.agents[idx].dead = true;
        }
        let vehicle = &mut self.arena.agents[index];
        vehicle.dead |= outcome.dead;
        vehicle.birthing |= outcome.birthing;
    }

    /// Advance one tick.
    pub fn step(&mut self) -> TickResult {
        let snapshot_len = self.arena.agents.len();

        // Compute: decisions only, from the pre-tick state
        for idx in 0..snapshot_len {
            self.evaluate_demographics(idx);
            let force = steering_force(&self.arena.agents[idx], &self.arena);
            self.arena.agents[idx].pending_force = Some(force);
        }

        // Apply: deaths, births, motion
        let before = self.counts.clone();
        let bounds = self.arena.bounds;
        let snapshot = std::mem::take(&mut self.arena.agents);
        let mut survivors = Vec::with_capacity(snapshot.len());
        let mut offspring = Vec::new();
        let mut births = 0u32;
        let mut deaths = 0u32;

        for mut vehicle in snapshot {
            if vehicle.birthing {
                // A dying parent still gets its offspring out first
                let pos = vehicle.pos + offspring_offset(&mut self.rng);
                let heading = random_heading(&mut self.rng);
                let id = self.allocate_id();
                offspring.push(vehicle.copy(id, pos, heading));
                vehicle.birthing = false;
                *self.counts.entry(vehicle.species_name().to_string()).or_insert(0) += 1;
                births += 1;
            }

            if vehicle.dead {
                if let Some(count) = self.counts.get_mut(vehicle.species_name()) {
                    *count = count.saturating_sub(1);
                }
                deaths += 1;
                continue;
            }

            integrate(&mut vehicle, bounds);
            survivors.push(vehicle);
        }

        survivors.extend(offspring);
        self.arena.agents = survivors;

        self.timestep += 1;
        self.history.record(self.timestep, &self.counts);

        for (name, count) in &self.counts {
            if *count == 0 && before.get(name).copied().unwrap_or(0) > 0 {
                warn!("Species {} went extinct at timestep {}", name, self.timestep);
            }
        }

        let result = TickResult {
            timestep: self.timestep,
            births,
            deaths,
            population: self.population(),
        };
        debug!(
            "Tick {}: {} births, {} deaths, population {}",
            result.timestep, result.births, result.deaths, result.population
        );
        result
    }

    /// Advance one tick and return the resulting state.
    pub fn run_step(&mut self) -> WorldState {
        self.step();
        self.get_state()
    }

    pub fn get_state(&self) -> WorldState {
        WorldState {
            timestep: self.timestep,
            agents: self
                .arena
                .agents
                .iter()
                .map(|v| AgentState {
                    pos: v.pos,
                    heading: v.heading,
                    color: v.color().to_string(),
                })
                .collect(),
        }
    }

    pub fn get_history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn agents(&self) -> &[Vehicle] {
        &self.arena.agents
    }

    pub fn bounds(&self) -> Vector2 {
        self.arena.bounds
    }

    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    pub fn population(&self) -> usize {
        self.arena.agents.len()
    }

    /// Live vehicles of `species` as tracked by the running counts
    pub fn count(&self, species: &str) -> u32 {
        self.counts.get(species).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    pub fn species(&self, name: &str) -> Option<&Arc<Species>> {
        self.species.get(name)
    }
}
