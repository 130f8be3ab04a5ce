//! Construction-time errors
//!
//! Ticking a built world cannot fail; everything that can go wrong is
//! rejected before the first agent is spawned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world bounds must be positive and finite, got ({width}, {height})")]
    InvalidBounds { width: f64, height: f64 },

    #[error("species `{0}` is defined more than once")]
    DuplicateSpecies(String),

    #[error("species `{name}` has invalid max speed {max_speed}")]
    InvalidMaxSpeed { name: String, max_speed: f64 },

    #[error("species `{species}`: {kind} rule has invalid range {range}")]
    InvalidRange {
        species: String,
        kind: &'static str,
        range: f64,
    },

    #[error("species `{species}`: {kind} rule has non-finite weight {weight}")]
    InvalidWeight {
        species: String,
        kind: &'static str,
        weight: f64,
    },

    #[error("species `{species}`: {kind} probability {probability} is outside [0, 1]")]
    InvalidProbability {
        species: String,
        kind: &'static str,
        probability: f64,
    },

    #[error("species `{species}`: {kind} rule placed in the {list} rule list")]
    MisplacedRule {
        species: String,
        kind: &'static str,
        list: &'static str,
    },

    #[error("species `{species}`: {kind} rule targets unknown species `{target}`")]
    UnknownTarget {
        species: String,
        kind: &'static str,
        target: String,
    },

    #[error("initial population given for unknown species `{0}`")]
    UnknownSpecies(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
