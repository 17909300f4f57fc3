//! Configuration types for loading scenes from YAML.
//!
//! This module defines a thin, `serde`-deserializable description of a
//! scene. A scenario consists of:
//!
//! - [`ParametersConfig`] – tick size, end time and reporting
//! - [`BodyConfig`]       – named bodies with a shape and initial state
//! - [`ForceConfig`]      – force creators wired between bodies by name
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   t_end: 2.0              # total simulated time
//!   h0: 0.001               # tick size
//!   report_every: 500       # ticks between progress logs
//!
//! bodies:
//!   - name: ground
//!     shape: { kind: rectangle, center: [0.0, -1.0], width: 40.0, height: 2.0 }
//!     mass: .inf            # immovable
//!   - name: ball
//!     shape: { kind: regular_polygon, center: [0.0, 5.0], radius: 1.0, sides: 16 }
//!     mass: 1.0
//!     velocity: [0.0, 0.0]
//!     color: [1.0, 0.0, 0.0, 1.0]
//!
//! forces:
//!   - { kind: global_gravity, g: 9.8, body: ball }
//!   - { kind: physics_collision, elasticity: 0.8, body1: ball, body2: ground }
//! ```
//!
//! The scene is then assembled by `Scenario::build_scenario`, which resolves
//! body names to handles.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::color::Rgba;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to open scenario {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario")]
    Yaml(#[from] serde_yaml::Error),

    #[error("body name `{0}` is used more than once")]
    DuplicateBody(String),

    #[error("force references unknown body `{0}`")]
    UnknownBody(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Numerical parameters for a run
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub h0: f64, // tick size
    #[serde(default)]
    pub report_every: usize, // 0 disables progress logging
}

/// Shape of a body, placed in world coordinates
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Rectangle { center: [f64; 2], width: f64, height: f64 },
    RegularPolygon { center: [f64; 2], radius: f64, sides: usize },
    Star { center: [f64; 2], arms: usize, circumradius: f64, inradius: f64 },
    Ellipse { center: [f64; 2], width: f64, height: f64, vertices: usize },
    Polygon { vertices: Vec<[f64; 2]> },
}

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // referenced by forces
    pub shape: ShapeConfig,
    pub mass: f64, // `.inf` for immovable
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub angular_velocity: f64,
    #[serde(default)]
    pub color: Rgba,
}

/// A force creator between named bodies
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceConfig {
    NewtonianGravity { g: f64, body1: String, body2: String },
    GlobalGravity { g: f64, body: String },
    Spring { k: f64, body1: String, body2: String },
    Drag { gamma: f64, body: String },
    Friction { mu: f64, body1: String, body2: String },
    RigidConstraint { body1: String, body2: String },
    DestructiveCollision { body1: String, body2: String },
    OneBodyDestructiveCollision { doomed: String, other: String },
    PhysicsCollision {
        elasticity: f64,
        body1: String,
        body2: String,
        #[serde(default)]
        contact: bool,
    },
    InstantResolution { body1: String, body2: String },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }
}
