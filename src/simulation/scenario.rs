//! Build a ready-to-run scene from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`:
//! - run parameters (`Parameters`)
//! - a `Scene` with every configured body and force creator registered
//! - the name → `BodyId` map used to wire forces, kept for callers

use std::collections::HashMap;

use log::{debug, warn};

use crate::configuration::config::{BodyConfig, ConfigError, ForceConfig, ScenarioConfig, ShapeConfig};
use crate::simulation::body::Body;
use crate::simulation::forces::{
    create_destructive_collision, create_drag, create_friction, create_global_gravity,
    create_instant_resolution_collision, create_newtonian_gravity,
    create_one_body_full_destructive_collision, create_physical_rigid_constraint,
    create_physics_collision, create_physics_contact_collision, create_spring,
};
use crate::simulation::params::Parameters;
use crate::simulation::polygon::Polygon;
use crate::simulation::scene::{BodyId, Scene};
use crate::simulation::vector::NVec2;

/// A scene plus everything needed to run it
pub struct Scenario {
    pub parameters: Parameters,
    pub scene: Scene,
    pub names: HashMap<String, BodyId>,
}

fn vec2([x, y]: [f64; 2]) -> NVec2 {
    NVec2::new(x, y)
}

fn build_shape(cfg: &ShapeConfig) -> Polygon {
    match cfg {
        ShapeConfig::Rectangle { center, width, height } => {
            Polygon::rectangle_centered(vec2(*center), *width, *height)
        }
        ShapeConfig::RegularPolygon { center, radius, sides } => {
            Polygon::regular_polygon(vec2(*center), *radius, *sides)
        }
        ShapeConfig::Star { center, arms, circumradius, inradius } => {
            Polygon::star(vec2(*center), *arms, *circumradius, *inradius)
        }
        ShapeConfig::Ellipse { center, width, height, vertices } => {
            Polygon::ellipse(vec2(*center), *width, *height, *vertices)
        }
        ShapeConfig::Polygon { vertices } => Polygon::new(vertices.iter().copied().map(vec2).collect()),
    }
}

/// Reject shapes the polygon constructors would panic on, and shapes
/// without area (their centroid is undefined)
fn validate_shape(name: &str, cfg: &ShapeConfig) -> Result<(), ConfigError> {
    let problem = match cfg {
        ShapeConfig::Rectangle { width, height, .. } if !(*width > 0.0 && *height > 0.0) => {
            Some("rectangle size must be positive")
        }
        ShapeConfig::RegularPolygon { radius, sides, .. } if !(*radius > 0.0) || *sides < 3 => {
            Some("regular polygon needs a positive radius and at least 3 sides")
        }
        ShapeConfig::Star { arms, circumradius, inradius, .. }
            if *arms < 2 || !(*inradius > 0.0) || circumradius < inradius =>
        {
            Some("star needs at least 2 arms and 0 < inradius <= circumradius")
        }
        ShapeConfig::Ellipse { width, height, vertices, .. }
            if !(*width > 0.0 && *height > 0.0) || *vertices < 3 =>
        {
            Some("ellipse needs a positive size and at least 3 vertices")
        }
        ShapeConfig::Polygon { vertices } if vertices.len() < 3 => Some("polygon needs at least 3 vertices"),
        ShapeConfig::Polygon { .. } => {
            let area = build_shape(cfg).area();
            (area == 0.0 || !area.is_finite()).then_some("polygon has no area")
        }
        _ => None,
    };
    match problem {
        Some(msg) => Err(ConfigError::InvalidParameter(format!("body `{name}`: {msg}"))),
        None => Ok(()),
    }
}

fn build_body(cfg: &BodyConfig) -> Body {
    let mut body = Body::new(build_shape(&cfg.shape), cfg.mass, cfg.color);
    body.set_velocity(vec2(cfg.velocity));
    body.set_angular_velocity(cfg.angular_velocity);
    body
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        if !(p_cfg.h0 > 0.0 && p_cfg.h0.is_finite()) {
            return Err(ConfigError::InvalidParameter(format!("h0 must be positive, got {}", p_cfg.h0)));
        }
        if !(p_cfg.t_end >= 0.0 && p_cfg.t_end.is_finite()) {
            return Err(ConfigError::InvalidParameter(format!("t_end must be non-negative, got {}", p_cfg.t_end)));
        }
        for bc in &cfg.bodies {
            if !(bc.mass == 0.0 || bc.mass > 0.0) {
                return Err(ConfigError::InvalidParameter(format!("body `{}` has mass {}", bc.name, bc.mass)));
            }
            validate_shape(&bc.name, &bc.shape)?;
        }
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            report_every: p_cfg.report_every,
        };

        // Bodies: map `BodyConfig` -> runtime `Body`, remembering names
        let mut scene = Scene::new();
        let mut names = HashMap::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            if names.contains_key(&bc.name) {
                return Err(ConfigError::DuplicateBody(bc.name.clone()));
            }
            let id = scene.add_body(build_body(bc));
            names.insert(bc.name.clone(), id);
        }

        if cfg.forces.is_empty() {
            warn!("scenario registers no forces; bodies will only drift");
        }

        // Forces: resolve names and register each creator
        let lookup = |name: &String| names.get(name).copied().ok_or_else(|| ConfigError::UnknownBody(name.clone()));
        for fc in &cfg.forces {
            match fc {
                ForceConfig::NewtonianGravity { g, body1, body2 } => {
                    create_newtonian_gravity(&mut scene, *g, lookup(body1)?, lookup(body2)?)
                }
                ForceConfig::GlobalGravity { g, body } => create_global_gravity(&mut scene, *g, lookup(body)?),
                ForceConfig::Spring { k, body1, body2 } => create_spring(&mut scene, *k, lookup(body1)?, lookup(body2)?),
                ForceConfig::Drag { gamma, body } => create_drag(&mut scene, *gamma, lookup(body)?),
                ForceConfig::Friction { mu, body1, body2 } => {
                    create_friction(&mut scene, *mu, lookup(body1)?, lookup(body2)?)
                }
                ForceConfig::RigidConstraint { body1, body2 } => {
                    create_physical_rigid_constraint(&mut scene, lookup(body1)?, lookup(body2)?)
                }
                ForceConfig::DestructiveCollision { body1, body2 } => {
                    create_destructive_collision(&mut scene, lookup(body1)?, lookup(body2)?)
                }
                ForceConfig::OneBodyDestructiveCollision { doomed, other } => {
                    create_one_body_full_destructive_collision(&mut scene, lookup(doomed)?, lookup(other)?)
                }
                ForceConfig::PhysicsCollision { elasticity, body1, body2, contact: false } => {
                    create_physics_collision(&mut scene, *elasticity, lookup(body1)?, lookup(body2)?)
                }
                ForceConfig::PhysicsCollision { elasticity, body1, body2, contact: true } => {
                    create_physics_contact_collision(&mut scene, *elasticity, lookup(body1)?, lookup(body2)?)
                }
                ForceConfig::InstantResolution { body1, body2 } => {
                    create_instant_resolution_collision(&mut scene, lookup(body1)?, lookup(body2)?)
                }
            }
        }
        debug!(
            "built scenario: {} bodies, {} force creators",
            scene.body_count(),
            scene.force_creator_count()
        );

        Ok(Self {
            parameters,
            scene,
            names,
        })
    }

    /// Handle of a body by its configured name
    pub fn body(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }
}
