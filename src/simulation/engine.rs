//! Headless driver: ticks a scene for a fixed number of steps
//!
//! There is no window or wall clock here; the caller picks `dt` once through
//! `Parameters` and the engine just repeats `Scene::tick`.

use log::info;

use crate::simulation::params::Parameters;
use crate::simulation::scene::Scene;

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub time: f64,
    pub bodies: usize,
    pub kinetic_energy: f64,
}

/// Total kinetic energy of the bodies that can move under force
pub fn kinetic_energy(scene: &Scene) -> f64 {
    scene
        .bodies()
        .iter()
        .filter(|(_, b)| b.mass() != 0.0 && b.mass().is_finite())
        .map(|(_, b)| 0.5 * b.mass() * b.velocity().norm_squared())
        .sum()
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub parameters: Parameters,
}

impl Engine {
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    pub fn run(&self, scene: &mut Scene) -> RunSummary {
        let steps = self.parameters.steps();
        let dt = self.parameters.h0;
        info!("running {steps} ticks of {dt}s with {} bodies", scene.body_count());

        for step in 1..=steps {
            scene.tick(dt);
            let report = self.parameters.report_every;
            if report > 0 && step % report == 0 {
                info!(
                    "t={:.4} bodies={} forces={} kinetic={:.6}",
                    step as f64 * dt,
                    scene.body_count(),
                    scene.force_creator_count(),
                    kinetic_energy(scene)
                );
            }
        }

        RunSummary {
            steps,
            time: steps as f64 * dt,
            bodies: scene.body_count(),
            kinetic_energy: kinetic_energy(scene),
        }
    }
}
