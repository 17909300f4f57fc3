pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::vector::{NVec2, VecExt, VEC_ZERO};
pub use simulation::bounding_box::BoundingBox;
pub use simulation::color::Rgba;
pub use simulation::polygon::{Anchor, AnchorOption, Polygon};
pub use simulation::collision::{find_collision, CollisionInfo, CollisionStatus};
pub use simulation::body::Body;
pub use simulation::scene::{Bodies, BodyId, Scene, TickPhase};
pub use simulation::forces::{CollisionHandler, CollisionMode, ForceCreator, InteractionHandler};
pub use simulation::params::Parameters;
pub use simulation::engine::{Engine, RunSummary};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, ConfigError, ForceConfig, ParametersConfig, ScenarioConfig, ShapeConfig};

pub use benchmark::benchmark::{bench_collision, bench_scene_tick};
