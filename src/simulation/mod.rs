pub mod vector;
pub mod bounding_box;
pub mod color;
pub mod polygon;
pub mod collision;
pub mod integrator;
pub mod body;
pub mod scene;
pub mod forces;
pub mod params;
pub mod engine;
pub mod scenario;
