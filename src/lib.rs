pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod math;
pub mod simulation;

pub use config::TracerConfig;
pub use controller::{PathTracer, ShapeCatalog, ShapeId, TracerEvent};
pub use error::{Result, TracerError};
pub use geometry::{Direction, PathGeometry};
pub use simulation::{MarkerId, MarkerSnapshot};
