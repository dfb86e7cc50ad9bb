// Domain layer: playfield configuration, trajectory types and their rules.

pub mod config;
pub mod errors;
pub mod geometry;
pub mod kind;
pub mod ports;
pub mod segment;

pub use config::{MatchRecord, Side, SimulationConfig, SimulationOptions};
pub use errors::{ConfigError, ImpactTarget, TrackError};
pub use geometry::Vec2;
pub use kind::CollisionPointKind;
pub use ports::{NoopObserver, TrackEvent, TrackObserver};
pub use segment::TrajectorySegment;
