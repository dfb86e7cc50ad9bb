pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{
    CollisionPointKind, ConfigError, ImpactTarget, MatchRecord, SimulationConfig,
    SimulationOptions, TrackError, TrackEvent, TrackObserver, TrajectorySegment, Vec2,
};
pub use frameworks::runner::run;
pub use use_cases::{
    BallTrack, SegmentBuilder, ball_position_at, segment_to_next_impact, segment_to_paddle,
    segment_to_wall,
};
