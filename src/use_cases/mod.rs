// Use cases layer: segment building and rally tracing workflows.

pub mod builder;
pub mod rally;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{SegmentBuilder, segment_to_next_impact, segment_to_paddle, segment_to_wall};
pub use rally::{BallTrack, ball_position_at};
