// Segment builders: solve analytically for the next impact and build the segment.

use crate::domain::config::SimulationConfig;
use crate::domain::errors::{ImpactTarget, TrackError};
use crate::domain::geometry::Vec2;
use crate::domain::ports::{NoopObserver, TrackEvent, TrackObserver};
use crate::domain::segment::TrajectorySegment;

// Solved impact against one boundary line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Impact {
    target: ImpactTarget,
    boundary: f64,
    time: f64,
    point: Vec2,
}

/// Builds trajectory segments for one match config, reporting to `observer`.
pub struct SegmentBuilder<'a, O> {
    pub config: &'a SimulationConfig,
    pub observer: O,
}

impl<'a> SegmentBuilder<'a, NoopObserver> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self {
            config,
            observer: NoopObserver,
        }
    }
}

impl<'a, O> SegmentBuilder<'a, O>
where
    O: TrackObserver,
{
    pub fn with_observer(config: &'a SimulationConfig, observer: O) -> Self {
        Self { config, observer }
    }

    /// Segment from `start` to the top or bottom wall, picked by the sign of `dy`.
    pub fn to_wall(&self, start: Vec2, velocity: Vec2) -> Result<TrajectorySegment, TrackError> {
        match wall_impact(self.config, start, velocity) {
            Some(impact) => self.finish(start, velocity, impact),
            None => Err(self.reject(ImpactTarget::Wall, velocity)),
        }
    }

    /// Segment from `start` to the left or right paddle line, picked by the sign of `dx`.
    pub fn to_paddle(
        &self,
        start: Vec2,
        velocity: Vec2,
    ) -> Result<TrajectorySegment, TrackError> {
        match paddle_impact(self.config, start, velocity) {
            Some(impact) => self.finish(start, velocity, impact),
            None => Err(self.reject(ImpactTarget::Paddle, velocity)),
        }
    }

    /// Segment to whichever boundary the ball reaches first. Ties go to the wall.
    pub fn to_next_impact(
        &self,
        start: Vec2,
        velocity: Vec2,
    ) -> Result<TrajectorySegment, TrackError> {
        let wall = wall_impact(self.config, start, velocity);
        let paddle = paddle_impact(self.config, start, velocity);

        let impact = match (wall, paddle) {
            (Some(wall), Some(paddle)) if paddle.time < wall.time => paddle,
            (Some(wall), _) => wall,
            (None, Some(paddle)) => paddle,
            (None, None) => return Err(self.reject(ImpactTarget::Any, velocity)),
        };
        self.finish(start, velocity, impact)
    }

    fn finish(
        &self,
        start: Vec2,
        velocity: Vec2,
        impact: Impact,
    ) -> Result<TrajectorySegment, TrackError> {
        self.observer.on_event(&TrackEvent::ImpactSolved {
            target: impact.target,
            boundary: impact.boundary,
            time_to_impact: impact.time,
            impact: impact.point,
        });

        let segment = TrajectorySegment::new(self.config, start, impact.point, velocity)?;
        self.observer.on_event(&TrackEvent::SegmentBuilt {
            start: segment.start(),
            end: segment.end(),
            velocity: segment.velocity(),
            start_kind: segment.start_kind(),
            end_kind: segment.end_kind(),
            length: segment.length(),
            is_valid: segment.is_valid(),
        });
        Ok(segment)
    }

    fn reject(&self, target: ImpactTarget, velocity: Vec2) -> TrackError {
        self.observer
            .on_event(&TrackEvent::BuildRejected { target, velocity });
        TrackError::DegenerateVelocity { target, velocity }
    }
}

// A ball moving parallel to the walls (dy within epsilon of zero) never reaches one.
fn wall_impact(config: &SimulationConfig, start: Vec2, velocity: Vec2) -> Option<Impact> {
    if config.float_equal(velocity.y, 0.0) {
        return None;
    }
    let boundary = if velocity.y > 0.0 {
        config.y_max()
    } else {
        config.y_min()
    };
    let time = (boundary - start.y) / velocity.y;
    Some(Impact {
        target: ImpactTarget::Wall,
        boundary,
        time,
        point: Vec2::new(start.x + velocity.x * time, boundary),
    })
}

fn paddle_impact(config: &SimulationConfig, start: Vec2, velocity: Vec2) -> Option<Impact> {
    if config.float_equal(velocity.x, 0.0) {
        return None;
    }
    let boundary = if velocity.x > 0.0 {
        config.x_max()
    } else {
        config.x_min()
    };
    let time = (boundary - start.x) / velocity.x;
    Some(Impact {
        target: ImpactTarget::Paddle,
        boundary,
        time,
        point: Vec2::new(boundary, start.y + velocity.y * time),
    })
}

pub fn segment_to_wall(
    config: &SimulationConfig,
    start: Vec2,
    velocity: Vec2,
) -> Result<TrajectorySegment, TrackError> {
    SegmentBuilder::new(config).to_wall(start, velocity)
}

pub fn segment_to_paddle(
    config: &SimulationConfig,
    start: Vec2,
    velocity: Vec2,
) -> Result<TrajectorySegment, TrackError> {
    SegmentBuilder::new(config).to_paddle(start, velocity)
}

pub fn segment_to_next_impact(
    config: &SimulationConfig,
    start: Vec2,
    velocity: Vec2,
) -> Result<TrajectorySegment, TrackError> {
    SegmentBuilder::new(config).to_next_impact(start, velocity)
}
