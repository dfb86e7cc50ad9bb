// Rally tracing: chain segments from boundary to boundary until a paddle line.

use crate::domain::config::SimulationConfig;
use crate::domain::errors::TrackError;
use crate::domain::geometry::Vec2;
use crate::domain::ports::{NoopObserver, TrackEvent, TrackObserver};
use crate::domain::segment::TrajectorySegment;
use crate::use_cases::builder::SegmentBuilder;

// Zero-length segments tolerated in a row (a ball starting on a wall while
// still heading into it produces one) before the track is declared stalled.
const MAX_ZERO_LENGTH_SEGMENTS: u32 = 2;

/// Iterator over the segments of one rally.
///
/// Each segment ends at the first boundary the ball reaches. Wall bounces are
/// reflected and the track continues; a segment ending on a paddle line is the
/// last one, since only the session driver knows whether the paddle was there.
/// That includes corners, where the end point is classified as a wall.
/// An error is yielded once and ends the track.
///
/// A ball with no horizontal velocity bounces between the walls forever; bound
/// the iteration with `take` in that case.
pub struct BallTrack<'a, O> {
    builder: SegmentBuilder<'a, O>,
    position: Vec2,
    velocity: Vec2,
    zero_length_run: u32,
    finished: bool,
}

impl<'a> BallTrack<'a, NoopObserver> {
    pub fn new(config: &'a SimulationConfig, start: Vec2, velocity: Vec2) -> Self {
        Self::with_observer(config, NoopObserver, start, velocity)
    }
}

impl<'a, O> BallTrack<'a, O>
where
    O: TrackObserver,
{
    pub fn with_observer(
        config: &'a SimulationConfig,
        observer: O,
        start: Vec2,
        velocity: Vec2,
    ) -> Self {
        Self {
            builder: SegmentBuilder::with_observer(config, observer),
            position: start,
            velocity,
            zero_length_run: 0,
            finished: false,
        }
    }

    // Ball state the next segment will be built from.
    pub fn state(&self) -> (Vec2, Vec2) {
        (self.position, self.velocity)
    }

    fn step(&mut self) -> Result<TrajectorySegment, TrackError> {
        let segment = self.builder.to_next_impact(self.position, self.velocity)?;
        self.check_progress(&segment)?;

        if segment.end_kind().is_paddle() || segment.ends_on_paddle_line() {
            self.finished = true;
            return Ok(segment);
        }

        self.advance(&segment)?;
        Ok(segment)
    }

    fn check_progress(&mut self, segment: &TrajectorySegment) -> Result<(), TrackError> {
        if segment.length() > f64::EPSILON {
            self.zero_length_run = 0;
            return Ok(());
        }
        self.zero_length_run += 1;
        if self.zero_length_run > MAX_ZERO_LENGTH_SEGMENTS {
            return Err(TrackError::Stalled {
                at: segment.start(),
                segments: self.zero_length_run,
            });
        }
        Ok(())
    }

    fn advance(&mut self, segment: &TrajectorySegment) -> Result<(), TrackError> {
        let outgoing = segment.next_velocity()?;
        self.builder.observer.on_event(&TrackEvent::Reflected {
            at: segment.end(),
            end_kind: segment.end_kind(),
            incoming: segment.velocity(),
            outgoing,
        });
        self.position = segment.next_start();
        self.velocity = outgoing;
        Ok(())
    }
}

impl<O> Iterator for BallTrack<'_, O>
where
    O: TrackObserver,
{
    type Item = Result<TrajectorySegment, TrackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let step = self.step();
        if step.is_err() {
            self.finished = true;
        }
        Some(step)
    }
}

/// Ball position `elapsed` seconds into a rally that started at `start`.
///
/// Wall bounces are followed; the ball stops at the paddle line it reaches.
pub fn ball_position_at(
    config: &SimulationConfig,
    start: Vec2,
    velocity: Vec2,
    elapsed: f64,
) -> Result<Vec2, TrackError> {
    if !elapsed.is_finite() {
        return Err(TrackError::NonFiniteTime { elapsed });
    }

    let mut remaining = elapsed.max(0.0);
    let mut position = start;
    for step in BallTrack::new(config, start, velocity) {
        let segment = step?;
        let duration = segment.duration();
        if remaining <= duration {
            return Ok(segment.start().advance(segment.velocity(), remaining));
        }
        remaining -= duration;
        position = segment.end();
    }
    Ok(position)
}
