// One straight ball path between two boundary (or center) events.

use std::fmt;

use crate::domain::config::SimulationConfig;
use crate::domain::errors::TrackError;
use crate::domain::geometry::Vec2;
use crate::domain::kind::CollisionPointKind;

/// Immutable ball path from `start` to `end` at constant `velocity`.
///
/// Endpoint kinds and validity are classified once, at construction, against the
/// tolerances of the config the segment was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySegment {
    start: Vec2,
    end: Vec2,
    velocity: Vec2,
    length: f64,
    start_kind: CollisionPointKind,
    end_kind: CollisionPointKind,
    is_valid: bool,
    ends_on_paddle_line: bool,
}

impl TrajectorySegment {
    /// Classifies both endpoints and derives validity.
    ///
    /// A geometrically invalid segment is still returned (with `is_valid() == false`);
    /// only an internally inconsistent classification is an error.
    pub fn new(
        config: &SimulationConfig,
        start: Vec2,
        end: Vec2,
        velocity: Vec2,
    ) -> Result<Self, TrackError> {
        // The end is classified even when the start is not, so reflection
        // stays a function of the end point alone.
        let start_match = classify_start(config, start);
        let end_match = classify_end(config, end);
        let is_valid = calculate_validity(start_match, end_match)?;

        Ok(Self {
            start,
            end,
            velocity,
            length: start.distance(end),
            start_kind: start_match.unwrap_or_default(),
            end_kind: end_match.unwrap_or_default(),
            is_valid,
            ends_on_paddle_line: on_paddle_line(config, end),
        })
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn start_kind(&self) -> CollisionPointKind {
        self.start_kind
    }

    pub fn end_kind(&self) -> CollisionPointKind {
        self.end_kind
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// True when the end point passes the paddle test, or sits on a wall within
    /// epsilon of a paddle line. At corners `end_kind` still reports the wall.
    pub fn ends_on_paddle_line(&self) -> bool {
        self.ends_on_paddle_line
    }

    /// Seconds of flight from start to end; zero for a stationary ball.
    pub fn duration(&self) -> f64 {
        // Machine-zero speed only; a slow ball still has a finite flight time.
        let speed = self.velocity.length();
        if speed <= f64::EPSILON {
            0.0
        } else {
            self.length / speed
        }
    }

    /// Outgoing velocity after bouncing at the end point.
    ///
    /// Walls flip the vertical component, paddles the horizontal one. An end point
    /// on neither cannot be reflected and yields [`TrackError::AmbiguousReflection`].
    pub fn next_velocity(&self) -> Result<Vec2, TrackError> {
        let Vec2 { x: dx, y: dy } = self.velocity;
        match self.end_kind {
            CollisionPointKind::WallTop | CollisionPointKind::WallBottom => Ok(Vec2::new(dx, -dy)),
            CollisionPointKind::PaddleLeft | CollisionPointKind::PaddleRight => {
                Ok(Vec2::new(-dx, dy))
            }
            CollisionPointKind::Invalid | CollisionPointKind::Center => {
                Err(TrackError::AmbiguousReflection { end: self.end })
            }
        }
    }

    // The following segment starts where this one ends.
    pub fn next_start(&self) -> Vec2 {
        self.end
    }
}

impl fmt::Display for TrajectorySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrajectorySegment s={} [{}] -> e={} [{}], v={}, l={}",
            self.start, self.start_kind, self.end, self.end_kind, self.velocity, self.length
        )
    }
}

/// Kind of a segment start point: center, then walls, then paddles.
pub fn classify_start(config: &SimulationConfig, point: Vec2) -> Option<CollisionPointKind> {
    if is_center(config, point) {
        return Some(CollisionPointKind::Center);
    }
    wall_kind(config, point).or_else(|| paddle_kind(config, point))
}

/// Kind of a segment end point: walls, then paddles. The center is never an end.
pub fn classify_end(config: &SimulationConfig, point: Vec2) -> Option<CollisionPointKind> {
    wall_kind(config, point).or_else(|| paddle_kind(config, point))
}

pub fn is_center(config: &SimulationConfig, point: Vec2) -> bool {
    config.float_equal(point.x, 0.0) && config.float_equal(point.y, 0.0)
}

// Top/bottom wall: y on a horizontal boundary, x anywhere across the field.
fn wall_kind(config: &SimulationConfig, point: Vec2) -> Option<CollisionPointKind> {
    let on_wall = is_on_line(
        config,
        point.y,
        (config.y_min(), config.y_max()),
        point.x,
        (config.x_min(), config.x_max()),
    );
    match (on_wall, point.y > 0.0) {
        (false, _) => None,
        (true, true) => Some(CollisionPointKind::WallTop),
        (true, false) => Some(CollisionPointKind::WallBottom),
    }
}

// Paddle boundaries span the full field height. Whether the paddle actually
// covered the impact is decided by the session driver, not here.
fn paddle_kind(config: &SimulationConfig, point: Vec2) -> Option<CollisionPointKind> {
    let on_paddle = is_on_line(
        config,
        point.x,
        (config.x_min(), config.x_max()),
        point.y,
        (config.y_min(), config.y_max()),
    );
    match (on_paddle, point.x > 0.0) {
        (false, _) => None,
        (true, true) => Some(CollisionPointKind::PaddleRight),
        (true, false) => Some(CollisionPointKind::PaddleLeft),
    }
}

// Paddle test, widened to wall points within epsilon of a paddle line so an
// impact that lands a rounding error past the field height still counts.
fn on_paddle_line(config: &SimulationConfig, point: Vec2) -> bool {
    let near_paddle_x = config.float_equal(point.x, config.x_min())
        || config.float_equal(point.x, config.x_max());
    paddle_kind(config, point).is_some() || (near_paddle_x && wall_kind(config, point).is_some())
}

/// Generic boundary test shared by walls and paddles.
///
/// `constrained` must sit (within epsilon) on either end of `constraint`, and
/// `ranged` must lie inside `range` inclusively.
pub fn is_on_line(
    config: &SimulationConfig,
    constrained: f64,
    (constraint_min, constraint_max): (f64, f64),
    ranged: f64,
    (range_min, range_max): (f64, f64),
) -> bool {
    let on_boundary = config.float_equal(constrained, constraint_min)
        || config.float_equal(constrained, constraint_max);
    on_boundary && (range_min..=range_max).contains(&ranged)
}

fn calculate_validity(
    start: Option<CollisionPointKind>,
    end: Option<CollisionPointKind>,
) -> Result<bool, TrackError> {
    let (Some(start_kind), Some(end_kind)) = (start, end) else {
        return Ok(false);
    };
    if !start_kind.is_valid_start() || !end_kind.is_valid_end() {
        return Err(TrackError::InconsistentClassification {
            start: start_kind,
            end: end_kind,
        });
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{MatchRecord, SimulationOptions};

    fn config() -> SimulationConfig {
        SimulationConfig::new(
            SimulationOptions::default(),
            MatchRecord {
                match_point: 5,
                time_limit: 180.0,
            },
        )
        .expect("default options should be valid")
    }

    fn segment(start: (f64, f64), end: (f64, f64), velocity: (f64, f64)) -> TrajectorySegment {
        TrajectorySegment::new(&config(), start.into(), end.into(), velocity.into())
            .expect("classification should be consistent")
    }

    #[test]
    fn when_point_is_origin_then_it_is_center() {
        assert!(is_center(&config(), Vec2::ZERO));
    }

    #[test]
    fn when_point_is_within_half_epsilon_of_origin_then_it_is_center() {
        let config = config();
        let half = config.epsilon() * 0.5;
        assert!(is_center(&config, Vec2::new(half, 0.0)));
        assert!(is_center(&config, Vec2::new(0.0, -half)));
    }

    #[test]
    fn when_point_is_two_epsilon_from_origin_then_it_is_not_center() {
        let config = config();
        assert!(!is_center(&config, Vec2::new(config.epsilon() * 2.0, 0.0)));
    }

    #[test]
    fn when_start_is_on_top_wall_then_start_kind_is_wall_top() {
        let s = segment((100.0, 300.0), (400.0, 0.0), (50.0, -50.0));
        assert_eq!(s.start_kind(), CollisionPointKind::WallTop);
        assert_eq!(s.end_kind(), CollisionPointKind::PaddleRight);
        assert!(s.is_valid());
    }

    #[test]
    fn when_start_is_within_epsilon_below_bottom_wall_then_start_kind_is_wall_bottom() {
        let s = segment((0.0, -300.9), (400.0, 0.0), (100.0, 75.0));
        assert_eq!(s.start_kind(), CollisionPointKind::WallBottom);
    }

    #[test]
    fn when_start_is_on_left_paddle_line_then_start_kind_is_paddle_left() {
        let s = segment((-400.0, 120.0), (-100.0, 300.0), (50.0, 30.0));
        assert_eq!(s.start_kind(), CollisionPointKind::PaddleLeft);
        assert_eq!(s.end_kind(), CollisionPointKind::WallTop);
    }

    #[test]
    fn when_point_is_a_corner_then_wall_takes_precedence() {
        let s = segment((0.0, 0.0), (400.0, 300.0), (4.0, 3.0));
        assert_eq!(s.end_kind(), CollisionPointKind::WallTop);
    }

    #[test]
    fn when_paddle_point_is_far_from_paddle_then_it_is_still_a_paddle_kind() {
        // The acceptance band is the full field height, not the paddle length.
        let s = segment((0.0, 0.0), (400.0, -290.0), (400.0, -290.0));
        assert_eq!(s.end_kind(), CollisionPointKind::PaddleRight);
        assert!(s.is_valid());
    }

    #[test]
    fn when_end_is_a_corner_then_it_is_a_wall_on_the_paddle_line() {
        let s = segment((0.0, 0.0), (400.0, 300.0), (400.0, 300.0));
        assert_eq!(s.end_kind(), CollisionPointKind::WallTop);
        assert!(s.ends_on_paddle_line());
    }

    #[test]
    fn when_end_is_on_wall_within_epsilon_of_x_min_then_it_is_on_the_paddle_line() {
        let s = segment((-399.5, -300.0), (-400.0, -299.0), (-50.0, 100.0));
        assert_eq!(s.end_kind(), CollisionPointKind::WallBottom);
        assert!(s.ends_on_paddle_line());
    }

    #[test]
    fn when_end_is_just_past_the_corner_then_it_is_still_on_the_paddle_line() {
        let s = segment((399.5, 299.0), (400.0, 300.000_000_001), (50.0, 100.0));
        assert_eq!(s.end_kind(), CollisionPointKind::WallTop);
        assert!(s.ends_on_paddle_line());
    }

    #[test]
    fn when_end_is_mid_wall_then_it_is_not_on_the_paddle_line() {
        let s = segment((0.0, 0.0), (150.0, 300.0), (50.0, 100.0));
        assert!(!s.ends_on_paddle_line());
    }

    #[test]
    fn when_velocity_is_zero_then_duration_is_zero() {
        let s = segment((0.0, 300.0), (0.0, 300.0), (0.0, 0.0));
        assert_eq!(s.duration(), 0.0);
    }

    #[test]
    fn when_ball_is_slow_then_duration_stays_finite() {
        let s = segment((0.0, 0.0), (0.0, 300.0), (0.0, 1e-3));
        assert!((s.duration() - 300_000.0).abs() < 1e-6);
    }

    #[test]
    fn when_wall_point_is_outside_field_width_then_it_is_not_a_wall() {
        let s = segment((0.0, 0.0), (450.0, 300.0), (45.0, 30.0));
        assert_eq!(s.end_kind(), CollisionPointKind::Invalid);
        assert!(!s.is_valid());
    }

    #[test]
    fn when_start_is_inside_the_field_then_segment_is_invalid() {
        let s = segment((10.0, 10.0), (400.0, 100.0), (39.0, 9.0));
        assert_eq!(s.start_kind(), CollisionPointKind::Invalid);
        assert_eq!(s.end_kind(), CollisionPointKind::PaddleRight);
        assert!(!s.is_valid());
    }

    #[test]
    fn when_end_is_the_center_then_segment_is_invalid() {
        let s = segment((0.0, 300.0), (0.0, 0.0), (0.0, -100.0));
        assert_eq!(s.end_kind(), CollisionPointKind::Invalid);
        assert!(!s.is_valid());
    }

    #[test]
    fn when_end_is_on_wall_then_next_velocity_flips_vertical_component() {
        let s = segment((0.0, 0.0), (150.0, 300.0), (50.0, 100.0));
        assert_eq!(s.next_velocity(), Ok(Vec2::new(50.0, -100.0)));
        assert_eq!(s.next_start(), Vec2::new(150.0, 300.0));
    }

    #[test]
    fn when_end_is_on_paddle_then_next_velocity_flips_horizontal_component() {
        let s = segment((150.0, 300.0), (400.0, -200.0), (50.0, -100.0));
        assert_eq!(s.next_velocity(), Ok(Vec2::new(-50.0, -100.0)));
    }

    #[test]
    fn when_end_is_unclassified_then_next_velocity_is_ambiguous() {
        let s = segment((0.0, 0.0), (500.0, 500.0), (1.0, 1.0));
        assert_eq!(
            s.next_velocity(),
            Err(TrackError::AmbiguousReflection {
                end: Vec2::new(500.0, 500.0)
            })
        );
    }

    #[test]
    fn when_length_is_derived_then_it_is_euclidean() {
        let s = segment((0.0, 0.0), (150.0, 300.0), (50.0, 100.0));
        assert!((s.length() - 150.0f64.hypot(300.0)).abs() < 1e-9);
        assert!((s.duration() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn when_displayed_then_endpoints_and_kinds_are_shown() {
        let s = segment((0.0, 0.0), (150.0, 300.0), (50.0, 100.0));
        let text = s.to_string();
        assert!(text.starts_with("TrajectorySegment s=(0, 0) [CENTER] -> e=(150, 300) [WALL_TOP]"));
        assert!(text.contains("v=(50, 100)"));
    }

    #[test]
    fn when_end_match_is_center_then_returns_inconsistent_classification() {
        let result = calculate_validity(
            Some(CollisionPointKind::WallTop),
            Some(CollisionPointKind::Center),
        );
        let err = result.expect_err("center is never a valid end");
        assert!(err.is_defect());
    }

    #[test]
    fn when_start_match_is_invalid_kind_then_returns_inconsistent_classification() {
        let result = calculate_validity(
            Some(CollisionPointKind::Invalid),
            Some(CollisionPointKind::PaddleLeft),
        );
        assert!(matches!(
            result,
            Err(TrackError::InconsistentClassification { .. })
        ));
    }
}
