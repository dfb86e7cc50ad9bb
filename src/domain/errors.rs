// Domain-level errors for configuration and trajectory workflows.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::geometry::Vec2;
use crate::domain::kind::CollisionPointKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },

    #[error("{name} is too large for a duration, got {value}")]
    DurationOutOfRange { name: &'static str, value: f64 },

    #[error("serve angle {angle_deg} degrees never reaches a paddle line")]
    UnservableAngle { angle_deg: f64 },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("missing required setting {key}")]
    Missing { key: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// Which boundary class a builder was asked to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactTarget {
    Wall,
    Paddle,
    Any,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("ball cannot reach {target:?} boundary with velocity {velocity}")]
    DegenerateVelocity {
        target: ImpactTarget,
        velocity: Vec2,
    },

    #[error("segment judged valid with unclassified endpoint (start {start:?}, end {end:?})")]
    InconsistentClassification {
        start: CollisionPointKind,
        end: CollisionPointKind,
    },

    #[error("segment ending at {end} is on neither a wall nor a paddle")]
    AmbiguousReflection { end: Vec2 },

    #[error("ball made no progress from {at} over {segments} consecutive segments")]
    Stalled { at: Vec2, segments: u32 },

    #[error("elapsed time must be finite, got {elapsed}")]
    NonFiniteTime { elapsed: f64 },
}

impl TrackError {
    /// True when the error points at a bug in classification itself rather than
    /// at inconsistent geometry handed in by the caller.
    pub fn is_defect(&self) -> bool {
        matches!(self, TrackError::InconsistentClassification { .. })
    }
}
