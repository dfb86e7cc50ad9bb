// Serializable view of a segment for the session driver's broadcast layer.

use serde::{Deserialize, Serialize};

use crate::domain::{CollisionPointKind, TrajectorySegment, Vec2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub start: Vec2,
    pub end: Vec2,
    pub velocity: Vec2,
    pub length: f64,
    pub start_kind: CollisionPointKind,
    pub end_kind: CollisionPointKind,
    pub is_valid: bool,
    // Absent when the end point cannot be reflected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_velocity: Option<Vec2>,
}

impl From<&TrajectorySegment> for SegmentSnapshot {
    fn from(s: &TrajectorySegment) -> Self {
        Self {
            start: s.start(),
            end: s.end(),
            velocity: s.velocity(),
            length: s.length(),
            start_kind: s.start_kind(),
            end_kind: s.end_kind(),
            is_valid: s.is_valid(),
            next_velocity: s.next_velocity().ok(),
        }
    }
}
