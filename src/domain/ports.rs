// Port for observing trajectory computations without putting I/O in the core.

use crate::domain::errors::ImpactTarget;
use crate::domain::geometry::Vec2;
use crate::domain::kind::CollisionPointKind;

// Structured record of one step of a trajectory computation.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    ImpactSolved {
        target: ImpactTarget,
        // Coordinate of the boundary line that was solved for.
        boundary: f64,
        time_to_impact: f64,
        impact: Vec2,
    },
    SegmentBuilt {
        start: Vec2,
        end: Vec2,
        velocity: Vec2,
        start_kind: CollisionPointKind,
        end_kind: CollisionPointKind,
        length: f64,
        is_valid: bool,
    },
    BuildRejected {
        target: ImpactTarget,
        velocity: Vec2,
    },
    Reflected {
        at: Vec2,
        end_kind: CollisionPointKind,
        incoming: Vec2,
        outgoing: Vec2,
    },
}

pub trait TrackObserver: Send + Sync {
    fn on_event(&self, event: &TrackEvent);
}

impl<T: TrackObserver + ?Sized> TrackObserver for &T {
    fn on_event(&self, event: &TrackEvent) {
        (**self).on_event(event);
    }
}

// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrackObserver for NoopObserver {
    fn on_event(&self, _event: &TrackEvent) {}
}
