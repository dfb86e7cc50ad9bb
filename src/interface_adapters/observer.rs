// Forwards trajectory events to `tracing` as structured fields.

use tracing::{debug, trace, warn};

use crate::domain::{TrackEvent, TrackObserver};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TrackObserver for TracingObserver {
    fn on_event(&self, event: &TrackEvent) {
        match event {
            TrackEvent::ImpactSolved {
                target,
                boundary,
                time_to_impact,
                impact,
            } => trace!(
                ?target,
                boundary,
                time_to_impact,
                impact_x = impact.x,
                impact_y = impact.y,
                "impact solved"
            ),
            TrackEvent::SegmentBuilt {
                start,
                end,
                velocity,
                start_kind,
                end_kind,
                length,
                is_valid,
            } => {
                if *is_valid {
                    debug!(
                        %start,
                        %end,
                        %velocity,
                        %start_kind,
                        %end_kind,
                        length,
                        "segment built"
                    );
                } else {
                    warn!(
                        %start,
                        %end,
                        %velocity,
                        %start_kind,
                        %end_kind,
                        length,
                        "segment is not valid"
                    );
                }
            }
            TrackEvent::BuildRejected { target, velocity } => {
                warn!(?target, %velocity, "boundary unreachable")
            }
            TrackEvent::Reflected {
                at,
                end_kind,
                incoming,
                outgoing,
            } => debug!(%at, %end_kind, %incoming, %outgoing, "ball reflected"),
        }
    }
}
