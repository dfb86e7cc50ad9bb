use std::sync::{Arc, Mutex};

use crate::domain::config::{MatchRecord, SimulationConfig, SimulationOptions};
use crate::domain::ports::{TrackEvent, TrackObserver};

// Default 800x600 playfield with epsilon 1.
pub(crate) fn default_config() -> SimulationConfig {
    SimulationConfig::new(SimulationOptions::default(), default_record())
        .expect("default options should be valid")
}

pub(crate) fn default_record() -> MatchRecord {
    MatchRecord {
        match_point: 5,
        time_limit: 180.0,
    }
}

// Observer that keeps every event so tests can inspect what was emitted.
#[derive(Clone, Default)]
pub(crate) struct RecordingObserver {
    events: Arc<Mutex<Vec<TrackEvent>>>,
}

impl RecordingObserver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<TrackEvent> {
        self.events.lock().expect("events mutex poisoned").clone()
    }
}

impl TrackObserver for RecordingObserver {
    fn on_event(&self, event: &TrackEvent) {
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(event.clone());
    }
}
