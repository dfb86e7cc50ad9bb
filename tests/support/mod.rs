// Shared config fixtures for integration tests.
#![allow(dead_code)]

use ball_track::{MatchRecord, SimulationConfig, SimulationOptions};

pub fn record() -> MatchRecord {
    MatchRecord {
        match_point: 5,
        time_limit: 180.0,
    }
}

// 800x600 field: x in [-400, 400], y in [-300, 300], epsilon 1.
pub fn default_config() -> SimulationConfig {
    SimulationConfig::new(SimulationOptions::default(), record())
        .expect("default options should be valid")
}

pub fn config_with_epsilon(epsilon: f64) -> SimulationConfig {
    let options = SimulationOptions {
        epsilon,
        ..SimulationOptions::default()
    };
    SimulationConfig::new(options, record()).expect("non-negative epsilon should be valid")
}
