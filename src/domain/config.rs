// Playfield geometry, kinematics and match tuning for one live match.
//
// Keep this separate from process/runtime configuration (env loading, log
// format), which lives in `frameworks::config`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::domain::errors::ConfigError;
use crate::domain::geometry::Vec2;

/// Flat set of named options a match is configured from.
///
/// Every field has a default; `match_point` and `time_limit` are deliberately
/// absent because they belong to the owning [`MatchRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    pub width: f64,
    pub height: f64,
    pub player_a_init_point: u32,
    pub player_b_init_point: u32,
    pub paddle_length: f64,
    pub paddle_margin: f64,
    pub paddle_speed: f64,
    pub paddle_init_y: f64,
    pub paddle_friction: f64,
    /// Absolute tolerance for every coordinate comparison.
    pub epsilon: f64,
    /// Absolute tolerance for client-reported positions (transport layer only).
    pub network_max_deviation: f64,
    pub ball_init_x: f64,
    pub ball_init_y: f64,
    pub ball_speed: f64,
    pub delay_before_rank_start: f64,
    pub delay_before_subgame_start: f64,
    pub delay_after_scoring: f64,
    pub delay_after_rank_end: f64,
    pub network_max_retries: u32,
    pub network_retry_delay: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            player_a_init_point: 0,
            player_b_init_point: 0,
            paddle_length: 50.0,
            paddle_margin: 5.0,
            paddle_speed: 100.0,
            paddle_init_y: 0.0,
            paddle_friction: 0.1,
            epsilon: 1.0,
            network_max_deviation: 10.0,
            ball_init_x: 0.0,
            ball_init_y: 0.0,
            ball_speed: 200.0,
            delay_before_rank_start: 5.0,
            delay_before_subgame_start: 3.0,
            delay_after_scoring: 3.0,
            delay_after_rank_end: 5.0,
            network_max_retries: 5,
            network_retry_delay: 3.0,
        }
    }
}

// Values owned by the match record rather than by deployment defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_point: u32,
    /// Seconds.
    pub time_limit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Immutable per-match simulation parameters with derived playfield bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    options: SimulationOptions,
    record: MatchRecord,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl SimulationConfig {
    pub fn new(options: SimulationOptions, record: MatchRecord) -> Result<Self, ConfigError> {
        validate(&options, &record)?;

        let half_width = options.width / 2.0;
        let half_height = options.height / 2.0;
        Ok(Self {
            options,
            record,
            x_min: -half_width,
            x_max: half_width,
            y_min: -half_height,
            y_max: half_height,
        })
    }

    /// True iff `|a - b| <= epsilon`. All coordinate comparisons go through here.
    pub fn float_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.options.epsilon
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn record(&self) -> &MatchRecord {
        &self.record
    }

    pub fn width(&self) -> f64 {
        self.options.width
    }

    pub fn height(&self) -> f64 {
        self.options.height
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn epsilon(&self) -> f64 {
        self.options.epsilon
    }

    pub fn network_max_deviation(&self) -> f64 {
        self.options.network_max_deviation
    }

    pub fn paddle_length(&self) -> f64 {
        self.options.paddle_length
    }

    pub fn paddle_margin(&self) -> f64 {
        self.options.paddle_margin
    }

    pub fn paddle_speed(&self) -> f64 {
        self.options.paddle_speed
    }

    pub fn paddle_init_y(&self) -> f64 {
        self.options.paddle_init_y
    }

    pub fn paddle_friction(&self) -> f64 {
        self.options.paddle_friction
    }

    pub fn ball_speed(&self) -> f64 {
        self.options.ball_speed
    }

    pub fn match_point(&self) -> u32 {
        self.record.match_point
    }

    pub fn initial_scores(&self) -> (u32, u32) {
        (
            self.options.player_a_init_point,
            self.options.player_b_init_point,
        )
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs_f64(self.record.time_limit)
    }

    pub fn delay_before_rank_start(&self) -> Duration {
        Duration::from_secs_f64(self.options.delay_before_rank_start)
    }

    pub fn delay_before_subgame_start(&self) -> Duration {
        Duration::from_secs_f64(self.options.delay_before_subgame_start)
    }

    pub fn delay_after_scoring(&self) -> Duration {
        Duration::from_secs_f64(self.options.delay_after_scoring)
    }

    pub fn delay_after_rank_end(&self) -> Duration {
        Duration::from_secs_f64(self.options.delay_after_rank_end)
    }

    pub fn network_max_retries(&self) -> u32 {
        self.options.network_max_retries
    }

    pub fn network_retry_delay(&self) -> Duration {
        Duration::from_secs_f64(self.options.network_retry_delay)
    }

    // Ball position at the start of every rally.
    pub fn serve(&self) -> Vec2 {
        Vec2::new(self.options.ball_init_x, self.options.ball_init_y)
    }

    // Serve velocity at `angle` radians off the horizontal, toward `side`.
    pub fn serve_velocity(&self, angle: f64, side: Side) -> Vec2 {
        let speed = self.options.ball_speed;
        Vec2::new(side.sign() * speed * angle.cos(), speed * angle.sin())
    }
}

impl fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimulationConfig {} * {}", self.width(), self.height())
    }
}

fn validate(options: &SimulationOptions, record: &MatchRecord) -> Result<(), ConfigError> {
    let values = [
        ("width", options.width),
        ("height", options.height),
        ("paddle_length", options.paddle_length),
        ("paddle_margin", options.paddle_margin),
        ("paddle_speed", options.paddle_speed),
        ("paddle_init_y", options.paddle_init_y),
        ("paddle_friction", options.paddle_friction),
        ("epsilon", options.epsilon),
        ("network_max_deviation", options.network_max_deviation),
        ("ball_init_x", options.ball_init_x),
        ("ball_init_y", options.ball_init_y),
        ("ball_speed", options.ball_speed),
        ("time_limit", record.time_limit),
        ("delay_before_rank_start", options.delay_before_rank_start),
        ("delay_before_subgame_start", options.delay_before_subgame_start),
        ("delay_after_scoring", options.delay_after_scoring),
        ("delay_after_rank_end", options.delay_after_rank_end),
        ("network_retry_delay", options.network_retry_delay),
    ];
    if let Some(&(name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ConfigError::NotFinite { name });
    }

    for (name, value) in [("width", options.width), ("height", options.height)] {
        if value <= 0.0 {
            return Err(ConfigError::NonPositiveDimension { name, value });
        }
    }

    // Positions may sit anywhere on the field; everything else is a magnitude.
    let magnitudes = values
        .iter()
        .filter(|(name, _)| !matches!(*name, "paddle_init_y" | "ball_init_x" | "ball_init_y"));
    for &(name, value) in magnitudes {
        if value < 0.0 {
            return Err(ConfigError::Negative { name, value });
        }
    }

    // Duration getters convert these unchecked, so reject what cannot convert.
    let durations = [
        ("time_limit", record.time_limit),
        ("delay_before_rank_start", options.delay_before_rank_start),
        ("delay_before_subgame_start", options.delay_before_subgame_start),
        ("delay_after_scoring", options.delay_after_scoring),
        ("delay_after_rank_end", options.delay_after_rank_end),
        ("network_retry_delay", options.network_retry_delay),
    ];
    for (name, value) in durations {
        if Duration::try_from_secs_f64(value).is_err() {
            return Err(ConfigError::DurationOutOfRange { name, value });
        }
    }

    Ok(())
}
