use std::io::{self, Write};
use std::process::ExitCode;

use thiserror::Error;

use crate::domain::{ConfigError, Side, SimulationConfig, TrackError};
use crate::frameworks::config;
use crate::interface_adapters::{SegmentSnapshot, TracingObserver};
use crate::use_cases::BallTrack;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error("failed to write segment: {0}")]
    Output(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout carries the segment stream.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub fn run() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let stdout = io::stdout();
    match load_and_trace(&mut stdout.lock()) {
        Ok(segments) => {
            tracing::info!(segments, "rally traced");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "rally trace failed");
            ExitCode::FAILURE
        }
    }
}

fn load_and_trace<W: Write>(out: &mut W) -> Result<usize, RunError> {
    let options = config::load_options()?;
    let record = config::match_record_from(config::env_lookup)?;
    let simulation = SimulationConfig::new(options, record)?;
    config::log_config(&simulation);

    let angle = config::serve_angle_deg(config::env_lookup)?;
    trace_rally(&simulation, angle, out)
}

/// Serves toward the right paddle at `angle_deg` and writes one JSON line per
/// segment until the rally reaches a paddle line. Returns the segment count.
///
/// Angles that leave the ball without horizontal speed are rejected up front.
pub fn trace_rally<W: Write>(
    config: &SimulationConfig,
    angle_deg: f64,
    out: &mut W,
) -> Result<usize, RunError> {
    let velocity = config.serve_velocity(angle_deg.to_radians(), Side::Right);
    // Without horizontal motion the ball bounces between the walls forever.
    if !velocity.x.is_finite() || config.float_equal(velocity.x, 0.0) {
        return Err(ConfigError::UnservableAngle { angle_deg }.into());
    }
    let track = BallTrack::with_observer(config, TracingObserver, config.serve(), velocity);

    let mut count = 0;
    for segment in track {
        let segment = segment?;
        serde_json::to_writer(&mut *out, &SegmentSnapshot::from(&segment))?;
        out.write_all(b"\n")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
