// Process-level configuration loading (not gameplay rules).
//
// Options are resolved once at startup: defaults, then an optional TOML file,
// then `SUBGAMECONFIG_*` environment overrides.

use serde::Deserialize;
use std::{env, fs, path::Path, str::FromStr};

use crate::domain::{ConfigError, MatchRecord, SimulationConfig, SimulationOptions};

pub const CONFIG_FILE_VAR: &str = "BALL_TRACK_CONFIG";
pub const MATCH_POINT_VAR: &str = "BALL_TRACK_MATCH_POINT";
pub const TIME_LIMIT_VAR: &str = "BALL_TRACK_TIME_LIMIT";
pub const SERVE_ANGLE_VAR: &str = "BALL_TRACK_SERVE_ANGLE_DEG";

pub const DEFAULT_SERVE_ANGLE_DEG: f64 = 30.0;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    simulation: SimulationOptions,
}

pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

pub fn load_options() -> Result<SimulationOptions, ConfigError> {
    let options = match env_lookup(CONFIG_FILE_VAR) {
        Some(path) => options_from_file(Path::new(&path))?,
        None => SimulationOptions::default(),
    };
    apply_env_overrides(options, env_lookup)
}

pub fn options_from_file(path: &Path) -> Result<SimulationOptions, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(path, &contents)
}

// Reads the `[simulation]` table; missing keys keep their defaults.
pub fn parse_options(path: &Path, contents: &str) -> Result<SimulationOptions, ConfigError> {
    let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.simulation)
}

pub fn apply_env_overrides<F>(
    mut options: SimulationOptions,
    lookup: F,
) -> Result<SimulationOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let o = &mut options;
    override_value(&lookup, "SUBGAMECONFIG_WIDTH", &mut o.width)?;
    override_value(&lookup, "SUBGAMECONFIG_HEIGHT", &mut o.height)?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_PLAYER_A_INIT_POINT",
        &mut o.player_a_init_point,
    )?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_PLAYER_B_INIT_POINT",
        &mut o.player_b_init_point,
    )?;
    override_value(&lookup, "SUBGAMECONFIG_PADDLE_LENGTH", &mut o.paddle_length)?;
    override_value(&lookup, "SUBGAMECONFIG_PADDLE_MARGIN", &mut o.paddle_margin)?;
    override_value(&lookup, "SUBGAMECONFIG_PADDLE_SPEED", &mut o.paddle_speed)?;
    override_value(&lookup, "SUBGAMECONFIG_PADDLE_INIT_Y", &mut o.paddle_init_y)?;
    override_value(&lookup, "SUBGAMECONFIG_FRICTION_COEF", &mut o.paddle_friction)?;
    override_value(&lookup, "SUBGAMECONFIG_EPSILON", &mut o.epsilon)?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_NETWORK_MAX_DEVIATION",
        &mut o.network_max_deviation,
    )?;
    override_value(&lookup, "SUBGAMECONFIG_BALL_INIT_X", &mut o.ball_init_x)?;
    override_value(&lookup, "SUBGAMECONFIG_BALL_INIT_Y", &mut o.ball_init_y)?;
    override_value(&lookup, "SUBGAMECONFIG_BALL_SPEED", &mut o.ball_speed)?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_DELAY_TIME_BEFORE_RANK_START",
        &mut o.delay_before_rank_start,
    )?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_DELAY_TIME_BEFORE_SUBGAME_START",
        &mut o.delay_before_subgame_start,
    )?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_DELAY_TIME_AFTER_SCORING",
        &mut o.delay_after_scoring,
    )?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_DELAY_TIME_AFTER_RANK_END",
        &mut o.delay_after_rank_end,
    )?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_NETWORK_MAX_RETRIES",
        &mut o.network_max_retries,
    )?;
    override_value(
        &lookup,
        "SUBGAMECONFIG_NETWORK_DELAY_BETWEEN_RETRIES",
        &mut o.network_retry_delay,
    )?;
    Ok(options)
}

// The match record is never defaulted: both values must be supplied.
pub fn match_record_from<F>(lookup: F) -> Result<MatchRecord, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(MatchRecord {
        match_point: required_value(&lookup, MATCH_POINT_VAR)?,
        time_limit: required_value(&lookup, TIME_LIMIT_VAR)?,
    })
}

pub fn serve_angle_deg<F>(lookup: F) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut angle = DEFAULT_SERVE_ANGLE_DEG;
    override_value(&lookup, SERVE_ANGLE_VAR, &mut angle)?;
    Ok(angle)
}

pub fn log_config(config: &SimulationConfig) {
    let o = config.options();
    tracing::info!(
        width = o.width,
        height = o.height,
        x_min = config.x_min(),
        x_max = config.x_max(),
        y_min = config.y_min(),
        y_max = config.y_max(),
        match_point = config.match_point(),
        time_limit = config.record().time_limit,
        player_a_init_point = o.player_a_init_point,
        player_b_init_point = o.player_b_init_point,
        paddle_length = o.paddle_length,
        paddle_margin = o.paddle_margin,
        paddle_speed = o.paddle_speed,
        paddle_init_y = o.paddle_init_y,
        paddle_friction = o.paddle_friction,
        epsilon = o.epsilon,
        network_max_deviation = o.network_max_deviation,
        "simulation config loaded"
    );
    tracing::info!(
        ball_init_x = o.ball_init_x,
        ball_init_y = o.ball_init_y,
        ball_speed = o.ball_speed,
        delay_before_rank_start = o.delay_before_rank_start,
        delay_before_subgame_start = o.delay_before_subgame_start,
        delay_after_scoring = o.delay_after_scoring,
        delay_after_rank_end = o.delay_after_rank_end,
        network_max_retries = o.network_max_retries,
        network_retry_delay = o.network_retry_delay,
        "simulation timing loaded"
    );
}

fn override_value<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *slot = parse_value(key, &raw)?;
    }
    Ok(())
}

fn required_value<F, T>(lookup: &F, key: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })?;
    parse_value(key, &raw)
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn when_no_overrides_are_set_then_defaults_are_kept() {
        let options = apply_env_overrides(SimulationOptions::default(), lookup_from(&[]))
            .expect("no overrides should succeed");

        assert_eq!(options, SimulationOptions::default());
    }

    #[test]
    fn when_overrides_are_set_then_they_replace_defaults() {
        let lookup = lookup_from(&[
            ("SUBGAMECONFIG_WIDTH", "1024"),
            ("SUBGAMECONFIG_EPSILON", " 0.5 "),
            ("SUBGAMECONFIG_NETWORK_MAX_RETRIES", "7"),
            ("SUBGAMECONFIG_FRICTION_COEF", "0.25"),
        ]);

        let options = apply_env_overrides(SimulationOptions::default(), lookup)
            .expect("overrides should parse");

        assert_eq!(options.width, 1024.0);
        assert_eq!(options.epsilon, 0.5);
        assert_eq!(options.network_max_retries, 7);
        assert_eq!(options.paddle_friction, 0.25);
        assert_eq!(options.height, 600.0);
    }

    #[test]
    fn when_override_is_not_a_number_then_returns_invalid_value() {
        let lookup = lookup_from(&[("SUBGAMECONFIG_HEIGHT", "tall")]);

        let result = apply_env_overrides(SimulationOptions::default(), lookup);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "SUBGAMECONFIG_HEIGHT"
        ));
    }

    #[test]
    fn when_retry_count_is_fractional_then_returns_invalid_value() {
        let lookup = lookup_from(&[("SUBGAMECONFIG_NETWORK_MAX_RETRIES", "2.5")]);

        let result = apply_env_overrides(SimulationOptions::default(), lookup);

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn when_toml_sets_some_options_then_others_keep_defaults() {
        let contents = r#"
            [simulation]
            width = 1000.0
            ball_speed = 250.0
        "#;

        let options =
            parse_options(Path::new("ball_track.toml"), contents).expect("toml should parse");

        assert_eq!(options.width, 1000.0);
        assert_eq!(options.ball_speed, 250.0);
        assert_eq!(options.height, 600.0);
        assert_eq!(options.epsilon, 1.0);
    }

    #[test]
    fn when_toml_has_no_simulation_table_then_defaults_are_used() {
        let options = parse_options(Path::new("ball_track.toml"), "")
            .expect("empty toml should parse");

        assert_eq!(options, SimulationOptions::default());
    }

    #[test]
    fn when_toml_is_malformed_then_returns_parse_error() {
        let result = parse_options(Path::new("ball_track.toml"), "[simulation\nwidth = ");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn when_config_file_is_missing_then_returns_read_error() {
        let result = options_from_file(Path::new("/nonexistent/ball_track.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn when_match_record_values_are_set_then_record_is_built() {
        let lookup = lookup_from(&[(MATCH_POINT_VAR, "11"), (TIME_LIMIT_VAR, "300")]);

        let record = match_record_from(lookup).expect("record should parse");

        assert_eq!(
            record,
            MatchRecord {
                match_point: 11,
                time_limit: 300.0,
            }
        );
    }

    #[test]
    fn when_match_point_is_missing_then_returns_missing() {
        let lookup = lookup_from(&[(TIME_LIMIT_VAR, "300")]);

        let result = match_record_from(lookup);

        assert!(matches!(
            result,
            Err(ConfigError::Missing { ref key }) if key == MATCH_POINT_VAR
        ));
    }

    #[test]
    fn when_serve_angle_is_unset_then_default_is_used() {
        let angle = serve_angle_deg(lookup_from(&[])).expect("default angle");

        assert_eq!(angle, DEFAULT_SERVE_ANGLE_DEG);
    }
}
