use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::pursuit::TuningConfig;

const TUNING_ENV_VAR: &str = "HOUSEBOUND_TUNING";
const SEED_ENV_VAR: &str = "HOUSEBOUND_SEED";

pub(crate) struct AppWiring {
    pub(crate) seed: u64,
    pub(crate) tuning: TuningConfig,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Housebound Startup ===");

    let tuning = match resolve_tuning_from_env() {
        Ok(tuning) => tuning,
        Err(error) => {
            warn!(error = %error, "tuning_load_failed");
            TuningConfig::default()
        }
    };
    let seed = resolve_seed_from_env();

    AppWiring { seed, tuning }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn resolve_seed_from_env() -> u64 {
    if let Some(seed) = std::env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
    {
        return seed;
    }
    // The only wall-clock dependence in the whole core: seeding a session
    // that was not given an explicit seed.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn resolve_tuning_from_env() -> Result<TuningConfig, String> {
    let Some(path) = std::env::var(TUNING_ENV_VAR)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
    else {
        return Ok(TuningConfig::default());
    };
    load_tuning_file(&path)
}

fn load_tuning_file(path: &str) -> Result<TuningConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|error| format!("read tuning '{path}': {error}"))?;
    let tuning = parse_tuning_json(&raw)?;
    tuning.validate()?;
    Ok(tuning)
}

fn parse_tuning_json(raw: &str) -> Result<TuningConfig, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, TuningConfig>(&mut deserializer) {
        Ok(tuning) => Ok(tuning),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse tuning json: {source}"))
            } else {
                Err(format!("parse tuning json at {path}: {source}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world::RoomId;

    #[test]
    fn parse_tuning_accepts_partial_overrides() {
        let tuning = parse_tuning_json(r#"{"chase_speed": 95.0}"#).expect("parse");
        assert_eq!(tuning.chase_speed, 95.0);
        assert_eq!(tuning.search_speed, TuningConfig::default().search_speed);
        assert_eq!(tuning.high_traffic_room, RoomId::Hallway);
    }

    #[test]
    fn parse_tuning_reports_the_failing_path() {
        let error = parse_tuning_json(r#"{"chase_speed": "fast"}"#).expect_err("must fail");
        assert!(error.contains("chase_speed"), "error was: {error}");
    }

    #[test]
    fn parse_tuning_rejects_unknown_fields() {
        let error = parse_tuning_json(r#"{"sprint_speed": 10.0}"#).expect_err("must fail");
        assert!(error.contains("sprint_speed"), "error was: {error}");
    }

    #[test]
    fn validate_rejects_non_positive_speeds() {
        let tuning = parse_tuning_json(r#"{"search_speed": 0.0}"#).expect("parse");
        assert!(tuning.validate().is_err());
    }
}
