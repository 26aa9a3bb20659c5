use anyhow::{Context, Result};

use super::{
    config_model::{Database, DotEnvyConfig, Rollover, Server},
    stage::Stage,
};

const DEFAULT_ROLLOVER_INTERVAL_SECS: u64 = 3600;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

/// Builds the config from any key lookup, so tests do not have to touch the process env.
pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| lookup(key).with_context(|| format!("{key} is missing"));

    let server = Server {
        port: required("SERVER_PORT")?
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = lookup("DATABASE_URL")
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .map(|url| Database { url });

    let rollover = Rollover {
        interval_secs: match lookup("ROLLOVER_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("ROLLOVER_INTERVAL_SECS is invalid")?,
            None => DEFAULT_ROLLOVER_INTERVAL_SECS,
        },
    };

    let stage = lookup("STAGE")
        .and_then(|raw| Stage::try_from(&raw).ok())
        .unwrap_or_default();

    Ok(DotEnvyConfig {
        server,
        database,
        rollover,
        stage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let vars = env(&[
            ("SERVER_PORT", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
        ]);

        let config = load_from(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.body_limit, 10);
        assert_eq!(config.server.timeout, 30);
        assert!(config.database.is_none());
        assert_eq!(config.rollover.interval_secs, 3600);
        assert_eq!(config.stage, Stage::Local);
    }

    #[test]
    fn reads_database_and_stage() {
        let vars = env(&[
            ("SERVER_PORT", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
            ("DATABASE_URL", "postgres://localhost:5432/talent_board"),
            ("ROLLOVER_INTERVAL_SECS", "60"),
            ("STAGE", "production"),
        ]);

        let config = load_from(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(
            config.database.unwrap().url,
            "postgres://localhost:5432/talent_board"
        );
        assert_eq!(config.rollover.interval_secs, 60);
        assert_eq!(config.stage, Stage::Production);
    }

    #[test]
    fn missing_port_is_an_error() {
        let vars = env(&[("SERVER_BODY_LIMIT", "10"), ("SERVER_TIMEOUT", "30")]);

        let err = load_from(|key| vars.get(key).cloned()).unwrap_err();

        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn zero_rollover_interval_is_rejected() {
        let vars = env(&[
            ("SERVER_PORT", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
            ("ROLLOVER_INTERVAL_SECS", "0"),
        ]);

        assert!(load_from(|key| vars.get(key).cloned()).is_err());
    }
}
