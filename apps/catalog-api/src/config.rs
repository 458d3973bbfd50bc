//! Configuration for Catalog API

use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use domain_catalog::{FlagSettings, RolloutConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub features: RolloutConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let features = RolloutConfig {
            v1: flag_settings("FEATURE_V1"),
            v2: flag_settings("FEATURE_V2"),
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            features,
        })
    }
}

/// Rollout policy for one flag from `<PREFIX>_ENABLED`, `<PREFIX>_PERCENTAGE`,
/// `<PREFIX>_GROUPS` and `<PREFIX>_USERS`. Unset or unparsable values fall
/// back to the fully-enabled defaults.
fn flag_settings(prefix: &str) -> FlagSettings {
    let defaults = FlagSettings::default();

    FlagSettings {
        enabled: env_or_default(&format!("{}_ENABLED", prefix), "true")
            .parse()
            .unwrap_or(defaults.enabled),
        percentage: env_or_default(&format!("{}_PERCENTAGE", prefix), "100")
            .parse::<u8>()
            .map(|p| p.min(100))
            .unwrap_or(defaults.percentage),
        groups: csv(&env_or_default(&format!("{}_GROUPS", prefix), "")),
        users: csv(&env_or_default(&format!("{}_USERS", prefix), "")),
    }
}

fn csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
