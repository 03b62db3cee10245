//! Runtime settings layered from defaults, the environment and CLI flags.

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Prefix of environment variables read as settings, for example
/// `HCL_MERGE_LOG_FILTER`.
pub const ENV_PREFIX: &str = "HCL_MERGE_";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Echo the merged tree as JSON on stdout before writing the output.
    pub echo_notation: bool,
    /// Tracing filter directives.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            echo_notation: true,
            log_filter: "warn".to_owned(),
        }
    }
}

/// Values taken from the command line. `None` leaves lower layers intact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echo_notation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

/// Loads settings: defaults, then `HCL_MERGE_*` variables, then `overrides`.
pub fn load(overrides: &SettingsOverrides) -> Result<Settings, CliError> {
    Figment::from(Serialized::defaults(Settings::default()))
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()
        .map_err(|err| CliError::Settings(Box::new(err)))
}
