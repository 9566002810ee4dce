//! Game configuration resolved from defaults, a TOML file, environment
//! variables and command-line flags, in increasing order of precedence.
//!
//! `CHIPSTACK_CONFIG` names the file. Environment overrides are
//! `CHIPSTACK_STARTING_CHIPS`, `CHIPSTACK_SMALL_BLIND`, `CHIPSTACK_SEED` and
//! `CHIPSTACK_TURN_TIMEOUT` (seconds).

use chipstack_room::GameSettings;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub starting_chips: u32,
    pub small_blind: u32,
    pub seed: Option<u64>,
    pub turn_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            starting_chips: settings.starting_chips,
            small_blind: settings.small_blind,
            seed: settings.seed,
            turn_timeout_secs: settings.turn_timeout_secs,
        }
    }
}

impl Config {
    pub fn to_settings(&self) -> GameSettings {
        GameSettings {
            starting_chips: self.starting_chips,
            small_blind: self.small_blind,
            seed: self.seed,
            turn_timeout_secs: self.turn_timeout_secs,
            ..GameSettings::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub starting_chips: ValueSource,
    pub small_blind: ValueSource,
    pub seed: ValueSource,
    pub turn_timeout_secs: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_chips: ValueSource::Default,
            small_blind: ValueSource::Default,
            seed: ValueSource::Default,
            turn_timeout_secs: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub starting_chips: Option<u32>,
    pub small_blind: Option<u32>,
    pub seed: Option<u64>,
    pub turn_timeout_secs: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_overrides(ConfigOverrides::default())
}

pub fn load_with_overrides(flags: ConfigOverrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CHIPSTACK_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.turn_timeout_secs {
            cfg.turn_timeout_secs = Some(v);
            sources.turn_timeout_secs = ValueSource::File;
        }
    }

    if let Some(v) = env_number("CHIPSTACK_STARTING_CHIPS")? {
        cfg.starting_chips = v;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(v) = env_number("CHIPSTACK_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_number("CHIPSTACK_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_number("CHIPSTACK_TURN_TIMEOUT")? {
        cfg.turn_timeout_secs = Some(v);
        sources.turn_timeout_secs = ValueSource::Env;
    }

    if let Some(v) = flags.starting_chips {
        cfg.starting_chips = v;
        sources.starting_chips = ValueSource::Cli;
    }
    if let Some(v) = flags.small_blind {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Cli;
    }
    if let Some(v) = flags.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Cli;
    }
    if let Some(v) = flags.turn_timeout_secs {
        cfg.turn_timeout_secs = Some(v);
        sources.turn_timeout_secs = ValueSource::Cli;
    }

    cfg.to_settings()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {e}")))?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    turn_timeout_secs: Option<u64>,
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid value for {key}: {raw}"))),
        _ => Ok(None),
    }
}
