//! Layered CLI configuration: defaults, then the TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables.

use holdem_engine::config::{GameParameters, TimeoutPolicy};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: usize,
    pub seed: Option<u64>,
    pub tokens: u32,
    pub small_blind: u32,
    pub blind_increase: u32,
    pub turn_seconds: u64,
    pub timeout_policy: TimeoutPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub seed: ValueSource,
    pub tokens: ValueSource,
    pub small_blind: ValueSource,
    pub blind_increase: ValueSource,
    pub turn_seconds: ValueSource,
    pub timeout_policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            seed: ValueSource::Default,
            tokens: ValueSource::Default,
            small_blind: ValueSource::Default,
            blind_increase: ValueSource::Default,
            turn_seconds: ValueSource::Default,
            timeout_policy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let preset = GameParameters::sit_and_go();
        Self {
            players: preset.max_players,
            seed: None,
            tokens: preset.tokens,
            small_blind: preset.small_blind,
            blind_increase: preset.blind_increase,
            turn_seconds: preset.turn_seconds,
            timeout_policy: preset.timeout_policy,
        }
    }
}

impl Config {
    /// Table parameters for `players` seats. The table keeps playing down
    /// to two players.
    pub fn parameters(&self, players: usize) -> GameParameters {
        GameParameters {
            min_players: 2,
            max_players: players,
            tokens: self.tokens,
            small_blind: self.small_blind,
            blind_increase: self.blind_increase,
            turn_seconds: self.turn_seconds,
            timeout_policy: self.timeout_policy,
            ..GameParameters::sit_and_go()
        }
    }
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
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.tokens {
            cfg.tokens = v;
            sources.tokens = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.blind_increase {
            cfg.blind_increase = v;
            sources.blind_increase = ValueSource::File;
        }
        if let Some(v) = f.turn_seconds {
            cfg.turn_seconds = v;
            sources.turn_seconds = ValueSource::File;
        }
        if let Some(v) = f.timeout_policy {
            cfg.timeout_policy = v;
            sources.timeout_policy = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HOLDEM_PLAYERS")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_TOKENS")? {
        cfg.tokens = v;
        sources.tokens = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_BLIND_INCREASE")? {
        cfg.blind_increase = v;
        sources.blind_increase = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_TURN_SECONDS")? {
        cfg.turn_seconds = v;
        sources.turn_seconds = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var("HOLDEM_TIMEOUT_POLICY") {
        if !policy.is_empty() {
            cfg.timeout_policy = parse_policy(&policy).ok_or_else(|| {
                ConfigError::Invalid(format!("Invalid HOLDEM_TIMEOUT_POLICY: {}", policy))
            })?;
            sources.timeout_policy = ValueSource::Env;
        }
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    tokens: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    blind_increase: Option<u32>,
    #[serde(default)]
    turn_seconds: Option<u64>,
    #[serde(default)]
    timeout_policy: Option<TimeoutPolicy>,
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, raw))),
        _ => Ok(None),
    }
}

fn parse_policy(s: &str) -> Option<TimeoutPolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "fold" => Some(TimeoutPolicy::Fold),
        "check" => Some(TimeoutPolicy::Check),
        _ => None,
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.parameters(cfg.players)
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}
