use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;
use crate::utils::constants::{
    DEFAULT_FLASH_MS, DEFAULT_GLITCH_INTERVAL_MS, DEFAULT_GLITCH_REVERT_MS,
    DEFAULT_MAX_INTERVAL_MS, DEFAULT_MAX_TOKENS, DEFAULT_MIN_INTERVAL_MS, DEFAULT_SEED_COUNT,
    DEFAULT_TICK_RATE_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_tokens: usize,
    pub seed_count: usize,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub flash_ms: u64,
    pub glitch_interval_ms: u64,
    pub glitch_revert_ms: u64,
    pub tick_rate_ms: u64,
    pub rng_seed: Option<u64>,
    pub headless: bool,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            seed_count: DEFAULT_SEED_COUNT,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            max_interval_ms: DEFAULT_MAX_INTERVAL_MS,
            flash_ms: DEFAULT_FLASH_MS,
            glitch_interval_ms: DEFAULT_GLITCH_INTERVAL_MS,
            glitch_revert_ms: DEFAULT_GLITCH_REVERT_MS,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            rng_seed: None,
            headless: false,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys fall back to
    /// the defaults; present keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let config = Config {
            max_tokens: parse_or(&lookup, "FEED_MAX_TOKENS", defaults.max_tokens)?,
            seed_count: parse_or(&lookup, "FEED_SEED_COUNT", defaults.seed_count)?,
            min_interval_ms: parse_or(&lookup, "FEED_MIN_INTERVAL_MS", defaults.min_interval_ms)?,
            max_interval_ms: parse_or(&lookup, "FEED_MAX_INTERVAL_MS", defaults.max_interval_ms)?,
            flash_ms: parse_or(&lookup, "FEED_FLASH_MS", defaults.flash_ms)?,
            glitch_interval_ms: parse_or(
                &lookup,
                "GLITCH_INTERVAL_MS",
                defaults.glitch_interval_ms,
            )?,
            glitch_revert_ms: parse_or(&lookup, "GLITCH_REVERT_MS", defaults.glitch_revert_ms)?,
            tick_rate_ms: parse_or(&lookup, "UI_TICK_MS", defaults.tick_rate_ms)?,
            rng_seed: parse_opt(&lookup, "FEED_RNG_SEED")?,
            headless: parse_or(&lookup, "FEED_HEADLESS", defaults.headless)?,
            log_file: lookup("FEED_LOG_FILE").filter(|path| !path.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::Zero {
                key: "FEED_MAX_TOKENS",
            });
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::Zero {
                key: "FEED_MIN_INTERVAL_MS",
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Zero { key: "UI_TICK_MS" });
        }
        if self.min_interval_ms > self.max_interval_ms {
            return Err(ConfigError::EmptyIntervalRange {
                min_ms: self.min_interval_ms,
                max_ms: self.max_interval_ms,
            });
        }
        if self.glitch_revert_ms >= self.glitch_interval_ms {
            return Err(ConfigError::GlitchRevertTooLong {
                revert_ms: self.glitch_revert_ms,
                interval_ms: self.glitch_interval_ms,
            });
        }
        Ok(())
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn glitch_interval(&self) -> Duration {
        Duration::from_millis(self.glitch_interval_ms)
    }

    pub fn glitch_revert(&self) -> Duration {
        Duration::from_millis(self.glitch_revert_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn print_info(&self) {
        info!(
            "🎯 Feed capacity: {} tokens ({} seeded at startup)",
            self.max_tokens, self.seed_count
        );
        info!(
            "⏱️  Arrival interval: {}-{} ms, highlight {} ms",
            self.min_interval_ms, self.max_interval_ms, self.flash_ms
        );
        info!(
            "⏱️  Title glitch: every {} ms, reverted after {} ms",
            self.glitch_interval_ms, self.glitch_revert_ms
        );
        match self.rng_seed {
            Some(seed) => info!("🎲 Deterministic feed, seed {}", seed),
            None => info!("🎲 Feed seeded from entropy"),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

fn parse_opt<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
