//! Main application configuration
//!
//! This module defines the primary configuration structures for the college
//! arena, including environment variable and TOML file loading and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub arena: ArenaSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Vote recording and read-path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Attempts per vote before a commit failure is reported
    pub max_commit_attempts: u32,
    /// Delay between commit attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Number of colleges shown in the ranked list
    pub leaderboard_size: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "college-arena".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            max_commit_attempts: 3,
            retry_delay_ms: 50,
            leaderboard_size: 12,
        }
    }
}

impl ArenaSettings {
    /// Get commit retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing sections use defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid TOML configuration: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(k) = env::var("RATING_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_K_FACTOR value: {}", k))?;
        }
        if let Ok(initial) = env::var("RATING_INITIAL") {
            self.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_INITIAL value: {}", initial))?;
        }

        // Arena settings
        if let Ok(attempts) = env::var("ARENA_MAX_COMMIT_ATTEMPTS") {
            self.arena.max_commit_attempts = attempts
                .parse()
                .map_err(|_| anyhow!("Invalid ARENA_MAX_COMMIT_ATTEMPTS value: {}", attempts))?;
        }
        if let Ok(delay) = env::var("ARENA_RETRY_DELAY_MS") {
            self.arena.retry_delay_ms = delay
                .parse()
                .map_err(|_| anyhow!("Invalid ARENA_RETRY_DELAY_MS value: {}", delay))?;
        }
        if let Ok(size) = env::var("ARENA_LEADERBOARD_SIZE") {
            self.arena.leaderboard_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid ARENA_LEADERBOARD_SIZE value: {}", size))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;

    if config.arena.max_commit_attempts == 0 {
        return Err(anyhow!("Max commit attempts must be greater than 0"));
    }
    if config.arena.leaderboard_size == 0 {
        return Err(anyhow!("Leaderboard size must be greater than 0"));
    }

    Ok(())
}
