use anyhow::{Context, Result};
use clap::Args;
use directories::ProjectDirs;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for a quiz run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Present questions in a random order
    pub shuffle_questions: bool,
    /// Start sessions with option shuffling enabled
    pub shuffle_options: bool,
    /// Delay before a single-choice pick moves on, in milliseconds
    pub auto_advance_ms: u64,
    /// Seed for reproducible shuffles
    pub seed: Option<u64>,
    /// Directory for the JSON log file; no file logging when unset
    pub log_dir: Option<PathBuf>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub shuffle_questions: Option<bool>,
    #[serde(default)]
    pub shuffle_options: Option<bool>,
    #[serde(default)]
    pub auto_advance_ms: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

/// Configuration flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct CliArgs {
    /// Present questions in a random order
    #[arg(
        long,
        env = "QUIZMASTER_SHUFFLE_QUESTIONS",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub shuffle_questions: Option<bool>,

    /// Shuffle the options of every question
    #[arg(
        long,
        env = "QUIZMASTER_SHUFFLE_OPTIONS",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub shuffle_options: Option<bool>,

    /// Delay before moving on after a single-choice pick, in milliseconds
    #[arg(long, env = "QUIZMASTER_AUTO_ADVANCE_MS", global = true)]
    pub auto_advance_ms: Option<u64>,

    /// Seed for reproducible shuffles
    #[arg(long, env = "QUIZMASTER_SEED", global = true)]
    pub seed: Option<u64>,

    /// Directory to write JSON logs to
    #[arg(long, env = "QUIZMASTER_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Debug mode
    #[arg(long, env = "QUIZMASTER_DEBUG", default_value_t = false, global = true)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            shuffle_questions: update.shuffle_questions.unwrap_or(self.shuffle_questions),
            shuffle_options: update.shuffle_options.unwrap_or(self.shuffle_options),
            auto_advance_ms: update.auto_advance_ms.unwrap_or(self.auto_advance_ms),
            seed: update.seed.or(self.seed),
            log_dir: update.log_dir.or(self.log_dir),
        }
    }

    /// Returns the auto-advance delay as a Duration
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    /// Creates the random number generator a session should own
    ///
    /// Seeded when `seed` is set, otherwise drawn from the thread RNG.
    pub fn session_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config() -> Config {
    Config {
        shuffle_questions: false,
        shuffle_options: false,
        auto_advance_ms: 1500,
        seed: None,
        log_dir: None,
    }
}

/// Loads configuration from a TOML file
///
/// A missing path or a file that does not exist yields an empty update.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;
    let update = toml::from_str::<ConfigUpdate>(&content)
        .with_context(|| format!("Failed to parse config file {:?}", config_path))?;

    info!("Loaded configuration from {:?}", config_path);
    Ok(update)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        shuffle_questions: args.shuffle_questions,
        shuffle_options: args.shuffle_options,
        auto_advance_ms: args.auto_advance_ms,
        seed: args.seed,
        log_dir: args.log_dir,
    }
}

/// Returns the platform config directory, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "quizmaster", "quizmaster") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let config_path = get_config_dir_path().map(|dir| dir.join("config.toml"));

    let file_update = config_from_file(config_path).unwrap_or_else(|err| {
        warn!("Ignoring config file: {:#}", err);
        ConfigUpdate::default()
    });

    let config = base_config()
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    debug!(
        "Final configuration: shuffle_questions={}, shuffle_options={}, auto_advance={}ms, seeded={}",
        config.shuffle_questions,
        config.shuffle_options,
        config.auto_advance_ms,
        config.seed.is_some()
    );

    config
}

#[cfg(test)]
mod tests;
