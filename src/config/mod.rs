use crate::core::access::TRIAL_WINDOW_DAYS;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_trial_window_days")]
    pub trial_window_days: i64,
    #[serde(default = "default_payment_delay_ms")]
    pub payment_delay_ms: u64,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

/// Keys every config file is expected to carry, checked by `config --check`.
pub const EXPECTED_KEYS: [&str; 5] = [
    "database",
    "trial_window_days",
    "payment_delay_ms",
    "notifications",
    "separator_char",
];

fn default_trial_window_days() -> i64 {
    TRIAL_WINDOW_DAYS
}
fn default_payment_delay_ms() -> u64 {
    800
}
fn default_notifications() -> bool {
    true
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            trial_window_days: default_trial_window_days(),
            payment_delay_ms: default_payment_delay_ms(),
            notifications: default_notifications(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        if cfg!(target_os = "windows") {
            dirs::config_dir().unwrap_or(base).join("rfellowship")
        } else {
            base.join(".rfellowship")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfellowship.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rfellowship.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();

        if cfg.trial_window_days < 1 {
            return Err(AppError::Config(format!(
                "trial_window_days must be at least 1 (found {})",
                cfg.trial_window_days
            )));
        }

        Ok(cfg)
    }

    /// First character of `separator_char`, used to underline tables.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Keys from [`EXPECTED_KEYS`] missing in the config file on disk.
    pub fn missing_keys() -> AppResult<Vec<&'static str>> {
        let content =
            fs::read_to_string(Self::config_file()).map_err(|_| AppError::ConfigLoad)?;
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

        let Some(map) = yaml.as_mapping() else {
            return Ok(EXPECTED_KEYS.to_vec());
        };

        Ok(EXPECTED_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
