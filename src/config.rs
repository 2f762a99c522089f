use crate::coach::Personality;
use crate::engine::habits::MAX_HISTORY_DAYS;
use anyhow::{Context, Result, anyhow, bail};
use dirs::home_dir;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".elara";
const CONFIG_FILE: &str = "config.json";
const DB_PATH_ENV: &str = "ELARA_DB_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    #[serde(deserialize_with = "deserialize_personality")]
    pub personality: Personality,
    pub history_days: u32,
    pub improvement_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_root_dir().join("db").join("elara.db"),
            personality: Personality::Friend,
            history_days: 30,
            improvement_limit: 3,
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        Ok(default_root_dir().join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Self::default()
        };

        if let Some(path) = std::env::var_os(DB_PATH_ENV).filter(|value| !value.is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        set_mode_600(path)?;

        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match normalize_config_key(key) {
            "db_path" => {
                if value.trim().is_empty() {
                    bail!("db_path must not be empty");
                }
                self.db_path = expand_home(value.trim());
            }
            "personality" => {
                self.personality = Personality::parse(value).ok_or_else(|| {
                    anyhow!(
                        "personality must be one of sage|champion|friend|strategist|zen_master"
                    )
                })?;
            }
            "history_days" => {
                let parsed = value
                    .parse::<u32>()
                    .map_err(|_| anyhow!("history_days must be a number"))?;
                if !(1..=MAX_HISTORY_DAYS).contains(&parsed) {
                    bail!("history_days must be between 1 and {MAX_HISTORY_DAYS}");
                }
                self.history_days = parsed;
            }
            "improvement_limit" => {
                self.improvement_limit = value
                    .parse::<usize>()
                    .map_err(|_| anyhow!("improvement_limit must be a number"))?
                    .clamp(1, 8);
            }
            _ => {
                bail!(
                    "Unsupported config key: {key}. Supported keys: db_path|db.path, personality|coach.personality, history_days|habits.history_days, improvement_limit|assessment.improvement_limit"
                );
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Option<String> {
        match normalize_config_key(key) {
            "db_path" => Some(self.db_path.display().to_string()),
            "personality" => Some(self.personality.as_str().to_string()),
            "history_days" => Some(self.history_days.to_string()),
            "improvement_limit" => Some(self.improvement_limit.to_string()),
            _ => None,
        }
    }
}

fn normalize_config_key(key: &str) -> &str {
    match key {
        "db_path" | "db.path" => "db_path",
        "personality" | "coach.personality" => "personality",
        "history_days" | "habits.history_days" => "history_days",
        "improvement_limit" | "assessment.improvement_limit" => "improvement_limit",
        _ => key,
    }
}

fn deserialize_personality<'de, D>(deserializer: D) -> Result<Personality, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(Personality::resolve(raw.as_deref()))
}

pub fn expand_home(raw: &str) -> PathBuf {
    raw.strip_prefix("~/")
        .and_then(|stripped| home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| PathBuf::from(raw))
}

fn default_root_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn set_mode_600(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set file permissions: {}", path.display()))?;
    }

    Ok(())
}
