//! Global taskcal configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FUTURE_DAYS, DEFAULT_PAST_DAYS};
use crate::error::{TaskCalError, TaskCalResult};
use crate::remote::Remote;

static DEFAULT_TASK_COMMAND: &str = "task";
static DEFAULT_TASK_FILTER: &str = "status:pending or status:completed";

fn default_task_command() -> String {
    DEFAULT_TASK_COMMAND.to_string()
}

fn default_task_filter() -> String {
    DEFAULT_TASK_FILTER.to_string()
}

fn default_past_days() -> i64 {
    DEFAULT_PAST_DAYS
}

fn default_future_days() -> i64 {
    DEFAULT_FUTURE_DAYS
}

/// Configuration at ~/.config/taskcal/config.toml, overridable with
/// `TASKCAL_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskcalConfig {
    #[serde(default = "default_task_command")]
    pub task_command: String,

    /// Taskwarrior filter selecting the tasks to mirror
    #[serde(default = "default_task_filter")]
    pub task_filter: String,

    /// IANA zone used to recognise date-only dues. Defaults to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_past_days")]
    pub past_days: i64,

    #[serde(default = "default_future_days")]
    pub future_days: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<Remote>,
}

impl Default for TaskcalConfig {
    fn default() -> Self {
        TaskcalConfig {
            task_command: default_task_command(),
            task_filter: default_task_filter(),
            timezone: None,
            past_days: DEFAULT_PAST_DAYS,
            future_days: DEFAULT_FUTURE_DAYS,
            remote: None,
        }
    }
}

impl TaskcalConfig {
    pub fn config_path() -> TaskCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TaskCalError::Config("Could not determine config directory".into()))?
            .join("taskcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, writing a commented template first if
    /// the file does not exist yet.
    pub fn load() -> TaskCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TaskCalResult<Self> {
        let config: TaskcalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("TASKCAL").try_parsing(true))
            .build()
            .map_err(|e| TaskCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TaskCalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TaskCalResult<()> {
        if self.past_days < 0 || self.future_days < 0 {
            return Err(TaskCalError::Config(
                "past_days and future_days must not be negative".into(),
            ));
        }
        Ok(())
    }

    pub fn remote(&self) -> TaskCalResult<&Remote> {
        self.remote.as_ref().ok_or_else(|| {
            TaskCalError::Config(
                "No remote configured. Add a [remote] section to the config file.".into(),
            )
        })
    }

    /// Zone from the config, else the system zone, else UTC.
    pub fn time_zone(&self) -> TaskCalResult<Tz> {
        if let Some(name) = &self.timezone {
            return name
                .parse::<Tz>()
                .map_err(|_| TaskCalError::Config(format!("Unknown timezone '{name}'")));
        }

        match iana_time_zone::get_timezone().map(|name| name.parse::<Tz>()) {
            Ok(Ok(tz)) => Ok(tz),
            _ => {
                tracing::warn!("could not determine system timezone, using UTC");
                Ok(Tz::UTC)
            }
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TaskCalResult<()> {
        let contents = format!(
            "\
# taskcal configuration

# Taskwarrior binary and the filter selecting tasks to mirror. Completed
# tasks are included so their events get the completed mark; those dated
# outside the window below are left alone:
# task_command = \"{DEFAULT_TASK_COMMAND}\"
# task_filter = \"{DEFAULT_TASK_FILTER}\"

# Zone used to recognise date-only due dates (defaults to the system zone):
# timezone = \"Europe/Berlin\"

# Calendar window scanned for mirrored events:
# past_days = {DEFAULT_PAST_DAYS}
# future_days = {DEFAULT_FUTURE_DAYS}

# Calendar to mirror into:
# [remote]
# provider = \"google\"
# google_account = \"you@gmail.com\"
# google_calendar_id = \"primary\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TaskCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TaskCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
