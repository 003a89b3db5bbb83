use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "registro.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub request_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.supabase_url.trim().is_empty() || self.supabase_anon_key.trim().is_empty() {
            bail!("Missing Supabase environment variables");
        }
        url::Url::parse(self.supabase_url.trim())
            .with_context(|| format!("invalid supabase url '{}'", self.supabase_url))?;
        if self.request_timeout_seconds == 0 {
            bail!("request timeout must be at least one second");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    request_timeout_seconds: Option<u64>,
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` if readable, then environment
/// variables; later sources win.
pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                info!(path = %path.display(), "loaded config file");
                if let Some(v) = file_cfg.supabase_url {
                    settings.supabase_url = v;
                }
                if let Some(v) = file_cfg.supabase_anon_key {
                    settings.supabase_anon_key = v;
                }
                if let Some(v) = file_cfg.request_timeout_seconds {
                    settings.request_timeout_seconds = v;
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable config file"),
        }
    }

    for key in ["NEXT_PUBLIC_SUPABASE_URL", "SUPABASE_URL", "APP__SUPABASE_URL"] {
        if let Some(v) = env(key) {
            settings.supabase_url = v;
        }
    }

    for key in [
        "NEXT_PUBLIC_SUPABASE_ANON_KEY",
        "SUPABASE_ANON_KEY",
        "APP__SUPABASE_ANON_KEY",
    ] {
        if let Some(v) = env(key) {
            settings.supabase_anon_key = v;
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_seconds = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECONDS"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
