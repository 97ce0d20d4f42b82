use crate::registry::RegisteredEntry;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_wake_word")]
    pub wake_word: String,
    /// Awake window opened by the wake word
    #[serde(default = "default_wake_window_ms")]
    pub wake_window_ms: u64,
    /// Delay between stopping and restarting the recognizer after a command
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
    /// How long a command announcement stays on the status line
    #[serde(default = "default_status_clear_ms")]
    pub status_clear_ms: u64,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Extra registered utterances, checked alongside the built-in ones
    #[serde(default)]
    pub commands: Vec<RegisteredEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wake_word: default_wake_word(),
            wake_window_ms: default_wake_window_ms(),
            restart_delay_ms: default_restart_delay_ms(),
            status_clear_ms: default_status_clear_ms(),
            remote: RemoteConfig::default(),
            server: ServerConfig::default(),
            commands: Vec::new(),
        }
    }
}

fn default_wake_word() -> String {
    "hey platform".into()
}
fn default_wake_window_ms() -> u64 {
    2500
}
fn default_restart_delay_ms() -> u64 {
    250
}
fn default_status_clear_ms() -> u64 {
    4000
}

// ============================================================================
// Remote Fallback Config
// ============================================================================

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// Ask the server-side interpreter when the local cascade gives up
    #[serde(default = "default_remote_enabled")]
    pub enabled: bool,
    /// Interpreter endpoint (supports ${ENV_VAR} syntax)
    #[serde(default = "default_remote_url")]
    pub url: String,
    /// Hard deadline for one interpret call
    #[serde(default = "default_remote_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_remote_enabled(),
            url: default_remote_url(),
            timeout_ms: default_remote_timeout_ms(),
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_remote_enabled() -> bool {
    true
}

fn default_remote_url() -> String {
    "http://127.0.0.1:8787/api/voice/interpret".into()
}

fn default_remote_timeout_ms() -> u64 {
    1200
}

// ============================================================================
// Server Config
// ============================================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address for `handsfree serve`
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".into()
}

/// Replace each `${VAR}` with its value in one left-to-right pass.
/// Substituted text is never rescanned; an unterminated `${` is kept as is.
fn expand_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find("${") {
        let Some(len) = rest[open + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let name = &rest[open + 2..open + 2 + len];
        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => tracing::warn!(name, "config references unset environment variable"),
        }
        rest = &rest[open + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

impl Config {
    /// Load `path`, or `config.toml` in the working directory when it exists.
    /// A missing default file gives the defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        let mut config = if path.exists() || required {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?
        } else {
            Config::default()
        };

        config.remote.url = expand_env_vars(&config.remote.url);
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(text)?;
        anyhow::ensure!(!config.wake_word.trim().is_empty(), "wake_word must not be empty");
        Ok(config)
    }

    pub fn wake_window(&self) -> Duration {
        Duration::from_millis(self.wake_window_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    pub fn status_clear(&self) -> Duration {
        Duration::from_millis(self.status_clear_ms)
    }
}
