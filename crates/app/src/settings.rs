//! Handles settings for the application.
//!
//! Sources, later ones winning:
//!
//! 1. `wayfarer.toml` (or the file given with `--config`), optional;
//! 2. environment variables prefixed `WAYFARER_`, nested keys joined by
//!    `__` (e.g. `WAYFARER_SERVER__PORT=8080`);
//! 3. command line flags.
//!
//! See `wayfarer.toml` at the repository root for every key.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "wayfarer.toml";
const ENV_PREFIX: &str = "WAYFARER";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the workspace crates.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Store {
    /// Simulated latency as a percentage of the nominal delays; `0`
    /// disables it.
    pub latency_ms_scale: u32,
    /// Load the bundled fixtures at startup.
    pub seed: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            latency_ms_scale: 100,
            seed: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub store: Store,
}

#[derive(Debug, Parser)]
#[command(name = "wayfarer", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
    /// Override the bind address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the latency scale (percent, 0 disables).
    #[arg(long)]
    latency: Option<u32>,
    /// Start with an empty store instead of the bundled fixtures.
    #[arg(long)]
    no_seed: bool,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(level) = self.level {
            settings.app.level = level;
        }
        if let Some(bind) = self.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(latency) = self.latency {
            settings.store.latency_ms_scale = latency;
        }
        if self.no_seed {
            settings.store.seed = false;
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        args.apply(&mut settings);
        Ok(settings)
    }

    /// `bind:port` to listen on.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
