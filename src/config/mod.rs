pub mod lambda;
pub mod toml_config;

use crate::domain::ports::{BackendKind, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_INTERPRETER: &str = "python";
pub const DEFAULT_SCRIPTS_DIR: &str = ".";
pub const DEFAULT_LINEARITY_SCRIPT: &str = "linearity_checker.py";
pub const DEFAULT_VERIFIER_SCRIPT: &str = "solution_verifier.py";
pub const DEFAULT_MONITOR_INTERVAL_SECONDS: u64 = 300;

/// Where and how the HTTP server runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub monitor: bool,
    pub monitor_interval_seconds: u64,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_host("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        validation::validate_positive_number(
            "monitor_interval_seconds",
            self.monitor_interval_seconds,
            1,
        )?;
        Ok(())
    }
}

/// Script settings only matter when the script backend is selected.
pub fn validate_collaborator<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    if config.backend() == BackendKind::Script {
        validation::validate_non_empty_string("interpreter", config.interpreter())?;
        validation::validate_path("scripts_dir", config.scripts_dir())?;
        validation::validate_file_name("linearity_script", config.linearity_script())?;
        validation::validate_file_name("verifier_script", config.verifier_script())?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "de-analyzer")]
#[command(about = "Checks differential equations for linearity and verifies candidate solutions")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_HOST, env = "DE_ANALYZER_HOST")]
    pub host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    #[arg(long, value_enum, default_value_t = BackendKind::Heuristic, env = "DE_ANALYZER_BACKEND")]
    pub backend: BackendKind,

    #[arg(long, default_value = DEFAULT_INTERPRETER, help = "Interpreter for the checker scripts")]
    pub interpreter: String,

    #[arg(long, default_value = DEFAULT_SCRIPTS_DIR)]
    pub scripts_dir: String,

    #[arg(long, default_value = DEFAULT_LINEARITY_SCRIPT)]
    pub linearity_script: String,

    #[arg(long, default_value = DEFAULT_VERIFIER_SCRIPT)]
    pub verifier_script: String,

    #[arg(short, long, help = "TOML configuration file, used instead of the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Log process CPU and memory usage periodically")]
    pub monitor: bool,

    #[arg(long, default_value_t = DEFAULT_MONITOR_INTERVAL_SECONDS)]
    pub monitor_interval: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            host: self.host.clone(),
            port: self.port,
            monitor: self.monitor,
            monitor_interval_seconds: self.monitor_interval,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn backend(&self) -> BackendKind {
        self.backend
    }

    fn interpreter(&self) -> &str {
        &self.interpreter
    }

    fn scripts_dir(&self) -> &str {
        &self.scripts_dir
    }

    fn linearity_script(&self) -> &str {
        &self.linearity_script
    }

    fn verifier_script(&self) -> &str {
        &self.verifier_script
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.server_settings().validate()?;
        validate_collaborator(self)
    }
}
