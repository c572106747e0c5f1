use crate::config::{
    validate_collaborator, ServerSettings, DEFAULT_HOST, DEFAULT_INTERPRETER,
    DEFAULT_LINEARITY_SCRIPT, DEFAULT_MONITOR_INTERVAL_SECONDS, DEFAULT_PORT, DEFAULT_SCRIPTS_DIR,
    DEFAULT_VERIFIER_SCRIPT,
};
use crate::domain::ports::{BackendKind, ConfigProvider};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collaborator: CollaboratorConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    pub backend: Option<BackendKind>,
    pub interpreter: Option<String>,
    pub scripts_dir: Option<String>,
    pub linearity_script: Option<String>,
    pub verifier_script: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub interval_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCRIPTS_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn server_settings(&self) -> ServerSettings {
        let monitoring = self.monitoring.as_ref();
        ServerSettings {
            host: self
                .server
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.server.port.unwrap_or(DEFAULT_PORT),
            monitor: monitoring.map(|m| m.enabled).unwrap_or(false),
            monitor_interval_seconds: monitoring
                .and_then(|m| m.interval_seconds)
                .unwrap_or(DEFAULT_MONITOR_INTERVAL_SECONDS),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn backend(&self) -> BackendKind {
        self.collaborator.backend.unwrap_or(BackendKind::Heuristic)
    }

    fn interpreter(&self) -> &str {
        self.collaborator
            .interpreter
            .as_deref()
            .unwrap_or(DEFAULT_INTERPRETER)
    }

    fn scripts_dir(&self) -> &str {
        self.collaborator
            .scripts_dir
            .as_deref()
            .unwrap_or(DEFAULT_SCRIPTS_DIR)
    }

    fn linearity_script(&self) -> &str {
        self.collaborator
            .linearity_script
            .as_deref()
            .unwrap_or(DEFAULT_LINEARITY_SCRIPT)
    }

    fn verifier_script(&self) -> &str {
        self.collaborator
            .verifier_script
            .as_deref()
            .unwrap_or(DEFAULT_VERIFIER_SCRIPT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.server_settings().validate()?;
        validate_collaborator(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[collaborator]
backend = "script"
interpreter = "python3"
scripts_dir = "/srv/checkers"

[monitoring]
enabled = true
interval_seconds = 60
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.server_settings();

        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert!(settings.monitor);
        assert_eq!(settings.monitor_interval_seconds, 60);
        assert_eq!(config.backend(), BackendKind::Script);
        assert_eq!(config.interpreter(), "python3");
        assert_eq!(config.linearity_script(), DEFAULT_LINEARITY_SCRIPT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let settings = config.server_settings();

        assert_eq!(settings.port, DEFAULT_PORT);
        assert!(!settings.monitor);
        assert_eq!(config.backend(), BackendKind::Heuristic);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DE_ANALYZER_TEST_SCRIPTS", "/tmp/de-scripts");

        let toml_content = r#"
[collaborator]
backend = "script"
scripts_dir = "${DE_ANALYZER_TEST_SCRIPTS}"
verifier_script = "${DE_ANALYZER_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.scripts_dir(), "/tmp/de-scripts");
        assert_eq!(config.verifier_script(), "${DE_ANALYZER_TEST_UNSET_VAR}");

        std::env::remove_var("DE_ANALYZER_TEST_SCRIPTS");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
port = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[collaborator]
backend = "script"
interpreter = "  "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_backend_is_a_parse_error() {
        let result = TomlConfig::from_toml_str(
            r#"
[collaborator]
backend = "sympy"
"#,
        );
        assert!(matches!(
            result,
            Err(AnalyzerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"localhost\"\nport = 5050\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server_settings().bind_address(), "localhost:5050");
    }
}
