#[cfg(feature = "lambda")]
use crate::config::{
    validate_collaborator, DEFAULT_INTERPRETER, DEFAULT_LINEARITY_SCRIPT, DEFAULT_SCRIPTS_DIR,
    DEFAULT_VERIFIER_SCRIPT,
};
#[cfg(feature = "lambda")]
use crate::domain::ports::{BackendKind, ConfigProvider};
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub backend: BackendKind,
    pub interpreter: String,
    pub scripts_dir: String,
    pub linearity_script: String,
    pub verifier_script: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let backend = match env::var("DE_ANALYZER_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => BackendKind::Heuristic,
        };

        Ok(Self {
            backend,
            interpreter: env::var("PYTHON").unwrap_or_else(|_| DEFAULT_INTERPRETER.to_string()),
            scripts_dir: env::var("SCRIPTS_DIR")
                .or_else(|_| env::var("LAMBDA_TASK_ROOT"))
                .unwrap_or_else(|_| DEFAULT_SCRIPTS_DIR.to_string()),
            linearity_script: env::var("LINEARITY_SCRIPT")
                .unwrap_or_else(|_| DEFAULT_LINEARITY_SCRIPT.to_string()),
            verifier_script: env::var("VERIFIER_SCRIPT")
                .unwrap_or_else(|_| DEFAULT_VERIFIER_SCRIPT.to_string()),
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
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

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_collaborator(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
