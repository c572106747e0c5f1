use crate::domain::ports::Collaborator;
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Runs the external checker scripts and hands back whatever they print.
///
/// `<interpreter> <script> <args...>` is spawned once per call with stdin
/// closed. Exit code 0 means stdout is the response payload; anything else is
/// a failure. There is no timeout: a script that never exits holds the
/// request open.
#[derive(Debug, Clone)]
pub struct ScriptCollaborator {
    interpreter: String,
    linearity_script: PathBuf,
    verifier_script: PathBuf,
}

impl ScriptCollaborator {
    pub fn new(
        interpreter: impl Into<String>,
        linearity_script: impl Into<PathBuf>,
        verifier_script: impl Into<PathBuf>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            linearity_script: linearity_script.into(),
            verifier_script: verifier_script.into(),
        }
    }

    async fn run(&self, script: &Path, args: &[&str]) -> Result<Vec<u8>> {
        tracing::debug!(
            "Spawning {} {} with {} argument(s)",
            self.interpreter,
            script.display(),
            args.len()
        );

        let output = Command::new(&self.interpreter)
            .arg(script)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| AnalyzerError::SpawnError {
                program: self.interpreter.clone(),
                source,
            })?;

        for line in String::from_utf8_lossy(&output.stderr).lines() {
            tracing::warn!("{} stderr: {}", self.interpreter, line);
        }

        if !output.status.success() {
            // 被信號終止時沒有退出碼
            let code = output.status.code().unwrap_or(-1);
            return Err(AnalyzerError::ProcessExitError {
                program: self.interpreter.clone(),
                code,
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Collaborator for ScriptCollaborator {
    fn name(&self) -> &str {
        "script"
    }

    async fn check_linearity(&self, equation: &str) -> Result<Vec<u8>> {
        self.run(&self.linearity_script, &[equation]).await
    }

    async fn verify_solution(&self, de: &str, solution: &str) -> Result<Vec<u8>> {
        self.run(&self.verifier_script, &[de, solution]).await
    }
}
