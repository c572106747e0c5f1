pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod transport;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use adapters::{build_collaborator, HeuristicCollaborator, ScriptCollaborator};
pub use config::{toml_config::TomlConfig, ServerSettings};
pub use crate::core::{linearity::classify, matcher::verify, normalizer::normalize};
pub use domain::model::{CheckPayload, CheckStatus, VerificationResult};
pub use domain::ports::{BackendKind, Collaborator, ConfigProvider};
pub use transport::{FunctionRequest, FunctionResponse, TransportShim};
pub use utils::error::{AnalyzerError, Result};
