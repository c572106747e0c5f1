// Adapters layer: concrete collaborators behind the `Collaborator` port.

pub mod heuristic;
pub mod script;

use crate::domain::ports::{BackendKind, Collaborator, ConfigProvider};
use std::path::Path;
use std::sync::Arc;

pub use heuristic::HeuristicCollaborator;
pub use script::ScriptCollaborator;

/// Picks the collaborator the configuration asks for.
pub fn build_collaborator<C: ConfigProvider + ?Sized>(config: &C) -> Arc<dyn Collaborator> {
    match config.backend() {
        BackendKind::Heuristic => Arc::new(HeuristicCollaborator::new()),
        BackendKind::Script => {
            let dir = Path::new(config.scripts_dir());
            Arc::new(ScriptCollaborator::new(
                config.interpreter(),
                dir.join(config.linearity_script()),
                dir.join(config.verifier_script()),
            ))
        }
    }
}
