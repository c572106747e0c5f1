pub mod equivalence;
pub mod linearity;
pub mod matcher;
pub mod normalizer;

pub use crate::domain::model::{KnownCase, VerificationResult};
