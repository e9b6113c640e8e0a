use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Reference set for the {system} system contains no usable phases")]
    EmptyReferenceSet { system: String },

    #[error("Reference set spans the {found} system but the configuration names {expected}")]
    SystemMismatch { expected: String, found: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
