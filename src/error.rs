use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to load run file: {0}")]
    Load(#[from] confy::ConfyError),

    #[error("invalid noise distribution: {0}")]
    InvalidNoise(#[from] rand_distr::NormalError),

    // particle sits exactly on the bath anchor, the coupling force has no direction
    #[error("particle and bath coincide at step {step}, coupling force is singular")]
    Singularity { step: usize },

    #[error("state became non-finite at step {step}")]
    NonFinite { step: usize },

    #[error("cannot open output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("FILE IO ERROR: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
