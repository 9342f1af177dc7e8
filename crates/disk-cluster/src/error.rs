use std::path::PathBuf;

use thiserror::Error;

use crate::star::StarKey;

#[derive(Debug, Error)]
pub enum DiskClusterError {
    #[error("star {key} has no active disk")]
    RegistryNotFound { key: StarKey },

    #[error("star {key} already owns a disk")]
    DuplicateRegistration { key: StarKey },

    #[error("star {key} is not part of the cluster")]
    UnknownStar { key: StarKey },

    #[error("mass-loss grid: {0}")]
    MassLossGrid(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DiskClusterError>;
