use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("parse config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("read data {}: {source}", path.display())]
    ReadData {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse data {}: {source}", path.display())]
    ParseData {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::ParseConfig { path, .. }
            | Self::ReadData { path, .. }
            | Self::ParseData { path, .. } => path,
        }
    }
}
