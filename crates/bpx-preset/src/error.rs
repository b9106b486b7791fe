use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresetError {
    // Option validation errors
    #[error("'{name}' option must be a boolean")]
    NonBooleanOption { name: &'static str },

    #[error("'modules' option must be one of: amd, umd, systemjs, commonjs, cjs, auto, disabled. Received: {received}")]
    InvalidModules { received: String },

    // Environment selection errors
    #[error("building a configuration requires `NODE_ENV` or `BABEL_ENV` to be set to \"development\", \"test\", or \"production\". Instead, received: {received:?}")]
    UnknownEnvironment { received: String },

    // Runtime package resolution errors
    #[error("could not locate the '{}' package in any node_modules directory at or above {}", .package, .searched_from.display())]
    RuntimeNotFound {
        package: String,
        searched_from: PathBuf,
    },

    // File pattern errors
    #[error("invalid file pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("failed to parse options: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PresetError>;
