use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a bridge description.
#[derive(Debug, Error)]
pub enum ModelError {
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	/// The description parsed but does not describe a buildable bridge.
	#[error("inconsistent bridge description: {0}")]
	Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
