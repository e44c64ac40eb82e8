// Error kinds for key lookup and bindings files
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeycodeError {
    #[error("Unknown key name: '{0}'")]
    UnknownKeyName(String),
    #[error("Empty key name")]
    EmptyKeyName,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read bindings file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse TOML bindings from '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Errors found during key resolution:\n- {}", .0.join("\n- "))]
    Resolution(Vec<String>),
    #[error("Bindings validation error: {0}")]
    Validation(String),
}
