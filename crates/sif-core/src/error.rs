use std::path::PathBuf;
use thiserror::Error;

pub type SifResult<T> = Result<T, SifError>;

#[derive(Error, Debug)]
pub enum SifError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("Duplicate {kind} name: '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Too many {kind} entities")]
    TooMany { kind: &'static str },

    #[error("Unknown {kind} preset: '{name}'")]
    UnknownPreset { kind: &'static str, name: String },

    #[error("{kind} reference from '{owner}' belongs to another simulation")]
    ForeignReference { kind: &'static str, owner: String },

    #[error("{kind} reference from '{owner}' points to unregistered id {id}")]
    DanglingReference {
        kind: &'static str,
        owner: String,
        id: u32,
    },

    #[error("Unsupported value for key '{key}': {found}")]
    UnsupportedValue { key: String, found: String },

    #[error("Non-finite numeric value for key '{key}': {value}")]
    NonFinite { key: String, value: f64 },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SifError {
    /// Attach a path to an I/O failure.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SifError::Io {
            path: path.into(),
            source,
        }
    }
}
