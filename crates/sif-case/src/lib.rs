//! sif-case: declarative case files and their translation into a simulation.

pub mod build;
pub mod schema;
pub mod validate;

pub use build::build_simulation;
pub use schema::*;
pub use validate::{ValidationError, validate_case};

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model error: {0}")]
    Model(#[from] sif_core::SifError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn read(path: &std::path::Path) -> CaseResult<String> {
    std::fs::read_to_string(path).map_err(|source| CaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_yaml(path: &std::path::Path) -> CaseResult<CaseDef> {
    let content = read(path)?;
    let case: CaseDef = serde_yaml::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn load_json(path: &std::path::Path) -> CaseResult<CaseDef> {
    let content = read(path)?;
    let case: CaseDef = serde_json::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

/// Load a case, choosing the format from the file extension (`.json` or YAML).
pub fn load(path: &std::path::Path) -> CaseResult<CaseDef> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
