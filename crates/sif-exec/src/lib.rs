//! sif-exec: blocking invocation of the external grid conversion and solver
//! executables on a prepared run directory.

pub mod runner;

pub use runner::{Executables, Executor, Invocation, ProcessRunner, SystemRunner};

use std::path::PathBuf;

pub type ExecResult<T> = Result<T, ExecError>;

#[derive(thiserror::Error, Debug)]
pub enum ExecError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {} (see {})", describe_exit(.code), .log.display())]
    Failed {
        program: String,
        code: Option<i32>,
        log: PathBuf,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

/// Log file of the grid conversion step.
pub const ELMERGRID_LOG: &str = "elmergrid.log";
/// Log file of the solver step.
pub const ELMERSOLVER_LOG: &str = "elmersolver.log";
