//! Process spawning behind a trait so the run sequence can be tested
//! without the external tools installed.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::{ELMERGRID_LOG, ELMERSOLVER_LOG, ExecError, ExecResult};

/// One external program run: what to start, where, and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub dir: PathBuf,
    /// Receives both stdout and stderr.
    pub log: PathBuf,
}

impl Invocation {
    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Runs an [`Invocation`] to completion and reports its exit code
/// (`None` when terminated by a signal).
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> ExecResult<Option<i32>>;
}

/// Runs programs with [`std::process::Command`], blocking until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> ExecResult<Option<i32>> {
        let io_err = |source| ExecError::Io {
            path: invocation.log.clone(),
            source,
        };
        let stdout = File::create(&invocation.log).map_err(io_err)?;
        let stderr = stdout.try_clone().map_err(io_err)?;

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .map_err(|source| ExecError::Spawn {
                program: invocation.program_name(),
                source,
            })?;
        Ok(status.code())
    }
}

/// Locations of the external executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executables {
    pub elmer_grid: PathBuf,
    pub elmer_solver: PathBuf,
}

impl Default for Executables {
    /// Both programs looked up on `PATH`.
    fn default() -> Self {
        Self {
            elmer_grid: PathBuf::from("ElmerGrid"),
            elmer_solver: PathBuf::from("ElmerSolver"),
        }
    }
}

/// Runs the grid conversion and solver steps in a run directory.
#[derive(Debug, Clone, Default)]
pub struct Executor<R = SystemRunner> {
    executables: Executables,
    runner: R,
}

impl Executor<SystemRunner> {
    pub fn new(executables: Executables) -> Self {
        Self::with_runner(executables, SystemRunner)
    }
}

impl<R: ProcessRunner> Executor<R> {
    pub fn with_runner(executables: Executables, runner: R) -> Self {
        Self {
            executables,
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Convert a gmsh mesh (`mesh_file`, relative to `dir`) into the solver's
    /// mesh database inside `dir`. Returns the log file path.
    pub fn run_elmer_grid(&self, dir: &Path, mesh_file: &str) -> ExecResult<PathBuf> {
        let invocation = Invocation {
            program: self.executables.elmer_grid.clone(),
            args: vec![
                "14".to_string(),
                "2".to_string(),
                mesh_file.to_string(),
                "-autoclean".to_string(),
            ],
            dir: dir.to_path_buf(),
            log: dir.join(ELMERGRID_LOG),
        };
        self.execute(&invocation)
    }

    /// Run the solver in `dir`; it locates its input through the start file.
    /// Returns the log file path.
    pub fn run_elmer_solver(&self, dir: &Path) -> ExecResult<PathBuf> {
        let invocation = Invocation {
            program: self.executables.elmer_solver.clone(),
            args: Vec::new(),
            dir: dir.to_path_buf(),
            log: dir.join(ELMERSOLVER_LOG),
        };
        self.execute(&invocation)
    }

    fn execute(&self, invocation: &Invocation) -> ExecResult<PathBuf> {
        info!(
            program = %invocation.program.display(),
            args = ?invocation.args,
            dir = %invocation.dir.display(),
            "starting external program"
        );
        let code = self.runner.run(invocation)?;
        if code != Some(0) {
            warn!(program = %invocation.program.display(), ?code, "external program failed");
            return Err(ExecError::Failed {
                program: invocation.program_name(),
                code,
                log: invocation.log.clone(),
            });
        }
        info!(log = %invocation.log.display(), "external program finished");
        Ok(invocation.log.clone())
    }
}
