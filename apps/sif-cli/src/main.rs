use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use sif_case::CaseError;
use sif_core::SifError;
use sif_exec::{ExecError, Executables, Executor};
use sif_model::{Body, Boundary, Equation, Material, Solver};
use sif_templates::{PresetKind, Templates};

#[derive(Parser)]
#[command(name = "sif-cli")]
#[command(about = "sifkit CLI - solver input generation for finite-element runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Write solver input, start file and boundary table for a case
    Write {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Run directory to write into (created if missing)
        dir: PathBuf,
        /// Directory with simulations.yml, materials.yml and solvers.yml
        #[arg(long)]
        templates: Option<PathBuf>,
    },
    /// List available presets
    Presets {
        /// Only list presets of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        templates: Option<PathBuf>,
    },
    /// Print the data of one preset as YAML
    ShowPreset {
        #[arg(value_enum)]
        kind: KindArg,
        name: String,
        #[arg(long)]
        templates: Option<PathBuf>,
    },
    /// Convert the mesh and run the solver in a prepared run directory
    Run {
        /// Run directory containing the solver input
        dir: PathBuf,
        /// Mesh file inside the run directory
        #[arg(long, default_value = "case.msh2")]
        mesh: String,
        /// Grid conversion executable
        #[arg(long, default_value = "ElmerGrid")]
        elmer_grid: PathBuf,
        /// Solver executable
        #[arg(long, default_value = "ElmerSolver")]
        elmer_solver: PathBuf,
        /// Skip grid conversion (mesh database already present)
        #[arg(long)]
        skip_grid: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Simulation,
    Material,
    Solver,
}

impl From<KindArg> for PresetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Simulation => PresetKind::Simulation,
            KindArg::Material => PresetKind::Material,
            KindArg::Solver => PresetKind::Solver,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Case(#[from] CaseError),

    #[error(transparent)]
    Model(#[from] SifError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to create run directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Write {
            case_path,
            dir,
            templates,
        } => cmd_write(&case_path, &dir, templates.as_deref()),
        Commands::Presets { kind, templates } => cmd_presets(kind, templates.as_deref()),
        Commands::ShowPreset {
            kind,
            name,
            templates,
        } => cmd_show_preset(kind, &name, templates.as_deref()),
        Commands::Run {
            dir,
            mesh,
            elmer_grid,
            elmer_solver,
            skip_grid,
        } => cmd_run(
            &dir,
            &mesh,
            Executables {
                elmer_grid,
                elmer_solver,
            },
            skip_grid,
        ),
    }
}

fn load_templates(dir: Option<&Path>) -> CliResult<Templates> {
    let templates = match dir {
        Some(dir) => Templates::from_dir(dir)?,
        None => Templates::bundled()?,
    };
    Ok(templates)
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = sif_case::load(case_path)?;
    println!("✓ Case is valid");
    println!(
        "  {} bodies, {} boundaries, {} materials, {} solvers, {} equations",
        case.bodies.len(),
        case.boundaries.len(),
        case.materials.len(),
        case.solvers.len(),
        case.equations.len()
    );
    Ok(())
}

fn cmd_write(case_path: &Path, dir: &Path, templates: Option<&Path>) -> CliResult<()> {
    let templates = load_templates(templates)?;
    let case = sif_case::load(case_path)?;
    let sim = sif_case::build_simulation(&case, &templates)?;

    std::fs::create_dir_all(dir).map_err(|source| CliError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let sif = sim.write_sif(dir)?;
    let startinfo = sim.write_startinfo(dir)?;
    let boundary_ids = sim.write_boundary_ids(dir)?;

    println!("✓ Wrote {}", sif.display());
    println!("  {}", startinfo.display());
    println!("  {}", boundary_ids.display());
    println!(
        "  Bodies: {}, Boundaries: {}, Materials: {}, Solvers: {}, Equations: {}",
        sim.len::<Body>(),
        sim.len::<Boundary>(),
        sim.len::<Material>(),
        sim.len::<Solver>(),
        sim.len::<Equation>()
    );
    Ok(())
}

fn cmd_presets(kind: Option<KindArg>, templates: Option<&Path>) -> CliResult<()> {
    let templates = load_templates(templates)?;
    let kinds: Vec<PresetKind> = match kind {
        Some(kind) => vec![kind.into()],
        None => PresetKind::ALL.to_vec(),
    };

    for kind in kinds {
        println!("{} presets:", kind);
        let mut any = false;
        for name in templates.names(kind) {
            println!("  {}", name);
            any = true;
        }
        if !any {
            println!("  (none)");
        }
    }
    Ok(())
}

fn cmd_show_preset(kind: KindArg, name: &str, templates: Option<&Path>) -> CliResult<()> {
    let templates = load_templates(templates)?;
    let data = templates.get(kind.into(), name)?;
    print!("{}", serde_yaml::to_string(data)?);
    Ok(())
}

fn cmd_run(dir: &Path, mesh: &str, executables: Executables, skip_grid: bool) -> CliResult<()> {
    let executor = Executor::new(executables);

    if skip_grid {
        println!("Skipping grid conversion");
    } else {
        println!("Converting mesh: {}", mesh);
        let log = executor.run_elmer_grid(dir, mesh)?;
        println!("✓ Grid conversion finished (log: {})", log.display());
    }

    println!("Running solver in: {}", dir.display());
    let log = executor.run_elmer_solver(dir)?;
    println!("✓ Solver finished (log: {})", log.display());
    Ok(())
}
