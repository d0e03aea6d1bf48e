//! Rendering of a simulation into the solver input format and the
//! auxiliary files written next to it.

use std::fs;
use std::path::{Path, PathBuf};

use sif_core::{DataMap, SifError, SifResult, render_value};
use tracing::{debug, info, warn};

use crate::entity::{Entity, Kind};
use crate::kinds::{Body, BodyForce, Boundary, Equation, InitialCondition, Material, Solver};
use crate::simulation::{Header, Simulation};

/// Name of the solver input file.
pub const SIF_FILE: &str = "case.sif";
/// Start file the solver reads to find its input file.
///
/// ElmerSolver expects two lines here: the input file name and the number of
/// partitions (`1`). Neither a section count nor the mesh name belongs in it;
/// the mesh is located through `Mesh DB` in the input file itself.
pub const STARTINFO_FILE: &str = "ELMERSOLVER_STARTINFO";
/// Boundary name to ID table.
pub const BOUNDARY_IDS_FILE: &str = "boundaries.yml";

/// Render the complete solver input text.
///
/// Layout: `Header`, `Simulation`, `Constants`, then one section per entity,
/// kinds in [`Kind::ORDER`] and entities by ascending ID. Every section ends
/// with `End`.
pub fn render_sif(sim: &Simulation) -> SifResult<String> {
    let mut out = String::new();
    render_header(&mut out, sim.header());
    render_section(&mut out, "Simulation", sim.settings())?;
    render_section(&mut out, "Constants", sim.constants())?;

    for kind in Kind::ORDER {
        match kind {
            Kind::Body => render_entities::<Body>(&mut out, sim)?,
            Kind::Material => render_entities::<Material>(&mut out, sim)?,
            Kind::BodyForce => render_entities::<BodyForce>(&mut out, sim)?,
            Kind::InitialCondition => render_entities::<InitialCondition>(&mut out, sim)?,
            Kind::Solver => render_entities::<Solver>(&mut out, sim)?,
            Kind::Equation => render_entities::<Equation>(&mut out, sim)?,
            Kind::Boundary => render_entities::<Boundary>(&mut out, sim)?,
        }
    }
    Ok(out)
}

fn render_header(out: &mut String, header: &Header) {
    out.push_str("Header\n");
    out.push_str(&format!("  CHECK KEYWORDS {}\n", header.check_keywords));
    out.push_str(&format!(
        "  Mesh DB \"{}\" \"{}\"\n",
        header.mesh_db.0, header.mesh_db.1
    ));
    if let Some(path) = &header.include_path {
        out.push_str(&format!("  Include Path \"{path}\"\n"));
    }
    if let Some(dir) = &header.results_directory {
        out.push_str(&format!("  Results Directory \"{dir}\"\n"));
    }
    out.push_str("End\n\n");
}

fn render_section(out: &mut String, title: &str, data: &DataMap) -> SifResult<()> {
    out.push_str(title);
    out.push('\n');
    for (key, value) in data.iter() {
        let text = render_value(key, value)?;
        out.push_str(&format!("  {key} = {text}\n"));
    }
    out.push_str("End\n\n");
    Ok(())
}

fn render_entities<K: Entity>(out: &mut String, sim: &Simulation) -> SifResult<()> {
    for entity in sim.iter::<K>() {
        let data = entity.section_data(sim)?;
        out.push_str(&format!("! {}\n", entity.name()));
        render_section(out, &format!("{} {}", K::KIND, entity.id()), &data)?;
    }
    Ok(())
}

/// Contents of the solver start file: input file name and a `1`.
pub fn render_startinfo() -> String {
    format!("{SIF_FILE}\n1\n")
}

/// Render and write [`SIF_FILE`] into `dir`.
///
/// The text is fully rendered before anything touches the disk, and written
/// through a temporary file that replaces the target on success.
pub fn write_sif(sim: &Simulation, dir: &Path) -> SifResult<PathBuf> {
    let text = render_sif(sim)?;
    let path = dir.join(SIF_FILE);
    write_replacing(&path, &text)?;
    info!(path = %path.display(), bytes = text.len(), "wrote solver input");
    Ok(path)
}

/// Write [`STARTINFO_FILE`] into `dir`.
pub fn write_startinfo(dir: &Path) -> SifResult<PathBuf> {
    let path = dir.join(STARTINFO_FILE);
    write_replacing(&path, &render_startinfo())?;
    info!(path = %path.display(), "wrote start info");
    Ok(path)
}

/// Write [`BOUNDARY_IDS_FILE`] into `dir`: a YAML mapping of every boundary
/// name to its ID, in ID order.
pub fn write_boundary_ids(sim: &Simulation, dir: &Path) -> SifResult<PathBuf> {
    let mut table = serde_yaml::Mapping::new();
    for boundary in sim.iter::<Boundary>() {
        table.insert(
            serde_yaml::Value::String(boundary.name().to_string()),
            serde_yaml::Value::Number(boundary.id().get().into()),
        );
    }
    let text = serde_yaml::to_string(&table)?;

    let path = dir.join(BOUNDARY_IDS_FILE);
    write_replacing(&path, &text)?;
    info!(path = %path.display(), boundaries = table.len(), "wrote boundary ids");
    Ok(path)
}

fn write_replacing(path: &Path, contents: &str) -> SifResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    debug!(path = %tmp.display(), "writing temporary file");
    fs::write(&tmp, contents).map_err(|e| SifError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %cleanup, "failed to remove temporary file");
        }
        return Err(SifError::io(path, e));
    }
    Ok(())
}
