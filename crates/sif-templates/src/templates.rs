//! Preset tables and the loader operations built on them.

use core::fmt;
use std::path::Path;

use indexmap::IndexMap;
use sif_core::{DataMap, SifError, SifResult};
use sif_model::{Handle, Material, Simulation, Solver};
use tracing::debug;

use crate::convert::data_from_yaml;

const BUNDLED_SIMULATIONS: &str = include_str!("../data/simulations.yml");
const BUNDLED_MATERIALS: &str = include_str!("../data/materials.yml");
const BUNDLED_SOLVERS: &str = include_str!("../data/solvers.yml");

/// Which preset table to look in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetKind {
    Simulation,
    Material,
    Solver,
}

impl PresetKind {
    pub const ALL: [PresetKind; 3] = [
        PresetKind::Simulation,
        PresetKind::Material,
        PresetKind::Solver,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PresetKind::Simulation => "simulation",
            PresetKind::Material => "material",
            PresetKind::Solver => "solver",
        }
    }

    /// File holding this table inside a template directory.
    pub fn file_name(self) -> &'static str {
        match self {
            PresetKind::Simulation => "simulations.yml",
            PresetKind::Material => "materials.yml",
            PresetKind::Solver => "solvers.yml",
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Table = IndexMap<String, DataMap>;

/// Immutable preset tables, one per [`PresetKind`], in file order.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    simulations: Table,
    materials: Table,
    solvers: Table,
}

impl Templates {
    /// The presets shipped with this crate.
    pub fn bundled() -> SifResult<Self> {
        Self::from_yaml(BUNDLED_SIMULATIONS, BUNDLED_MATERIALS, BUNDLED_SOLVERS)
    }

    /// Read `simulations.yml`, `materials.yml` and `solvers.yml` from `dir`.
    pub fn from_dir(dir: &Path) -> SifResult<Self> {
        let read = |kind: PresetKind| {
            let path = dir.join(kind.file_name());
            std::fs::read_to_string(&path).map_err(|e| SifError::io(path, e))
        };
        let templates = Self::from_yaml(
            &read(PresetKind::Simulation)?,
            &read(PresetKind::Material)?,
            &read(PresetKind::Solver)?,
        )?;
        debug!(dir = %dir.display(), "loaded templates from directory");
        Ok(templates)
    }

    /// Parse the three tables from YAML text.
    pub fn from_yaml(simulations: &str, materials: &str, solvers: &str) -> SifResult<Self> {
        let templates = Self {
            simulations: parse_table(simulations)?,
            materials: parse_table(materials)?,
            solvers: parse_table(solvers)?,
        };
        debug!(
            simulations = templates.simulations.len(),
            materials = templates.materials.len(),
            solvers = templates.solvers.len(),
            "parsed templates"
        );
        Ok(templates)
    }

    fn table(&self, kind: PresetKind) -> &Table {
        match kind {
            PresetKind::Simulation => &self.simulations,
            PresetKind::Material => &self.materials,
            PresetKind::Solver => &self.solvers,
        }
    }

    /// Preset names of one kind, in file order.
    pub fn names(&self, kind: PresetKind) -> impl Iterator<Item = &str> {
        self.table(kind).keys().map(String::as_str)
    }

    /// Data of a preset; unknown names are an error.
    pub fn get(&self, kind: PresetKind, name: &str) -> SifResult<&DataMap> {
        self.table(kind)
            .get(name)
            .ok_or_else(|| SifError::UnknownPreset {
                kind: kind.name(),
                name: name.to_string(),
            })
    }

    /// A new simulation whose settings are the named preset.
    pub fn load_simulation(&self, name: &str) -> SifResult<Simulation> {
        let mut sim = Simulation::new();
        self.apply_simulation(&mut sim, name)?;
        Ok(sim)
    }

    /// Merge the named preset into the settings of `sim`, overwriting
    /// keys present in both.
    pub fn apply_simulation(&self, sim: &mut Simulation, name: &str) -> SifResult<()> {
        let settings = self.get(PresetKind::Simulation, name)?;
        sim.settings_mut().merge(settings);
        debug!(preset = name, "applied simulation preset");
        Ok(())
    }

    /// Register a material named after the preset, seeded with its data.
    pub fn load_material(&self, sim: &mut Simulation, name: &str) -> SifResult<Handle<Material>> {
        self.load_material_as(sim, name, name)
    }

    /// Register a material called `entity_name`, seeded with the `preset` data.
    pub fn load_material_as(
        &self,
        sim: &mut Simulation,
        preset: &str,
        entity_name: &str,
    ) -> SifResult<Handle<Material>> {
        let data = self.get(PresetKind::Material, preset)?.clone();
        sim.add_material(entity_name, data)
    }

    /// Register a solver named after the preset, seeded with its data.
    pub fn load_solver(&self, sim: &mut Simulation, name: &str) -> SifResult<Handle<Solver>> {
        self.load_solver_as(sim, name, name)
    }

    /// Register a solver called `entity_name`, seeded with the `preset` data.
    pub fn load_solver_as(
        &self,
        sim: &mut Simulation,
        preset: &str,
        entity_name: &str,
    ) -> SifResult<Handle<Solver>> {
        let data = self.get(PresetKind::Solver, preset)?.clone();
        sim.add_solver(entity_name, data)
    }
}

fn parse_table(text: &str) -> SifResult<Table> {
    let root: serde_yaml::Value = serde_yaml::from_str(text)?;
    let mapping = match root {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(Table::new()),
        _ => {
            return Err(SifError::UnsupportedValue {
                key: "<root>".to_string(),
                found: "expected a mapping of preset names".to_string(),
            });
        }
    };

    let mut table = Table::new();
    for (name, data) in &mapping {
        let name = name.as_str().ok_or_else(|| SifError::UnsupportedValue {
            key: "<root>".to_string(),
            found: format!("non-string preset name {name:?}"),
        })?;
        table.insert(name.to_string(), data_from_yaml(name, data)?);
    }
    Ok(table)
}
