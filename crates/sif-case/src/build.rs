//! Translation of a validated case into a [`Simulation`].

use sif_core::{DataMap, SifResult};
use sif_model::{
    Body, BodyForce, Boundary, Entity, Equation, Handle, HeatTransfer, InitialCondition,
    Material, Radiation, Simulation, Solver,
};
use sif_templates::{Templates, data_from_mapping};
use tracing::info;

use crate::schema::{BoundaryDef, CaseDef, HeaderDef, PresetEntityDef, RadiationDef};
use crate::validate::{ValidationError, validate_case};
use crate::{CaseError, CaseResult};

/// Build the simulation described by `case`, resolving presets in `templates`.
///
/// Entities are registered in file order, so IDs follow the order of the
/// case file within each kind.
pub fn build_simulation(case: &CaseDef, templates: &Templates) -> CaseResult<Simulation> {
    validate_case(case)?;

    let mut sim = match &case.simulation {
        Some(preset) => templates.load_simulation(preset)?,
        None => Simulation::new(),
    };
    sim.settings_mut()
        .merge(&data_from_mapping("settings", &case.settings)?);
    sim.constants_mut()
        .merge(&data_from_mapping("constants", &case.constants)?);
    if let Some(header) = &case.header {
        apply_header(&mut sim, header);
    }

    for def in &case.materials {
        add_preset_entity(
            &mut sim,
            def,
            |sim, data| sim.add_material(&def.name, data),
            |sim| templates.load_material_as(sim, preset_of(def), &def.name),
        )?;
    }
    for def in &case.solvers {
        add_preset_entity(
            &mut sim,
            def,
            |sim, data| sim.add_solver(&def.name, data),
            |sim| templates.load_solver_as(sim, preset_of(def), &def.name),
        )?;
    }
    for def in &case.equations {
        let mut solvers = Vec::with_capacity(def.solvers.len());
        for name in &def.solvers {
            solvers.push(lookup::<Solver>(&sim, name, &def.name)?);
        }
        let data = data_from_mapping(&def.name, &def.data)?;
        sim.add_equation(&def.name, &solvers, data)?;
    }
    for def in &case.initial_conditions {
        let data = data_from_mapping(&def.name, &def.data)?;
        sim.add_initial_condition(&def.name, data)?;
    }
    for def in &case.body_forces {
        let data = data_from_mapping(&def.name, &def.data)?;
        sim.add_body_force(&def.name, data)?;
    }

    for def in &case.bodies {
        let handle = sim.add_body(&def.name, def.targets.iter().copied())?;
        let equation = resolve_opt::<Equation>(&sim, def.equation.as_deref(), &def.name)?;
        let material = resolve_opt::<Material>(&sim, def.material.as_deref(), &def.name)?;
        let body_force = resolve_opt::<BodyForce>(&sim, def.body_force.as_deref(), &def.name)?;
        let initial_condition =
            resolve_opt::<InitialCondition>(&sim, def.initial_condition.as_deref(), &def.name)?;
        let data = data_from_mapping(&def.name, &def.data)?;

        if let Some(body) = sim.get_mut(handle) {
            body.equation = equation;
            body.material = material;
            body.body_force = body_force;
            body.initial_condition = initial_condition;
            *body.data_mut() = data;
        }
    }

    for def in &case.boundaries {
        add_boundary(&mut sim, def)?;
    }

    info!(
        bodies = sim.len::<Body>(),
        boundaries = sim.len::<Boundary>(),
        solvers = sim.len::<Solver>(),
        "built simulation from case"
    );
    Ok(sim)
}

fn apply_header(sim: &mut Simulation, def: &HeaderDef) {
    let header = sim.header_mut();
    if let Some(level) = &def.check_keywords {
        header.check_keywords = level.clone();
    }
    if let Some(mesh_db) = &def.mesh_db {
        header.mesh_db = mesh_db.clone();
    }
    if def.include_path.is_some() {
        header.include_path = def.include_path.clone();
    }
    if def.results_directory.is_some() {
        header.results_directory = def.results_directory.clone();
    }
}

fn preset_of(def: &PresetEntityDef) -> &str {
    def.preset.as_deref().unwrap_or(&def.name)
}

/// Register a material or solver: from its preset when one is named, then
/// with the case data layered on top.
fn add_preset_entity<K: Entity>(
    sim: &mut Simulation,
    def: &PresetEntityDef,
    add: impl FnOnce(&mut Simulation, DataMap) -> SifResult<Handle<K>>,
    load: impl FnOnce(&mut Simulation) -> SifResult<Handle<K>>,
) -> CaseResult<()> {
    let data = data_from_mapping(&def.name, &def.data)?;
    if def.preset.is_none() {
        add(sim, data)?;
        return Ok(());
    }

    let handle = load(sim)?;
    if let Some(entity) = sim.get_mut(handle) {
        entity.data_mut().merge(&data);
    }
    Ok(())
}

fn add_boundary(sim: &mut Simulation, def: &BoundaryDef) -> CaseResult<()> {
    let handle = sim.add_boundary(&def.name, def.targets.iter().copied())?;
    let normal_target_body =
        resolve_opt::<Body>(sim, def.normal_target_body.as_deref(), &def.name)?;
    let data = data_from_mapping(&def.name, &def.data)?;

    if let Some(boundary) = sim.get_mut(handle) {
        boundary.fixed_temperature = def.fixed_temperature;
        boundary.fixed_heat_flux = def.fixed_heat_flux;
        boundary.radiation = def.radiation.map(|r| match r {
            RadiationDef::DiffuseGray => Radiation::DiffuseGray,
            RadiationDef::Idealized {
                external_temperature,
            } => Radiation::Idealized {
                external_temperature,
            },
        });
        boundary.heat_transfer = def.heat_transfer.map(|ht| HeatTransfer {
            coefficient: ht.coefficient,
            external_temperature: ht.external_temperature,
        });
        boundary.zero_potential = def.zero_potential;
        boundary.save_scalars = def.save_scalars;
        boundary.save_line = def.save_line;
        boundary.normal_target_body = normal_target_body;
        *boundary.data_mut() = data;
    }
    Ok(())
}

fn lookup<K: Entity>(
    sim: &Simulation,
    name: &str,
    owner: &str,
) -> CaseResult<Handle<K>> {
    sim.find::<K>(name).ok_or_else(|| {
        CaseError::Validation(ValidationError::MissingReference {
            name: name.to_string(),
            context: format!("{} reference from '{}'", K::KIND, owner),
        })
    })
}

fn resolve_opt<K: Entity>(
    sim: &Simulation,
    name: Option<&str>,
    owner: &str,
) -> CaseResult<Option<Handle<K>>> {
    name.map(|name| lookup::<K>(sim, name, owner)).transpose()
}
