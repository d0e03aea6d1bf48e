//! The simulation context: owner of every entity.

use std::path::{Path, PathBuf};

use sif_core::{DataMap, SifResult};

use crate::entity::{Entity, GeometryId, Handle, SimToken};
use crate::kinds::{
    Body, BodyForce, Boundary, Equation, InitialCondition, Material, Solver,
};
use crate::registry::Registry;
use crate::writer;

/// Stefan-Boltzmann constant in W/(m^2 K^4).
pub const STEFAN_BOLTZMANN: f64 = 5.6704e-8;

/// Contents of the `Header` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Reaction to unknown keywords: `Ignore`, `Warn`, `Abort` or `Silent`.
    pub check_keywords: String,
    /// Mesh database directory and mesh name, relative to the run directory.
    pub mesh_db: (String, String),
    pub include_path: Option<String>,
    pub results_directory: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            check_keywords: "Warn".to_string(),
            mesh_db: (".".to_string(), ".".to_string()),
            include_path: None,
            results_directory: None,
        }
    }
}

/// Root context: solver settings, constants and all entities by kind.
///
/// Entities are created through the `add_*` methods, linked to each other by
/// [`Handle`]s, and rendered in one go by [`Simulation::write_sif`].
///
/// A clone is a separate simulation: handles issued by the original do not
/// resolve in the clone, while references held inside the cloned entities
/// are moved over to it.
#[derive(Debug)]
pub struct Simulation {
    token: SimToken,
    header: Header,
    settings: DataMap,
    constants: DataMap,
    pub(crate) bodies: Registry<Body>,
    pub(crate) materials: Registry<Material>,
    pub(crate) body_forces: Registry<BodyForce>,
    pub(crate) initial_conditions: Registry<InitialCondition>,
    pub(crate) solvers: Registry<Solver>,
    pub(crate) equations: Registry<Equation>,
    pub(crate) boundaries: Registry<Boundary>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Simulation {
    fn clone(&self) -> Self {
        let token = SimToken::next();
        Self {
            token,
            header: self.header.clone(),
            settings: self.settings.clone(),
            constants: self.constants.clone(),
            bodies: self.bodies.duplicate(token),
            materials: self.materials.duplicate(token),
            body_forces: self.body_forces.duplicate(token),
            initial_conditions: self.initial_conditions.duplicate(token),
            solvers: self.solvers.duplicate(token),
            equations: self.equations.duplicate(token),
            boundaries: self.boundaries.duplicate(token),
        }
    }
}

impl Simulation {
    pub fn new() -> Self {
        let token = SimToken::next();
        Self {
            token,
            header: Header::default(),
            settings: DataMap::new(),
            constants: DataMap::new().with("Stefan Boltzmann", STEFAN_BOLTZMANN),
            bodies: Registry::new(token),
            materials: Registry::new(token),
            body_forces: Registry::new(token),
            initial_conditions: Registry::new(token),
            solvers: Registry::new(token),
            equations: Registry::new(token),
            boundaries: Registry::new(token),
        }
    }

    /// A simulation starting from the given solver settings.
    pub fn with_settings(settings: DataMap) -> Self {
        let mut sim = Self::new();
        sim.settings = settings;
        sim
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Entries of the `Simulation` section.
    pub fn settings(&self) -> &DataMap {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut DataMap {
        &mut self.settings
    }

    /// Entries of the `Constants` section.
    pub fn constants(&self) -> &DataMap {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut DataMap {
        &mut self.constants
    }

    /// Register a body covering the mesh regions tagged `targets`.
    pub fn add_body<I>(&mut self, name: impl Into<String>, targets: I) -> SifResult<Handle<Body>>
    where
        I: IntoIterator<Item = u32>,
    {
        let targets: Vec<GeometryId> = targets.into_iter().map(GeometryId).collect();
        self.bodies
            .insert(name, DataMap::new(), |base| Body::new(base, targets))
    }

    /// Register a boundary covering the mesh boundary regions tagged `targets`.
    pub fn add_boundary<I>(
        &mut self,
        name: impl Into<String>,
        targets: I,
    ) -> SifResult<Handle<Boundary>>
    where
        I: IntoIterator<Item = u32>,
    {
        let targets: Vec<GeometryId> = targets.into_iter().map(GeometryId).collect();
        self.boundaries
            .insert(name, DataMap::new(), |base| Boundary::new(base, targets))
    }

    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        data: DataMap,
    ) -> SifResult<Handle<Material>> {
        self.materials.insert(name, data, Material::new)
    }

    pub fn add_body_force(
        &mut self,
        name: impl Into<String>,
        data: DataMap,
    ) -> SifResult<Handle<BodyForce>> {
        self.body_forces.insert(name, data, BodyForce::new)
    }

    pub fn add_initial_condition(
        &mut self,
        name: impl Into<String>,
        data: DataMap,
    ) -> SifResult<Handle<InitialCondition>> {
        self.initial_conditions
            .insert(name, data, InitialCondition::new)
    }

    pub fn add_solver(&mut self, name: impl Into<String>, data: DataMap) -> SifResult<Handle<Solver>> {
        self.solvers.insert(name, data, Solver::new)
    }

    /// Register an equation activating `solvers` in the given order.
    pub fn add_equation(
        &mut self,
        name: impl Into<String>,
        solvers: &[Handle<Solver>],
        data: DataMap,
    ) -> SifResult<Handle<Equation>> {
        let solvers = solvers.to_vec();
        self.equations
            .insert(name, data, |base| Equation::new(base, solvers))
    }

    /// Whether `handle` was issued by this simulation.
    pub fn owns<K: Entity>(&self, handle: Handle<K>) -> bool {
        handle.sim == self.token
    }

    /// Entity behind `handle`; `None` if it was issued by another simulation.
    pub fn get<K: Entity>(&self, handle: Handle<K>) -> Option<&K> {
        K::registry(self).get(handle)
    }

    pub fn get_mut<K: Entity>(&mut self, handle: Handle<K>) -> Option<&mut K> {
        K::registry_mut(self).get_mut(handle)
    }

    pub fn find<K: Entity>(&self, name: &str) -> Option<Handle<K>> {
        K::registry(self).find(name)
    }

    /// All entities of kind `K`, in ID order.
    pub fn iter<K: Entity>(&self) -> std::slice::Iter<'_, K> {
        K::registry(self).iter()
    }

    pub fn registry<K: Entity>(&self) -> &Registry<K> {
        K::registry(self)
    }

    pub fn len<K: Entity>(&self) -> usize {
        K::registry(self).len()
    }

    pub(crate) fn resolve<K: Entity>(&self, owner: &str, handle: Handle<K>) -> SifResult<&K> {
        K::registry(self).resolve(owner, handle)
    }

    /// Write the solver input file into `dir`, returning its path.
    pub fn write_sif(&self, dir: &Path) -> SifResult<PathBuf> {
        writer::write_sif(self, dir)
    }

    /// Write the solver start file into `dir`, returning its path.
    pub fn write_startinfo(&self, dir: &Path) -> SifResult<PathBuf> {
        writer::write_startinfo(dir)
    }

    /// Write the boundary name to ID table into `dir`, returning its path.
    pub fn write_boundary_ids(&self, dir: &Path) -> SifResult<PathBuf> {
        writer::write_boundary_ids(self, dir)
    }
}
