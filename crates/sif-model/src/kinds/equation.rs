use sif_core::{DataMap, SifError, SifResult};

use crate::entity::{Entity, EntityBase, Handle, Kind, Rebind, SimToken};
use crate::kinds::Solver;
use crate::registry::Registry;
use crate::simulation::Simulation;

/// A set of solvers run, in list order, on the bodies using this equation.
#[derive(Debug, Clone)]
pub struct Equation {
    base: EntityBase<Equation>,
    pub solvers: Vec<Handle<Solver>>,
}

impl Equation {
    pub(crate) fn new(base: EntityBase<Equation>, solvers: Vec<Handle<Solver>>) -> Self {
        Self { base, solvers }
    }

    pub fn push_solver(&mut self, solver: Handle<Solver>) {
        self.solvers.push(solver);
    }
}

impl Rebind for Equation {
    fn rebind(&mut self, from: SimToken, to: SimToken) {
        for solver in &mut self.solvers {
            *solver = solver.rebind(from, to);
        }
    }
}

impl Entity for Equation {
    const KIND: Kind = Kind::Equation;

    fn base(&self) -> &EntityBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase<Self> {
        &mut self.base
    }

    fn registry(sim: &Simulation) -> &Registry<Self> {
        &sim.equations
    }

    fn registry_mut(sim: &mut Simulation) -> &mut Registry<Self> {
        &mut sim.equations
    }

    fn section_data(&self, sim: &Simulation) -> SifResult<DataMap> {
        if self.solvers.is_empty() {
            return Err(SifError::UnsupportedValue {
                key: "Active Solvers".to_string(),
                found: format!("equation '{}' has no solvers", self.name()),
            });
        }
        let mut ids = Vec::with_capacity(self.solvers.len());
        for &handle in &self.solvers {
            ids.push(sim.resolve(self.name(), handle)?.id().to_string());
        }

        let mut data = DataMap::new();
        data.insert(format!("Active Solvers({})", ids.len()), ids.join(" "));
        data.merge_missing(self.data());
        Ok(data)
    }
}
