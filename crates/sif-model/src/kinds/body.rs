use sif_core::{DataMap, SifResult};

use super::target_entry;
use crate::entity::{
    Entity, EntityBase, GeometryId, Handle, Kind, Rebind, SimToken, reference_value,
};
use crate::kinds::{BodyForce, Equation, InitialCondition, Material};
use crate::registry::Registry;
use crate::simulation::Simulation;

/// A set of mesh regions sharing an equation, a material, a body force and
/// an initial condition.
#[derive(Debug, Clone)]
pub struct Body {
    base: EntityBase<Body>,
    pub targets: Vec<GeometryId>,
    pub equation: Option<Handle<Equation>>,
    pub material: Option<Handle<Material>>,
    pub body_force: Option<Handle<BodyForce>>,
    pub initial_condition: Option<Handle<InitialCondition>>,
}

impl Body {
    pub(crate) fn new(base: EntityBase<Body>, targets: Vec<GeometryId>) -> Self {
        Self {
            base,
            targets,
            equation: None,
            material: None,
            body_force: None,
            initial_condition: None,
        }
    }
}

impl Rebind for Body {
    fn rebind(&mut self, from: SimToken, to: SimToken) {
        self.equation = self.equation.map(|h| h.rebind(from, to));
        self.material = self.material.map(|h| h.rebind(from, to));
        self.body_force = self.body_force.map(|h| h.rebind(from, to));
        self.initial_condition = self.initial_condition.map(|h| h.rebind(from, to));
    }
}

impl Entity for Body {
    const KIND: Kind = Kind::Body;

    fn base(&self) -> &EntityBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase<Self> {
        &mut self.base
    }

    fn registry(sim: &Simulation) -> &Registry<Self> {
        &sim.bodies
    }

    fn registry_mut(sim: &mut Simulation) -> &mut Registry<Self> {
        &mut sim.bodies
    }

    fn section_data(&self, sim: &Simulation) -> SifResult<DataMap> {
        let mut data = DataMap::new();
        let (key, tags) = target_entry("Target Bodies", &self.targets)?;
        data.insert(key, tags);

        let owner = self.name();
        if let Some(handle) = self.equation {
            data.insert("Equation", reference_value(sim.resolve(owner, handle)?));
        }
        if let Some(handle) = self.material {
            data.insert("Material", reference_value(sim.resolve(owner, handle)?));
        }
        if let Some(handle) = self.body_force {
            data.insert("Body Force", reference_value(sim.resolve(owner, handle)?));
        }
        if let Some(handle) = self.initial_condition {
            data.insert(
                "Initial Condition",
                reference_value(sim.resolve(owner, handle)?),
            );
        }

        data.merge_missing(self.data());
        Ok(data)
    }
}
