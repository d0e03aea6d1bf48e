//! Entity kinds.

mod body;
mod boundary;
mod equation;

pub use body::Body;
pub use boundary::{Boundary, HeatTransfer, Radiation};
pub use equation::Equation;

use sif_core::{SifError, SifResult};

use crate::entity::{Entity, EntityBase, GeometryId, Kind, Rebind};
use crate::registry::Registry;
use crate::simulation::Simulation;

/// Kinds whose section is exactly their raw data map.
macro_rules! data_entity {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: EntityBase<$name>,
        }

        impl $name {
            pub(crate) fn new(base: EntityBase<$name>) -> Self {
                Self { base }
            }
        }

        impl Rebind for $name {}

        impl Entity for $name {
            const KIND: Kind = $kind;

            fn base(&self) -> &EntityBase<Self> {
                &self.base
            }

            fn base_mut(&mut self) -> &mut EntityBase<Self> {
                &mut self.base
            }

            fn registry(sim: &Simulation) -> &Registry<Self> {
                &sim.$field
            }

            fn registry_mut(sim: &mut Simulation) -> &mut Registry<Self> {
                &mut sim.$field
            }
        }
    };
}

data_entity!(
    /// Physical properties assigned to bodies.
    Material,
    Kind::Material,
    materials
);
data_entity!(
    /// Volume sources (heating, forces) assigned to bodies.
    BodyForce,
    Kind::BodyForce,
    body_forces
);
data_entity!(
    /// Start values of field variables assigned to bodies.
    InitialCondition,
    Kind::InitialCondition,
    initial_conditions
);
data_entity!(
    /// Configuration of one solver procedure, activated through equations.
    Solver,
    Kind::Solver,
    solvers
);

/// `"<count>"` suffix and space-joined tags of a target aggregate key.
/// An entity without targets has nothing to apply to and is rejected.
pub(crate) fn target_entry(prefix: &str, targets: &[GeometryId]) -> SifResult<(String, String)> {
    if targets.is_empty() {
        return Err(SifError::UnsupportedValue {
            key: prefix.to_string(),
            found: "empty target list".to_string(),
        });
    }
    let key = format!("{prefix}({})", targets.len());
    let tags = targets
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Ok((key, tags))
}
