use sif_core::{DataMap, SifError, SifResult, Value};

use super::target_entry;
use crate::entity::{Entity, EntityBase, GeometryId, Handle, Kind, Rebind, SimToken};
use crate::kinds::Body;
use crate::registry::Registry;
use crate::simulation::Simulation;

/// Thermal radiation model of a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radiation {
    /// Gray surface radiating towards other diffuse gray surfaces.
    DiffuseGray,
    /// Radiation to an ambient at a fixed temperature.
    Idealized { external_temperature: f64 },
}

/// Convective exchange with an ambient.
///
/// The solver has a single `External Temperature` per boundary; combined with
/// [`Radiation::Idealized`] both must name the same ambient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatTransfer {
    pub coefficient: f64,
    pub external_temperature: f64,
}

/// A set of mesh boundary regions sharing boundary conditions.
///
/// The typed fields cover the common thermal and electromagnetic
/// conditions; anything else goes into the raw data map.
#[derive(Debug, Clone)]
pub struct Boundary {
    base: EntityBase<Boundary>,
    pub targets: Vec<GeometryId>,
    pub fixed_temperature: Option<f64>,
    pub fixed_heat_flux: Option<f64>,
    pub radiation: Option<Radiation>,
    pub heat_transfer: Option<HeatTransfer>,
    pub zero_potential: bool,
    pub save_scalars: bool,
    pub save_line: bool,
    /// Body on whose side the boundary normal points.
    pub normal_target_body: Option<Handle<Body>>,
}

impl Boundary {
    pub(crate) fn new(base: EntityBase<Boundary>, targets: Vec<GeometryId>) -> Self {
        Self {
            base,
            targets,
            fixed_temperature: None,
            fixed_heat_flux: None,
            radiation: None,
            heat_transfer: None,
            zero_potential: false,
            save_scalars: false,
            save_line: false,
            normal_target_body: None,
        }
    }
}

impl Rebind for Boundary {
    fn rebind(&mut self, from: SimToken, to: SimToken) {
        self.normal_target_body = self.normal_target_body.map(|h| h.rebind(from, to));
    }
}

impl Entity for Boundary {
    const KIND: Kind = Kind::Boundary;

    fn base(&self) -> &EntityBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase<Self> {
        &mut self.base
    }

    fn registry(sim: &Simulation) -> &Registry<Self> {
        &sim.boundaries
    }

    fn registry_mut(sim: &mut Simulation) -> &mut Registry<Self> {
        &mut sim.boundaries
    }

    fn section_data(&self, sim: &Simulation) -> SifResult<DataMap> {
        let mut data = DataMap::new();
        let (key, tags) = target_entry("Target Boundaries", &self.targets)?;
        data.insert(key, tags);

        match self.radiation {
            Some(Radiation::DiffuseGray) => {
                data.insert("Radiation", "Diffuse Gray");
            }
            Some(Radiation::Idealized {
                external_temperature,
            }) => {
                data.insert("Radiation", "Idealized");
                data.insert("External Temperature", external_temperature);
            }
            None => {}
        }
        if let Some(t) = self.fixed_temperature {
            data.insert("Temperature", t);
        }
        if let Some(q) = self.fixed_heat_flux {
            data.insert("Heat Flux BC", true);
            data.insert("Heat Flux", q);
        }
        if self.zero_potential {
            data.insert("Potential Re", 0);
            data.insert("Potential Im", 0);
        }
        if self.save_scalars {
            data.insert("Save Scalars", true);
        }
        if self.save_line {
            data.insert("Save Line", true);
        }
        if let Some(ht) = self.heat_transfer {
            data.insert("Heat Transfer Coefficient", ht.coefficient);
            shared_external_temperature(&mut data, ht.external_temperature)?;
        }
        if let Some(handle) = self.normal_target_body {
            let body = sim.resolve(self.name(), handle)?;
            data.insert("Normal Target Body", Value::Int(body.id().get().into()));
        }

        data.merge_missing(self.data());
        Ok(data)
    }
}

/// Radiation and convection share one ambient temperature key.
fn shared_external_temperature(data: &mut DataMap, value: f64) -> SifResult<()> {
    const KEY: &str = "External Temperature";
    match data.get(KEY).and_then(|v| v.as_f64()) {
        Some(existing) if existing != value => Err(SifError::UnsupportedValue {
            key: KEY.to_string(),
            found: format!(
                "radiation ambient {existing:?} differs from convection ambient {value:?}"
            ),
        }),
        _ => {
            data.insert(KEY, value);
            Ok(())
        }
    }
}
