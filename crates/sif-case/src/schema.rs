//! Case file schema definitions.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseDef {
    /// Simulation preset whose settings seed the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderDef>,
    /// Settings applied on top of the preset.
    #[serde(default)]
    pub settings: Mapping,
    #[serde(default)]
    pub constants: Mapping,
    #[serde(default)]
    pub materials: Vec<PresetEntityDef>,
    #[serde(default)]
    pub solvers: Vec<PresetEntityDef>,
    #[serde(default)]
    pub equations: Vec<EquationDef>,
    #[serde(default)]
    pub initial_conditions: Vec<EntityDef>,
    #[serde(default)]
    pub body_forces: Vec<EntityDef>,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
    #[serde(default)]
    pub boundaries: Vec<BoundaryDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeaderDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_db: Option<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_directory: Option<String>,
}

/// An entity defined by raw data only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntityDef {
    pub name: String,
    #[serde(default)]
    pub data: Mapping,
}

/// An entity optionally seeded from a preset; `data` overrides preset keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetEntityDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default)]
    pub data: Mapping,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EquationDef {
    pub name: String,
    /// Solver names, in execution order.
    pub solvers: Vec<String>,
    #[serde(default)]
    pub data: Mapping,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyDef {
    pub name: String,
    /// Mesh physical group tags.
    pub targets: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_force: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_condition: Option<String>,
    #[serde(default)]
    pub data: Mapping,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BoundaryDef {
    pub name: String,
    pub targets: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_heat_flux: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiation: Option<RadiationDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_transfer: Option<HeatTransferDef>,
    #[serde(default)]
    pub zero_potential: bool,
    #[serde(default)]
    pub save_scalars: bool,
    #[serde(default)]
    pub save_line: bool,
    /// Body name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_target_body: Option<String>,
    #[serde(default)]
    pub data: Mapping,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RadiationDef {
    DiffuseGray,
    Idealized { external_temperature: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeatTransferDef {
    pub coefficient: f64,
    pub external_temperature: f64,
}
