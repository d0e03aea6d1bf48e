//! sif-templates: named presets for simulations, materials and solvers.
//!
//! Presets are read once into an immutable [`Templates`] table which is then
//! passed explicitly to whatever needs preset lookup.

pub mod convert;
pub mod templates;

pub use convert::{data_from_mapping, data_from_yaml, value_from_yaml};
pub use templates::{PresetKind, Templates};
