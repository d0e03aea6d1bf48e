//! sif-model: simulation entities and solver input serialization.
//!
//! Provides:
//! - The simulation context owning every entity, grouped by kind
//! - Entity kinds (bodies, materials, solvers, equations, ...) linked by handles
//! - Rendering of the whole graph into the solver input format
//!
//! # Example
//!
//! ```
//! use sif_model::{DataMap, Simulation};
//!
//! let mut sim = Simulation::new();
//! let water = sim
//!     .add_material("water", DataMap::new().with("Density", 1000.0))
//!     .unwrap();
//! let body = sim.add_body("pool", [1]).unwrap();
//! sim.get_mut(body).unwrap().material = Some(water);
//!
//! let text = sif_model::render_sif(&sim).unwrap();
//! assert!(text.contains("  Material = 1  ! water\n"));
//! ```

pub mod entity;
pub mod kinds;
pub mod registry;
pub mod simulation;
pub mod writer;

// Re-exports for ergonomics
pub use entity::{Entity, EntityBase, GeometryId, Handle, Kind};
pub use kinds::{
    Body, BodyForce, Boundary, Equation, HeatTransfer, InitialCondition, Material, Radiation,
    Solver,
};
pub use registry::Registry;
pub use sif_core::{DataMap, Id, SifError, SifResult, Value};
pub use simulation::{Header, Simulation};
pub use writer::{
    BOUNDARY_IDS_FILE, SIF_FILE, STARTINFO_FILE, render_sif, render_startinfo, write_boundary_ids,
    write_sif, write_startinfo,
};
