//! sif-core: stable foundation for sifkit.
//!
//! Contains:
//! - ids (typed, 1-based entity IDs)
//! - value (tagged configuration values + SIF rendering)
//! - data (insertion-ordered key/value payload of every entity)
//! - error (shared error types)

pub mod data;
pub mod error;
pub mod ids;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use data::DataMap;
pub use error::{SifError, SifResult};
pub use ids::Id;
pub use value::{Value, render_value};
