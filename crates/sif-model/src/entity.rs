//! Named entity base shared by every kind.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

use sif_core::{DataMap, Id, SifResult, Value};

use crate::registry::Registry;
use crate::simulation::Simulation;

/// Entity kinds, one per section family of the solver input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Body,
    Material,
    BodyForce,
    InitialCondition,
    Solver,
    Equation,
    Boundary,
}

impl Kind {
    /// Order in which sections are written.
    pub const ORDER: [Kind; 7] = [
        Kind::Body,
        Kind::Material,
        Kind::BodyForce,
        Kind::InitialCondition,
        Kind::Solver,
        Kind::Equation,
        Kind::Boundary,
    ];

    /// Section header keyword, also used as the reference key in bodies.
    pub fn section_name(self) -> &'static str {
        match self {
            Kind::Body => "Body",
            Kind::Material => "Material",
            Kind::BodyForce => "Body Force",
            Kind::InitialCondition => "Initial Condition",
            Kind::Solver => "Solver",
            Kind::Equation => "Equation",
            Kind::Boundary => "Boundary",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

/// Opaque mesh region identifier produced by the mesher (physical group tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u32);

impl From<u32> for GeometryId {
    fn from(tag: u32) -> Self {
        GeometryId(tag)
    }
}

impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-unique identity of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SimToken(u32);

impl SimToken {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        SimToken(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Non-owning reference to an entity registered in a particular simulation.
///
/// The numeric ID is only read when the owning simulation is rendered.
pub struct Handle<K> {
    pub(crate) sim: SimToken,
    pub(crate) id: Id<K>,
}

impl<K> Handle<K> {
    pub fn id(self) -> Id<K> {
        self.id
    }

    /// Move a handle into a copy of its simulation. Handles into any other
    /// simulation are returned unchanged.
    pub(crate) fn rebind(self, from: SimToken, to: SimToken) -> Self {
        if self.sim == from {
            Handle { sim: to, id: self.id }
        } else {
            self
        }
    }
}

impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.sim == other.sim && self.id == other.id
    }
}

impl<K> Eq for Handle<K> {}

impl<K> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sim.hash(state);
        self.id.hash(state);
    }
}

impl<K> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:?}, {})", self.sim, self.id)
    }
}

/// Fields every entity carries: its ID, its name and its raw data.
#[derive(Debug, Clone)]
pub struct EntityBase<K> {
    pub(crate) id: Id<K>,
    pub(crate) name: String,
    pub data: DataMap,
}

impl<K> EntityBase<K> {
    pub(crate) fn new(id: Id<K>, name: String, data: DataMap) -> Self {
        Self { id, name, data }
    }
}

/// Common behaviour of all entity kinds.
pub trait Entity: Sized {
    const KIND: Kind;

    fn base(&self) -> &EntityBase<Self>;
    fn base_mut(&mut self) -> &mut EntityBase<Self>;

    /// The per-kind collection of `sim` this kind lives in.
    fn registry(sim: &Simulation) -> &Registry<Self>;
    fn registry_mut(sim: &mut Simulation) -> &mut Registry<Self>;

    /// Entries written into this entity's section: resolved references
    /// first, then the raw data map.
    fn section_data(&self, _sim: &Simulation) -> SifResult<DataMap> {
        Ok(self.base().data.clone())
    }

    fn id(&self) -> Id<Self> {
        self.base().id
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    fn data(&self) -> &DataMap {
        &self.base().data
    }

    fn data_mut(&mut self) -> &mut DataMap {
        &mut self.base_mut().data
    }
}

/// Re-targets the handles an entity holds when its simulation is cloned.
pub(crate) trait Rebind {
    fn rebind(&mut self, _from: SimToken, _to: SimToken) {}
}

/// `"<id>  ! <name>"`: a reference annotated with the target's name.
pub(crate) fn reference_value<K: Entity>(target: &K) -> Value {
    Value::Str(format!("{}  ! {}", target.id(), target.name()))
}
