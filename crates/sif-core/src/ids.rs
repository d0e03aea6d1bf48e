use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::num::NonZeroU32;

/// Compact, per-kind entity identifier.
///
/// - IDs are 1-based, which is what the solver input expects
/// - `NonZero` enables `Option<Id<K>>` to be pointer-optimized
/// - `K` is a marker for the entity kind, so a material ID cannot be used
///   where a body ID is expected
pub struct Id<K> {
    raw: NonZeroU32,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Id<K> {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        let raw = NonZeroU32::MIN.saturating_add(index);
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// Create an Id from its 1-based number.
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(|raw| Self {
            raw,
            _kind: PhantomData,
        })
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.raw.get() - 1
    }

    /// The 1-based number written into the solver input.
    pub fn get(self) -> u32 {
        self.raw.get()
    }
}

// Manual impls: derives would put bounds on `K`.
impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Id<K> {}

impl<K> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.get())
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
