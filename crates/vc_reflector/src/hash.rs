//! Provide hash containers keyed with a fixed `foldhash` seed.
//!
//! Registry indices are rebuilt on every registration, never iterated in
//! user-visible order, so a fast deterministic hasher is enough.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x2F1C_77A0_9D4E_B513);

/// Fixed Hash State based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_reflector::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("app\\user");
/// let b = FixedHashState.hash_one("app\\user");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
