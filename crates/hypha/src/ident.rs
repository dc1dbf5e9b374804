//! Bidirectional bookkeeping between local keys and remote handles.
//!
//! Every "existing vs. new" decision in the mirror goes through `lookup`
//! here, which makes the idempotent-update path an explicit branch rather
//! than implicit map-membership logic.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHashSet, FxHasher};

/// Maps local keys to remote bindings.
///
/// `unbind` on an absent key answers `None`, which callers read as "already
/// removed" and use to skip the remote delete call (tolerant double-removal).
#[derive(Debug, Clone)]
pub struct IdentityMap<K, H> {
    forward: FxHashMap<K, H>,
    live: FxHashSet<H>,
}

impl<K, H> IdentityMap<K, H>
where
    K: Eq + Hash + Clone,
    H: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            forward: FxHashMap::default(),
            live: FxHashSet::default(),
        }
    }

    pub fn lookup(&self, key: &K) -> Option<H> {
        self.forward.get(key).copied()
    }

    /// Bind a key to a freshly created remote handle.
    ///
    /// Invariant: no two live keys ever share a handle. The remote side never
    /// reuses handles while they are live, so a collision here means local
    /// bookkeeping went wrong.
    pub fn bind(&mut self, key: K, handle: H) {
        debug_assert!(
            !self.live.contains(&handle),
            "remote handle bound to two live keys"
        );
        self.live.insert(handle);
        self.forward.insert(key, handle);
    }

    pub fn unbind(&mut self, key: &K) -> Option<H> {
        let handle = self.forward.remove(key)?;
        self.live.remove(&handle);
        Some(handle)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.live.clear();
    }
}

impl<K, H> Default for IdentityMap<K, H>
where
    K: Eq + Hash + Clone,
    H: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An order-insensitive node-key pair, used as the identity of an undirected
/// edge: `(u, v)` and `(v, u)` are the same key.
#[derive(Debug, Clone)]
pub struct NodePair<K> {
    a: K,
    b: K,
}

impl<K> NodePair<K> {
    pub fn new(a: K, b: K) -> Self {
        Self { a, b }
    }
}

impl<K: PartialEq> PartialEq for NodePair<K> {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl<K: Eq> Eq for NodePair<K> {}

impl<K: Hash> Hash for NodePair<K> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        // Commutative combination so both orientations hash identically.
        let mut ha = FxHasher::default();
        self.a.hash(&mut ha);
        let mut hb = FxHasher::default();
        self.b.hash(&mut hb);
        state.write_u64(ha.finish().wrapping_add(hb.finish()));
    }
}
