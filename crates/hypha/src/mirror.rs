//! The graph mirrors.
//!
//! A mirror holds the local authoritative graph model (petgraph storage,
//! caller-supplied keys) together with the remote renderer capability, and
//! keeps the two in lockstep through every mutation. The undirected and
//! directed mirrors are deliberately parallel; they differ only in edge
//! representation (a pair of opposing remote edges vs. a single one).

mod directed;
mod undirected;

pub use directed::DiGraphMirror;
pub use undirected::GraphMirror;

use crate::attrs::Attrs;

/// Local node record: the caller's key plus the attribute map. The remote
/// handle lives in the identity map, not here.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord<K> {
    pub key: K,
    pub attrs: Attrs,
}

/// Local edge record. Handles live in the identity map.
#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    pub attrs: Attrs,
}
