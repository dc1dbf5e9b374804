use std::fmt;
use std::hash::Hash;
use std::path::Path;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::{EdgeRecord, NodeRecord};
use crate::attrs::Attrs;
use crate::client::{Handle, LayoutKind, RendererClient, TextureMode};
use crate::error::{Error, Result};
use crate::guard::LayoutGate;
use crate::ident::{IdentityMap, NodePair};
use crate::project::{AttributeProjector, ProjectorConfig};

/// An undirected local graph mirrored onto the remote scene.
///
/// The remote renderer only knows directed edge primitives, so every
/// undirected edge is represented remotely as two opposing edges sharing one
/// logical identity; attribute projection goes to both.
pub struct GraphMirror<K, C> {
    client: C,
    gate: LayoutGate,
    projector: AttributeProjector,
    graph: StableUnGraph<NodeRecord<K>, EdgeRecord>,
    index: FxHashMap<K, NodeIndex>,
    nodes: IdentityMap<K, Handle>,
    edges: IdentityMap<NodePair<K>, (Handle, Handle)>,
}

impl<K, C> GraphMirror<K, C>
where
    K: Clone + Eq + Hash + fmt::Debug,
    C: RendererClient,
{
    /// Connect the mirror to a renderer. The remote scene is cleared so the
    /// two sides start in lockstep (both empty).
    pub fn new(client: C) -> Result<Self> {
        Self::with_config(client, ProjectorConfig::default())
    }

    pub fn with_config(mut client: C, config: ProjectorConfig) -> Result<Self> {
        client.clear()?;
        Ok(Self {
            client,
            gate: LayoutGate::new(),
            projector: AttributeProjector::new(config),
            graph: StableUnGraph::default(),
            index: FxHashMap::default(),
            nodes: IdentityMap::new(),
            edges: IdentityMap::new(),
        })
    }

    /// Add a node, or merge attributes into an existing one.
    ///
    /// Attributes are projected on every call, new or existing; re-adding a
    /// key with different attributes is the supported idempotent update path.
    pub fn add_node(&mut self, key: K, attrs: Attrs) -> Result<Handle> {
        let merged = self.merged_node_attrs(&key, attrs);
        // Validate before touching local or remote state.
        let plan = self.projector.plan_node(&merged)?;

        let handle = match self.nodes.lookup(&key) {
            Some(handle) => {
                let ix = self.index[&key];
                self.graph[ix].attrs = merged;
                handle
            }
            None => {
                self.gate.acquire(&mut self.client)?;
                let handle = self.client.add_node()?;
                self.gate.release(&mut self.client)?;
                self.bind_node(key.clone(), handle, merged);
                handle
            }
        };

        plan.apply(&mut self.client, handle)?;
        Ok(handle)
    }

    /// Like [`add_node`](Self::add_node), but a new node is created at an
    /// explicit position. The position is ignored for an existing key.
    pub fn add_node_at(&mut self, key: K, pos: [f64; 3], attrs: Attrs) -> Result<Handle> {
        let merged = self.merged_node_attrs(&key, attrs);
        let plan = self.projector.plan_node(&merged)?;

        let handle = match self.nodes.lookup(&key) {
            Some(handle) => {
                let ix = self.index[&key];
                self.graph[ix].attrs = merged;
                handle
            }
            None => {
                self.gate.acquire(&mut self.client)?;
                let handle = self.client.add_node_at(pos[0], pos[1], pos[2])?;
                self.gate.release(&mut self.client)?;
                self.bind_node(key.clone(), handle, merged);
                handle
            }
        };

        plan.apply(&mut self.client, handle)?;
        Ok(handle)
    }

    /// Add an edge, auto-materializing absent endpoints as attribute-less
    /// nodes. Re-adding an existing edge merges and re-projects attributes.
    pub fn add_edge(&mut self, u: K, v: K, attrs: Attrs) -> Result<()> {
        let merged = match self.edge_slot(&u, &v) {
            Some(eix) => {
                let mut merged = self.graph[eix].attrs.clone();
                merged.merge_from(&attrs);
                merged
            }
            None => attrs,
        };
        let plan = self.projector.plan_edge(&merged)?;
        let pair = NodePair::new(u.clone(), v.clone());

        self.gate.acquire(&mut self.client)?;
        let hu = self.ensure_node(&u)?;
        let hv = self.ensure_node(&v)?;

        let (forward, reverse) = match self.edges.lookup(&pair) {
            Some(handles) => {
                if let Some(eix) = self.edge_slot(&u, &v) {
                    self.graph[eix].attrs = merged;
                }
                handles
            }
            None => {
                let forward = self.client.add_edge(hu, hv)?;
                let reverse = self.client.add_edge(hv, hu)?;
                let (ui, vi) = (self.index[&u], self.index[&v]);
                self.graph.add_edge(ui, vi, EdgeRecord { attrs: merged });
                self.edges.bind(pair, (forward, reverse));
                debug!(edge = ?(&u, &v), %forward, %reverse, "created remote edge pair");
                (forward, reverse)
            }
        };
        self.gate.release(&mut self.client)?;

        // One logical edge, two remote primitives: project to both.
        plan.apply(&mut self.client, forward)?;
        plan.apply(&mut self.client, reverse)
    }

    /// Remove a node and its incident edges. A key with no remote binding
    /// (never added, or already removed) is a silent no-op.
    pub fn remove_node(&mut self, key: &K) -> Result<()> {
        let Some(handle) = self.nodes.lookup(key) else {
            return Ok(());
        };

        self.gate.acquire(&mut self.client)?;
        let ix = self.index[key];

        // Remote edge deletions strictly before the node deletion.
        for (a, b) in self.incident_edges(ix) {
            self.remove_edge(&a, &b)?;
        }

        self.graph.remove_node(ix);
        self.index.remove(key);
        self.nodes.unbind(key);
        self.client.delete_node(handle)?;
        debug!(node = ?key, %handle, "removed remote node");
        self.gate.release(&mut self.client)
    }

    /// Remove an edge. Endpoints that were never added are a lookup error;
    /// an edge that existed and is already gone is a tolerated no-op.
    pub fn remove_edge(&mut self, u: &K, v: &K) -> Result<()> {
        let hu = self
            .nodes
            .lookup(u)
            .ok_or_else(|| Error::unknown_node(u))?;
        let hv = self
            .nodes
            .lookup(v)
            .ok_or_else(|| Error::unknown_node(v))?;

        let pair = NodePair::new(u.clone(), v.clone());
        if self.edges.unbind(&pair).is_none() {
            return Ok(());
        }

        self.gate.acquire(&mut self.client)?;
        if let Some(eix) = self.edge_slot(u, v) {
            self.graph.remove_edge(eix);
        }
        self.client.delete_edge(hu, hv)?;
        self.client.delete_edge(hv, hu)?;
        self.gate.release(&mut self.client)
    }

    /// Bulk add. The whole batch runs under a single layout suspension, so N
    /// elements cost one pause and one resume instead of N of each.
    pub fn add_nodes_from<I>(&mut self, keys: I, attrs: &Attrs) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        self.gate.acquire(&mut self.client)?;
        for key in keys {
            self.add_node(key, attrs.clone())?;
        }
        self.gate.release(&mut self.client)
    }

    pub fn add_edges_from<I>(&mut self, edges: I, attrs: &Attrs) -> Result<()>
    where
        I: IntoIterator<Item = (K, K)>,
    {
        self.gate.acquire(&mut self.client)?;
        for (u, v) in edges {
            self.add_edge(u, v, attrs.clone())?;
        }
        self.gate.release(&mut self.client)
    }

    pub fn remove_nodes_from<I>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        self.gate.acquire(&mut self.client)?;
        for key in keys {
            self.remove_node(&key)?;
        }
        self.gate.release(&mut self.client)
    }

    pub fn remove_edges_from<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, K)>,
    {
        self.gate.acquire(&mut self.client)?;
        for (u, v) in edges {
            self.remove_edge(&u, &v)?;
        }
        self.gate.release(&mut self.client)
    }

    /// Remove every known edge. The edge set is snapshotted first because
    /// removal mutates the set being iterated.
    pub fn clear_edges(&mut self) -> Result<()> {
        let snapshot: Vec<(K, K)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].key.clone(), self.graph[b].key.clone()))
            .collect();

        self.gate.acquire(&mut self.client)?;
        for (u, v) in snapshot {
            self.remove_edge(&u, &v)?;
        }
        self.gate.release(&mut self.client)
    }

    /// Drop the local model and wipe the remote scene.
    pub fn clear(&mut self) -> Result<()> {
        self.graph.clear();
        self.index.clear();
        self.nodes.clear();
        self.edges.clear();
        self.client.clear()
    }

    // Scene-level passthroughs.

    /// Load a remote scene from a file. The path is resolved to an absolute
    /// one locally; the remote side has its own working directory.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let abs = std::path::absolute(path).map_err(|source| Error::Path {
            path: path.to_path_buf(),
            source,
        })?;
        self.client.open_file(&abs)
    }

    pub fn center(&mut self) -> Result<()> {
        self.client.center()
    }

    pub fn draw(&mut self) -> Result<()> {
        self.client.draw()
    }

    pub fn layout(&mut self, watch: bool) -> Result<()> {
        self.client.layout(watch)
    }

    pub fn start_layout(&mut self) -> Result<()> {
        self.client.start_layout()
    }

    /// Manual pause, bypassing the suspension gate.
    pub fn stop_layout(&mut self) -> Result<()> {
        self.client.stop_layout()
    }

    pub fn resume_layout(&mut self) -> Result<()> {
        self.client.resume_layout()
    }

    pub fn clear_velocities(&mut self) -> Result<()> {
        self.client.clear_velocities()
    }

    /// A negative radius lets the server pick `maxDistance / 2`.
    pub fn randomize_positions(&mut self, radius: f64) -> Result<()> {
        self.client.randomize_positions(radius)
    }

    pub fn set_layout_type(&mut self, kind: &str) -> Result<()> {
        let kind: LayoutKind = kind.parse()?;
        self.client.set_layout_type(kind)
    }

    pub fn set_texture_node_mode(&mut self, mode: &str) -> Result<()> {
        let mode: TextureMode = mode.parse()?;
        self.client.set_texture_node_mode(mode)
    }

    // Inspection.

    pub fn contains_node(&self, key: &K) -> bool {
        self.nodes.contains(key)
    }

    pub fn node_handle(&self, key: &K) -> Option<Handle> {
        self.nodes.lookup(key)
    }

    /// The forward/reverse remote handle pair of an undirected edge, from
    /// either orientation.
    pub fn edge_handles(&self, u: &K, v: &K) -> Option<(Handle, Handle)> {
        self.edges.lookup(&NodePair::new(u.clone(), v.clone()))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.graph.node_indices().map(|ix| &self.graph[ix].key)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&K, &K)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (&self.graph[a].key, &self.graph[b].key))
    }

    pub fn node_attrs(&self, key: &K) -> Option<&Attrs> {
        self.index.get(key).map(|&ix| &self.graph[ix].attrs)
    }

    pub fn edge_attrs(&self, u: &K, v: &K) -> Option<&Attrs> {
        self.edge_slot(u, v).map(|eix| &self.graph[eix].attrs)
    }

    /// Current layout-suspension depth, useful when inspecting the aftermath
    /// of a failed batch.
    pub fn gate_depth(&self) -> u32 {
        self.gate.depth()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    // Internals.

    fn merged_node_attrs(&self, key: &K, attrs: Attrs) -> Attrs {
        match self.index.get(key) {
            Some(&ix) => {
                let mut merged = self.graph[ix].attrs.clone();
                merged.merge_from(&attrs);
                merged
            }
            None => attrs,
        }
    }

    fn bind_node(&mut self, key: K, handle: Handle, attrs: Attrs) {
        let ix = self.graph.add_node(NodeRecord {
            key: key.clone(),
            attrs,
        });
        self.index.insert(key.clone(), ix);
        self.nodes.bind(key.clone(), handle);
        debug!(node = ?key, %handle, "bound remote node");
    }

    fn ensure_node(&mut self, key: &K) -> Result<Handle> {
        match self.nodes.lookup(key) {
            Some(handle) => Ok(handle),
            None => self.add_node(key.clone(), Attrs::new()),
        }
    }

    fn edge_slot(&self, u: &K, v: &K) -> Option<EdgeIndex> {
        let ui = self.index.get(u)?;
        let vi = self.index.get(v)?;
        self.graph.find_edge(*ui, *vi)
    }

    fn incident_edges(&self, ix: NodeIndex) -> Vec<(K, K)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .filter(|&(a, b)| a == ix || b == ix)
            .map(|(a, b)| (self.graph[a].key.clone(), self.graph[b].key.clone()))
            .collect()
    }
}
