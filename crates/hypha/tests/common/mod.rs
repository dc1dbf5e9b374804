#![allow(dead_code)]

//! A recording renderer fake: every capability call is appended to a log and
//! creation calls hand out handles from a local counter. Built with
//! [`RecordingClient::tripping_at`], the fake fails the Nth call instead,
//! which is how transport-failure paths are exercised.

use std::io;
use std::path::{Path, PathBuf};

use hypha::{Error, Handle, LayoutKind, RendererClient, Result, Rgba, TextureMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    OpenFile(PathBuf),
    Clear,
    AddNode,
    AddNodeAt(f64, f64, f64),
    DeleteNode(Handle),
    AddEdge(Handle, Handle),
    DeleteEdge(Handle, Handle),
    SetNodeLabel(Handle, String),
    SetNodeSize(Handle, f64),
    SetNodeColor(Handle, Rgba),
    SetNodeType(Handle, String),
    SetNodeImagePath(Handle, PathBuf),
    SetNodeImageScale(Handle, f64),
    SetNodeAttribute(Handle, String, String),
    SetEdgeLabel(Handle, String),
    SetEdgeWeight(Handle, f64),
    SetEdgeColor(Handle, Rgba),
    Center,
    Draw,
    Layout(bool),
    StartLayout,
    StopLayout,
    ResumeLayout,
    ClearVelocities,
    RandomizePositions(f64),
    SetLayoutType(i32),
    SetTextureNodeMode(String),
}

#[derive(Debug, Default)]
pub struct RecordingClient {
    pub calls: Vec<Call>,
    next: i32,
    seen: usize,
    trip_at: Option<usize>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake whose `n`-th call fails with a transport error (and is not
    /// recorded). Every call before that behaves normally.
    pub fn tripping_at(n: usize) -> Self {
        Self {
            trip_at: Some(n),
            ..Self::default()
        }
    }

    fn record(&mut self, call: Call) -> Result<()> {
        self.seen += 1;
        if self.trip_at == Some(self.seen) {
            return Err(Error::transport(io::Error::other("connection reset")));
        }
        self.calls.push(call);
        Ok(())
    }

    fn fresh(&mut self) -> Handle {
        self.next += 1;
        Handle::from_raw(self.next)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn node_creations(&self) -> usize {
        self.count(|c| matches!(c, Call::AddNode | Call::AddNodeAt(..)))
    }

    pub fn edge_creations(&self) -> usize {
        self.count(|c| matches!(c, Call::AddEdge(..)))
    }

    pub fn node_deletions(&self) -> usize {
        self.count(|c| matches!(c, Call::DeleteNode(_)))
    }

    pub fn edge_deletions(&self) -> usize {
        self.count(|c| matches!(c, Call::DeleteEdge(..)))
    }

    pub fn pauses(&self) -> usize {
        self.count(|c| matches!(c, Call::StopLayout))
    }

    pub fn resumes(&self) -> usize {
        self.count(|c| matches!(c, Call::ResumeLayout))
    }
}

impl RendererClient for RecordingClient {
    fn open_file(&mut self, path: &Path) -> Result<()> {
        self.record(Call::OpenFile(path.to_path_buf()))
    }

    fn clear(&mut self) -> Result<()> {
        self.record(Call::Clear)
    }

    fn add_node(&mut self) -> Result<Handle> {
        self.record(Call::AddNode)?;
        Ok(self.fresh())
    }

    fn add_node_at(&mut self, x: f64, y: f64, z: f64) -> Result<Handle> {
        self.record(Call::AddNodeAt(x, y, z))?;
        Ok(self.fresh())
    }

    fn delete_node(&mut self, node: Handle) -> Result<()> {
        self.record(Call::DeleteNode(node))
    }

    fn add_edge(&mut self, from: Handle, to: Handle) -> Result<Handle> {
        self.record(Call::AddEdge(from, to))?;
        Ok(self.fresh())
    }

    fn delete_edge(&mut self, from: Handle, to: Handle) -> Result<()> {
        self.record(Call::DeleteEdge(from, to))
    }

    fn set_node_label(&mut self, node: Handle, label: &str) -> Result<()> {
        self.record(Call::SetNodeLabel(node, label.to_string()))
    }

    fn set_node_size(&mut self, node: Handle, size: f64) -> Result<()> {
        self.record(Call::SetNodeSize(node, size))
    }

    fn set_node_color(&mut self, node: Handle, color: Rgba) -> Result<()> {
        self.record(Call::SetNodeColor(node, color))
    }

    fn set_node_type(&mut self, node: Handle, kind: &str) -> Result<()> {
        self.record(Call::SetNodeType(node, kind.to_string()))
    }

    fn set_node_image_path(&mut self, node: Handle, path: &Path) -> Result<()> {
        self.record(Call::SetNodeImagePath(node, path.to_path_buf()))
    }

    fn set_node_image_scale(&mut self, node: Handle, scale: f64) -> Result<()> {
        self.record(Call::SetNodeImageScale(node, scale))
    }

    fn set_node_attribute(&mut self, node: Handle, name: &str, value: &str) -> Result<()> {
        self.record(Call::SetNodeAttribute(node, name.to_string(), value.to_string()))
    }

    fn set_edge_label(&mut self, edge: Handle, label: &str) -> Result<()> {
        self.record(Call::SetEdgeLabel(edge, label.to_string()))
    }

    fn set_edge_weight(&mut self, edge: Handle, weight: f64) -> Result<()> {
        self.record(Call::SetEdgeWeight(edge, weight))
    }

    fn set_edge_color(&mut self, edge: Handle, color: Rgba) -> Result<()> {
        self.record(Call::SetEdgeColor(edge, color))
    }

    fn center(&mut self) -> Result<()> {
        self.record(Call::Center)
    }

    fn draw(&mut self) -> Result<()> {
        self.record(Call::Draw)
    }

    fn layout(&mut self, watch: bool) -> Result<()> {
        self.record(Call::Layout(watch))
    }

    fn start_layout(&mut self) -> Result<()> {
        self.record(Call::StartLayout)
    }

    fn stop_layout(&mut self) -> Result<()> {
        self.record(Call::StopLayout)
    }

    fn resume_layout(&mut self) -> Result<()> {
        self.record(Call::ResumeLayout)
    }

    fn clear_velocities(&mut self) -> Result<()> {
        self.record(Call::ClearVelocities)
    }

    fn randomize_positions(&mut self, radius: f64) -> Result<()> {
        self.record(Call::RandomizePositions(radius))
    }

    fn set_layout_type(&mut self, kind: LayoutKind) -> Result<()> {
        self.record(Call::SetLayoutType(kind.code()))
    }

    fn set_texture_node_mode(&mut self, mode: TextureMode) -> Result<()> {
        self.record(Call::SetTextureNodeMode(mode.as_str().to_string()))
    }
}
