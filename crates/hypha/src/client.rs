//! The capability surface the mirror depends on.
//!
//! One method per remote operation, request/response, one call in flight at a
//! time. The production implementation lives in `hypha-wire`; tests use a
//! recording fake.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Opaque identifier for a remote node or edge.
///
/// The remote side owns the id space; the local side treats handles as
/// capability tokens and never fabricates or reuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(i32);

impl Handle {
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Remote layout process kind. The wire protocol wants the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Static,
    Dynamic,
}

impl LayoutKind {
    pub fn code(self) -> i32 {
        match self {
            Self::Static => 0,
            Self::Dynamic => 1,
        }
    }
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            other => Err(Error::UnknownLayoutType(other.to_string())),
        }
    }
}

/// How textured nodes orient themselves relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureMode {
    Align,
    Rotate,
}

impl TextureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Align => "align",
            Self::Rotate => "rotate",
        }
    }
}

impl FromStr for TextureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "align" => Ok(Self::Align),
            "rotate" => Ok(Self::Rotate),
            other => Err(Error::UnknownTextureMode(other.to_string())),
        }
    }
}

/// The remote renderer operations, one method per wire call.
///
/// Every method blocks until the remote side answers. Call order is a
/// correctness requirement: the remote scene is stateful, and e.g. an edge
/// creation referencing a node the remote has not created yet is a protocol
/// violation.
pub trait RendererClient {
    fn open_file(&mut self, path: &Path) -> Result<()>;
    fn clear(&mut self) -> Result<()>;

    fn add_node(&mut self) -> Result<Handle>;
    fn add_node_at(&mut self, x: f64, y: f64, z: f64) -> Result<Handle>;
    fn delete_node(&mut self, node: Handle) -> Result<()>;

    /// Create a directed remote edge between two node handles.
    fn add_edge(&mut self, from: Handle, to: Handle) -> Result<Handle>;
    /// Delete the remote edge between two node handles.
    fn delete_edge(&mut self, from: Handle, to: Handle) -> Result<()>;

    fn set_node_label(&mut self, node: Handle, label: &str) -> Result<()>;
    fn set_node_size(&mut self, node: Handle, size: f64) -> Result<()>;
    fn set_node_color(&mut self, node: Handle, color: Rgba) -> Result<()>;
    fn set_node_type(&mut self, node: Handle, kind: &str) -> Result<()>;
    fn set_node_image_path(&mut self, node: Handle, path: &Path) -> Result<()>;
    fn set_node_image_scale(&mut self, node: Handle, scale: f64) -> Result<()>;
    fn set_node_attribute(&mut self, node: Handle, name: &str, value: &str) -> Result<()>;

    fn set_edge_label(&mut self, edge: Handle, label: &str) -> Result<()>;
    fn set_edge_weight(&mut self, edge: Handle, weight: f64) -> Result<()>;
    fn set_edge_color(&mut self, edge: Handle, color: Rgba) -> Result<()>;

    fn center(&mut self) -> Result<()>;
    fn draw(&mut self) -> Result<()>;
    fn layout(&mut self, watch: bool) -> Result<()>;
    fn start_layout(&mut self) -> Result<()>;
    fn stop_layout(&mut self) -> Result<()>;
    fn resume_layout(&mut self) -> Result<()>;
    fn clear_velocities(&mut self) -> Result<()>;
    /// A negative radius asks the server to pick `maxDistance / 2`.
    fn randomize_positions(&mut self, radius: f64) -> Result<()>;

    fn set_layout_type(&mut self, kind: LayoutKind) -> Result<()>;
    fn set_texture_node_mode(&mut self, mode: TextureMode) -> Result<()>;
}
