#![forbid(unsafe_code)]

//! Production transport for the `hypha` graph mirror.
//!
//! The remote renderer speaks XML-RPC over HTTP, strictly request/response,
//! one call in flight at a time. [`XmlRpcRenderer`] implements
//! [`hypha::RendererClient`] by encoding each capability method as one wire
//! call; wire failures surface as [`hypha::Error::Transport`] with the source
//! preserved.

pub mod wire;

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use hypha::{Handle, LayoutKind, RendererClient, Rgba, TextureMode};
use wire::Value;

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("invalid endpoint url: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("server fault {code}: {message}")]
    Fault { code: i32, message: String },

    #[error("unexpected response shape: {0}")]
    Unexpected(String),
}

/// Blocking XML-RPC client for the remote renderer.
pub struct XmlRpcRenderer {
    http: reqwest::blocking::Client,
    endpoint: Url,
}

impl XmlRpcRenderer {
    /// The renderer's conventional local endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:9876";

    pub fn connect(endpoint: &str) -> Result<Self, WireError> {
        Ok(Self {
            http: reqwest::blocking::Client::new(),
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Connect to [`DEFAULT_ENDPOINT`](Self::DEFAULT_ENDPOINT).
    pub fn local() -> Result<Self, WireError> {
        Self::connect(Self::DEFAULT_ENDPOINT)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn call(&mut self, method: &str, params: &[Value]) -> Result<Value, WireError> {
        let body = wire::encode_request(method, params);
        tracing::debug!(target: "hypha_wire", method, "xmlrpc call");
        let text = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()?
            .error_for_status()?
            .text()?;
        wire::parse_response(&text)
    }

    fn unit(&mut self, method: &str, params: &[Value]) -> hypha::Result<()> {
        self.call(method, params)
            .map(|_| ())
            .map_err(hypha::Error::transport)
    }

    fn handle(&mut self, method: &str, params: &[Value]) -> hypha::Result<Handle> {
        let value = self.call(method, params).map_err(hypha::Error::transport)?;
        let raw = value.as_int().ok_or_else(|| {
            hypha::Error::transport(WireError::Unexpected(format!(
                "{method}: expected an integer handle, got {value:?}"
            )))
        })?;
        Ok(Handle::from_raw(raw))
    }
}

impl RendererClient for XmlRpcRenderer {
    fn open_file(&mut self, path: &Path) -> hypha::Result<()> {
        self.unit("open_file", &[Value::str(path.to_string_lossy())])
    }

    fn clear(&mut self) -> hypha::Result<()> {
        self.unit("clear", &[])
    }

    fn add_node(&mut self) -> hypha::Result<Handle> {
        self.handle("add_node", &[])
    }

    fn add_node_at(&mut self, x: f64, y: f64, z: f64) -> hypha::Result<Handle> {
        self.handle(
            "add_node_at",
            &[Value::Double(x), Value::Double(y), Value::Double(z)],
        )
    }

    fn delete_node(&mut self, node: Handle) -> hypha::Result<()> {
        self.unit("delete_node", &[Value::Int(node.raw())])
    }

    fn add_edge(&mut self, from: Handle, to: Handle) -> hypha::Result<Handle> {
        self.handle("add_edge", &[Value::Int(from.raw()), Value::Int(to.raw())])
    }

    fn delete_edge(&mut self, from: Handle, to: Handle) -> hypha::Result<()> {
        self.unit("delete_edge", &[Value::Int(from.raw()), Value::Int(to.raw())])
    }

    fn set_node_label(&mut self, node: Handle, label: &str) -> hypha::Result<()> {
        self.unit("set_node_label", &[Value::Int(node.raw()), Value::str(label)])
    }

    fn set_node_size(&mut self, node: Handle, size: f64) -> hypha::Result<()> {
        self.unit("set_node_size", &[Value::Int(node.raw()), Value::Double(size)])
    }

    fn set_node_color(&mut self, node: Handle, color: Rgba) -> hypha::Result<()> {
        self.unit(
            "set_node_color",
            &[
                Value::Int(node.raw()),
                Value::Double(color.r),
                Value::Double(color.g),
                Value::Double(color.b),
                Value::Double(color.a),
            ],
        )
    }

    fn set_node_type(&mut self, node: Handle, kind: &str) -> hypha::Result<()> {
        self.unit("set_node_type", &[Value::Int(node.raw()), Value::str(kind)])
    }

    fn set_node_image_path(&mut self, node: Handle, path: &Path) -> hypha::Result<()> {
        self.unit(
            "set_node_image_path",
            &[Value::Int(node.raw()), Value::str(path.to_string_lossy())],
        )
    }

    fn set_node_image_scale(&mut self, node: Handle, scale: f64) -> hypha::Result<()> {
        self.unit(
            "set_node_image_scale",
            &[Value::Int(node.raw()), Value::Double(scale)],
        )
    }

    fn set_node_attribute(&mut self, node: Handle, name: &str, value: &str) -> hypha::Result<()> {
        self.unit(
            "set_node_attribute",
            &[Value::Int(node.raw()), Value::str(name), Value::str(value)],
        )
    }

    fn set_edge_label(&mut self, edge: Handle, label: &str) -> hypha::Result<()> {
        self.unit("set_edge_label", &[Value::Int(edge.raw()), Value::str(label)])
    }

    fn set_edge_weight(&mut self, edge: Handle, weight: f64) -> hypha::Result<()> {
        self.unit(
            "set_edge_weight",
            &[Value::Int(edge.raw()), Value::Double(weight)],
        )
    }

    fn set_edge_color(&mut self, edge: Handle, color: Rgba) -> hypha::Result<()> {
        self.unit(
            "set_edge_color",
            &[
                Value::Int(edge.raw()),
                Value::Double(color.r),
                Value::Double(color.g),
                Value::Double(color.b),
                Value::Double(color.a),
            ],
        )
    }

    fn center(&mut self) -> hypha::Result<()> {
        self.unit("center", &[])
    }

    fn draw(&mut self) -> hypha::Result<()> {
        self.unit("draw", &[])
    }

    fn layout(&mut self, watch: bool) -> hypha::Result<()> {
        self.unit("layout", &[Value::Bool(watch)])
    }

    fn start_layout(&mut self) -> hypha::Result<()> {
        self.unit("start_layout", &[])
    }

    fn stop_layout(&mut self) -> hypha::Result<()> {
        self.unit("stop_layout", &[])
    }

    fn resume_layout(&mut self) -> hypha::Result<()> {
        self.unit("resume_layout", &[])
    }

    fn clear_velocities(&mut self) -> hypha::Result<()> {
        self.unit("clear_velocities", &[])
    }

    fn randomize_positions(&mut self, radius: f64) -> hypha::Result<()> {
        self.unit("randomize_positions", &[Value::Double(radius)])
    }

    fn set_layout_type(&mut self, kind: LayoutKind) -> hypha::Result<()> {
        self.unit("set_layout_type", &[Value::Int(kind.code())])
    }

    fn set_texture_node_mode(&mut self, mode: TextureMode) -> hypha::Result<()> {
        self.unit("set_texture_node_mode", &[Value::str(mode.as_str())])
    }
}
