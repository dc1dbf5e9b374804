//! Attribute projection: semantic local attributes to primitive remote calls.
//!
//! Projection is sparse: an absent attribute means "do not touch that remote
//! property". It is also two-phase: `plan_*` validates everything up front so
//! a bad color or a non-numeric size fails before any remote call is issued.

use std::path::{Path, PathBuf};

use crate::attrs::{AttrValue, Attrs};
use crate::client::{Handle, RendererClient};
use crate::color::{self, Rgba};
use crate::error::{Error, Result};

/// Projection configuration, immutable once the projector is built.
#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    /// Which attribute carries the display label.
    pub label_attr: String,
    /// Allow-list of attribute names forwarded verbatim via
    /// `set_node_attribute`, projected in list order.
    pub custom_node_attrs: Vec<String>,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            label_attr: "label".to_string(),
            custom_node_attrs: Vec::new(),
        }
    }
}

/// Pure translation of attribute maps into planned remote calls. No state
/// beyond the configuration.
#[derive(Debug, Clone, Default)]
pub struct AttributeProjector {
    config: ProjectorConfig,
}

impl AttributeProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Validate and plan the node-attribute calls for `attrs`.
    pub fn plan_node(&self, attrs: &Attrs) -> Result<NodeProjection> {
        let mut calls = Vec::new();

        if let Some(label) = attrs.get(&self.config.label_attr) {
            calls.push(NodeCall::Label(label.to_display_string()));
        }
        if let Some(spec) = attrs.get("color") {
            calls.push(NodeCall::Color(color::resolve(&spec.to_display_string())?));
        }
        if let Some(size) = attrs.get("size") {
            calls.push(NodeCall::Size(numeric("size", size)?));
        }
        if let Some(image) = attrs.get("image") {
            // An empty path means "no image", not an error.
            let path = image.to_display_string();
            if !path.is_empty() {
                calls.push(NodeCall::Image(absolute(Path::new(&path))?));
            }
        }
        if let Some(scale) = attrs.get("imageScale") {
            calls.push(NodeCall::ImageScale(numeric("imageScale", scale)?));
        }
        for name in &self.config.custom_node_attrs {
            if let Some(value) = attrs.get(name) {
                calls.push(NodeCall::Custom(name.clone(), value.to_display_string()));
            }
        }

        Ok(NodeProjection { calls })
    }

    /// Validate and plan the edge-attribute calls for `attrs`.
    pub fn plan_edge(&self, attrs: &Attrs) -> Result<EdgeProjection> {
        let mut calls = Vec::new();

        if let Some(label) = attrs.get(&self.config.label_attr) {
            calls.push(EdgeCall::Label(label.to_display_string()));
        }
        if let Some(weight) = attrs.get("weight") {
            calls.push(EdgeCall::Weight(numeric("weight", weight)?));
        }
        if let Some(spec) = attrs.get("color") {
            calls.push(EdgeCall::Color(color::resolve(&spec.to_display_string())?));
        }

        Ok(EdgeProjection { calls })
    }
}

fn numeric(attr: &str, value: &AttrValue) -> Result<f64> {
    value.as_f64().ok_or_else(|| Error::NonNumeric {
        attr: attr.to_string(),
        value: value.to_display_string(),
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| Error::Path {
        path: path.to_path_buf(),
        source,
    })
}

/// One planned primitive call against a node handle.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeCall {
    Label(String),
    Color(Rgba),
    Size(f64),
    Image(PathBuf),
    ImageScale(f64),
    Custom(String, String),
}

/// A validated batch of node-attribute calls, ready to apply to a handle.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProjection {
    calls: Vec<NodeCall>,
}

impl NodeProjection {
    pub fn calls(&self) -> &[NodeCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn apply<C: RendererClient>(&self, client: &mut C, node: Handle) -> Result<()> {
        for call in &self.calls {
            match call {
                NodeCall::Label(label) => client.set_node_label(node, label)?,
                NodeCall::Color(rgba) => client.set_node_color(node, *rgba)?,
                NodeCall::Size(size) => client.set_node_size(node, *size)?,
                NodeCall::Image(path) => {
                    client.set_node_type(node, "image")?;
                    client.set_node_image_path(node, path)?;
                }
                NodeCall::ImageScale(scale) => client.set_node_image_scale(node, *scale)?,
                NodeCall::Custom(name, value) => client.set_node_attribute(node, name, value)?,
            }
        }
        Ok(())
    }
}

/// One planned primitive call against an edge handle.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeCall {
    Label(String),
    Weight(f64),
    Color(Rgba),
}

/// A validated batch of edge-attribute calls.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeProjection {
    calls: Vec<EdgeCall>,
}

impl EdgeProjection {
    pub fn calls(&self) -> &[EdgeCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn apply<C: RendererClient>(&self, client: &mut C, edge: Handle) -> Result<()> {
        for call in &self.calls {
            match call {
                EdgeCall::Label(label) => client.set_edge_label(edge, label)?,
                EdgeCall::Weight(weight) => client.set_edge_weight(edge, *weight)?,
                EdgeCall::Color(rgba) => client.set_edge_color(edge, *rgba)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_attributes_plan_nothing() {
        let projector = AttributeProjector::default();
        assert!(projector.plan_node(&Attrs::new()).unwrap().is_empty());
        assert!(projector.plan_edge(&Attrs::new()).unwrap().is_empty());
    }

    #[test]
    fn node_plan_follows_the_projection_table() {
        let projector = AttributeProjector::default();
        let attrs = Attrs::new()
            .with("label", "hub")
            .with("color", "#ff0000")
            .with("size", 2)
            .with("imageScale", "1.5");
        let plan = projector.plan_node(&attrs).unwrap();
        assert_eq!(
            plan.calls(),
            &[
                NodeCall::Label("hub".into()),
                NodeCall::Color(Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }),
                NodeCall::Size(2.0),
                NodeCall::ImageScale(1.5),
            ]
        );
    }

    #[test]
    fn empty_image_path_is_skipped() {
        let projector = AttributeProjector::default();
        let plan = projector
            .plan_node(&Attrs::new().with("image", ""))
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn image_paths_are_made_absolute() {
        let projector = AttributeProjector::default();
        let plan = projector
            .plan_node(&Attrs::new().with("image", "textures/node.png"))
            .unwrap();
        let NodeCall::Image(path) = &plan.calls()[0] else {
            panic!("expected an image call");
        };
        assert!(path.is_absolute());
    }

    #[test]
    fn bad_color_fails_the_whole_plan() {
        let projector = AttributeProjector::default();
        let attrs = Attrs::new().with("label", "n").with("color", "#ggg");
        assert!(matches!(
            projector.plan_node(&attrs),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn non_numeric_size_and_weight_fail() {
        let projector = AttributeProjector::default();
        assert!(matches!(
            projector.plan_node(&Attrs::new().with("size", "big")),
            Err(Error::NonNumeric { .. })
        ));
        assert!(matches!(
            projector.plan_edge(&Attrs::new().with("weight", true)),
            Err(Error::NonNumeric { .. })
        ));
    }

    #[test]
    fn custom_attrs_follow_the_allow_list_order() {
        let projector = AttributeProjector::new(ProjectorConfig {
            custom_node_attrs: vec!["group".into(), "rank".into()],
            ..Default::default()
        });
        let attrs = Attrs::new().with("rank", 3).with("group", "core").with("other", 9);
        let plan = projector.plan_node(&attrs).unwrap();
        assert_eq!(
            plan.calls(),
            &[
                NodeCall::Custom("group".into(), "core".into()),
                NodeCall::Custom("rank".into(), "3".into()),
            ]
        );
    }

    #[test]
    fn alternate_label_attribute() {
        let projector = AttributeProjector::new(ProjectorConfig {
            label_attr: "name".into(),
            ..Default::default()
        });
        let plan = projector
            .plan_node(&Attrs::new().with("name", "n1").with("label", "ignored"))
            .unwrap();
        assert_eq!(plan.calls(), &[NodeCall::Label("n1".into())]);
    }
}
