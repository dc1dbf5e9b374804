#![forbid(unsafe_code)]

//! Mirror a local attributed graph onto a remote, stateful 3D scene.
//!
//! The remote renderer is reachable only through a synchronous
//! request/response protocol and may be running a continuous physics layout.
//! This crate keeps a local authoritative graph model and the remote scene in
//! lockstep: it tracks which local keys are bound to which remote handles,
//! translates semantic attributes (color specs, image paths, numeric scales)
//! into the primitive calls the protocol understands, and pauses the remote
//! layout exactly once around each structural batch.
//!
//! Design notes:
//! - composition over inheritance: a mirror *holds* its graph storage and its
//!   [`RendererClient`] capability, and every mutation is defined once on the
//!   mirror and delegated to both sides;
//! - the remote side only knows directed edge primitives, so the undirected
//!   [`GraphMirror`] represents each edge as two opposing remote edges with
//!   one logical identity, while [`DiGraphMirror`] uses exactly one;
//! - there is no transactional rollback: a transport failure mid-batch leaves
//!   the mirror in an indeterminate but inspectable state.

pub mod attrs;
pub mod client;
pub mod color;
pub mod error;
pub mod guard;
pub mod ident;
pub mod mirror;
pub mod project;

pub use attrs::{AttrValue, Attrs};
pub use client::{Handle, LayoutKind, RendererClient, TextureMode};
pub use color::Rgba;
pub use error::{Error, Result};
pub use guard::LayoutGate;
pub use ident::IdentityMap;
pub use mirror::{DiGraphMirror, GraphMirror};
pub use project::{AttributeProjector, ProjectorConfig};
