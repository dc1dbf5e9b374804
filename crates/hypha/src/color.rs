//! Color resolution.
//!
//! The remote protocol only understands four floats in `[0, 1]`; everything
//! richer (named CSS colors, `#rgb`/`#rrggbb`/`#rrggbbaa`, `rgb()`/`rgba()`)
//! is resolved here before any call is issued.

use std::str::FromStr;

use crate::error::{Error, Result};

/// A resolved color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Resolve a color spec into channel floats.
///
/// An unparsable spec is a validation failure; no remote state has been
/// touched when this returns an error.
pub fn resolve(spec: &str) -> Result<Rgba> {
    let color = svgtypes::Color::from_str(spec.trim())
        .map_err(|_| Error::InvalidColor(spec.to_string()))?;
    Ok(Rgba {
        r: f64::from(color.red) / 255.0,
        g: f64::from(color.green) / 255.0,
        b: f64::from(color.blue) / 255.0,
        a: f64::from(color.alpha) / 255.0,
    })
}
