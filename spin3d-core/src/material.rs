//! Unlit flat-color materials
use crate::color::Color;

/// Fills every face of a mesh with one color, ignoring lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshBasicMaterial {
    pub color: Color,
}

impl MeshBasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Strokes a polyline with one color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBasicMaterial {
    pub color: Color,
}

impl LineBasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}
