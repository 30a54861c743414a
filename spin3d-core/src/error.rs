//! Error type shared by the core crate
use thiserror::Error;

/// Errors raised while configuring a stage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("clip planes must satisfy 0 < near < far (near = {near}, far = {far})")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("fov must be in (0, 180) degrees, aspect positive (fov = {fov}, aspect = {aspect})")]
    InvalidPerspective { fov: f32, aspect: f32 },

    #[error("viewport has no area ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },

    #[error("unknown demo '{0}', expected 'box' or 'line'")]
    UnknownDemo(String),
}

pub type Result<T> = std::result::Result<T, Error>;
