//! The drawing surface contract shared by every front-end
use crate::projection::Camera;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Draws a scene as seen by a camera.
///
/// Renderers only borrow the scene, so drawing twice without changing it
/// yields the same frame.
pub trait Renderer {
    type Error;

    /// Resize the output surface
    fn set_size(&mut self, viewport: Viewport);

    fn viewport(&self) -> Viewport;

    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}
