//! spin3d core library - scene graph, camera and animation driver
//!
//! This library holds everything that does not depend on a display: the
//! scene container and its primitives, perspective projection, the two demo
//! stages and the tick loop that spins them. Front-ends plug in through the
//! [`Renderer`] and [`FrameScheduler`] traits.

pub mod animation;
pub mod color;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod material;
pub mod object;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use animation::{Animator, FrameScheduler, Spin, Stage};
pub use color::Color;
pub use demo::Demo;
pub use error::{Error, Result};
pub use geometry::{BoxGeometry, LineGeometry, Mesh, Triangle};
pub use material::{LineBasicMaterial, MeshBasicMaterial};
pub use object::{Object3D, Primitive};
pub use projection::{Camera, ScreenPoint};
pub use renderer::Renderer;
pub use scene::{ObjectId, Scene};
pub use transform::{Rotation, Transform};
pub use viewport::Viewport;
