//! Camera and projection utilities
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};

use crate::error::{Error, Result};
use crate::transform::Transform;

/// Perspective camera.
///
/// The camera looks down its local `-Z` axis. Its orientation only changes
/// through [`Camera::look_at`], which aims it once from the current position.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view, in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        if !(fov > 0.0 && fov < 180.0 && aspect > 0.0 && aspect.is_finite()) {
            return Err(Error::InvalidPerspective { fov, aspect });
        }
        if !(near > 0.0 && near < far && far.is_finite()) {
            return Err(Error::InvalidClipPlanes { near, far });
        }

        Ok(Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            up: Vector3::y(),
            fov,
            aspect,
            near,
            far,
        })
    }

    /// Aim the camera at `target` from where it currently stands
    pub fn look_at(&mut self, target: Point3<f32>) {
        if (target - self.position).norm() < 1e-6 {
            log::warn!("look_at target coincides with camera position, ignoring");
            return;
        }
        let view = Isometry3::look_at_rh(&self.position, &target, &self.up);
        self.orientation = view.rotation.inverse();
    }

    /// Direction the camera faces, in world space
    pub fn forward(&self) -> Vector3<f32> {
        self.orientation * -Vector3::z()
    }

    /// Create the view matrix (world to camera)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let camera_to_world =
            Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation);
        camera_to_world.inverse().to_homogeneous()
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov.to_radians(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to 2D screen space
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let mvp =
            Transform::mvp_matrix(model_matrix, &self.view_matrix(), &self.projection_matrix());
        project_to_screen(&mvp, point, width, height)
    }
}

/// A projected point: pixel coordinates with the origin top-left, plus
/// normalized depth in `-1.0..=1.0` (smaller is closer)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Project `point` through a model-view-projection matrix.
///
/// Returns `None` for points behind the camera or outside the near/far range.
/// Points left or right of the screen are still returned so callers can clip
/// the primitives they belong to.
pub fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<ScreenPoint> {
    let clip = mvp * point.to_homogeneous();

    if clip.w <= f32::EPSILON {
        return None;
    }

    let ndc = clip.xyz() / clip.w;
    if ndc.z < -1.0 || ndc.z > 1.0 {
        return None;
    }

    Some(ScreenPoint {
        x: (ndc.x + 1.0) * 0.5 * width as f32,
        y: (1.0 - ndc.y) * 0.5 * height as f32,
        depth: ndc.z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        let mut camera = Camera::perspective(75.0, 800.0 / 600.0, 0.1, 1000.0).unwrap();
        camera.position.z = 5.0;
        camera
    }

    #[test]
    fn test_camera_creation() {
        let camera = camera();
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.forward() - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_invalid_clip_planes() {
        assert!(matches!(
            Camera::perspective(75.0, 1.0, 10.0, 1.0),
            Err(Error::InvalidClipPlanes { .. })
        ));
        assert!(Camera::perspective(75.0, 1.0, 0.0, 1.0).is_err());
        assert!(Camera::perspective(75.0, 1.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_invalid_fov_and_aspect() {
        for fov in [0.0, -10.0, 180.0, 270.0, f32::NAN] {
            assert!(matches!(
                Camera::perspective(fov, 1.0, 0.1, 1000.0),
                Err(Error::InvalidPerspective { .. })
            ));
        }
        for aspect in [0.0, -1.0, f32::INFINITY, f32::NAN] {
            assert!(matches!(
                Camera::perspective(75.0, aspect, 0.1, 1000.0),
                Err(Error::InvalidPerspective { .. })
            ));
        }
        assert!(Camera::perspective(179.0, 0.5, 0.1, 1000.0).is_ok());
    }

    #[test]
    fn test_origin_projects_to_center() {
        let screen = camera()
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!((screen.x - 400.0).abs() < 1e-3);
        assert!((screen.y - 300.0).abs() < 1e-3);
        assert!(screen.depth > -1.0 && screen.depth < 1.0);
    }

    #[test]
    fn test_fov_is_vertical_degrees() {
        // A point on the upper frustum edge lands on the top row
        let camera = camera();
        let edge = 5.0 * (37.5f32).to_radians().tan();
        let screen = camera
            .project_to_screen(&Point3::new(0.0, edge, 0.0), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!(screen.y.abs() < 1e-2);
    }

    #[test]
    fn test_point_behind_camera_is_dropped() {
        let camera = camera();
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_look_at_centers_target() {
        let mut camera = camera();
        camera.position.z = 20.0;
        camera.look_at(Point3::new(0.0, 1.0, 0.0));

        let screen = camera
            .project_to_screen(&Point3::new(0.0, 1.0, 0.0), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!((screen.x - 400.0).abs() < 1e-2);
        assert!((screen.y - 300.0).abs() < 1e-2);
        assert!(camera.forward().y > 0.0);
    }

    #[test]
    fn test_look_at_is_not_tracking() {
        let mut camera = camera();
        camera.look_at(Point3::new(0.0, 1.0, 0.0));
        let orientation = camera.orientation;
        camera.position.z = 50.0;
        assert_eq!(camera.orientation, orientation);
    }
}
