//! 3D transformation matrices and rotation state
use nalgebra::{Matrix4, Vector3};

/// Euler rotation around three axes (in radians), applied in XYZ order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians). Angles are not wrapped.
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn rotate_by(&mut self, delta: &Vector3<f32>) {
        self.rotate(delta.x, delta.y, delta.z);
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from Euler angles.
    ///
    /// XYZ order: the result is `Rx * Ry * Rz`, so a point is turned around
    /// Z first and around X last.
    pub fn rotation_matrix(rotation: &Rotation) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_accumulates() {
        let mut rotation = Rotation::zero();
        assert_eq!(rotation, Rotation::new(0.0, 0.0, 0.0));

        rotation.rotate(0.1, 0.2, 0.3);
        rotation.rotate_by(&Vector3::new(0.1, 0.0, 0.0));
        assert!((rotation.x - 0.2).abs() < 1e-6);
        assert!((rotation.y - 0.2).abs() < 1e-6);
        assert!((rotation.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&Rotation::zero());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_xyz_order() {
        // Z first: +X goes to +Y, then X turns +Y into +Z
        let rotation = Rotation::new(FRAC_PI_2, 0.0, FRAC_PI_2);
        let matrix = Transform::rotation_matrix(&rotation);
        let p = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_mvp_applies_model_first() {
        let model = Transform::translation_matrix(1.0, 0.0, 0.0);
        let view = Transform::translation_matrix(0.0, 0.0, -5.0);
        let mvp = Transform::mvp_matrix(&model, &view, &Matrix4::identity());
        let p = mvp.transform_point(&Point3::origin());
        assert!((p - Point3::new(1.0, 0.0, -5.0)).norm() < 1e-6);
    }
}
