//! Renderable objects held by a scene
use nalgebra::{Matrix4, Point3};

use crate::geometry::{BoxGeometry, LineGeometry};
use crate::material::{LineBasicMaterial, MeshBasicMaterial};
use crate::transform::{Rotation, Transform};

/// The shape an object draws, paired with its material
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Mesh {
        geometry: BoxGeometry,
        material: MeshBasicMaterial,
    },
    Line {
        geometry: LineGeometry,
        material: LineBasicMaterial,
    },
}

/// A primitive placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Object3D {
    pub primitive: Primitive,
    pub position: Point3<f32>,
    pub rotation: Rotation,
}

impl Object3D {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            position: Point3::origin(),
            rotation: Rotation::zero(),
        }
    }

    pub fn mesh(geometry: BoxGeometry, material: MeshBasicMaterial) -> Self {
        Self::new(Primitive::Mesh { geometry, material })
    }

    pub fn line(geometry: LineGeometry, material: LineBasicMaterial) -> Self {
        Self::new(Primitive::Line { geometry, material })
    }

    /// Local-to-world matrix: rotate about the local origin, then translate
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let p = self.position;
        Transform::translation_matrix(p.x, p.y, p.z) * Transform::rotation_matrix(&self.rotation)
    }
}
