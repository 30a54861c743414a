//! The two spinning-primitive demos
use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;

use crate::animation::{Spin, Stage};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{BoxGeometry, LineGeometry};
use crate::material::{LineBasicMaterial, MeshBasicMaterial};
use crate::object::Object3D;
use crate::projection::Camera;
use crate::scene::Scene;
use crate::viewport::Viewport;

pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

/// Radians added per tick on each spinning axis
pub const SPIN_STEP: f32 = 0.01;

pub const BOX_COLOR: Color = Color::from_hex(0x00ff00);
pub const LINE_COLOR: Color = Color::from_hex(0x0000ff);

pub const LINE_POINTS: [[f32; 3]; 4] = [
    [-10.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 10.0, 0.0],
    [-10.0, 10.0, 0.0],
];

/// Which primitive to put on stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Demo {
    /// A green 2 x 1 x 1.5 box spinning around X and Y
    #[default]
    Box,
    /// A blue open polyline spinning around all three axes
    Line,
}

impl Demo {
    pub const ALL: [Demo; 2] = [Demo::Box, Demo::Line];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Box => "box",
            Demo::Line => "line",
        }
    }

    /// Build the scene, camera and spin for this demo
    pub fn stage(self, viewport: Viewport) -> Result<Stage> {
        let mut camera = Camera::perspective(FOV_DEGREES, viewport.aspect(), NEAR, FAR)?;
        let mut scene = Scene::new();

        let (subject, spin) = match self {
            Demo::Box => {
                let subject = scene.add(Object3D::mesh(
                    BoxGeometry::new(2.0, 1.0, 1.5),
                    MeshBasicMaterial::new(BOX_COLOR),
                ));
                // Back off so the camera is not inside the box
                camera.position.z = 5.0;
                (subject, Spin::xy(SPIN_STEP))
            }
            Demo::Line => {
                let points = LINE_POINTS.map(|[x, y, z]| Point3::new(x, y, z));
                let subject = scene.add(Object3D::line(
                    LineGeometry::from_points(points),
                    LineBasicMaterial::new(LINE_COLOR),
                ));
                camera.position.z = 20.0;
                camera.look_at(Point3::new(0.0, 1.0, 0.0));
                (subject, Spin::xyz(SPIN_STEP))
            }
        };

        log::info!(
            "staged {} demo for {}x{} viewport",
            self.name(),
            viewport.width,
            viewport.height
        );
        log::debug!(
            "camera at {:?}, fov {} deg, aspect {:.3}",
            camera.position,
            camera.fov,
            camera.aspect
        );

        Ok(Stage {
            scene,
            camera,
            subject,
            spin,
        })
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownDemo(s.to_string()))
    }
}
