//! Geometry primitives: triangle meshes, boxes and polylines
use nalgebra::Point3;

/// A triangle face defined by three corner positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Append the two triangles of the quad `a b c d` (counter-clockwise)
    fn add_quad(&mut self, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, d: Point3<f32>) {
        self.add_triangle(Triangle::new(a, b, c));
        self.add_triangle(Triangle::new(a, c, d));
    }
}

/// An axis-aligned box centered on its local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Triangulate the six faces, wound counter-clockwise seen from outside
    pub fn to_mesh(&self) -> Mesh {
        let (hx, hy, hz) = (self.width / 2.0, self.height / 2.0, self.depth / 2.0);
        let p = |x: f32, y: f32, z: f32| Point3::new(x * hx, y * hy, z * hz);
        let mut mesh = Mesh::with_capacity(12);

        let faces = [
            // Front (+z)
            [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
            // Back (-z)
            [p(1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0)],
            // Top (+y)
            [p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0)],
            // Bottom (-y)
            [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
            // Right (+x)
            [p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0)],
            // Left (-x)
            [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
        ];
        for [a, b, c, d] in faces {
            mesh.add_quad(a, b, c, d);
        }

        mesh
    }
}

/// An open polyline through an ordered list of points
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub points: Vec<Point3<f32>>,
}

impl LineGeometry {
    pub fn from_points(points: impl IntoIterator<Item = Point3<f32>>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Consecutive point pairs; the last point is not joined back to the first
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_mesh_extents() {
        let mesh = BoxGeometry::new(2.0, 1.0, 1.5).to_mesh();
        assert_eq!(mesh.triangles.len(), 12);

        let points: Vec<_> = mesh.triangles.iter().flat_map(|t| t.vertices).collect();
        let max_x = points.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let max_y = points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let min_z = points.iter().map(|p| p.z).fold(f32::MAX, f32::min);
        assert!((max_x - 1.0).abs() < 1e-6);
        assert!((max_y - 0.5).abs() < 1e-6);
        assert!((min_z + 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_box_faces_point_outwards() {
        let mesh = BoxGeometry::new(2.0, 1.0, 1.5).to_mesh();
        for triangle in &mesh.triangles {
            let [a, b, c] = triangle.vertices;
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_line_segments_are_open() {
        let line = LineGeometry::from_points([
            Point3::new(-10.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(-10.0, 10.0, 0.0),
        ]);
        let segments: Vec<_> = line.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].1, Point3::new(-10.0, 10.0, 0.0));
        assert_ne!(segments[2].1, segments[0].0);
    }

    #[test]
    fn test_single_point_line_has_no_segments() {
        let line = LineGeometry::from_points([Point3::origin()]);
        assert_eq!(line.segments().count(), 0);
    }
}
