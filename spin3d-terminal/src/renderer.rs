//! ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector4};
use spin3d_core::projection::project_to_screen;
use spin3d_core::{
    Camera, Color, LineGeometry, Mesh, Primitive, Renderer, Scene, ScreenPoint, Viewport,
};
use std::io::{self, Write};

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: u32 = 2;

const MESH_GLYPH: char = '█';
const LINE_GLYPH: char = '*';

/// Viewport matching a `cols` x `rows` terminal, in square "pixels"
pub fn terminal_viewport(cols: u16, rows: u16) -> spin3d_core::Result<Viewport> {
    Viewport::new(cols as u32, rows as u32 * CELL_ASPECT)
}

/// One character cell of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Color>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        color: None,
    };
}

/// ASCII renderer that rasterizes a scene into colored terminal characters
/// and writes each frame to `out`
pub struct AsciiRenderer<W> {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
    out: W,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(viewport: Viewport, out: W) -> Self {
        let mut renderer = Self {
            width: 0,
            height: 0,
            depth_buffer: Vec::new(),
            cells: Vec::new(),
            out,
        };
        renderer.set_size(viewport);
        renderer
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::EMPTY);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grid size in characters
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Fill the cell buffer from the scene without writing anything out
    pub fn rasterize(&mut self, scene: &Scene, camera: &Camera) {
        self.clear();
        let view_projection = camera.view_projection();

        for (_, object) in scene.iter() {
            let mvp = view_projection * object.model_matrix();
            match &object.primitive {
                Primitive::Mesh { geometry, material } => {
                    self.render_mesh(&geometry.to_mesh(), &mvp, material.color);
                }
                Primitive::Line { geometry, material } => {
                    self.render_line(geometry, &mvp, material.color);
                }
            }
        }
    }

    fn project(&self, mvp: &Matrix4<f32>, point: &Point3<f32>) -> Option<ScreenPoint> {
        project_to_screen(mvp, point, self.width as u32, self.height as u32)
    }

    fn render_mesh(&mut self, mesh: &Mesh, mvp: &Matrix4<f32>, color: Color) {
        let cell = Cell {
            glyph: MESH_GLYPH,
            color: Some(color),
        };

        for triangle in &mesh.triangles {
            let [a, b, c] = triangle.vertices;
            // Drop triangles with a corner behind the camera
            let (Some(a), Some(b), Some(c)) =
                (self.project(mvp, &a), self.project(mvp, &b), self.project(mvp, &c))
            else {
                continue;
            };
            self.rasterize_triangle([a, b, c], cell);
        }
    }

    fn render_line(&mut self, line: &LineGeometry, mvp: &Matrix4<f32>, color: Color) {
        let cell = Cell {
            glyph: LINE_GLYPH,
            color: Some(color),
        };

        for (start, end) in line.segments() {
            let start = mvp * start.to_homogeneous();
            let end = mvp * end.to_homogeneous();
            if let Some((a, b)) = clip_segment(start, end) {
                let a = self.to_screen(a);
                let b = self.to_screen(b);
                self.rasterize_segment(a, b, cell);
            }
        }
    }

    /// Viewport mapping for a clip-space point already inside the near and
    /// far planes
    fn to_screen(&self, clip: Vector4<f32>) -> ScreenPoint {
        let ndc = clip.xyz() / clip.w;
        ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth: ndc.z.clamp(-1.0, 1.0),
        }
    }

    fn rasterize_triangle(&mut self, [v0, v1, v2]: [ScreenPoint; 3], cell: Cell) {
        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);

                let weights = barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), p);
                if let Some((w0, w1, w2)) = weights {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                        self.plot(x, y, depth, cell);
                    }
                }
            }
        }
    }

    /// Walk the segment one cell at a time (DDA)
    fn rasterize_segment(&mut self, a: ScreenPoint, b: ScreenPoint, cell: Cell) {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (a.x + dx * t).floor() as i32;
            let y = (a.y + dy * t).floor() as i32;
            let depth = a.depth + (b.depth - a.depth) * t;
            self.plot(x, y, depth, cell);
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, cell: Cell) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth <= self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.cells[idx] = cell;
        }
    }

    /// Write the cell buffer to the output, one row per terminal line
    pub fn present(&mut self) -> io::Result<()> {
        let mut current: Option<Color> = None;

        for y in 0..self.height {
            self.out.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if cell.color.is_some() && cell.color != current {
                    if let Some(Color { r, g, b }) = cell.color {
                        self.out.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                    }
                    current = cell.color;
                }
                self.out.queue(Print(cell.glyph))?;
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    type Error = io::Error;

    fn set_size(&mut self, viewport: Viewport) {
        self.width = viewport.width as usize;
        self.height = (viewport.height / CELL_ASPECT).max(1) as usize;

        let size = self.width * self.height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.cells = vec![Cell::EMPTY; size];
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width as u32,
            height: self.height as u32 * CELL_ASPECT,
        }
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> io::Result<()> {
        self.rasterize(scene, camera);
        self.present()
    }
}

/// Trim a clip-space segment to the part between the near and far planes.
///
/// Returns `None` when the whole segment lies outside. Sides of the screen
/// are left to [`AsciiRenderer::plot`].
fn clip_segment(a: Vector4<f32>, b: Vector4<f32>) -> Option<(Vector4<f32>, Vector4<f32>)> {
    let (mut t0, mut t1) = (0.0f32, 1.0f32);

    // Signed distances to the near (z >= -w) and far (z <= w) planes
    for (da, db) in [(a.z + a.w, b.z + b.w), (a.w - a.z, b.w - b.z)] {
        if da < 0.0 && db < 0.0 {
            return None;
        }
        if da < 0.0 {
            t0 = t0.max(da / (da - db));
        } else if db < 0.0 {
            t1 = t1.min(da / (da - db));
        }
    }

    if t0 > t1 {
        return None;
    }
    Some((a.lerp(&b, t0), a.lerp(&b, t1)))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
