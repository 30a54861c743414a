//! WebGL2 renderer drawing into a canvas
use spin3d_core::{Camera, Primitive, Renderer, Scene, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation,
};

const VERTEX_SHADER_SOURCE: &str = r#"#version 300 es
in vec3 a_position;
uniform mat4 u_mvp;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
"#;

/// Flat color, no lighting
const FRAGMENT_SHADER_SOURCE: &str = r#"#version 300 es
precision mediump float;
uniform vec3 u_color;
out vec4 frag_color;

void main() {
    frag_color = vec4(u_color, 1.0);
}
"#;

/// How a vertex buffer is assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    LineStrip,
}

impl DrawMode {
    fn gl_mode(self) -> u32 {
        match self {
            DrawMode::Triangles => Gl::TRIANGLES,
            DrawMode::LineStrip => Gl::LINE_STRIP,
        }
    }
}

/// Flatten a primitive into `xyz` positions in model space
pub fn vertex_data(primitive: &Primitive) -> (Vec<f32>, DrawMode) {
    match primitive {
        Primitive::Mesh { geometry, .. } => {
            let data = geometry
                .to_mesh()
                .triangles
                .iter()
                .flat_map(|t| t.vertices)
                .flat_map(|p| [p.x, p.y, p.z])
                .collect();
            (data, DrawMode::Triangles)
        }
        Primitive::Line { geometry, .. } => {
            let data = geometry.points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
            (data, DrawMode::LineStrip)
        }
    }
}

/// Geometry already uploaded for one scene object
struct GpuPrimitive {
    buffer: WebGlBuffer,
    mode: DrawMode,
    vertex_count: i32,
}

/// Hardware-accelerated renderer owning its `<canvas>`
pub struct WebGlRenderer {
    canvas: HtmlCanvasElement,
    gl: Gl,
    program: WebGlProgram,
    position_attrib: u32,
    u_mvp: WebGlUniformLocation,
    u_color: WebGlUniformLocation,
    // Indexed by ObjectId; scene geometry never changes once added
    primitives: Vec<Option<GpuPrimitive>>,
    viewport: Viewport,
}

impl WebGlRenderer {
    /// Create a detached canvas sized to `viewport`
    pub fn new(document: &Document, viewport: Viewport) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("WebGL2 not supported"))?
            .dyn_into::<Gl>()?;

        let vertex_shader = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER_SOURCE)?;
        let fragment_shader = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER_SOURCE)?;
        let program = link_program(&gl, &vertex_shader, &fragment_shader)?;

        let position_attrib = gl.get_attrib_location(&program, "a_position");
        if position_attrib < 0 {
            return Err(JsValue::from_str("a_position attribute missing"));
        }
        let uniform = |name: &str| {
            gl.get_uniform_location(&program, name)
                .ok_or_else(|| JsValue::from_str(&format!("{} uniform missing", name)))
        };
        let u_mvp = uniform("u_mvp")?;
        let u_color = uniform("u_color")?;

        gl.enable(Gl::DEPTH_TEST);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);

        let mut renderer = Self {
            canvas,
            gl,
            program,
            position_attrib: position_attrib as u32,
            u_mvp,
            u_color,
            primitives: Vec::new(),
            viewport,
        };
        renderer.set_size(viewport);
        Ok(renderer)
    }

    /// The drawable surface, for attaching to the document
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn upload(&self, primitive: &Primitive) -> Result<GpuPrimitive, JsValue> {
        let (data, mode) = vertex_data(primitive);
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("Failed to create vertex buffer"))?;

        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        let array = js_sys::Float32Array::from(data.as_slice());
        self.gl
            .buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, Gl::STATIC_DRAW);

        Ok(GpuPrimitive {
            buffer,
            mode,
            vertex_count: (data.len() / 3) as i32,
        })
    }
}

impl Renderer for WebGlRenderer {
    type Error = JsValue;

    fn set_size(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
        self.viewport = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), JsValue> {
        let view_projection = camera.view_projection();

        self.gl
            .viewport(0, 0, self.viewport.width as i32, self.viewport.height as i32);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        self.gl.use_program(Some(&self.program));

        for (id, object) in scene.iter() {
            let index = id.index();
            if self.primitives.len() <= index {
                self.primitives.resize_with(index + 1, || None);
            }
            if self.primitives[index].is_none() {
                let uploaded = self.upload(&object.primitive)?;
                self.primitives[index] = Some(uploaded);
            }
            let Some(gpu) = &self.primitives[index] else {
                continue;
            };

            let color = match &object.primitive {
                Primitive::Mesh { material, .. } => material.color,
                Primitive::Line { material, .. } => material.color,
            };
            let [r, g, b] = color.to_rgb_f32();
            let mvp = view_projection * object.model_matrix();

            let gl = &self.gl;
            gl.uniform_matrix4fv_with_f32_array(Some(&self.u_mvp), false, mvp.as_slice());
            gl.uniform3f(Some(&self.u_color), r, g, b);
            gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&gpu.buffer));
            gl.vertex_attrib_pointer_with_i32(self.position_attrib, 3, Gl::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(self.position_attrib);
            gl.draw_arrays(gpu.mode.gl_mode(), 0, gpu.vertex_count);
        }

        Ok(())
    }
}

/// Compile a shader
fn compile_shader(gl: &Gl, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| JsValue::from_str("Failed to create shader"))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let error = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(JsValue::from_str(&format!("Failed to compile shader: {}", error)));
    }

    Ok(shader)
}

fn link_program(
    gl: &Gl,
    vertex_shader: &WebGlShader,
    fragment_shader: &WebGlShader,
) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("Failed to create program"))?;

    gl.attach_shader(&program, vertex_shader);
    gl.attach_shader(&program, fragment_shader);
    gl.link_program(&program);

    if !gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let error = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(JsValue::from_str(&format!("Failed to link program: {}", error)));
    }

    Ok(program)
}
