//! spin3d Web - WebGL2 front-end running in the browser
//!
//! On load the box demo is appended to `document.body` and animated with
//! `requestAnimationFrame`. `run_demo("line")` starts the polyline demo.

use std::cell::RefCell;
use std::rc::Rc;

use spin3d_core::{Animator, Demo, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

mod renderer;

pub use renderer::{vertex_data, DrawMode, WebGlRenderer};

type SharedAnimator = Rc<RefCell<Animator<WebGlRenderer>>>;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

/// Viewport matching the browser window's inner size
fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Viewport::new(width as u32, height as u32).map_err(to_js)
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Already set when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);

    run_demo(Demo::default().name())
}

/// Stage the named demo, attach its canvas to the page and animate it
#[wasm_bindgen]
pub fn run_demo(name: &str) -> Result<(), JsValue> {
    let demo: Demo = name.parse().map_err(to_js)?;

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let viewport = window_viewport(&window)?;
    let stage = demo.stage(viewport).map_err(to_js)?;
    let renderer = WebGlRenderer::new(&document, viewport)?;
    body.append_child(renderer.canvas())?;

    animate(Rc::new(RefCell::new(Animator::new(stage, renderer))))
}

/// Tick once per display refresh, forever.
///
/// The callback re-registers itself before ticking. It keeps itself alive
/// through the shared slot, so the loop lives as long as the page.
fn animate(animator: SharedAnimator) -> Result<(), JsValue> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);

    *slot.borrow_mut() = Some(Closure::new(move || {
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                log::error!("failed to schedule frame: {:?}", e);
            }
        }
        if let Err(e) = animator.borrow_mut().tick() {
            log::error!("failed to draw frame: {:?}", e);
        }
    }));

    let first = slot.borrow();
    let callback = first
        .as_ref()
        .ok_or_else(|| JsValue::from_str("animation callback missing"))?;
    request_animation_frame(callback)?;
    Ok(())
}
