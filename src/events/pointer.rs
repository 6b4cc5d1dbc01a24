//! Pointer wiring: orbit drag, wheel zoom, and click-to-focus. A drag
//! that travels further than the click slop suppresses the click on
//! release, so orbiting never accidentally selects a stage.

use crate::constants::CLICK_SLOP_PX;
use crate::controls;
use crate::core::{CameraParams, EventBus, OrbitCamera, SceneVectors, StageId};
use std::cell::RefCell;
use std::f32::consts::{PI, TAU};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
pub struct PointerState {
    /// Last CSS-pixel position on the canvas.
    pub x: f64,
    pub y: f64,
    pub ndc_x: f32,
    pub ndc_y: f32,
    pub down: bool,
    /// Pointer travel since pointerdown, in CSS pixels.
    pub drag_px: f64,
    /// Stage under the pointer, refreshed by the frame loop's raycast.
    pub hover: Option<StageId>,
}

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub cam_params: Rc<RefCell<CameraParams>>,
    pub bus: Rc<RefCell<EventBus>>,
    pub vectors: Rc<RefCell<Option<SceneVectors>>>,
    /// Raycast selection only runs on wide viewports.
    pub desktop: bool,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn canvas_pos(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (f64, f64, f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        ev.client_x() as f64 - rect.left(),
        ev.client_y() as f64 - rect.top(),
        rect.width().max(1.0),
        rect.height().max(1.0),
    )
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y, cw, ch) = canvas_pos(&ev, &w.canvas);
        let mut p = w.pointer.borrow_mut();
        if p.down {
            let dx = ((x - p.x) / cw) as f32;
            let dy = ((y - p.y) / ch) as f32;
            p.drag_px += (x - p.x).hypot(y - p.y);
            w.orbit.borrow_mut().rotate(dx * TAU, dy * PI);
        }
        p.x = x;
        p.y = y;
        p.ndc_x = (x / cw * 2.0 - 1.0) as f32;
        p.ndc_y = -(y / ch * 2.0 - 1.0) as f32;
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        {
            let mut p = w.pointer.borrow_mut();
            p.down = true;
            p.drag_px = 0.0;
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (was_click, hover) = {
            let mut p = w.pointer.borrow_mut();
            p.down = false;
            (p.drag_px <= CLICK_SLOP_PX, p.hover)
        };
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if !w.desktop || !was_click {
            return;
        }
        if let (Some(stage), Some(vectors)) = (hover, *w.vectors.borrow()) {
            controls::toggle_stage(&w.bus, &w.cam_params, &vectors, stage);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = (ev.delta_y() / 100.0).clamp(-1.0, 1.0) as f32;
        w.orbit.borrow_mut().zoom(delta);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
