//! The requestAnimationFrame loop: advances the camera lerp, the orbit,
//! the shading ramp and the sprite pulses, runs the hover raycast, and
//! hands one [`render::FrameInput`] to the GPU per tick.

use crate::core::{
    pick_stage, screen_ray, CameraParams, OrbitCamera, Pickable, SceneVariant, SceneVectors,
    ShadingMachine, ShadingMode, StageSprite,
};
use crate::core::constants::{FOV_LANDSCAPE_DEG, FOV_PORTRAIT_DEG};
use crate::events::pointer::PointerState;
use crate::render::{self, MeshData};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Meshes and variants parked by the loader until the frame loop uploads
/// them on its own tick.
pub type PendingScene = (Vec<MeshData>, Box<[SceneVariant; 4]>);

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub machine: Rc<RefCell<ShadingMachine>>,
    pub cam_params: Rc<RefCell<CameraParams>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub vectors: Rc<RefCell<Option<SceneVectors>>>,
    pub pickables: Rc<RefCell<Vec<Pickable>>>,
    pub pending_scene: Rc<RefCell<Option<PendingScene>>>,
    pub running: Rc<RefCell<bool>>,
    pub desktop: bool,
    pub sprites: Vec<StageSprite>,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        // Clamp so a background tab resuming does not produce a huge step.
        let dt = (now - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now;
        if !*self.running.borrow() {
            return;
        }

        if let Some((meshes, variants)) = self.pending_scene.borrow_mut().take() {
            if let Some(g) = &mut self.gpu {
                g.upload_scene(&meshes, &variants);
            }
            if let Some(v) = *self.vectors.borrow() {
                for s in &mut self.sprites {
                    s.place(v.stage(s.stage));
                }
            }
        }

        self.cam_params.borrow_mut().step(dt);
        {
            let mut orbit = self.orbit.borrow_mut();
            orbit.apply_params(&self.cam_params.borrow());
            orbit.update(dt);
            let w = self.canvas.width().max(1);
            let h = self.canvas.height().max(1);
            let aspect = w as f32 / h as f32;
            orbit.aspect = aspect;
            orbit.fov_y_radians = if aspect < 1.0 {
                FOV_PORTRAIT_DEG.to_radians()
            } else {
                FOV_LANDSCAPE_DEG.to_radians()
            };
        }

        self.update_hover();
        self.machine.borrow_mut().step(dt);

        let hover = self.pointer.borrow().hover;
        for s in &mut self.sprites {
            if hover == Some(s.stage) {
                s.animate_active(dt);
            } else {
                s.animate_idle(dt);
            }
        }

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            let machine = self.machine.borrow();
            g.set_bloom(machine.current() == ShadingMode::Textured);
            let orbit = self.orbit.borrow();
            let input = render::FrameInput {
                view_proj: orbit.projection_matrix() * orbit.view_matrix(),
                eye: orbit.eye(),
                aspect: orbit.aspect,
                pass: machine.pass_config(),
                sprites: [
                    (self.sprites[0].position, self.sprites[0].scale),
                    (self.sprites[1].position, self.sprites[1].scale),
                    (self.sprites[2].position, self.sprites[2].scale),
                ],
                sprites_visible: self.vectors.borrow().is_some(),
            };
            if let Err(e) = g.render(&input) {
                log::error!("[render] {:?}", e);
            }
        }
    }

    /// Raycast the pointer against the stage pickables and mirror the
    /// result in the cursor style. Skipped on narrow viewports and while
    /// an orbit drag is in flight.
    fn update_hover(&mut self) {
        if !self.desktop {
            return;
        }
        let (ndc_x, ndc_y, down) = {
            let p = self.pointer.borrow();
            (p.ndc_x, p.ndc_y, p.down)
        };
        let pickables = self.pickables.borrow();
        let hover = if down || pickables.is_empty() {
            None
        } else {
            let (ro, rd) = screen_ray(&self.orbit.borrow(), ndc_x, ndc_y);
            pick_stage(ro, rd, &pickables)
        };
        self.pointer.borrow_mut().hover = hover;
        let cursor = if hover.is_some() { "pointer" } else { "default" };
        _ = self.canvas.style().set_property("cursor", cursor);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
