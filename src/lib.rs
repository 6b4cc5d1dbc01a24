#![cfg(target_arch = "wasm32")]
//! Festival venue map: an interactive 3D site map with four shading
//! treatments, stage focus camera states and a lineup countdown.

use crate::core::{AppEvent, CameraParams, EventBus, OrbitCamera, ShadingMachine, StageFocus, StageSprite, StageId};
use crate::core::constants::NARROW_SCREEN_PX;
use crate::events::pointer::PointerState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod controls;
pub mod core;
mod countdown;
mod dom;
mod events;
mod frame;
mod loader;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Desktop / mobile split, decided once at startup like the page layout.
fn is_desktop(window: &web::Window) -> bool {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map(|w| w >= NARROW_SCREEN_PX)
        .unwrap_or(true)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("venue-map-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let desktop = is_desktop(&window);
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;

    // Shared state between the DOM handlers and the frame loop
    let bus = Rc::new(RefCell::new(EventBus::new()));
    let machine = Rc::new(RefCell::new(ShadingMachine::new()));
    let cam_params = Rc::new(RefCell::new(CameraParams::new()));
    let orbit = Rc::new(RefCell::new(OrbitCamera::new(aspect)));
    let pointer = Rc::new(RefCell::new(PointerState::default()));
    let vectors = Rc::new(RefCell::new(None));
    let pickables = Rc::new(RefCell::new(Vec::new()));
    let pending_scene = Rc::new(RefCell::new(None));
    let running = Rc::new(RefCell::new(true));

    // Bus -> document bridge, for page scripts listening on stagestate /
    // shaderstate / gltfloaded.
    {
        let doc = document.clone();
        bus.borrow_mut().subscribe(move |ev| {
            dom::dispatch_app_event(&doc, ev);
        });
    }
    // The back button only shows while a stage is focused.
    {
        let doc = document.clone();
        bus.borrow_mut().subscribe(move |ev| {
            if let AppEvent::StageState(focus) = ev {
                if *focus == StageFocus::ZoomOut {
                    overlay::hide_back_button(&doc);
                } else {
                    overlay::show_back_button(&doc);
                }
            }
        });
    }

    countdown::wire_countdown(&document);
    events::buttons::wire_shader_button(&document, bus.clone(), machine.clone());
    events::buttons::wire_back_button(
        &document,
        bus.clone(),
        cam_params.clone(),
        vectors.clone(),
    );
    if !desktop {
        events::buttons::wire_stage_buttons(
            &document,
            bus.clone(),
            cam_params.clone(),
            vectors.clone(),
        );
    }
    events::pointer::wire_pointer_handlers(events::pointer::PointerWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
        orbit: orbit.clone(),
        cam_params: cam_params.clone(),
        bus: bus.clone(),
        vectors: vectors.clone(),
        desktop,
    });
    events::wire_visibility_pause(running.clone());

    let gpu = frame::init_gpu(&canvas).await;

    // Fetch the site model in the background; the frame loop uploads it
    // when it lands.
    {
        let document = document.clone();
        let bus = bus.clone();
        let cam_params = cam_params.clone();
        let vectors = vectors.clone();
        let pickables = pickables.clone();
        let pending_scene = pending_scene.clone();
        spawn_local(async move {
            let progress_doc = document.clone();
            let result = loader::load_scene(constants::SCENE_URL, move |pct| {
                overlay::set_progress(&progress_doc, pct);
            })
            .await;
            match result {
                Ok(scene) => {
                    *vectors.borrow_mut() = Some(scene.vectors);
                    *pickables.borrow_mut() = scene.pickables;
                    *pending_scene.borrow_mut() =
                        Some((scene.meshes, Box::new(scene.variants)));
                    bus.borrow_mut().emit(AppEvent::SceneLoaded);
                    // Snap the camera lerp onto the real ground target.
                    controls::request_focus(
                        &bus,
                        &cam_params,
                        &scene.vectors,
                        StageFocus::ZoomOut,
                    );
                    overlay::hide_loading_soon(&document);
                }
                Err(e) => log::error!("[scene] load error: {:?}", e),
            }
        });
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        machine,
        cam_params,
        orbit,
        pointer,
        vectors,
        pickables,
        pending_scene,
        running,
        desktop,
        sprites: StageId::ALL.iter().map(|&s| StageSprite::new(s)).collect(),
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
