//! Page button wiring: shading toggle, back button, and the mobile stage
//! selector shown on narrow viewports instead of raycast picking.

use crate::constants::{BACK_BUTTON_ID, SHADER_BUTTON_ID, STAGE_BUTTON_IDS};
use crate::controls;
use crate::core::{CameraParams, EventBus, SceneVectors, ShadingMachine, StageFocus, StageId};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_shader_button(
    document: &web::Document,
    bus: Rc<RefCell<EventBus>>,
    machine: Rc<RefCell<ShadingMachine>>,
) {
    dom::add_click_listener(document, SHADER_BUTTON_ID, move || {
        controls::request_next_shading(&bus, &machine);
    });
}

pub fn wire_back_button(
    document: &web::Document,
    bus: Rc<RefCell<EventBus>>,
    cam_params: Rc<RefCell<CameraParams>>,
    vectors: Rc<RefCell<Option<SceneVectors>>>,
) {
    dom::add_click_listener(document, BACK_BUTTON_ID, move || {
        if let Some(v) = *vectors.borrow() {
            controls::request_focus(&bus, &cam_params, &v, StageFocus::ZoomOut);
        }
    });
}

pub fn wire_stage_buttons(
    document: &web::Document,
    bus: Rc<RefCell<EventBus>>,
    cam_params: Rc<RefCell<CameraParams>>,
    vectors: Rc<RefCell<Option<SceneVectors>>>,
) {
    for (i, &id) in STAGE_BUTTON_IDS.iter().enumerate() {
        let bus = bus.clone();
        let cam_params = cam_params.clone();
        let vectors = vectors.clone();
        let stage = StageId::ALL[i];
        dom::add_click_listener(document, id, move || {
            if let Some(v) = *vectors.borrow() {
                controls::toggle_stage(&bus, &cam_params, &v, stage);
            }
        });
    }
}
