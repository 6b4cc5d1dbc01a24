//! Interaction entry points shared by pointer clicks and the mobile
//! buttons: camera state requests and shading transitions. Every request
//! is announced on the bus before the lerp or ramp starts.

use crate::core::{
    pose_for, AppEvent, CameraParams, EventBus, SceneVectors, ShadingMachine, StageFocus, StageId,
};
use std::cell::RefCell;
use std::rc::Rc;

pub fn focus_for_stage(stage: StageId) -> StageFocus {
    match stage {
        StageId::Main => StageFocus::MainStage,
        StageId::Second => StageFocus::SecondStage,
        StageId::Third => StageFocus::ThirdStage,
    }
}

pub fn request_focus(
    bus: &Rc<RefCell<EventBus>>,
    cam_params: &Rc<RefCell<CameraParams>>,
    vectors: &SceneVectors,
    focus: StageFocus,
) {
    let pose = pose_for(focus, vectors.target_for(focus));
    cam_params.borrow_mut().request_state(&pose);
    bus.borrow_mut().emit(AppEvent::StageState(focus));
}

/// Selecting the stage the camera is already on zooms back out.
pub fn toggle_stage(
    bus: &Rc<RefCell<EventBus>>,
    cam_params: &Rc<RefCell<CameraParams>>,
    vectors: &SceneVectors,
    stage: StageId,
) {
    let focus = focus_for_stage(stage);
    let next = if cam_params.borrow().focus == focus {
        StageFocus::ZoomOut
    } else {
        focus
    };
    request_focus(bus, cam_params, vectors, next);
}

pub fn request_next_shading(
    bus: &Rc<RefCell<EventBus>>,
    machine: &Rc<RefCell<ShadingMachine>>,
) {
    let target = machine.borrow_mut().request_next();
    bus.borrow_mut().emit(AppEvent::ShaderState(target));
}
