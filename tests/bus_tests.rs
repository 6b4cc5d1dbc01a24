// Host-side tests for the typed event bus and its DOM event contract.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod shading {
        include!("../src/core/shading.rs");
    }
    pub mod bus {
        include!("../src/core/bus.rs");
    }
}

use crate::core::bus::{AppEvent, EventBus};
use crate::core::camera::StageFocus;
use crate::core::shading::ShadingMode;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn dom_names_match_the_page_contract() {
    assert_eq!(AppEvent::StageState(StageFocus::ZoomOut).dom_name(), "stagestate");
    assert_eq!(AppEvent::ShaderState(ShadingMode::Map).dom_name(), "shaderstate");
    assert_eq!(AppEvent::SceneLoaded.dom_name(), "gltfloaded");
}

#[test]
fn payloads_carry_the_state_names() {
    assert_eq!(
        AppEvent::StageState(StageFocus::MainStage).payload(),
        Some("mainStage")
    );
    assert_eq!(
        AppEvent::ShaderState(ShadingMode::Textured).payload(),
        Some("textured")
    );
    assert_eq!(AppEvent::SceneLoaded.payload(), None);
}

#[test]
fn emit_reaches_every_listener_in_subscription_order() {
    let mut bus = EventBus::new();
    let seen: Rc<RefCell<Vec<(u32, AppEvent)>>> = Rc::new(RefCell::new(Vec::new()));
    for id in 0..3u32 {
        let seen = seen.clone();
        bus.subscribe(move |ev| seen.borrow_mut().push((id, *ev)));
    }
    bus.emit(AppEvent::SceneLoaded);
    bus.emit(AppEvent::StageState(StageFocus::SecondStage));
    let seen = seen.borrow();
    assert_eq!(seen.len(), 6);
    assert_eq!(
        seen[..3]
            .iter()
            .map(|(id, _)| *id)
            .collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(seen[..3].iter().all(|(_, e)| *e == AppEvent::SceneLoaded));
    assert!(seen[3..]
        .iter()
        .all(|(_, e)| *e == AppEvent::StageState(StageFocus::SecondStage)));
}

#[test]
fn listeners_can_mutate_captured_state() {
    let mut bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));
    let count_in = count.clone();
    bus.subscribe(move |ev| {
        if matches!(ev, AppEvent::ShaderState(_)) {
            *count_in.borrow_mut() += 1;
        }
    });
    bus.emit(AppEvent::ShaderState(ShadingMode::Basic));
    bus.emit(AppEvent::SceneLoaded);
    bus.emit(AppEvent::ShaderState(ShadingMode::Cad));
    assert_eq!(*count.borrow(), 2);
}
