pub mod buttons;
pub mod pointer;

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pause the frame loop while the tab is blurred; the loop itself keeps
/// its clock from jumping on resume.
pub fn wire_visibility_pause(running: Rc<RefCell<bool>>) {
    let Some(window) = web::window() else { return };

    let running_blur = running.clone();
    let on_blur = Closure::wrap(Box::new(move || {
        *running_blur.borrow_mut() = false;
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
    on_blur.forget();

    let on_focus = Closure::wrap(Box::new(move || {
        *running.borrow_mut() = true;
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
    on_focus.forget();
}
