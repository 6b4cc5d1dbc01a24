//! Loading overlay and back-button visibility.

use crate::constants::{BACK_BUTTON_ID, LOADING_HIDE_DELAY_MS, LOADING_ID, LOADING_PROGRESS_ID};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn set_progress(document: &web::Document, percent: u32) {
    dom::set_text(document, LOADING_PROGRESS_ID, &format!("{}%", percent.min(100)));
}

/// Fade the overlay out shortly after the model lands, so the 100% state
/// is actually visible.
pub fn hide_loading_soon(document: &web::Document) {
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        dom::add_class(&doc, LOADING_ID, "loaded");
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            LOADING_HIDE_DELAY_MS,
        );
    }
    closure.forget();
}

pub fn show_back_button(document: &web::Document) {
    dom::add_class(document, BACK_BUTTON_ID, "visible");
}

pub fn hide_back_button(document: &web::Document) {
    dom::remove_class(document, BACK_BUTTON_ID, "visible");
}
