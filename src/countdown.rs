//! Header countdown wiring: a one-second interval driving the timer text,
//! and the date selector buttons that retarget it.

use crate::constants::{COUNTDOWN_ID, DATE_LABEL_ID, HEADLINE_ID};
use crate::core::constants::COUNTDOWN_PLACEHOLDER;
use crate::core::{format_countdown, FESTIVAL_DATES};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct TimerState {
    selected: usize,
    interval_id: Option<i32>,
}

pub fn wire_countdown(document: &web::Document) {
    let state = Rc::new(RefCell::new(TimerState {
        selected: 0,
        interval_id: None,
    }));

    apply_selection(document, 0);
    start_interval(document, &state);

    for (i, date) in FESTIVAL_DATES.iter().enumerate() {
        let doc = document.clone();
        let state = state.clone();
        dom::add_click_listener(document, date.element_id, move || {
            state.borrow_mut().selected = i;
            apply_selection(&doc, i);
            // A stopped timer restarts when a future date is picked.
            if state.borrow().interval_id.is_none() {
                start_interval(&doc, &state);
            }
        });
    }
}

fn apply_selection(document: &web::Document, index: usize) {
    let date = &FESTIVAL_DATES[index];
    dom::set_text(document, DATE_LABEL_ID, date.label);
    dom::set_text(document, HEADLINE_ID, date.headline);
    for d in &FESTIVAL_DATES {
        dom::remove_class(document, d.element_id, "active");
    }
    dom::add_class(document, date.element_id, "active");
    update_timer_text(document, date.target_ms);
}

/// One tick of the timer. Returns false once the target has passed.
fn update_timer_text(document: &web::Document, target_ms: f64) -> bool {
    match format_countdown(target_ms, js_sys::Date::now()) {
        Some(text) => {
            dom::set_text(document, COUNTDOWN_ID, &text);
            true
        }
        None => {
            dom::set_text(document, COUNTDOWN_ID, COUNTDOWN_PLACEHOLDER);
            false
        }
    }
}

fn start_interval(document: &web::Document, state: &Rc<RefCell<TimerState>>) {
    let doc = document.clone();
    let state_tick = state.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let target = FESTIVAL_DATES[state_tick.borrow().selected].target_ms;
        if !update_timer_text(&doc, target) {
            let mut s = state_tick.borrow_mut();
            if let Some(id) = s.interval_id.take() {
                if let Some(w) = web::window() {
                    w.clear_interval_with_handle(id);
                }
            }
        }
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        if let Ok(id) = w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1_000,
        ) {
            state.borrow_mut().interval_id = Some(id);
        }
    }
    closure.forget();
}
