use crate::core::AppEvent;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn add_class(document: &web::Document, element_id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().add_1(class);
    }
}

#[inline]
pub fn remove_class(document: &web::Document, element_id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().remove_1(class);
    }
}

/// Bridge a bus event onto the document as a CustomEvent, carrying the
/// payload in `detail.state` for external page scripts.
pub fn dispatch_app_event(document: &web::Document, event: &AppEvent) {
    let init = web::CustomEventInit::new();
    if let Some(state) = event.payload() {
        let detail = js_sys::Object::new();
        _ = js_sys::Reflect::set(&detail, &"state".into(), &state.into());
        init.set_detail(&detail);
    }
    if let Ok(ev) =
        web::CustomEvent::new_with_event_init_dict(event.dom_name(), &init)
    {
        _ = document.dispatch_event(&ev);
    }
}
