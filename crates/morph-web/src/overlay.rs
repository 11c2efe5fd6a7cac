use wasm_bindgen::JsCast;
use web_sys as web;

/// Update the gesture status line. No-ops when the element is absent.
pub fn set_status(document: &web::Document, text: &str, color: &str) {
    if let Some(el) = document.get_element_by_id("gesture-status") {
        el.set_text_content(Some(text));
        if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
            let _ = html.style().set_property("color", color);
        }
    }
}
