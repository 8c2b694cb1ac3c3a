//! Browser handles
//!
//! Both return `None` off the wasm target, so controllers that touch the
//! page stay usable in native unit tests.

pub fn window() -> Option<web_sys::Window> {
    if cfg!(target_arch = "wasm32") {
        web_sys::window()
    } else {
        None
    }
}

pub fn document() -> Option<web_sys::Document> {
    window()?.document()
}
