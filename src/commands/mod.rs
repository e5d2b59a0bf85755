//! Browser Command Wrappers
//!
//! Thin bindings to browser APIs, organized by concern.

mod storage;
mod clipboard;
mod files;
mod dialog;

use wasm_bindgen::{JsCast, JsValue};

pub use storage::*;
pub use clipboard::*;
pub use files::*;
pub use dialog::*;

/// Current wall-clock time in milliseconds since the epoch
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Readable message for a rejected promise or thrown JS value
pub(crate) fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
