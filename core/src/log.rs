//! Logging utilities
//!
//! Browser builds forward to the devtools console; every other build
//! compiles these calls away to no-ops.

#![allow(unused)]

#[cfg(feature = "browser")]
mod imp {
    use wasm_bindgen::JsValue;

    pub fn info(msg: &str) {
        web_sys::console::info_1(&JsValue::from_str(msg));
    }

    pub fn warn(msg: &str) {
        web_sys::console::warn_1(&JsValue::from_str(msg));
    }

    pub fn error(msg: &str) {
        web_sys::console::error_1(&JsValue::from_str(msg));
    }

    pub fn debug(label: &str, msg: &str) {
        web_sys::console::debug_2(&JsValue::from_str(label), &JsValue::from_str(msg));
    }

    pub fn action(name: &str, details: &str) {
        web_sys::console::log_2(&JsValue::from_str(name), &JsValue::from_str(details));
    }
}

#[cfg(not(feature = "browser"))]
mod imp {
    /// Log an info message
    #[inline(always)]
    pub fn info(_msg: &str) {}

    /// Log a warning message
    #[inline(always)]
    pub fn warn(_msg: &str) {}

    /// Log an error message
    #[inline(always)]
    pub fn error(_msg: &str) {}

    /// Log a debug message with a label
    #[inline(always)]
    pub fn debug(_label: &str, _msg: &str) {}

    /// Log an action being performed
    #[inline(always)]
    pub fn action(_name: &str, _details: &str) {}
}

pub use imp::*;
