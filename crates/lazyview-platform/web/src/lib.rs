//! Browser adapter for lazyview.
//!
//! [`DomHost`] measures real elements, [`DomSwap`] writes their attributes
//! and styles, and [`bind`] hooks a loader up to `scroll`, `resize`,
//! `DOMContentLoaded` and custom trigger events. [`lazyload`] does all of
//! that for a CSS selector in one call.

mod binding;
mod host;
mod options;
mod swap;

pub use binding::{bind, lazyload, lazyload_with_options, LazyLoadBinding, SharedLoader};
pub use host::DomHost;
pub use options::{parse_options, JsOptions};
pub use swap::{install_effect_keyframes, DomSwap};

use lazyview_core::{filter_elements, ViewportFilter};
use wasm_bindgen::JsValue;
use web_sys::Element;

/// Elements matching `selector` that pass a named viewport filter such as
/// `"below-the-fold"` or `":in-viewport"`.
pub fn select(selector: &str, filter: &str) -> Result<Vec<Element>, JsValue> {
    let filter = ViewportFilter::from_name(filter)
        .ok_or_else(|| JsValue::from_str(&format!("unknown viewport filter `{filter}`")))?;
    let host = DomHost::from_global().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let document = host
        .window()
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let elements = binding::query_all(&document, selector)?;
    let matched = filter_elements(&host, &elements, filter).map_err(binding::host_error)?;
    Ok(matched.into_iter().cloned().collect())
}
