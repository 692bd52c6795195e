//! Settings from a plain JavaScript options object.

use js_sys::{Array, Function, Object};
use lazyview_core::{Container, LazyLoadSettings};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

/// Parsed options: the settings plus the JS hooks, which only make sense
/// once candidates are bound to elements.
pub struct JsOptions {
    pub settings: LazyLoadSettings<Element>,
    pub appear: Option<Function>,
    pub load: Option<Function>,
}

/// Reads `{ threshold: 200, effect: "fadeIn", container: "#feed", ... }`.
///
/// `container` takes a selector, an element or `window`. `appear` and
/// `load` take functions. Every other key goes through
/// [`LazyLoadSettings::apply_option`], numbers and booleans as their text.
/// `undefined` and `null` give the defaults.
pub fn parse_options(options: &JsValue, document: &Document) -> Result<JsOptions, JsValue> {
    let mut parsed = JsOptions {
        settings: LazyLoadSettings::new(),
        appear: None,
        load: None,
    };
    if options.is_undefined() || options.is_null() {
        return Ok(parsed);
    }
    let object = options
        .dyn_ref::<Object>()
        .ok_or_else(|| JsValue::from_str("lazyload options must be an object"))?;

    for entry in Object::entries(object).iter() {
        let pair: Array = entry.unchecked_into();
        let key = pair
            .get(0)
            .as_string()
            .ok_or_else(|| JsValue::from_str("option keys must be strings"))?;
        let value = pair.get(1);

        match key.as_str() {
            "container" => parsed.settings.container = container_from(&value, document)?,
            "appear" => parsed.appear = Some(function_from(&key, value)?),
            "load" => parsed.load = Some(function_from(&key, value)?),
            _ => {
                let text = text_from(&value).ok_or_else(|| {
                    JsValue::from_str(&format!("option `{key}` has an unsupported value"))
                })?;
                parsed
                    .settings
                    .apply_option(&key, &text)
                    .map_err(|err| JsValue::from_str(&err.to_string()))?;
            }
        }
    }
    Ok(parsed)
}

fn container_from(value: &JsValue, document: &Document) -> Result<Container<Element>, JsValue> {
    if value.is_undefined() || value.is_null() || value.dyn_ref::<Window>().is_some() {
        return Ok(Container::Viewport);
    }
    if let Some(selector) = value.as_string() {
        return document
            .query_selector(&selector)?
            .map(Container::Element)
            .ok_or_else(|| JsValue::from_str(&format!("no container matches `{selector}`")));
    }
    value
        .dyn_ref::<Element>()
        .map(|element| Container::Element(element.clone()))
        .ok_or_else(|| JsValue::from_str("container must be a selector, an element or window"))
}

fn function_from(key: &str, value: JsValue) -> Result<Function, JsValue> {
    value
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("option `{key}` must be a function")))
}

fn text_from(value: &JsValue) -> Option<String> {
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    if let Some(number) = value.as_f64() {
        return Some(number.to_string());
    }
    value.as_bool().map(|flag| flag.to_string())
}
