//! Gallery demo: a long column of images that load as they scroll in.
//!
//! Build with `wasm-pack build apps/web-demo --target web` and serve
//! `apps/web-demo/static/index.html` next to the generated `pkg/`.

use std::cell::RefCell;
use std::rc::Rc;

use lazyview_core::{Effect, LazyLoadSettings, LazyLoader};
use lazyview_platform_web::{
    bind, install_effect_keyframes, lazyload_with_options, select, DomHost, DomSwap,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

const GALLERY_ID: &str = "gallery";
const IMAGE_COUNT: usize = 120;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    let window = web_sys::window().ok_or("no global window exists")?;
    let document = window.document().ok_or("should have a document on window")?;
    let images = populate_gallery(&document)?;
    install_effect_keyframes(&document)?;

    let settings = LazyLoadSettings::new()
        .with_threshold(200.0)
        .with_effect(Effect::FadeIn, Some(300));
    let mut loader = LazyLoader::new(DomHost::new(window.clone()), settings).with_actuator(DomSwap);
    // Registered before binding so the startup pass is logged too.
    loader.on_load(|event| {
        log::info!("loaded {:?}, {} left", event.id, event.elements_left);
    });
    loader
        .register_all(images)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    bind(Rc::new(RefCell::new(loader)), &window)?.forget();
    Ok(())
}

fn populate_gallery(document: &Document) -> Result<Vec<Element>, JsValue> {
    let gallery = document
        .get_element_by_id(GALLERY_ID)
        .ok_or_else(|| format!("element with id '{GALLERY_ID}' not found"))?;
    let mut images = Vec::with_capacity(IMAGE_COUNT);
    for index in 0..IMAGE_COUNT {
        let image = document.create_element("img")?;
        image.set_class_name("lazy");
        image.set_attribute("width", "640")?;
        image.set_attribute("height", "360")?;
        image.set_attribute(
            "data-original",
            &format!("https://picsum.photos/seed/lazyview-{index}/640/360"),
        )?;
        gallery.append_child(&image)?;
        images.push(image);
    }
    Ok(images)
}

/// `lazyload(selector, options)` for plain JavaScript callers.
#[wasm_bindgen(js_name = lazyload)]
pub fn lazyload_js(selector: &str, options: JsValue) -> Result<(), JsValue> {
    lazyload_with_options(selector, &options)?.forget();
    Ok(())
}

/// Number of elements matching `selector` that pass a viewport filter.
#[wasm_bindgen(js_name = countMatching)]
pub fn count_matching(selector: &str, filter: &str) -> Result<usize, JsValue> {
    Ok(select(selector, filter)?.len())
}
