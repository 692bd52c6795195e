//! Event wiring between the DOM and a [`LazyLoader`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Function;
use lazyview_core::{
    CandidateId, Container, Effect, HostError, LazyLoadSettings, LazyLoader, Notification,
    Trigger, ViewportFilter,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::host::DomHost;
use crate::options::{parse_options, JsOptions};
use crate::swap::{install_effect_keyframes, DomSwap};

/// Loader shared between the page's event listeners.
pub type SharedLoader = Rc<RefCell<LazyLoader<DomHost>>>;

struct Listener {
    target: EventTarget,
    event: String,
    closure: Closure<dyn FnMut(Event)>,
}

/// Live listeners of one `lazyload` call.
///
/// Dropping the binding removes them; [`forget`](Self::forget) keeps them
/// for the lifetime of the page.
pub struct LazyLoadBinding {
    loader: SharedLoader,
    listeners: Vec<Listener>,
}

impl LazyLoadBinding {
    pub fn loader(&self) -> &SharedLoader {
        &self.loader
    }

    /// Pending candidates matching `filter`.
    pub fn select(&self, filter: ViewportFilter) -> Result<Vec<Element>, JsValue> {
        let loader = self.loader.borrow();
        let ids = loader.filter(filter).map_err(host_error)?;
        Ok(ids
            .into_iter()
            .filter_map(|id| loader.element(id).cloned())
            .collect())
    }

    /// Leaks the listeners so they outlive this handle.
    pub fn forget(mut self) {
        for listener in self.listeners.drain(..) {
            listener.closure.forget();
        }
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            event: event.to_string(),
            closure,
        });
        Ok(())
    }
}

impl Drop for LazyLoadBinding {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let callback: &Function = listener.closure.as_ref().unchecked_ref();
            if let Err(err) = listener
                .target
                .remove_event_listener_with_callback(&listener.event, callback)
            {
                log::warn!("failed to remove `{}` listener: {err:?}", listener.event);
            }
        }
    }
}

pub(crate) fn host_error(err: HostError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Runs a notification unless the loader is already mid-pass.
fn dispatch(loader: &SharedLoader, notification: Notification) {
    let Ok(mut loader) = loader.try_borrow_mut() else {
        log::debug!("loader busy, dropping {notification:?}");
        return;
    };
    if let Err(err) = loader.notify(notification) {
        log::warn!("lazy load pass failed: {err}");
    }
}

fn fire(loader: &SharedLoader, id: CandidateId) {
    let Ok(mut loader) = loader.try_borrow_mut() else {
        log::debug!("loader busy, dropping trigger for {id:?}");
        return;
    };
    if let Err(err) = loader.trigger(id) {
        log::warn!("triggered load of {id:?} failed: {err}");
    }
}

/// Attaches the listeners a loader needs and runs the startup pass.
///
/// With a scroll trigger the container's `scroll` event runs passes; with a
/// custom trigger each candidate listens for that event and loads when it
/// fires. Window `resize` always runs a pass. The startup pass runs once
/// the document is parsed.
pub fn bind(loader: SharedLoader, window: &Window) -> Result<LazyLoadBinding, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let (trigger, container) = {
        let loader = loader.borrow();
        (
            loader.settings().trigger.clone(),
            loader.settings().container.clone(),
        )
    };
    let mut binding = LazyLoadBinding {
        loader: Rc::clone(&loader),
        listeners: Vec::new(),
    };

    match trigger {
        Trigger::Scroll => {
            let target: EventTarget = match container {
                Container::Viewport => window.clone().into(),
                Container::Element(element) => element.into(),
            };
            let shared = Rc::clone(&loader);
            binding.listen(target, "scroll", move |_| {
                dispatch(&shared, Notification::Scroll)
            })?;
        }
        Trigger::Custom(event) => {
            let candidates: Vec<(CandidateId, Element)> = loader
                .borrow()
                .candidates()
                .map(|(id, element)| (id, element.clone()))
                .collect();
            for (id, element) in candidates {
                let shared = Rc::clone(&loader);
                binding.listen(element.into(), &event, move |_| fire(&shared, id))?;
            }
        }
    }

    let shared = Rc::clone(&loader);
    binding.listen(window.clone().into(), "resize", move |_| {
        dispatch(&shared, Notification::Resize)
    })?;

    if document.ready_state() == "loading" {
        let shared = Rc::clone(&loader);
        binding.listen(document.into(), "DOMContentLoaded", move |_| {
            dispatch(&shared, Notification::Startup)
        })?;
    } else {
        dispatch(&loader, Notification::Startup);
    }
    Ok(binding)
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Lazy-loads every element matching `selector`.
pub fn lazyload(
    selector: &str,
    settings: LazyLoadSettings<Element>,
) -> Result<LazyLoadBinding, JsValue> {
    lazyload_with_hooks(selector, settings, None, None)
}

/// Like [`lazyload`], with settings read from a JavaScript options object.
pub fn lazyload_with_options(selector: &str, options: &JsValue) -> Result<LazyLoadBinding, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no global document"))?;
    let JsOptions {
        settings,
        appear,
        load,
    } = parse_options(options, &document)?;
    lazyload_with_hooks(selector, settings, appear, load)
}

fn lazyload_with_hooks(
    selector: &str,
    settings: LazyLoadSettings<Element>,
    appear: Option<Function>,
    load: Option<Function>,
) -> Result<LazyLoadBinding, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    if settings.effect != Effect::Show {
        install_effect_keyframes(&document)?;
    }

    let elements = query_all(&document, selector)?;
    log::debug!("lazyload `{selector}`: {} elements", elements.len());

    let mut loader =
        LazyLoader::new(DomHost::new(window.clone()), settings).with_actuator(DomSwap);
    let ids = loader
        .register_all(elements.iter().cloned())
        .map_err(host_error)?;
    let by_id: Rc<HashMap<CandidateId, Element>> =
        Rc::new(ids.into_iter().zip(elements).collect());

    if let Some(hook) = appear {
        let by_id = Rc::clone(&by_id);
        loader.on_appear(move |event| call_hook(&hook, by_id.get(&event.id), event.elements_left));
    }
    if let Some(hook) = load {
        let by_id = Rc::clone(&by_id);
        loader.on_load(move |event| call_hook(&hook, by_id.get(&event.id), event.elements_left));
    }

    bind(Rc::new(RefCell::new(loader)), &window)
}

/// Calls a JS hook with the element as `this` and the remaining count.
fn call_hook(hook: &Function, element: Option<&Element>, elements_left: usize) {
    let this = element.map_or(JsValue::UNDEFINED, |element| element.clone().into());
    if let Err(err) = hook.call1(&this, &JsValue::from(elements_left as u32)) {
        log::warn!("lazyload hook threw: {err:?}");
    }
}
