//! Browser observers feeding the guard.
//!
//! - [`ZoneObservers`] - one `ResizeObserver` per upload list
//! - [`TabObserver`] - `MutationObserver` on the upload tab's `class`
//!
//! Both own their JS closures and disconnect when dropped.

use std::rc::Rc;

use upload_guard::GuardResult;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MutationObserver, MutationObserverInit, ResizeObserver, ResizeObserverEntry};

use crate::dom::{dom_error, query};

/// Receives `(zone index, upload list height)`.
pub type HeightCallback = Rc<dyn Fn(usize, f64)>;

struct ZoneObserver {
    selector: String,
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

/// Size observers of every upload list.
pub struct ZoneObservers {
    zones: Vec<ZoneObserver>,
}

impl ZoneObservers {
    /// Build detached observers, one per upload list selector.
    pub fn new(list_selectors: &[String], on_height: HeightCallback) -> GuardResult<Self> {
        let mut zones = Vec::with_capacity(list_selectors.len());

        for (index, selector) in list_selectors.iter().enumerate() {
            let on_height = Rc::clone(&on_height);
            let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
                // a single target per observer, so one entry per notification
                if let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() {
                    on_height(index, entry.content_rect().height());
                }
            }) as Box<dyn FnMut(js_sys::Array)>);

            let observer =
                ResizeObserver::new(callback.as_ref().unchecked_ref()).map_err(dom_error)?;

            zones.push(ZoneObserver {
                selector: selector.clone(),
                observer,
                _callback: callback,
            });
        }

        Ok(Self { zones })
    }

    /// Start observing every upload list present in `document`.
    ///
    /// Lists are looked up again on each call. A missing list is skipped;
    /// its zone keeps its last known activity.
    pub fn attach(&self, document: &Document) {
        for zone in &self.zones {
            match query(document, &zone.selector) {
                Ok(list) => zone.observer.observe(&list),
                Err(e) => log::warn!("Upload zone not observed: {}", e),
            }
        }
    }

    /// Stop observing every upload list.
    pub fn detach(&self) {
        for zone in &self.zones {
            zone.observer.disconnect();
        }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Drop for ZoneObservers {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Watches `class` changes of one element.
pub struct TabObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut()>,
}

impl TabObserver {
    /// Call `on_class` with the element's `class` attribute after each change.
    pub fn new(tab: &Element, on_class: impl FnMut(String) + 'static) -> GuardResult<Self> {
        let mut on_class = on_class;
        let target = tab.clone();
        // the records only say "changed"; read the current value instead
        let callback = Closure::wrap(Box::new(move || {
            on_class(target.class_name());
        }) as Box<dyn FnMut()>);

        let observer =
            MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(dom_error)?;

        let options = MutationObserverInit::new();
        options.set_attributes(true);
        options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
        observer
            .observe_with_options(tab, &options)
            .map_err(dom_error)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for TabObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
