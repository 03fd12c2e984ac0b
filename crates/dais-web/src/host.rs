//! Wiring a `Page` into the browser
//!
//! Bindings become `gloo` event listeners, observations become an
//! `IntersectionObserver`, and the scheduler is pumped by a single
//! `gloo` timeout armed for the next due timer.

use std::cell::RefCell;
use std::rc::Rc;

use dais_core::{
    Attachment, Binding, EventData, IntersectionEntry, ListenTarget, Observation, Page, SiteConfig,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent,
};

use crate::document::{WebClock, WebDocument};

type SharedPage = Rc<RefCell<Page<WebDocument, WebClock>>>;
type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

thread_local! {
    static MOUNTED: RefCell<Option<MountedPage>> = const { RefCell::new(None) };
}

/// Timeout driving the scheduler
///
/// The timeout that is currently running is parked in `retired` rather than
/// dropped, since its closure is still on the stack.
#[derive(Default)]
struct Pump {
    current: Option<(i64, Timeout)>,
    retired: Option<Timeout>,
}

type SharedPump = Rc<RefCell<Pump>>;

/// A page attached to the live document
///
/// Dropping it removes every listener; call [`MountedPage::detach`] to also
/// reset the behaviors and cancel their timers.
pub struct MountedPage {
    page: SharedPage,
    listeners: Vec<EventListener>,
    observer: Option<(IntersectionObserver, ObserverCallback)>,
    pump: SharedPump,
}

impl MountedPage {
    pub fn detach(mut self) {
        self.listeners.clear();
        if let Some((observer, _callback)) = self.observer.take() {
            observer.disconnect();
        }
        *self.pump.borrow_mut() = Pump::default();
        self.page.borrow_mut().detach();
    }
}

/// Attach the behaviors to the current document
pub fn mount(config: SiteConfig) -> Result<MountedPage, JsValue> {
    let doc = WebDocument::from_window().ok_or_else(|| JsValue::from_str("no window or document"))?;
    let window = doc.window().clone();
    let document = doc.document().clone();

    let page = Page::new(doc, WebClock, config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let page: SharedPage = Rc::new(RefCell::new(page));
    let pump: SharedPump = Rc::default();

    let Attachment { bindings, observations } = page.borrow_mut().attach();

    let listeners = bindings
        .into_iter()
        .map(|binding| {
            let target: &EventTarget = match &binding.target {
                ListenTarget::Window => window.as_ref(),
                ListenTarget::Document => document.as_ref(),
                ListenTarget::Element(element) => element.as_ref(),
            };
            listen(target, binding.clone(), &page, &pump)
        })
        .collect();

    let observer = match observations.into_iter().next() {
        Some(observation) => Some(observe(observation, &page, &pump)?),
        None => None,
    };

    arm(&page, &pump);
    Ok(MountedPage {
        page,
        listeners,
        observer,
        pump,
    })
}

fn event_data(event: &Event) -> EventData<Element> {
    EventData {
        target: event.target().and_then(|target| target.dyn_into::<Element>().ok()),
        key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
    }
}

fn listen(
    target: &EventTarget,
    binding: Binding<Element>,
    page: &SharedPage,
    pump: &SharedPump,
) -> EventListener {
    let page = page.clone();
    let pump = pump.clone();
    let event_type = binding.kind.name();
    let options = if binding.passive {
        EventListenerOptions::default()
    } else {
        EventListenerOptions::enable_prevent_default()
    };

    EventListener::new_with_options(target, event_type, options, move |event| {
        let outcome = page.borrow_mut().fire(&binding.handler, &event_data(event));
        if outcome.prevent_default {
            event.prevent_default();
        }
        arm(&page, &pump);
    })
}

fn observe(
    observation: Observation<Element>,
    page: &SharedPage,
    pump: &SharedPump,
) -> Result<(IntersectionObserver, ObserverCallback), JsValue> {
    let page = page.clone();
    let pump = pump.clone();
    let callback: ObserverCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
        let entries: Vec<_> = entries
            .iter()
            .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
            .map(|entry| IntersectionEntry {
                node: entry.target(),
                is_intersecting: entry.is_intersecting(),
                ratio: entry.intersection_ratio(),
            })
            .collect();
        page.borrow_mut().intersect(&entries);
        arm(&page, &pump);
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(observation.threshold));
    init.set_root_margin(&observation.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for node in &observation.nodes {
        observer.observe(node);
    }
    Ok((observer, callback))
}

/// Make sure a timeout is pending for the page's next due timer
fn arm(page: &SharedPage, pump: &SharedPump) {
    let next = {
        let page = page.borrow();
        page.next_due().zip(page.time_until_next())
    };
    let mut slot = pump.borrow_mut();
    let Some((due, delay)) = next else {
        slot.current = None;
        return;
    };
    if matches!(&slot.current, Some((armed, _)) if *armed == due) {
        return;
    }

    let page_cb = page.clone();
    let pump_cb = pump.clone();
    let delay = u32::try_from(delay).unwrap_or(u32::MAX);
    let timeout = Timeout::new(delay, move || {
        {
            let mut slot = pump_cb.borrow_mut();
            slot.retired = slot.current.take().map(|(_, timeout)| timeout);
        }
        page_cb.borrow_mut().run_due();
        arm(&page_cb, &pump_cb);
    });
    slot.current = Some((due, timeout));
}

fn mount_and_store() {
    match mount(SiteConfig::default()) {
        Ok(mounted) => MOUNTED.with(|slot| {
            if let Some(previous) = slot.borrow_mut().replace(mounted) {
                previous.detach();
            }
        }),
        Err(err) => tracing::warn!("Failed to mount page behaviors: {:?}", err),
    }
}

/// Mount on `DOMContentLoaded`, or right away if the markup is already parsed
pub(crate) fn mount_when_ready() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let loading = Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .is_some_and(|state| state == "loading");

    if loading {
        EventListener::once(&document, "DOMContentLoaded", |_| mount_and_store()).forget();
    } else {
        mount_and_store();
    }
}

pub(crate) fn unmount_current() {
    if let Some(mounted) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
        mounted.detach();
    }
}
