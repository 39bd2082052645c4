//! Browser bindings: `web_sys` implementations of the [`crate::dom`] traits, event wiring and
//! the module entry point.

pub mod bind;
pub mod element;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::{GalleryConfig, InteractionConfig};
use crate::dom::Browser;
use crate::error::SiteError;
use crate::gallery::Catalog;
use crate::utils::logging;
use crate::utils::scheduler::{Scheduler, TimerScheduler};

pub use element::{DomControl, DomElement, DomForm, ObserverSubscription, WebBrowser};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    boot().map_err(JsValue::from)
}

/// Initialises logging and mounts both controllers once the document has parsed.
pub fn boot() -> Result<(), SiteError> {
    let config = InteractionConfig::default();
    logging::init(&config.log_directive);

    let window = web_sys::window().ok_or(SiteError::NoWindow)?;
    let document = window.document().ok_or(SiteError::NoDocument)?;

    if document.ready_state() == "loading" {
        let (deferred_window, deferred_document) = (window.clone(), document.clone());
        let on_ready = Closure::once(move || {
            mount(&deferred_window, &deferred_document, config);
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        return Ok(());
    }

    mount(&window, &document, config);
    Ok(())
}

/// A named start-up step. Its failure is logged and does not stop the steps after it.
pub type MountStep<'a> = (&'static str, Box<dyn FnOnce() -> Result<(), SiteError> + 'a>);

pub fn step<'a>(
    component: &'static str,
    run: impl FnOnce() -> Result<(), SiteError> + 'a,
) -> MountStep<'a> {
    (component, Box::new(run))
}

/// Runs every step in order and returns how many started.
pub fn mount_all(steps: Vec<MountStep<'_>>) -> usize {
    let mut started = 0;
    for (component, step) in steps {
        match step() {
            Ok(()) => started += 1,
            Err(err) => tracing::error!("Failed to start {}: {}", component, err),
        }
    }
    started
}

fn mount(window: &Window, document: &Document, config: InteractionConfig) {
    let browser: Rc<dyn Browser> = Rc::new(WebBrowser::new(window.clone(), document.clone()));
    let scheduler: Rc<dyn Scheduler> = Rc::new(TimerScheduler);

    let page_browser = browser.clone();
    let page_scheduler = scheduler.clone();
    let steps = vec![
        step("page interactions", move || {
            let page = bind::bind_page(window, document, page_browser, page_scheduler, config)?;
            page.initialize_page();
            Ok(())
        }),
        step("gallery", move || mount_gallery(document, browser, scheduler)),
    ];
    let started = mount_all(steps);
    tracing::debug!("{} of 2 components started", started);
}

fn mount_gallery(
    document: &Document,
    browser: Rc<dyn Browser>,
    scheduler: Rc<dyn Scheduler>,
) -> Result<(), SiteError> {
    let catalog = Rc::new(Catalog::embedded()?);
    match bind::bind_gallery(document, browser, scheduler, catalog, GalleryConfig::default())? {
        Some(gallery) => {
            gallery.initialize();
            tracing::info!("Gallery ready with {} entries", gallery.catalog().len());
        }
        None => tracing::debug!("No gallery markup on this page"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_component_does_not_block_the_next() {
        let gallery_started = Cell::new(false);
        let steps = vec![
            step("page interactions", || {
                Err(SiteError::Dom("IntersectionObserver is not defined".into()))
            }),
            step("gallery", || {
                gallery_started.set(true);
                Ok(())
            }),
        ];

        assert_eq!(mount_all(steps), 1);
        assert!(gallery_started.get());
    }

    #[test]
    fn every_component_starts_when_nothing_fails() {
        let steps = vec![step("page interactions", || Ok(())), step("gallery", || Ok(()))];
        assert_eq!(mount_all(steps), 2);
    }
}
