//! Gallery page: category filter plus lightbox.

pub mod catalog;
pub mod filter;
pub mod lightbox;

use std::rc::Rc;

use crate::config::GalleryConfig;
use crate::dom::{Browser, ElementRef};
use crate::utils::scheduler::Scheduler;

pub use catalog::{Catalog, EntryRef, GalleryEntry};
pub use filter::GalleryFilter;
pub use lightbox::{Direction, Lightbox, LightboxState, LightboxView};

/// Elements the gallery controller works on.
pub struct GalleryHooks {
    pub filter_controls: Vec<ElementRef>,
    pub items: Vec<ElementRef>,
    pub view_triggers: Vec<ElementRef>,
    /// `None` when the page has no lightbox markup.
    pub lightbox: Option<LightboxView>,
}

pub struct GalleryController {
    filter: GalleryFilter,
    lightbox: Option<Lightbox>,
    triggers: Vec<ElementRef>,
    catalog: Rc<Catalog>,
}

impl GalleryController {
    pub fn new(
        hooks: GalleryHooks,
        catalog: Rc<Catalog>,
        browser: Rc<dyn Browser>,
        scheduler: Rc<dyn Scheduler>,
        config: GalleryConfig,
    ) -> Self {
        if hooks.view_triggers.len() != catalog.len() {
            tracing::debug!(
                "Gallery has {} view triggers for {} catalog entries",
                hooks.view_triggers.len(),
                catalog.len()
            );
        }
        let lightbox = hooks
            .lightbox
            .map(|view| Lightbox::new(catalog.clone(), view, browser));
        Self {
            filter: GalleryFilter::new(hooks.filter_controls, hooks.items, scheduler, config),
            lightbox,
            triggers: hooks.view_triggers,
            catalog,
        }
    }

    pub fn initialize(&self) {
        self.filter.initialize();
    }

    pub fn filter(&self) -> &GalleryFilter {
        &self.filter
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn on_filter_click(&self, control: usize) {
        self.filter.select(control);
    }

    /// Opens the entry named by the trigger at `trigger`. Returns the opened index.
    pub fn on_view_click(&self, trigger: usize) -> Option<usize> {
        let lightbox = self.lightbox.as_ref()?;
        let element = self.triggers.get(trigger)?;
        let Some(entry) = EntryRef::from_trigger(element.as_ref()) else {
            tracing::warn!("View trigger {} has no data-entry or data-index", trigger);
            return None;
        };
        let Some(index) = self.catalog.resolve(&entry) else {
            tracing::warn!("View trigger {} points at unknown entry {:?}", trigger, entry);
            return None;
        };
        lightbox.open(index).then_some(index)
    }

    pub fn on_previous(&self) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.navigate(Direction::Previous);
        }
    }

    pub fn on_next(&self) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.navigate(Direction::Next);
        }
    }

    pub fn on_close(&self) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.close();
        }
    }

    pub fn on_key(&self, key: &str) -> bool {
        self.lightbox
            .as_ref()
            .map(|lightbox| lightbox.handle_key(key))
            .unwrap_or(false)
    }

    pub fn on_modal_click(&self, on_backdrop: bool) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.handle_modal_click(on_backdrop);
        }
    }
}
