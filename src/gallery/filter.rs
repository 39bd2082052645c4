use std::cell::RefCell;
use std::rc::Rc;

use crate::config::GalleryConfig;
use crate::dom::{Element, ElementRef};
use crate::utils::scheduler::{ScheduledTask, Scheduler};

pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_CLASS: &str = "show";

struct FilterItem {
    element: ElementRef,
    pending: RefCell<Option<ScheduledTask>>,
}

/// Category filter over the gallery grid.
///
/// Items are matched by CSS class against the control's `data-filter` token. Each item owns
/// at most one pending display change; a new selection cancels the stale one first.
pub struct GalleryFilter {
    controls: Vec<ElementRef>,
    items: Vec<FilterItem>,
    scheduler: Rc<dyn Scheduler>,
    config: GalleryConfig,
}

impl GalleryFilter {
    pub fn new(
        controls: Vec<ElementRef>,
        items: Vec<ElementRef>,
        scheduler: Rc<dyn Scheduler>,
        config: GalleryConfig,
    ) -> Self {
        let items = items
            .into_iter()
            .map(|element| FilterItem {
                element,
                pending: RefCell::new(None),
            })
            .collect();
        Self {
            controls,
            items,
            scheduler,
            config,
        }
    }

    /// Marks every item shown and activates the `all` control when the page has one.
    pub fn initialize(&self) {
        for item in &self.items {
            item.element.add_class(SHOW_CLASS);
        }
        let all = self.config.all_token.as_str();
        if let Some(index) = self
            .controls
            .iter()
            .position(|control| control.attribute("data-filter").as_deref() == Some(all))
        {
            self.activate(index);
        }
    }

    /// Handles a click on the filter control at `index`.
    pub fn select(&self, index: usize) {
        let Some(control) = self.controls.get(index) else {
            tracing::warn!("Filter control {} does not exist", index);
            return;
        };
        self.activate(index);
        let token = control
            .attribute("data-filter")
            .unwrap_or_else(|| self.config.all_token.clone());
        let shown = self.apply(&token);
        tracing::debug!("Filter '{}' shows {} of {} items", token, shown, self.items.len());
    }

    /// Shows items matching `token` and hides the rest. Returns how many are shown.
    pub fn apply(&self, token: &str) -> usize {
        let mut shown = 0;
        for item in &self.items {
            if let Some(stale) = item.pending.borrow_mut().take() {
                stale.cancel();
            }
            let visible = self.matches(item.element.as_ref(), token);
            let element = item.element.clone();
            let task = if visible {
                shown += 1;
                item.element.add_class(SHOW_CLASS);
                self.scheduler.schedule(
                    self.config.show_delay_ms,
                    Box::new(move || element.set_style("display", "block")),
                )
            } else {
                item.element.remove_class(SHOW_CLASS);
                self.scheduler.schedule(
                    self.config.hide_delay_ms,
                    Box::new(move || element.set_style("display", "none")),
                )
            };
            *item.pending.borrow_mut() = Some(task);
        }
        shown
    }

    pub fn matches(&self, item: &dyn Element, token: &str) -> bool {
        token == self.config.all_token || item.has_class(token)
    }

    /// Index of the active control, if exactly one is active.
    pub fn active_control(&self) -> Option<usize> {
        let mut active = self
            .controls
            .iter()
            .enumerate()
            .filter(|(_, control)| control.has_class(ACTIVE_CLASS))
            .map(|(index, _)| index);
        match (active.next(), active.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    fn activate(&self, index: usize) {
        for control in &self.controls {
            control.remove_class(ACTIVE_CLASS);
        }
        if let Some(control) = self.controls.get(index) {
            control.add_class(ACTIVE_CLASS);
        }
    }
}
