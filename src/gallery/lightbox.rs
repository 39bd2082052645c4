use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{Browser, ElementRef};
use crate::gallery::catalog::Catalog;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

/// `(current + direction) mod len`, wrapping in both directions.
pub fn wrap_index(current: usize, direction: Direction, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + direction.step()).rem_euclid(len as isize) as usize
}

/// The modal's slots and controls.
pub struct LightboxView {
    pub modal: ElementRef,
    pub image: ElementRef,
    pub title: ElementRef,
    pub description: ElementRef,
    pub category: ElementRef,
    pub previous: Option<ElementRef>,
    pub next: Option<ElementRef>,
}

/// Modal viewer over the catalog, addressed by entry index.
pub struct Lightbox {
    catalog: Rc<Catalog>,
    view: LightboxView,
    browser: Rc<dyn Browser>,
    state: Cell<LightboxState>,
}

impl Lightbox {
    pub fn new(catalog: Rc<Catalog>, view: LightboxView, browser: Rc<dyn Browser>) -> Self {
        Self {
            catalog,
            view,
            browser,
            state: Cell::new(LightboxState::Closed),
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state.get(), LightboxState::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state.get() {
            LightboxState::Open { index } => Some(index),
            LightboxState::Closed => None,
        }
    }

    /// Opens the modal on `index`. Returns false, leaving the state untouched, when the index
    /// is outside the catalog.
    pub fn open(&self, index: usize) -> bool {
        if index >= self.catalog.len() {
            tracing::warn!(
                "Lightbox index {} out of range ({} entries)",
                index,
                self.catalog.len()
            );
            return false;
        }
        self.show(index);
        self.view.modal.add_class(ACTIVE_CLASS);
        self.browser.set_scroll_locked(true);
        true
    }

    /// Moves one entry in `direction`. Does nothing while closed.
    pub fn navigate(&self, direction: Direction) -> Option<usize> {
        let current = self.current_index()?;
        let index = wrap_index(current, direction, self.catalog.len());
        self.show(index);
        Some(index)
    }

    pub fn close(&self) {
        if !self.is_open() {
            return;
        }
        self.view.modal.remove_class(ACTIVE_CLASS);
        self.browser.set_scroll_locked(false);
        self.state.set(LightboxState::Closed);
    }

    /// Keyboard contract: Escape closes, arrows navigate, only while open.
    /// Returns true when the key was consumed.
    pub fn handle_key(&self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            "Escape" => self.close(),
            "ArrowLeft" => {
                self.navigate(Direction::Previous);
            }
            "ArrowRight" => {
                self.navigate(Direction::Next);
            }
            _ => return false,
        }
        true
    }

    /// Clicks on the modal close it only when they land on the backdrop itself.
    pub fn handle_modal_click(&self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }

    fn show(&self, index: usize) {
        let Some(entry) = self.catalog.get(index) else {
            return;
        };
        self.view.image.set_attribute("src", &entry.image_path);
        self.view.image.set_attribute("alt", &entry.title);
        self.view.title.set_text(&entry.title);
        self.view.description.set_text(&entry.description);
        self.view.category.set_text(&entry.category);
        for control in [&self.view.previous, &self.view.next].into_iter().flatten() {
            control.set_style("display", "flex");
        }
        self.state.set(LightboxState::Open { index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        assert_eq!(wrap_index(0, Direction::Previous, 3), 2);
        assert_eq!(wrap_index(2, Direction::Next, 3), 0);
        assert_eq!(wrap_index(1, Direction::Next, 3), 2);
        assert_eq!(wrap_index(0, Direction::Next, 1), 0);
        assert_eq!(wrap_index(0, Direction::Previous, 1), 0);
    }

    #[test]
    fn navigation_is_total() {
        for len in 1..8usize {
            for current in 0..len {
                for direction in [Direction::Previous, Direction::Next] {
                    let expected =
                        (current as isize + direction.step()).rem_euclid(len as isize) as usize;
                    let next = wrap_index(current, direction, len);
                    assert_eq!(next, expected);
                    assert!(next < len);
                }
            }
        }
    }
}
