//! Collaborator traits for the parts of the page the controllers touch.
//!
//! The controllers never query the document themselves; they are handed these handles at
//! construction. [`crate::web`] implements them over `web_sys`, tests implement them with
//! recording fakes.

use std::rc::Rc;

pub type ElementRef = Rc<dyn Element>;
pub type ControlRef = Rc<dyn FormControl>;

pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    /// Adds `class` when `on` is true, removes it otherwise.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    /// Sets an inline style property. An empty value clears it.
    fn set_style(&self, property: &str, value: &str);

    fn set_text(&self, text: &str);

    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;

    /// Detaches the element from the document. Detached elements ignore further removal.
    fn remove(&self);
}

/// An input, select or textarea inside a form.
pub trait FormControl: Element {
    /// The control's `name`, falling back to its `id`.
    fn name(&self) -> String;
    fn value(&self) -> String;
    fn is_required(&self) -> bool;

    /// Display text of the selected option, for selects.
    fn selected_label(&self) -> Option<String> {
        None
    }
}

pub trait Form {
    fn controls(&self) -> Vec<ControlRef>;
    fn reset(&self);

    fn control(&self, name: &str) -> Option<ControlRef> {
        self.controls().into_iter().find(|c| c.name() == name)
    }
}

/// Description of an element to create under `<body>`.
#[derive(Debug, Clone, Copy)]
pub struct NewElement<'a> {
    pub class: &'a str,
    pub text: Option<&'a str>,
    pub css: &'a str,
    pub children: &'a [NewElement<'a>],
}

/// Window- and document-level operations.
pub trait Browser {
    fn scroll_offset(&self) -> f64;
    /// Smoothly scrolls the window so `top` sits at the viewport's top edge.
    fn scroll_to(&self, top: f64);
    /// Suspends or restores page scrolling through the body's overflow.
    fn set_scroll_locked(&self, locked: bool);
    fn open_in_new_tab(&self, url: &str);
    fn find(&self, selector: &str) -> Option<ElementRef>;
    fn mount(&self, element: &NewElement<'_>) -> ElementRef;
    fn add_body_class(&self, class: &str);
    /// Adds a `<style>` block with the given id. Returns false when one already exists.
    fn inject_stylesheet(&self, id: &str, css: &str) -> bool;
}

/// Live observation of one element. Cancelling tears the observation down.
#[cfg_attr(test, mockall::automock)]
pub trait Subscription {
    fn cancel(&self);
}
