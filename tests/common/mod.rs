#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use site_interactions::dom::{
    Browser, ControlRef, Element, ElementRef, Form, FormControl, NewElement, Subscription,
};

#[derive(Default)]
pub struct FakeElement {
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    styles: RefCell<BTreeMap<String, String>>,
    text: RefCell<String>,
    css: RefCell<String>,
    offset_top: Cell<f64>,
    offset_height: Cell<f64>,
    removed: Cell<bool>,
}

impl FakeElement {
    pub fn new(classes: &[&str]) -> Rc<Self> {
        let element = Self::default();
        for class in classes {
            element.classes.borrow_mut().insert(class.to_string());
        }
        Rc::new(element)
    }

    pub fn with_attr(classes: &[&str], name: &str, value: &str) -> Rc<Self> {
        let element = Self::new(classes);
        element.set_attribute(name, value);
        element
    }

    pub fn at(top: f64, height: f64) -> Rc<Self> {
        let element = Self::new(&[]);
        element.offset_top.set(top);
        element.offset_height.set(height);
        element
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn css(&self) -> String {
        self.css.borrow().clone()
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut styles = self.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn offset_top(&self) -> f64 {
        self.offset_top.get()
    }

    fn offset_height(&self) -> f64 {
        self.offset_height.get()
    }

    fn remove(&self) {
        self.removed.set(true);
    }
}

pub fn refs(elements: &[Rc<FakeElement>]) -> Vec<ElementRef> {
    elements
        .iter()
        .map(|element| element.clone() as ElementRef)
        .collect()
}

pub struct FakeControl {
    element: FakeElement,
    name: String,
    value: RefCell<String>,
    required: bool,
    label: Option<String>,
}

impl FakeControl {
    pub fn new(name: &str, value: &str, required: bool) -> Rc<Self> {
        Rc::new(Self {
            element: FakeElement::default(),
            name: name.to_string(),
            value: RefCell::new(value.to_string()),
            required,
            label: None,
        })
    }

    pub fn select(name: &str, value: &str, label: &str, required: bool) -> Rc<Self> {
        Rc::new(Self {
            element: FakeElement::default(),
            name: name.to_string(),
            value: RefCell::new(value.to_string()),
            required,
            label: Some(label.to_string()),
        })
    }

    pub fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.element.style(property)
    }
}

impl Element for FakeControl {
    fn add_class(&self, class: &str) {
        self.element.add_class(class)
    }
    fn remove_class(&self, class: &str) {
        self.element.remove_class(class)
    }
    fn has_class(&self, class: &str) -> bool {
        self.element.has_class(class)
    }
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.attribute(name)
    }
    fn set_attribute(&self, name: &str, value: &str) {
        self.element.set_attribute(name, value)
    }
    fn set_style(&self, property: &str, value: &str) {
        self.element.set_style(property, value)
    }
    fn set_text(&self, text: &str) {
        self.element.set_text(text)
    }
    fn offset_top(&self) -> f64 {
        0.0
    }
    fn offset_height(&self) -> f64 {
        0.0
    }
    fn remove(&self) {
        self.element.remove()
    }
}

impl FormControl for FakeControl {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn selected_label(&self) -> Option<String> {
        self.label.clone()
    }
}

pub struct FakeForm {
    pub controls: Vec<Rc<FakeControl>>,
    resets: Cell<u32>,
}

impl FakeForm {
    pub fn new(controls: Vec<Rc<FakeControl>>) -> Rc<Self> {
        Rc::new(Self {
            controls,
            resets: Cell::new(0),
        })
    }

    pub fn resets(&self) -> u32 {
        self.resets.get()
    }

    pub fn field(&self, name: &str) -> Rc<FakeControl> {
        self.controls
            .iter()
            .find(|control| control.name == name)
            .cloned()
            .expect("field exists")
    }
}

impl Form for FakeForm {
    fn controls(&self) -> Vec<ControlRef> {
        self.controls
            .iter()
            .map(|control| control.clone() as ControlRef)
            .collect()
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        for control in &self.controls {
            control.set_value("");
        }
    }
}

pub struct Mounted {
    pub class: String,
    pub text: Option<String>,
    pub element: Rc<FakeElement>,
}

#[derive(Default)]
pub struct FakeBrowser {
    pub offset: Cell<f64>,
    pub scrolls: RefCell<Vec<f64>>,
    pub scroll_locked: Cell<Option<bool>>,
    pub opened: RefCell<Vec<String>>,
    pub targets: RefCell<BTreeMap<String, Rc<FakeElement>>>,
    pub mounted: RefCell<Vec<Mounted>>,
    pub body_classes: RefCell<BTreeSet<String>>,
    pub stylesheets: RefCell<BTreeSet<String>>,
}

impl FakeBrowser {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add_target(&self, selector: &str, element: Rc<FakeElement>) {
        self.targets
            .borrow_mut()
            .insert(selector.to_string(), element);
    }

    pub fn mounted_with_class(&self, class: &str) -> Vec<Rc<FakeElement>> {
        self.mounted
            .borrow()
            .iter()
            .filter(|m| m.class.split_whitespace().any(|c| c == class))
            .map(|m| m.element.clone())
            .collect()
    }

    pub fn mounted_texts(&self) -> Vec<String> {
        self.mounted
            .borrow()
            .iter()
            .filter_map(|m| m.text.clone())
            .collect()
    }
}

impl Browser for FakeBrowser {
    fn scroll_offset(&self) -> f64 {
        self.offset.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(Some(locked));
    }

    fn open_in_new_tab(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }

    fn find(&self, selector: &str) -> Option<ElementRef> {
        self.targets
            .borrow()
            .get(selector)
            .map(|element| element.clone() as ElementRef)
    }

    fn mount(&self, spec: &NewElement<'_>) -> ElementRef {
        let classes: Vec<&str> = spec.class.split_whitespace().collect();
        let element = FakeElement::new(&classes);
        if let Some(text) = spec.text {
            element.set_text(text);
        }
        *element.css.borrow_mut() = spec.css.to_string();
        self.mounted.borrow_mut().push(Mounted {
            class: spec.class.to_string(),
            text: spec.text.map(str::to_string),
            element: element.clone(),
        });
        element
    }

    fn add_body_class(&self, class: &str) {
        self.body_classes.borrow_mut().insert(class.to_string());
    }

    fn inject_stylesheet(&self, id: &str, _css: &str) -> bool {
        self.stylesheets.borrow_mut().insert(id.to_string())
    }
}

/// Subscription that counts how often it was cancelled.
#[derive(Clone, Default)]
pub struct CountingSubscription {
    pub cancels: Rc<Cell<u32>>,
}

impl Subscription for CountingSubscription {
    fn cancel(&self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}
