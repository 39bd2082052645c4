use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, IntersectionObserver, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom::{
    Browser, ControlRef, Element, ElementRef, Form, FormControl, NewElement, Subscription,
};

/// `web_sys` element behind the [`Element`] trait.
pub struct DomElement {
    inner: HtmlElement,
}

impl DomElement {
    pub fn new(inner: HtmlElement) -> Self {
        Self { inner }
    }

    pub fn from_element(element: web_sys::Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self::new)
    }

    pub fn inner(&self) -> &HtmlElement {
        &self.inner
    }
}

impl Element for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.inner.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.inner.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.inner.set_attribute(name, value);
    }

    fn set_style(&self, property: &str, value: &str) {
        let style = self.inner.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }

    fn set_text(&self, text: &str) {
        self.inner.set_text_content(Some(text));
    }

    fn offset_top(&self) -> f64 {
        f64::from(self.inner.offset_top())
    }

    fn offset_height(&self) -> f64 {
        f64::from(self.inner.offset_height())
    }

    fn remove(&self) {
        self.inner.remove();
    }
}

/// Input, select or textarea.
pub struct DomControl {
    element: DomElement,
}

impl DomControl {
    pub fn from_element(element: web_sys::Element) -> Option<Self> {
        DomElement::from_element(element).map(|element| Self { element })
    }
}

impl Element for DomControl {
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
        self.element.offset_top()
    }
    fn offset_height(&self) -> f64 {
        self.element.offset_height()
    }
    fn remove(&self) {
        self.element.remove()
    }
}

impl FormControl for DomControl {
    fn name(&self) -> String {
        self.attribute("name")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.element.inner().id())
    }

    fn value(&self) -> String {
        let inner = self.element.inner();
        if let Some(input) = inner.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = inner.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = inner.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn is_required(&self) -> bool {
        self.element.inner().has_attribute("required")
    }

    fn selected_label(&self) -> Option<String> {
        let select = self.element.inner().dyn_ref::<HtmlSelectElement>()?;
        select
            .selected_options()
            .item(0)
            .and_then(|option| option.text_content())
            .map(|text| text.trim().to_string())
    }
}

pub struct DomForm {
    inner: HtmlFormElement,
}

impl DomForm {
    pub fn new(inner: HtmlFormElement) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &HtmlFormElement {
        &self.inner
    }
}

impl Form for DomForm {
    fn controls(&self) -> Vec<ControlRef> {
        let Ok(nodes) = self.inner.query_selector_all("input, select, textarea") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .filter_map(DomControl::from_element)
            .map(|control| Rc::new(control) as ControlRef)
            .collect()
    }

    fn reset(&self) {
        self.inner.reset();
    }
}

/// Window and document operations.
pub struct WebBrowser {
    window: Window,
    document: Document,
}

impl WebBrowser {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }

    fn build(&self, spec: &NewElement<'_>) -> Option<HtmlElement> {
        let element = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        element.set_class_name(spec.class);
        if let Some(text) = spec.text {
            element.set_text_content(Some(text));
        }
        let _ = element.style().set_css_text(spec.css);
        for child in spec.children {
            if let Some(child) = self.build(child) {
                let _ = element.append_child(&child);
            }
        }
        Some(element)
    }
}

impl Browser for WebBrowser {
    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = self.body() {
            let _ = body
                .style()
                .set_property("overflow", if locked { "hidden" } else { "auto" });
        }
    }

    fn open_in_new_tab(&self, url: &str) {
        if let Err(err) = self.window.open_with_url_and_target(url, "_blank") {
            tracing::error!("Failed to open {}: {:?}", url, err);
        }
    }

    fn find(&self, selector: &str) -> Option<ElementRef> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(DomElement::from_element)
            .map(|element| Rc::new(element) as ElementRef)
    }

    fn mount(&self, spec: &NewElement<'_>) -> ElementRef {
        match (self.build(spec), self.body()) {
            (Some(element), Some(body)) => {
                let _ = body.append_child(&element);
                Rc::new(DomElement::new(element))
            }
            _ => Rc::new(Detached),
        }
    }

    fn add_body_class(&self, class: &str) {
        if let Some(body) = self.body() {
            let _ = body.class_list().add_1(class);
        }
    }

    fn inject_stylesheet(&self, id: &str, css: &str) -> bool {
        if self.document.get_element_by_id(id).is_some() {
            return false;
        }
        let Some(head) = self.document.head() else {
            return false;
        };
        let Ok(style) = self.document.create_element("style") else {
            return false;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style).is_ok()
    }
}

/// Stand-in returned when an element could not be created.
struct Detached;

impl Element for Detached {
    fn add_class(&self, _class: &str) {}
    fn remove_class(&self, _class: &str) {}
    fn has_class(&self, _class: &str) -> bool {
        false
    }
    fn attribute(&self, _name: &str) -> Option<String> {
        None
    }
    fn set_attribute(&self, _name: &str, _value: &str) {}
    fn set_style(&self, _property: &str, _value: &str) {}
    fn set_text(&self, _text: &str) {}
    fn offset_top(&self) -> f64 {
        0.0
    }
    fn offset_height(&self) -> f64 {
        0.0
    }
    fn remove(&self) {}
}

/// One `IntersectionObserver` per watched element.
pub struct ObserverSubscription {
    observer: IntersectionObserver,
}

impl ObserverSubscription {
    pub fn new(observer: IntersectionObserver) -> Self {
        Self { observer }
    }
}

impl Subscription for ObserverSubscription {
    fn cancel(&self) {
        self.observer.disconnect();
    }
}
