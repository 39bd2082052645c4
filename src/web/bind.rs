use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, Node, Window,
};

use crate::config::{GalleryConfig, InteractionConfig};
use crate::dom::{Browser, ElementRef, Form};
use crate::error::SiteError;
use crate::gallery::{Catalog, GalleryController, GalleryHooks, LightboxView};
use crate::interactions::{PageHooks, PageInteractions};
use crate::utils::scheduler::Scheduler;
use crate::web::element::{DomElement, DomForm, ObserverSubscription};

pub const ANIMATED_SELECTOR: &str =
    ".service-card, .testimonial-card, .about-image, .about-text, .feature";

/// Registers `handler` for `event` on `target` for the lifetime of the page.
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        tracing::warn!("Invalid selector {}", selector);
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn to_ref(element: &HtmlElement) -> ElementRef {
    Rc::new(DomElement::new(element.clone()))
}

fn to_refs(elements: &[HtmlElement]) -> Vec<ElementRef> {
    elements.iter().map(to_ref).collect()
}

fn lightbox_view(document: &Document) -> Option<(HtmlElement, LightboxView)> {
    let modal = by_id(document, "lightboxModal")?;
    let view = LightboxView {
        modal: to_ref(&modal),
        image: to_ref(&by_id(document, "lightboxImg")?),
        title: to_ref(&by_id(document, "lightboxTitle")?),
        description: to_ref(&by_id(document, "lightboxDesc")?),
        category: to_ref(&by_id(document, "lightboxCategory")?),
        previous: by_id(document, "prevBtn").as_ref().map(to_ref),
        next: by_id(document, "nextBtn").as_ref().map(to_ref),
    };
    Some((modal, view))
}

/// Builds the gallery controller from the page and wires its events.
/// Returns `None` on pages without gallery markup.
pub fn bind_gallery(
    document: &Document,
    browser: Rc<dyn Browser>,
    scheduler: Rc<dyn Scheduler>,
    catalog: Rc<Catalog>,
    config: GalleryConfig,
) -> Result<Option<Rc<GalleryController>>, SiteError> {
    let controls = query_all(document, ".filter-btn");
    let items = query_all(document, ".gallery-item");
    let triggers = query_all(document, ".view-btn");
    if controls.is_empty() && items.is_empty() && triggers.is_empty() {
        return Ok(None);
    }

    let lightbox = lightbox_view(document);
    if lightbox.is_none() {
        tracing::debug!("Lightbox markup missing, gallery runs filter only");
    }
    let (modal, view) = match lightbox {
        Some((modal, view)) => (Some(modal), Some(view)),
        None => (None, None),
    };

    let gallery = Rc::new(GalleryController::new(
        GalleryHooks {
            filter_controls: to_refs(&controls),
            items: to_refs(&items),
            view_triggers: to_refs(&triggers),
            lightbox: view,
        },
        catalog,
        browser,
        scheduler,
        config,
    ));

    for (index, control) in controls.iter().enumerate() {
        let gallery = gallery.clone();
        listen(control, "click", move |_| gallery.on_filter_click(index))?;
    }
    for (index, trigger) in triggers.iter().enumerate() {
        let gallery = gallery.clone();
        listen(trigger, "click", move |_| {
            gallery.on_view_click(index);
        })?;
    }

    if let Some(modal) = modal {
        let backdrop: Node = modal.clone().into();
        let handler = gallery.clone();
        listen(&modal, "click", move |event: Event| {
            let on_backdrop = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .map(|node| backdrop.is_same_node(Some(&node)))
                .unwrap_or(false);
            handler.on_modal_click(on_backdrop);
        })?;

        if let Some(close) = by_id(document, "lightboxClose") {
            let gallery = gallery.clone();
            listen(&close, "click", move |_| gallery.on_close())?;
        }
        if let Some(previous) = by_id(document, "prevBtn") {
            let gallery = gallery.clone();
            listen(&previous, "click", move |_| gallery.on_previous())?;
        }
        if let Some(next) = by_id(document, "nextBtn") {
            let gallery = gallery.clone();
            listen(&next, "click", move |_| gallery.on_next())?;
        }

        let keys = gallery.clone();
        listen(document, "keydown", move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                keys.on_key(&key);
            }
        })?;
    }

    Ok(Some(gallery))
}

/// Builds the page interaction manager from the page and wires its events.
pub fn bind_page(
    window: &Window,
    document: &Document,
    browser: Rc<dyn Browser>,
    scheduler: Rc<dyn Scheduler>,
    config: InteractionConfig,
) -> Result<Rc<PageInteractions>, SiteError> {
    let nav_toggle = by_id(document, "navToggle");
    let nav_icon = nav_toggle
        .as_ref()
        .and_then(|toggle| toggle.query_selector("i").ok().flatten())
        .and_then(DomElement::from_element)
        .map(|icon| Rc::new(icon) as ElementRef);
    let nav_links = query_all(document, ".nav-list a");
    let form = by_id(document, "consultationForm")
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok());
    let messaging_button = by_id(document, "whatsappBtn");
    let anchors = query_all(document, "a[href^=\"#\"]");
    let animated = query_all(document, ANIMATED_SELECTOR);

    let page = Rc::new(PageInteractions::new(
        PageHooks {
            nav_toggle: nav_toggle.as_ref().map(to_ref),
            nav_icon,
            nav_menu: query(document, ".nav-list").as_ref().map(to_ref),
            form: form
                .clone()
                .map(|form| Rc::new(DomForm::new(form)) as Rc<dyn Form>),
            messaging_button: messaging_button.as_ref().map(to_ref),
            header: query(document, ".header").as_ref().map(to_ref),
            hero: query(document, ".hero").as_ref().map(to_ref),
            animated: to_refs(&animated),
        },
        browser,
        scheduler,
        config,
    ));

    if let Some(toggle) = &nav_toggle {
        let page = page.clone();
        listen(toggle, "click", move |_| {
            page.on_nav_toggle();
        })?;
    }
    for link in &nav_links {
        let page = page.clone();
        listen(link, "click", move |_| page.on_nav_link())?;
    }
    if let Some(form) = &form {
        let page = page.clone();
        listen(form, "submit", move |event: Event| {
            event.prevent_default();
            page.on_submit();
        })?;
    }
    if let Some(button) = &messaging_button {
        let page = page.clone();
        listen(button, "click", move |_| page.on_messaging_click())?;
    }
    for anchor in &anchors {
        let page = page.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        listen(anchor, "click", move |event: Event| {
            event.prevent_default();
            page.on_anchor_click(&href);
        })?;
    }
    {
        let page = page.clone();
        listen(window, "scroll", move |_| page.on_scroll())?;
    }
    {
        let page = page.clone();
        listen(window, "resize", move |_| page.on_resize())?;
    }

    if let Err(err) = observe_entrances(&page, &animated) {
        tracing::error!("Entrance animations disabled: {}", err);
    }
    Ok(page)
}

/// Gives every animated element its own observer; the page tears each down after it fires.
fn observe_entrances(
    page: &Rc<PageInteractions>,
    elements: &[HtmlElement],
) -> Result<(), SiteError> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(page.config().thresholds.intersection));
    options.set_root_margin(&page.config().root_margin());

    for (index, element) in elements.iter().enumerate() {
        let handler = page.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        handler.on_intersection(
                            index,
                            entry.intersection_ratio(),
                            entry.is_intersecting(),
                        );
                    }
                }
            },
        );
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(element);
        callback.forget();
        page.watch_entrance(index, Box::new(ObserverSubscription::new(observer)));
    }
    Ok(())
}
