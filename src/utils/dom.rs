use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{SiteError, SiteResult};

pub fn window() -> SiteResult<Window> {
    web_sys::window().ok_or(SiteError::MissingGlobal("window"))
}

pub fn document() -> SiteResult<Document> {
    window()?
        .document()
        .ok_or(SiteError::MissingGlobal("document"))
}

pub fn body(document: &Document) -> SiteResult<HtmlElement> {
    document.body().ok_or(SiteError::MissingGlobal("document.body"))
}

/// Attaches a page-lifetime listener. The closure is leaked on purpose: the
/// page never detaches these handlers.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> SiteResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn select_all(document: &Document, selector: &str) -> SiteResult<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn select_all_within(root: &Element, selector: &str) -> SiteResult<Vec<Element>> {
    Ok(elements(root.query_selector_all(selector)?))
}

pub fn as_html(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("Failed to set {}: {:?}", property, e);
    }
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        set_style(element, property, value);
    }
}

pub fn add_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().add_1(class) {
        log::warn!("Failed to add class {}: {:?}", class, e);
    }
}

pub fn remove_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().remove_1(class) {
        log::warn!("Failed to remove class {}: {:?}", class, e);
    }
}

pub fn toggle_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().toggle(class) {
        log::warn!("Failed to toggle class {}: {:?}", class, e);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if on {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

/// Vertical scroll offset, 0 when the browser refuses to report it.
pub fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
