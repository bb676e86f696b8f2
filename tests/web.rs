#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use studio_frontend::components::back_to_top::BackToTopButton;
use studio_frontend::components::notification::{
    DomToastLayer, NotificationPresenter, Severity, Toast, ToastLayer, NOTIFICATION_SELECTOR,
};
use studio_frontend::config::SiteConfig;
use studio_frontend::pages::contact::{ContactSurface, DomContactForm, FORM_ID, SENDING_LABEL};
use studio_frontend::pages::effects::{self, LoadStage};
use studio_frontend::utils::dom;
use studio_frontend::utils::scheduler::BrowserScheduler;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlButtonElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn notification_count() -> u32 {
    dom::document()
        .unwrap()
        .query_selector_all(NOTIFICATION_SELECTOR)
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn only_one_notification_in_document() {
    let document = dom::document().unwrap();
    let presenter = NotificationPresenter::new(
        DomToastLayer::new(document),
        Rc::new(BrowserScheduler),
        &SiteConfig::default(),
    );
    presenter.show("first", Severity::Success);
    presenter.show("second", Severity::Error);
    assert_eq!(notification_count(), 1);

    let shown = DomToastLayer::new(dom::document().unwrap()).current().unwrap();
    assert_eq!(shown.text_content().as_deref(), Some("second"));
    assert_eq!(shown.class_name(), "notification notification-error");
}

#[wasm_bindgen_test]
fn removing_detached_notification_is_harmless() {
    let layer = DomToastLayer::new(dom::document().unwrap());
    let toast = Toast::new("bye", Severity::Success);
    let handle = layer.mount(&toast).unwrap();
    layer.remove(&handle);
    layer.remove(&handle);
    assert!(!handle.is_connected());
}

#[wasm_bindgen_test]
fn back_to_top_button_follows_scroll() {
    let document = dom::document().unwrap();
    let window = dom::window().unwrap();
    let button = BackToTopButton::install(&document, &window, &SiteConfig::default()).unwrap();
    let element = document
        .query_selector(".back-to-top")
        .unwrap()
        .and_then(|el| dom::as_html(&el))
        .unwrap();

    assert_eq!(element.style().get_property_value("display").unwrap(), "none");
    button.on_scroll(301.0);
    assert_eq!(element.style().get_property_value("display").unwrap(), "block");
    button.on_scroll(300.0);
    assert_eq!(element.style().get_property_value("display").unwrap(), "none");
}

#[wasm_bindgen_test]
fn sending_label_is_shown_then_restored() {
    let document = dom::document().unwrap();
    let form = document.create_element("form").unwrap();
    form.set_id(FORM_ID);
    form.set_inner_html(
        r#"<button type="submit" class="btn-submit"><span>Send Message</span></button>"#,
    );
    dom::body(&document).unwrap().append_child(&form).unwrap();

    let surface = DomContactForm::find(&document).unwrap().unwrap();
    let button = form
        .query_selector(".btn-submit")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlButtonElement>()
        .unwrap();

    surface.set_sending(true);
    assert_eq!(button.inner_html(), SENDING_LABEL);
    assert!(button.disabled());

    surface.set_sending(false);
    assert_eq!(button.inner_html(), "<span>Send Message</span>");
    assert!(!button.disabled());

    form.remove();
}

#[wasm_bindgen_test]
fn page_fade_starts_at_once_when_already_loaded() {
    let document = dom::document().unwrap();
    let window = dom::window().unwrap();
    let target = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();

    effects::install_page_fade(
        &document,
        &window,
        &target,
        Rc::new(BrowserScheduler),
        &SiteConfig::default(),
    )
    .unwrap();

    let opacity = target.style().get_property_value("opacity").unwrap();
    if LoadStage::of(&document).loaded() {
        assert_eq!(opacity, "0");
    } else {
        assert_eq!(opacity, "");
    }
}

#[wasm_bindgen_test]
fn invalid_class_token_is_ignored() {
    let element = dom::document().unwrap().create_element("div").unwrap();
    dom::add_class(&element, "");
    dom::toggle_class(&element, "has space");
    dom::add_class(&element, "active");
    assert_eq!(element.class_name(), "active");
}
