use std::rc::Rc;

use web_sys::{Document, HtmlElement};

use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::utils::dom;
use crate::utils::scheduler::Scheduler;

const ACTIVE_CLASS: &str = "active";
pub const SHOW_ALL: &str = "all";

/// Filters and categories compare as optional attribute values, so a button
/// without `data-filter` matches items without `data-category`.
pub fn shows_item(filter: Option<&str>, category: Option<&str>) -> bool {
    filter == Some(SHOW_ALL) || filter == category
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStep {
    /// Back in the layout, still transparent.
    Display,
    FadeIn,
    FadeOut,
    /// Out of the layout.
    Collapse,
}

pub trait GalleryItem {
    fn category(&self) -> Option<String>;
    fn apply(&self, step: ItemStep);
}

impl GalleryItem for HtmlElement {
    fn category(&self) -> Option<String> {
        self.get_attribute("data-category")
    }

    fn apply(&self, step: ItemStep) {
        match step {
            ItemStep::Display => dom::set_style(self, "display", "block"),
            ItemStep::FadeIn => {
                dom::set_style(self, "opacity", "1");
                dom::set_style(self, "transform", "scale(1)");
            }
            ItemStep::FadeOut => {
                dom::set_style(self, "opacity", "0");
                dom::set_style(self, "transform", "scale(0.8)");
            }
            ItemStep::Collapse => dom::set_style(self, "display", "none"),
        }
    }
}

pub struct Gallery<I: GalleryItem> {
    items: Vec<Rc<I>>,
    scheduler: Rc<dyn Scheduler>,
    fade_in_delay_ms: u32,
    hide_delay_ms: u32,
}

impl<I: GalleryItem + 'static> Gallery<I> {
    pub fn new(items: Vec<I>, scheduler: Rc<dyn Scheduler>, config: &SiteConfig) -> Self {
        Self {
            items: items.into_iter().map(Rc::new).collect(),
            scheduler,
            fade_in_delay_ms: config.gallery_fade_in_delay_ms,
            hide_delay_ms: config.gallery_hide_delay_ms,
        }
    }

    pub fn apply_filter(&self, filter: Option<&str>) {
        for item in &self.items {
            let category = item.category();
            let item = item.clone();
            if shows_item(filter, category.as_deref()) {
                item.apply(ItemStep::Display);
                self.scheduler
                    .after(self.fade_in_delay_ms, Box::new(move || item.apply(ItemStep::FadeIn)));
            } else {
                item.apply(ItemStep::FadeOut);
                self.scheduler
                    .after(self.hide_delay_ms, Box::new(move || item.apply(ItemStep::Collapse)));
            }
        }
    }
}

/// Wires `.filter-btn` clicks to the `.gallery-item` grid. Returns false when
/// the page has no filter buttons.
pub fn install_gallery(
    document: &Document,
    scheduler: Rc<dyn Scheduler>,
    config: &SiteConfig,
) -> SiteResult<bool> {
    let buttons = dom::select_all(document, ".filter-btn")?;
    if buttons.is_empty() {
        return Ok(false);
    }
    let items = dom::select_all(document, ".gallery-item")?
        .iter()
        .filter_map(dom::as_html)
        .collect();
    let gallery = Rc::new(Gallery::new(items, scheduler, config));
    let buttons = Rc::new(buttons);

    for button in buttons.iter() {
        let clicked = button.clone();
        let buttons = buttons.clone();
        let gallery = gallery.clone();
        dom::listen(button, "click", move |_| {
            for other in buttons.iter() {
                dom::remove_class(other, ACTIVE_CLASS);
            }
            dom::add_class(&clicked, ACTIVE_CLASS);
            let filter = clicked.get_attribute("data-filter");
            log::debug!("Gallery filter: {:?}", filter);
            gallery.apply_filter(filter.as_deref());
        })?;
    }
    Ok(true)
}
