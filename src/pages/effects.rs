use std::rc::Rc;

use web_sys::{Document, HtmlElement, Window};

use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::utils::dom;
use crate::utils::scheduler::Scheduler;

const DEFAULT_FEATURED_TITLE: &str = "Project";

pub fn parallax_transform(offset: f64, factor: f64) -> String {
    format!("translateY({}px)", offset * factor)
}

/// Slides the hero background at a fraction of the scroll speed.
pub struct Parallax {
    background: HtmlElement,
    factor: f64,
}

impl Parallax {
    pub fn find(document: &Document, config: &SiteConfig) -> SiteResult<Option<Self>> {
        Ok(document
            .query_selector(".hero-background")?
            .as_ref()
            .and_then(dom::as_html)
            .map(|background| Self {
                background,
                factor: config.parallax_factor,
            }))
    }

    pub fn on_scroll(&self, offset: f64) {
        dom::set_style(
            &self.background,
            "transform",
            &parallax_transform(offset, self.factor),
        );
    }
}

pub fn featured_title(title: Option<String>) -> String {
    title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_FEATURED_TITLE.to_string())
}

pub fn install_featured_items(document: &Document) -> SiteResult<usize> {
    let items = dom::select_all(document, ".featured-item")?;
    for item in &items {
        let source = item.clone();
        dom::listen(item, "click", move |_| {
            let title = source
                .query_selector(".featured-title")
                .ok()
                .flatten()
                .and_then(|el| el.text_content());
            log::info!("Clicked on: {}", featured_title(title));
        })?;
    }
    Ok(items.len())
}

pub fn install_service_cards(document: &Document) -> SiteResult<usize> {
    let cards: Vec<HtmlElement> = dom::select_all(document, ".service-card")?
        .iter()
        .filter_map(dom::as_html)
        .collect();
    for card in &cards {
        let target = card.clone();
        dom::listen(card, "mouseenter", move |_| {
            dom::set_style(&target, "transition", "all 0.3s ease");
        })?;
    }
    Ok(cards.len())
}

/// How far the document had got when the module started, from
/// `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Loading,
    Interactive,
    Complete,
}

impl LoadStage {
    pub fn parse(ready_state: &str) -> Self {
        match ready_state {
            "loading" => Self::Loading,
            "interactive" => Self::Interactive,
            _ => Self::Complete,
        }
    }

    pub fn of(document: &Document) -> Self {
        Self::parse(&document.ready_state())
    }

    /// `DOMContentLoaded` has already fired.
    pub fn parsed(self) -> bool {
        self != Self::Loading
    }

    /// The window `load` event has already fired.
    pub fn loaded(self) -> bool {
        self == Self::Complete
    }
}

fn fade_in(body: &HtmlElement, scheduler: &dyn Scheduler, delay_ms: u32) {
    dom::set_style(body, "opacity", "0");
    let body = body.clone();
    scheduler.after(
        delay_ms,
        Box::new(move || {
            dom::set_style(&body, "transition", "opacity 0.5s ease");
            dom::set_style(&body, "opacity", "1");
        }),
    );
}

/// Fades the body in once the page has loaded, straight away if it already
/// has.
pub fn install_page_fade(
    document: &Document,
    window: &Window,
    body: &HtmlElement,
    scheduler: Rc<dyn Scheduler>,
    config: &SiteConfig,
) -> SiteResult<()> {
    let delay_ms = config.page_fade_delay_ms;
    if LoadStage::of(document).loaded() {
        fade_in(body, &*scheduler, delay_ms);
        return Ok(());
    }
    let body = body.clone();
    dom::listen(window, "load", move |_| fade_in(&body, &*scheduler, delay_ms))
}

/// Makes the body visible once parsing is done, guarding against a flash of
/// unstyled content.
pub fn install_fouc_guard(document: &Document, body: &HtmlElement) -> SiteResult<()> {
    if LoadStage::of(document).parsed() {
        dom::set_style(body, "visibility", "visible");
        return Ok(());
    }
    let body = body.clone();
    dom::listen(document, "DOMContentLoaded", move |_| {
        dom::set_style(&body, "visibility", "visible");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_moves_at_half_speed() {
        assert_eq!(parallax_transform(0.0, 0.5), "translateY(0px)");
        assert_eq!(parallax_transform(150.0, 0.5), "translateY(75px)");
        assert_eq!(parallax_transform(101.0, 0.5), "translateY(50.5px)");
    }

    #[test]
    fn featured_title_falls_back_to_project() {
        assert_eq!(featured_title(Some("Golden Hour".into())), "Golden Hour");
        assert_eq!(featured_title(Some(String::new())), "Project");
        assert_eq!(featured_title(None), "Project");
    }

    #[test]
    fn load_stage_follows_ready_state() {
        let loading = LoadStage::parse("loading");
        assert!(!loading.parsed());
        assert!(!loading.loaded());

        let interactive = LoadStage::parse("interactive");
        assert!(interactive.parsed());
        assert!(!interactive.loaded());

        let complete = LoadStage::parse("complete");
        assert_eq!(complete, LoadStage::Complete);
        assert!(complete.parsed());
        assert!(complete.loaded());
    }
}
