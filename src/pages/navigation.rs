use web_sys::{Document, Element, Window};

use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::utils::dom;

const ACTIVE_CLASS: &str = "active";
const SCROLLED_CLASS: &str = "scrolled";
const DEFAULT_PAGE: &str = "index.html";

/// Last path segment, or `index.html` for the site root.
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => DEFAULT_PAGE,
    }
}

pub fn navbar_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Scroll position that leaves room for the fixed navbar above the target.
pub fn anchor_scroll_top(offset_top: i32, nav_offset: f64) -> f64 {
    offset_top as f64 - nav_offset
}

/// Hamburger button: toggles the link list, and any link click closes it.
/// Returns false when the page has no menu.
pub fn install_menu_toggle(document: &Document) -> SiteResult<bool> {
    let (Some(toggle), Some(links)) = (
        document.get_element_by_id("menuToggle"),
        document.get_element_by_id("navLinks"),
    ) else {
        return Ok(false);
    };

    {
        let toggle_target = toggle.clone();
        let links = links.clone();
        dom::listen(&toggle, "click", move |_| {
            dom::toggle_class(&links, ACTIVE_CLASS);
            dom::toggle_class(&toggle_target, ACTIVE_CLASS);
        })?;
    }

    for link in dom::select_all_within(&links, "a")? {
        let links = links.clone();
        let toggle = toggle.clone();
        dom::listen(&link, "click", move |_| {
            dom::remove_class(&links, ACTIVE_CLASS);
            dom::remove_class(&toggle, ACTIVE_CLASS);
        })?;
    }
    Ok(true)
}

/// Adds `scrolled` to the navbar once the page moves past the threshold.
pub struct Navbar {
    element: Element,
    threshold: f64,
}

impl Navbar {
    pub fn find(document: &Document, config: &SiteConfig) -> Option<Self> {
        document.get_element_by_id("navbar").map(|element| Self {
            element,
            threshold: config.navbar_scroll_threshold,
        })
    }

    pub fn on_scroll(&self, offset: f64) {
        dom::set_class(
            &self.element,
            SCROLLED_CLASS,
            navbar_scrolled(offset, self.threshold),
        );
    }
}

pub fn highlight_active_links(document: &Document, window: &Window) -> SiteResult<()> {
    let pathname = window.location().pathname()?;
    let page = current_page(&pathname);
    for link in dom::select_all(document, ".nav-links a")? {
        if link.get_attribute("href").as_deref() == Some(page) {
            dom::add_class(&link, ACTIVE_CLASS);
        }
    }
    Ok(())
}

/// In-page `#anchor` links scroll smoothly, offset for the navbar.
pub fn install_smooth_anchors(
    document: &Document,
    window: &Window,
    config: &SiteConfig,
) -> SiteResult<usize> {
    let anchors = dom::select_all(document, r##"a[href^="#"]"##)?;
    for anchor in &anchors {
        let source = anchor.clone();
        let document = document.clone();
        let window = window.clone();
        let nav_offset = config.anchor_offset;
        dom::listen(anchor, "click", move |event| {
            event.prevent_default();
            let Some(selector) = source.get_attribute("href") else {
                return;
            };
            // A bare "#" is not a valid selector and resolves to nothing.
            let target = document.query_selector(&selector).ok().flatten();
            if let Some(target) = target.as_ref().and_then(dom::as_html) {
                dom::smooth_scroll_to(&window, anchor_scroll_top(target.offset_top(), nav_offset));
            }
        })?;
    }
    Ok(anchors.len())
}
