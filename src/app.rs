use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::components::back_to_top::BackToTopButton;
use crate::components::counter;
use crate::components::notification::{
    self, DomToastLayer, NotificationPresenter, Notifier, Severity,
};
use crate::components::reveal::{self, ViewportWatcher};
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::logging;
use crate::pages::effects::{self, Parallax};
use crate::pages::navigation::{self, Navbar};
use crate::pages::{contact, gallery};
use crate::utils::dom;
use crate::utils::scheduler::{BrowserScheduler, Scheduler};

thread_local! {
    static CONTROLLER: OnceCell<Rc<SiteController>> = const { OnceCell::new() };
}

pub trait ScrollListener {
    fn on_scroll(&self, offset: f64);
}

impl ScrollListener for Navbar {
    fn on_scroll(&self, offset: f64) {
        Navbar::on_scroll(self, offset);
    }
}

impl ScrollListener for Parallax {
    fn on_scroll(&self, offset: f64) {
        Parallax::on_scroll(self, offset);
    }
}

impl ScrollListener for BackToTopButton {
    fn on_scroll(&self, offset: f64) {
        BackToTopButton::on_scroll(self, offset);
    }
}

/// Fans one window `scroll` event out to every scroll-driven component.
#[derive(Default)]
pub struct ScrollDispatcher {
    listeners: Vec<Rc<dyn ScrollListener>>,
}

impl ScrollDispatcher {
    pub fn add(&mut self, listener: Rc<dyn ScrollListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn dispatch(&self, offset: f64) {
        for listener in &self.listeners {
            listener.on_scroll(offset);
        }
    }
}

/// Logs a failed install and carries on with the rest of the page.
fn installed<T>(what: &str, result: SiteResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Skipping {}: {}", what, e);
            None
        }
    }
}

/// Page-lifetime owner of every behaviour. Built once, never torn down.
pub struct SiteController {
    config: SiteConfig,
    notifications: Rc<NotificationPresenter<DomToastLayer>>,
    _reveal: Option<ViewportWatcher>,
    _stats: Option<ViewportWatcher>,
}

impl SiteController {
    /// Builds the controller on first call; later calls return the same one.
    pub fn init() -> SiteResult<Rc<Self>> {
        if let Some(existing) = Self::current() {
            return Ok(existing);
        }
        let controller = Rc::new(Self::build()?);
        CONTROLLER.with(|cell| {
            let _ = cell.set(controller.clone());
        });
        Ok(controller)
    }

    pub fn current() -> Option<Rc<Self>> {
        CONTROLLER.with(|cell| cell.get().cloned())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn notify(&self, message: &str, severity: Severity) {
        self.notifications.show(message, severity);
    }

    fn build() -> SiteResult<Self> {
        let window = dom::window()?;
        let document = dom::document()?;
        let body = dom::body(&document)?;

        let loaded = SiteConfig::from_document(&document);
        let config = loaded.as_ref().cloned().unwrap_or_default();
        logging::init(config.log_level());
        if let Err(e) = &loaded {
            log::warn!("Using default site configuration: {}", e);
        }

        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

        installed("notification keyframes", notification::install_keyframes(&document));
        let notifications = Rc::new(NotificationPresenter::new(
            DomToastLayer::new(document.clone()),
            scheduler.clone(),
            &config,
        ));

        if installed("menu toggle", navigation::install_menu_toggle(&document)) == Some(false) {
            log::debug!("No menu toggle on this page");
        }
        installed(
            "active link highlighting",
            navigation::highlight_active_links(&document, &window),
        );
        installed(
            "anchor scrolling",
            navigation::install_smooth_anchors(&document, &window, &config),
        );

        let mut scroll = ScrollDispatcher::default();
        if let Some(navbar) = Navbar::find(&document, &config) {
            scroll.add(Rc::new(navbar));
        }
        let parallax = installed("parallax", Parallax::find(&document, &config)).flatten();
        if let Some(parallax) = parallax {
            scroll.add(Rc::new(parallax));
        }
        let button = installed(
            "back-to-top button",
            BackToTopButton::install(&document, &window, &config),
        );
        if let Some(button) = button {
            scroll.add(button);
        }
        {
            let scroll = Rc::new(scroll);
            let source = window.clone();
            installed(
                "scroll effects",
                dom::listen(&window, "scroll", move |_| {
                    scroll.dispatch(dom::scroll_offset(&source));
                }),
            );
        }

        let reveal = installed(
            "reveal targets",
            reveal::install_reveal_targets(&document, &config),
        )
        .flatten();
        let stats = installed(
            "stats counters",
            counter::install_stats_panel(&document, scheduler.clone(), &config),
        )
        .flatten();

        installed(
            "gallery filter",
            gallery::install_gallery(&document, scheduler.clone(), &config),
        );
        let notifier: Rc<dyn Notifier> = notifications.clone();
        installed(
            "contact form",
            contact::install_contact_form(&document, notifier, scheduler.clone(), &config),
        );

        installed("featured items", effects::install_featured_items(&document));
        installed("service cards", effects::install_service_cards(&document));
        installed(
            "page fade-in",
            effects::install_page_fade(&document, &window, &body, scheduler, &config),
        );
        installed("FOUC guard", effects::install_fouc_guard(&document, &body));

        logging::print_branding();
        log::debug!("Site behaviour installed");

        Ok(Self {
            config,
            notifications,
            _reveal: reveal,
            _stats: stats,
        })
    }
}
