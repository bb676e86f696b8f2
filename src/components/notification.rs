use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::utils::dom;
use crate::utils::scheduler::Scheduler;

pub const NOTIFICATION_SELECTOR: &str = ".notification";
pub const ENTER_ANIMATION: &str = "slideInRight 0.3s ease";
pub const EXIT_ANIMATION: &str = "slideOutRight 0.3s ease";

pub const KEYFRAMES: &str = r#"
  @keyframes slideInRight {
    from {
      transform: translateX(400px);
      opacity: 0;
    }
    to {
      transform: translateX(0);
      opacity: 1;
    }
  }

  @keyframes slideOutRight {
    from {
      transform: translateX(0);
      opacity: 1;
    }
    to {
      transform: translateX(400px);
      opacity: 0;
    }
  }
"#;

const GOLD_GRADIENT: &str = "linear-gradient(135deg, #C9A961 0%, #B89850 100%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Anything other than `success` is styled as an error.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "success" => Self::Success,
            _ => Self::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.severity.as_str())
    }

    pub fn styles(&self) -> Vec<(&'static str, &'static str)> {
        let (background, color, shadow, border) = match self.severity {
            Severity::Success => (
                GOLD_GRADIENT,
                "#000000",
                "0 0 30px rgba(201, 169, 97, 0.5)",
                "2px solid #C9A961",
            ),
            Severity::Error => (
                "#ef4444",
                "#ffffff",
                "0 4px 16px rgba(0, 0, 0, 0.3)",
                "2px solid #ef4444",
            ),
        };
        vec![
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "1rem 2rem"),
            ("background", background),
            ("color", color),
            ("border-radius", "8px"),
            ("box-shadow", shadow),
            ("z-index", "10000"),
            ("animation", ENTER_ANIMATION),
            ("font-size", "1rem"),
            ("font-weight", "600"),
            ("max-width", "400px"),
            ("border", border),
        ]
    }
}

/// The document slot a toast lives in.
pub trait ToastLayer {
    type Handle: Clone + 'static;

    fn current(&self) -> Option<Self::Handle>;
    fn mount(&self, toast: &Toast) -> SiteResult<Self::Handle>;
    fn begin_exit(&self, handle: &Self::Handle);
    /// Removing a handle that is already gone must be a no-op.
    fn remove(&self, handle: &Self::Handle);
}

pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

pub struct NotificationPresenter<L: ToastLayer> {
    layer: Rc<L>,
    scheduler: Rc<dyn Scheduler>,
    visible_ms: u32,
    exit_ms: u32,
}

impl<L: ToastLayer + 'static> NotificationPresenter<L> {
    pub fn new(layer: L, scheduler: Rc<dyn Scheduler>, config: &SiteConfig) -> Self {
        Self {
            layer: Rc::new(layer),
            scheduler,
            visible_ms: config.notification_visible_ms,
            exit_ms: config.notification_exit_ms,
        }
    }

    /// Replaces whatever toast is showing with a fresh one that dismisses
    /// itself. Timers of a superseded toast are left to fire on the detached
    /// node.
    pub fn show(&self, message: &str, severity: Severity) {
        if let Some(existing) = self.layer.current() {
            self.layer.remove(&existing);
        }

        let toast = Toast::new(message, severity);
        let handle = match self.layer.mount(&toast) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Failed to show notification: {}", e);
                return;
            }
        };

        let layer = self.layer.clone();
        let scheduler = self.scheduler.clone();
        let exit_ms = self.exit_ms;
        self.scheduler.after(
            self.visible_ms,
            Box::new(move || {
                layer.begin_exit(&handle);
                scheduler.after(exit_ms, Box::new(move || layer.remove(&handle)));
            }),
        );
    }
}

impl<L: ToastLayer + 'static> Notifier for NotificationPresenter<L> {
    fn notify(&self, message: &str, severity: Severity) {
        self.show(message, severity);
    }
}

pub struct DomToastLayer {
    document: Document,
}

impl DomToastLayer {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ToastLayer for DomToastLayer {
    type Handle = HtmlElement;

    fn current(&self) -> Option<HtmlElement> {
        self.document
            .query_selector(NOTIFICATION_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn mount(&self, toast: &Toast) -> SiteResult<HtmlElement> {
        let element = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::WrongElement("notification".to_string(), "HtmlElement"))?;
        element.set_class_name(&toast.class_name());
        element.set_text_content(Some(&toast.message));
        dom::set_styles(&element, &toast.styles());
        dom::body(&self.document)?.append_child(&element)?;
        Ok(element)
    }

    fn begin_exit(&self, handle: &HtmlElement) {
        dom::set_style(handle, "animation", EXIT_ANIMATION);
    }

    fn remove(&self, handle: &HtmlElement) {
        // Element.remove() on a detached node does nothing.
        handle.remove();
    }
}

/// Adds the slide-in/slide-out keyframes to `<head>`.
pub fn install_keyframes(document: &Document) -> SiteResult<()> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(KEYFRAMES));
    let head = document
        .head()
        .ok_or(SiteError::MissingGlobal("document.head"))?;
    head.append_child(&style)?;
    Ok(())
}
