use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::utils::dom;

pub const BUTTON_CLASS: &str = "back-to-top";
pub const BUTTON_LABEL: &str = "↑";

const BASE_STYLES: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("bottom", "30px"),
    ("right", "30px"),
    ("width", "50px"),
    ("height", "50px"),
    ("background", "linear-gradient(135deg, #C9A961 0%, #B89850 100%)"),
    ("color", "#000000"),
    ("border", "2px solid #C9A961"),
    ("border-radius", "50%"),
    ("font-size", "1.5rem"),
    ("font-weight", "bold"),
    ("cursor", "pointer"),
    ("display", "none"),
    ("z-index", "999"),
    ("box-shadow", "0 0 20px rgba(201, 169, 97, 0.5)"),
    ("transition", "all 0.3s ease"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn display(self) -> &'static str {
        match self {
            Self::Shown => "block",
            Self::Hidden => "none",
        }
    }
}

/// Visibility bookkeeping for the button, recomputed on every scroll.
#[derive(Debug)]
pub struct BackToTopState {
    threshold: f64,
    visibility: Cell<Visibility>,
}

impl BackToTopState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visibility: Cell::new(Visibility::Hidden),
        }
    }

    pub fn on_scroll(&self, offset: f64) -> Visibility {
        let visibility = if offset > self.threshold {
            Visibility::Shown
        } else {
            Visibility::Hidden
        };
        self.visibility.set(visibility);
        visibility
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }
}

/// `(transform, box-shadow)` for the hover state. Purely cosmetic.
pub fn hover_style(hovered: bool) -> (&'static str, &'static str) {
    if hovered {
        ("translateY(-5px) scale(1.1)", "0 0 30px rgba(255, 215, 0, 0.7)")
    } else {
        ("translateY(0) scale(1)", "0 0 20px rgba(255, 215, 0, 0.5)")
    }
}

/// The page's single floating "back to top" button.
pub struct BackToTopButton {
    button: HtmlElement,
    state: BackToTopState,
}

impl BackToTopButton {
    /// Creates the button, appends it to the body and wires click and hover.
    /// Scroll updates come through [`BackToTopButton::on_scroll`].
    pub fn install(
        document: &Document,
        window: &Window,
        config: &SiteConfig,
    ) -> SiteResult<Rc<Self>> {
        let button = document
            .create_element("button")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::WrongElement(BUTTON_CLASS.to_string(), "HtmlElement"))?;
        button.set_inner_html(BUTTON_LABEL);
        button.set_class_name(BUTTON_CLASS);
        dom::set_styles(&button, BASE_STYLES);

        {
            let window = window.clone();
            dom::listen(&button, "click", move |_| dom::smooth_scroll_to(&window, 0.0))?;
        }
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = button.clone();
            dom::listen(&button, event, move |_| {
                let (transform, shadow) = hover_style(hovered);
                dom::set_style(&target, "transform", transform);
                dom::set_style(&target, "box-shadow", shadow);
            })?;
        }

        dom::body(document)?.append_child(&button)?;

        Ok(Rc::new(Self {
            button,
            state: BackToTopState::new(config.back_to_top_threshold),
        }))
    }

    pub fn on_scroll(&self, offset: f64) {
        let visibility = self.state.on_scroll(offset);
        dom::set_style(&self.button, "display", visibility.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_only_past_threshold() {
        let state = BackToTopState::new(300.0);
        assert_eq!(state.visibility(), Visibility::Hidden);
        assert_eq!(state.on_scroll(0.0), Visibility::Hidden);
        assert_eq!(state.on_scroll(300.0), Visibility::Hidden);
        assert_eq!(state.on_scroll(300.5), Visibility::Shown);
        assert_eq!(state.on_scroll(1200.0), Visibility::Shown);
    }

    #[test]
    fn follows_last_scroll_event() {
        let state = BackToTopState::new(300.0);
        for offset in [500.0, 10.0, 301.0, 299.0] {
            state.on_scroll(offset);
        }
        assert_eq!(state.visibility(), Visibility::Hidden);
        state.on_scroll(900.0);
        assert_eq!(state.visibility(), Visibility::Shown);
        assert_eq!(state.visibility().display(), "block");
        assert_eq!(Visibility::Hidden.display(), "none");
    }

    #[test]
    fn hover_is_cosmetic_lift() {
        assert_eq!(hover_style(true).0, "translateY(-5px) scale(1.1)");
        assert_eq!(hover_style(false).0, "translateY(0) scale(1)");
    }

    #[test]
    fn starts_hidden() {
        assert!(BASE_STYLES.contains(&("display", "none")));
        assert!(BASE_STYLES.contains(&("z-index", "999")));
    }
}
