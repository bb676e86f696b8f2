use std::cell::RefCell;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlFormElement};

use crate::components::notification::{Notifier, Severity};
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::utils::dom;
use crate::utils::scheduler::Scheduler;

pub const FORM_ID: &str = "contactForm";
pub const SENDING_LABEL: &str = "<span>Sending...</span>";
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you within 24 hours.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingRequired,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ContactError::MissingRequired);
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// The form as the submit handler sees it.
pub trait ContactSurface {
    fn read(&self) -> ContactSubmission;
    fn set_sending(&self, sending: bool);
    fn reset(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ContactError),
    Sending,
}

pub struct ContactForm<F: ContactSurface> {
    surface: Rc<F>,
    notifier: Rc<dyn Notifier>,
    scheduler: Rc<dyn Scheduler>,
    submit_delay_ms: u32,
}

impl<F: ContactSurface + 'static> ContactForm<F> {
    pub fn new(
        surface: F,
        notifier: Rc<dyn Notifier>,
        scheduler: Rc<dyn Scheduler>,
        config: &SiteConfig,
    ) -> Self {
        Self {
            surface: Rc::new(surface),
            notifier,
            scheduler,
            submit_delay_ms: config.contact_submit_delay_ms,
        }
    }

    /// Validates and, if the fields pass, runs the simulated send. Rejections
    /// are shown as error notifications and never reach the send delay.
    pub fn submit(&self) -> SubmitOutcome {
        let submission = self.surface.read();
        if let Err(e) = submission.validate() {
            self.notifier.notify(&e.to_string(), Severity::Error);
            return SubmitOutcome::Rejected(e);
        }

        log::info!("Contact form submitted");
        self.surface.set_sending(true);
        let surface = self.surface.clone();
        let notifier = self.notifier.clone();
        self.scheduler.after(
            self.submit_delay_ms,
            Box::new(move || {
                notifier.notify(SUCCESS_MESSAGE, Severity::Success);
                surface.reset();
                surface.set_sending(false);
            }),
        );
        SubmitOutcome::Sending
    }
}

pub struct DomContactForm {
    document: Document,
    form: HtmlFormElement,
    submit_button: Option<HtmlButtonElement>,
    original_label: RefCell<Option<String>>,
}

impl DomContactForm {
    pub fn find(document: &Document) -> SiteResult<Option<Self>> {
        let Some(form) = document.get_element_by_id(FORM_ID) else {
            return Ok(None);
        };
        let form = form
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| SiteError::WrongElement(FORM_ID.to_string(), "form"))?;
        let submit_button = form
            .query_selector(".btn-submit")?
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        Ok(Some(Self {
            document: document.clone(),
            form,
            submit_button,
            original_label: RefCell::new(None),
        }))
    }

    /// `value` of an input, select or textarea by id; empty when missing.
    fn field(&self, id: &str) -> String {
        self.document
            .get_element_by_id(id)
            .and_then(|el| js_sys::Reflect::get(&el, &JsValue::from_str("value")).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }
}

impl ContactSurface for DomContactForm {
    fn read(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.field("name"),
            email: self.field("email"),
            phone: self.field("phone"),
            service: self.field("service"),
            message: self.field("message"),
        }
    }

    fn set_sending(&self, sending: bool) {
        let Some(button) = &self.submit_button else {
            return;
        };
        if sending {
            *self.original_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(SENDING_LABEL);
        } else if let Some(label) = self.original_label.borrow_mut().take() {
            button.set_inner_html(&label);
        }
        button.set_disabled(sending);
    }

    fn reset(&self) {
        self.form.reset();
    }
}

pub fn install_contact_form(
    document: &Document,
    notifier: Rc<dyn Notifier>,
    scheduler: Rc<dyn Scheduler>,
    config: &SiteConfig,
) -> SiteResult<bool> {
    let Some(surface) = DomContactForm::find(document)? else {
        return Ok(false);
    };
    let form_element = surface.form.clone();
    let form = ContactForm::new(surface, notifier, scheduler, config);
    dom::listen(&form_element, "submit", move |event| {
        event.prevent_default();
        if let SubmitOutcome::Rejected(e) = form.submit() {
            log::debug!("Contact form rejected: {}", e);
        }
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::scheduler::manual::ManualClock;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingNotifier {
        shown: RefCell<Vec<(String, Severity)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, severity: Severity) {
            self.shown.borrow_mut().push((message.to_string(), severity));
        }
    }

    struct FakeForm {
        fields: RefCell<ContactSubmission>,
        sending: Cell<bool>,
        resets: Cell<u32>,
    }

    impl ContactSurface for Rc<FakeForm> {
        fn read(&self) -> ContactSubmission {
            self.fields.borrow().clone()
        }

        fn set_sending(&self, sending: bool) {
            self.sending.set(sending);
        }

        fn reset(&self) {
            self.resets.set(self.resets.get() + 1);
            *self.fields.borrow_mut() = ContactSubmission::default();
        }
    }

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            service: "weddings".into(),
            message: "Are you free in June?".into(),
        }
    }

    fn form(
        fields: ContactSubmission,
    ) -> (Rc<FakeForm>, Rc<RecordingNotifier>, Rc<ManualClock>, ContactForm<Rc<FakeForm>>) {
        let surface = Rc::new(FakeForm {
            fields: RefCell::new(fields),
            sending: Cell::new(false),
            resets: Cell::new(0),
        });
        let notifier = Rc::new(RecordingNotifier::default());
        let clock = ManualClock::new();
        let form = ContactForm::new(
            surface.clone(),
            notifier.clone(),
            clock.clone(),
            &SiteConfig::default(),
        );
        (surface, notifier, clock, form)
    }

    #[test]
    fn empty_name_is_rejected_without_delay() {
        let (surface, notifier, clock, form) = form(ContactSubmission {
            name: String::new(),
            ..valid()
        });

        assert_eq!(form.submit(), SubmitOutcome::Rejected(ContactError::MissingRequired));
        assert_eq!(clock.pending(), 0);
        assert!(!surface.sending.get());
        assert_eq!(
            *notifier.shown.borrow(),
            vec![("Please fill in all required fields.".to_string(), Severity::Error)]
        );
    }

    #[test]
    fn bad_email_is_rejected() {
        let (_surface, notifier, clock, form) = form(ContactSubmission {
            email: "ada@example".into(),
            ..valid()
        });
        assert_eq!(form.submit(), SubmitOutcome::Rejected(ContactError::InvalidEmail));
        assert_eq!(clock.pending(), 0);
        assert_eq!(notifier.shown.borrow()[0].0, "Please enter a valid email address.");
    }

    #[test]
    fn valid_submission_sends_after_delay() {
        let (surface, notifier, clock, form) = form(valid());
        assert_eq!(form.submit(), SubmitOutcome::Sending);
        assert!(surface.sending.get());
        assert!(notifier.shown.borrow().is_empty());

        clock.advance(1999);
        assert!(surface.sending.get());
        clock.advance(1);

        assert!(!surface.sending.get());
        assert_eq!(surface.resets.get(), 1);
        assert_eq!(surface.read(), ContactSubmission::default());
        assert_eq!(
            *notifier.shown.borrow(),
            vec![(SUCCESS_MESSAGE.to_string(), Severity::Success)]
        );
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let submission = ContactSubmission {
            phone: String::new(),
            service: String::new(),
            ..valid()
        };
        assert_eq!(submission.validate(), Ok(()));
    }

    #[test]
    fn email_pattern() {
        let check = |email: &str| {
            ContactSubmission {
                email: email.into(),
                ..valid()
            }
            .validate()
        };
        assert_eq!(check("a@b.co"), Ok(()));
        assert_eq!(check("first.last@studio.photo"), Ok(()));
        assert_eq!(check("no-at.example.com"), Err(ContactError::InvalidEmail));
        assert_eq!(check("two@@example.com"), Err(ContactError::InvalidEmail));
        assert_eq!(check("spaced out@example.com"), Err(ContactError::InvalidEmail));
        assert_eq!(check("a@b."), Err(ContactError::InvalidEmail));
    }
}
