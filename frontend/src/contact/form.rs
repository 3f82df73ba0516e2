use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

use crate::app::Enhancement;
use crate::config::{classes, selectors, Config};
use crate::contact::transport::{FormPost, Transport};
use crate::contact::validate::FormFields;
use crate::dom::{child, set_display, Listener, Page};
use crate::error::{InitError, SubmitError, ValidationError};
use crate::timer::{BrowserTimers, Scheduler};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error,
}

impl Notice {
    pub fn class(self) -> &'static str {
        match self {
            Notice::Success => "success",
            Notice::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Invalid(ValidationError),
    Failed(SubmitError),
    /// Another submission was still in flight.
    Ignored,
}

/// The parts of the contact form the submission flow drives.
pub trait FormView {
    fn fields(&self) -> FormFields;
    /// Locks the submit control and swaps its label for the loader.
    fn set_busy(&self, busy: bool);
    fn show_message(&self, notice: Notice, text: &str);
    fn hide_message(&self);
    fn clear(&self);
}

/// Validate, send, report. At most one submission is in flight; the
/// status message hides itself after `dismiss_ms`, and a newer message
/// replaces the older one's timer.
pub struct Submission<V, T, S: Scheduler> {
    view: Rc<V>,
    transport: T,
    scheduler: S,
    dismiss_ms: u32,
    phase: Cell<Phase>,
    dismiss: RefCell<Option<S::Handle>>,
}

impl<V, T, S> Submission<V, T, S>
where
    V: FormView + 'static,
    T: Transport,
    S: Scheduler,
{
    pub fn new(view: Rc<V>, transport: T, scheduler: S, dismiss_ms: u32) -> Self {
        Self {
            view,
            transport,
            scheduler,
            dismiss_ms,
            phase: Cell::new(Phase::Idle),
            dismiss: RefCell::new(None),
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub async fn submit(&self) -> Outcome {
        if self.phase.get() != Phase::Idle {
            debug!("contact form already submitting, ignoring");
            return Outcome::Ignored;
        }

        self.phase.set(Phase::Validating);
        if let Err(e) = self.view.fields().validate() {
            self.phase.set(Phase::Idle);
            self.notify(Notice::Error, &e.to_string());
            return Outcome::Invalid(e);
        }

        let _busy = Busy::engage(self.view.as_ref(), &self.phase);
        self.dismiss.take();
        self.view.hide_message();

        match self.transport.send().await {
            Ok(()) => {
                info!("contact form sent");
                self.notify(Notice::Success, SUCCESS_MESSAGE);
                self.view.clear();
                Outcome::Sent
            }
            Err(e) => {
                match &e {
                    SubmitError::Rejected {
                        detail: Some(detail),
                        ..
                    } => warn!("contact form failed: {} ({})", e, detail),
                    _ => warn!("contact form failed: {}", e),
                }
                self.notify(Notice::Error, e.user_message());
                Outcome::Failed(e)
            }
        }
    }

    fn notify(&self, notice: Notice, text: &str) {
        self.view.show_message(notice, text);
        let view = self.view.clone();
        let handle = self
            .scheduler
            .after(self.dismiss_ms, Box::new(move || view.hide_message()));
        // Replacing the slot cancels the previous dismissal.
        self.dismiss.replace(Some(handle));
    }
}

/// Held for the duration of a request; unlocks the form on every exit path.
struct Busy<'a, V: FormView> {
    view: &'a V,
    phase: &'a Cell<Phase>,
}

impl<'a, V: FormView> Busy<'a, V> {
    fn engage(view: &'a V, phase: &'a Cell<Phase>) -> Self {
        phase.set(Phase::Submitting);
        view.set_busy(true);
        Self { view, phase }
    }
}

impl<V: FormView> Drop for Busy<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false);
        self.phase.set(Phase::Idle);
    }
}

/// The contact form as it exists in the page markup.
pub struct DomForm {
    form: HtmlFormElement,
    name: Element,
    email: Element,
    message: Element,
    submit: HtmlButtonElement,
    label: HtmlElement,
    loader: HtmlElement,
    status: HtmlElement,
}

impl DomForm {
    pub fn find(page: &Page) -> Result<Self, InitError> {
        let submit: HtmlButtonElement = page.by_id(selectors::SUBMIT_BUTTON)?;
        Ok(Self {
            form: page.by_id(selectors::CONTACT_FORM)?,
            name: page.by_id(selectors::NAME_FIELD)?,
            email: page.by_id(selectors::EMAIL_FIELD)?,
            message: page.by_id(selectors::MESSAGE_FIELD)?,
            label: child(&submit, selectors::BUTTON_TEXT)?,
            loader: child(&submit, selectors::BUTTON_LOADER)?,
            status: page.by_id(selectors::FORM_MESSAGE)?,
            submit,
        })
    }
}

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        element.text_content().unwrap_or_default()
    }
}

impl FormView for DomForm {
    fn fields(&self) -> FormFields {
        FormFields {
            name: field_value(&self.name),
            email: field_value(&self.email),
            message: field_value(&self.message),
        }
    }

    fn set_busy(&self, busy: bool) {
        self.submit.set_disabled(busy);
        set_display(&self.label, if busy { "none" } else { "inline" });
        set_display(&self.loader, if busy { "inline" } else { "none" });
    }

    fn show_message(&self, notice: Notice, text: &str) {
        self.status.set_text_content(Some(text));
        self.status
            .set_class_name(&format!("{} {}", classes::FORM_MESSAGE, notice.class()));
        set_display(&self.status, "block");
    }

    fn hide_message(&self) {
        set_display(&self.status, "none");
    }

    fn clear(&self) {
        self.form.reset();
    }
}

pub struct ContactForm {
    _on_submit: Listener,
}

impl Enhancement for ContactForm {
    const NAME: &'static str = "contact-form";

    fn init(page: &Page, config: &Config) -> Result<Self, InitError> {
        let view = DomForm::find(page)?;
        let form = view.form.clone();
        let submission = Rc::new(Submission::new(
            Rc::new(view),
            FormPost::new(form.clone()),
            BrowserTimers,
            config.message_dismiss_ms,
        ));

        let on_submit = Listener::new(&form, "submit", move |event| {
            event.prevent_default();
            let submission = submission.clone();
            spawn_local(async move {
                let outcome = submission.submit().await;
                debug!("contact form outcome: {:?}", outcome);
            });
        })?;

        Ok(Self {
            _on_submit: on_submit,
        })
    }
}
