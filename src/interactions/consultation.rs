use std::rc::Rc;

use crate::config::InteractionConfig;
use crate::dom::{Browser, ControlRef, Form, FormControl};
use crate::error::ValidationError;
use crate::interactions::feedback::{Feedback, NotificationKind};
use crate::utils::scheduler::Scheduler;

pub const SHAKE_CLASS: &str = "shake";
pub const INVALID_BORDER: &str = "#ff0000";
pub const INVALID_SHADOW: &str = "0 0 10px rgba(255, 0, 0, 0.5)";

pub const ERROR_MESSAGE: &str = "Please fill in all required fields.";
pub const SUCCESS_MESSAGE: &str = "Thank you for your inquiry. Redirecting to WhatsApp...";

const UNSPECIFIED_SERVICE: &str = "Not specified";

/// Field values read from the consultation form on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    /// Display label of the chosen service option.
    pub service_label: Option<String>,
    pub message: String,
}

impl FormSubmission {
    pub fn collect(form: &dyn Form) -> Self {
        let value = |name: &str| form.control(name).map(|c| c.value()).unwrap_or_default();
        let service_control = form.control("service");
        Self {
            name: value("name"),
            email: value("email"),
            phone: value("phone"),
            service: service_control.as_ref().map(|c| c.value()).unwrap_or_default(),
            service_label: service_control.and_then(|c| c.selected_label()),
            message: value("message"),
        }
    }

    /// The service as shown to the visitor, never the raw option value.
    pub fn service_text(&self) -> &str {
        if self.service.is_empty() {
            return UNSPECIFIED_SERVICE;
        }
        match self.service_label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.service,
        }
    }

    pub fn to_message(&self) -> String {
        [
            "New Consultation Request".to_string(),
            String::new(),
            format!("Name: {}", self.name),
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone),
            format!("Service: {}", self.service_text()),
            format!("Message: {}", self.message),
        ]
        .join("\n")
    }
}

/// `https://<base>/<number>?text=<message>` with the message percent-encoded once.
pub fn messaging_link(base_url: &str, number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        number,
        urlencoding::encode(message)
    )
}

/// Consultation form: validation, the loading pause, then the hand-off to the messaging app.
pub struct Consultation {
    form: Rc<dyn Form>,
    browser: Rc<dyn Browser>,
    scheduler: Rc<dyn Scheduler>,
    feedback: Rc<Feedback>,
    config: Rc<InteractionConfig>,
}

impl Consultation {
    pub fn new(
        form: Rc<dyn Form>,
        browser: Rc<dyn Browser>,
        scheduler: Rc<dyn Scheduler>,
        feedback: Rc<Feedback>,
        config: Rc<InteractionConfig>,
    ) -> Self {
        Self {
            form,
            browser,
            scheduler,
            feedback,
            config,
        }
    }

    /// Handles a submit. On success the redirect happens once the loading overlay is gone.
    pub fn submit(&self) -> Result<(), ValidationError> {
        if let Err(err) = self.validate() {
            tracing::info!("Consultation form rejected: {}", err);
            self.feedback.notify(ERROR_MESSAGE, NotificationKind::Error);
            return Err(err);
        }

        let submission = FormSubmission::collect(self.form.as_ref());
        let delay = self.config.loading_overlay_ms();
        self.feedback.show_loading(delay);

        let form = self.form.clone();
        let browser = self.browser.clone();
        let feedback = self.feedback.clone();
        let config = self.config.clone();
        self.scheduler
            .schedule(
                delay,
                Box::new(move || {
                    let link = messaging_link(
                        &config.messaging_base_url,
                        &config.contact_number,
                        &submission.to_message(),
                    );
                    tracing::info!("Redirecting consultation request to messaging app");
                    browser.open_in_new_tab(&link);
                    feedback.notify(SUCCESS_MESSAGE, NotificationKind::Success);
                    form.reset();
                }),
            )
            .detach();
        Ok(())
    }

    /// Checks every required control. Empty ones are highlighted, filled ones are cleared.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        for control in self.form.controls().into_iter().filter(|c| c.is_required()) {
            if control.value().trim().is_empty() {
                self.highlight(&control);
                missing.push(control.name());
            } else {
                reset_highlight(control.as_ref());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    fn highlight(&self, control: &ControlRef) {
        control.set_style("border-color", INVALID_BORDER);
        control.set_style("box-shadow", INVALID_SHADOW);
        control.add_class(SHAKE_CLASS);
        let control = control.clone();
        self.scheduler
            .schedule(
                self.config.durations.medium,
                Box::new(move || control.remove_class(SHAKE_CLASS)),
            )
            .detach();
    }
}

fn reset_highlight(control: &dyn FormControl) {
    control.set_style("border-color", "");
    control.set_style("box-shadow", "");
}
