use std::time::Duration;

use tracing::debug;

use crate::{
    contact::{compose_mailto, launch_mail, validate_field, ContactForm, Delivery, FormField, MailLauncher},
    dom::{el, NodeId},
    i18n::{t, TextKey},
    view::{
        layout::{icon, CONTACT_FORM_ID},
        Site,
    },
};

/// How long a form message stays up; rendered as `data-expires-ms` so the
/// page knows when to call [`Site::expire_form_message`].
pub const FORM_MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Sending was blocked; `message` holds the error shown to the visitor
    /// when the whole form was incomplete.
    Blocked { message: Option<NodeId> },
    Sent {
        mailto: String,
        delivery: Delivery,
        message: NodeId,
    },
}

impl Site {
    fn form(&self) -> Option<NodeId> {
        self.doc.get_element_by_id(CONTACT_FORM_ID)
    }

    pub fn field_input(&self, field: FormField) -> Option<NodeId> {
        self.doc.find_first(self.form()?, |e| {
            e.has_class("form-input") && e.attr("name") == Some(field.input_name())
        })
    }

    fn field_value(&self, field: FormField) -> String {
        self.field_input(field)
            .and_then(|input| self.doc.attr(input, "value"))
            .unwrap_or_default()
            .to_string()
    }

    pub fn form_values(&self) -> ContactForm {
        ContactForm {
            name: self.field_value(FormField::Name),
            email: self.field_value(FormField::Email),
            message: self.field_value(FormField::Message),
        }
    }

    /// Fills the form as if typed, one `input` event per field.
    pub fn fill_form(&mut self, form: &ContactForm) {
        for (field, value) in [
            (FormField::Name, &form.name),
            (FormField::Email, &form.email),
            (FormField::Message, &form.message),
        ] {
            if let Some(input) = self.field_input(field) {
                self.input(input, value);
            }
        }
    }

    /// Blur-time validation of one input. Shows or clears its field error.
    pub(crate) fn validate_input(&mut self, input: NodeId) -> bool {
        let Some(field) = self
            .doc
            .attr(input, "name")
            .and_then(FormField::from_input_name)
        else {
            return true;
        };
        let value = self.doc.attr(input, "value").unwrap_or_default().to_string();
        match validate_field(field, &value) {
            Ok(()) => {
                self.clear_field_error(input);
                true
            }
            Err(error) => {
                self.show_field_error(input, error.message(self.locale));
                false
            }
        }
    }

    fn show_field_error(&mut self, input: NodeId, message: &str) {
        self.clear_field_error(input);
        self.doc.add_class(input, "invalid");
        if let Some(wrapper) = self.doc.parent(input) {
            self.doc
                .append(wrapper, el("div").class("field-error").text(message));
        }
    }

    pub(crate) fn clear_field_error(&mut self, input: NodeId) {
        self.doc.remove_class(input, "invalid");
        let Some(wrapper) = self.doc.parent(input) else {
            return;
        };
        if let Some(error) = self.doc.find_first(wrapper, |e| e.has_class("field-error")) {
            self.doc.remove(error);
        }
    }

    pub fn field_error(&self, field: FormField) -> Option<String> {
        let input = self.field_input(field)?;
        let wrapper = self.doc.parent(input)?;
        let error = self.doc.find_first(wrapper, |e| e.has_class("field-error"))?;
        Some(self.doc.text_content(error))
    }

    /// Shows `text` right after the form, replacing any earlier message.
    pub fn show_form_message(&mut self, text: &str, kind: MessageKind) -> Option<NodeId> {
        if let Some(previous) = self.form_message.take() {
            self.doc.remove(previous);
        }
        let form = self.form()?;
        let message = self.doc.insert_after(
            form,
            el("div")
                .class("form-message")
                .class(kind.class())
                .attr("data-expires-ms", FORM_MESSAGE_TTL.as_millis().to_string())
                .text(text),
        )?;
        self.form_message = Some(message);
        Some(message)
    }

    /// Timer callback for a form message; a no-op once it is gone.
    pub fn expire_form_message(&mut self, message: NodeId) -> bool {
        if !self.doc.contains(message) {
            return false;
        }
        self.doc.remove(message);
        if self.form_message == Some(message) {
            self.form_message = None;
        }
        true
    }

    fn reset_form(&mut self) {
        for field in FormField::ALL {
            if let Some(input) = self.field_input(field) {
                self.doc.remove_attr(input, "value");
                self.clear_field_error(input);
            }
        }
    }

    fn submit_button(&self) -> Option<NodeId> {
        self.doc.find_first(self.form()?, |e| e.has_class("form-btn"))
    }

    fn set_button_sending(&mut self, button: NodeId, sending: bool) {
        let label = if sending { TextKey::Sending } else { TextKey::SendMessage };
        let glyph = if sending { "hourglass-outline" } else { "paper-plane" };
        self.doc.replace_children(
            button,
            [icon(glyph), el("span").text(t(self.locale, label))],
        );
        if sending {
            self.doc.set_attr(button, "disabled", "");
        } else {
            self.doc.remove_attr(button, "disabled");
        }
    }

    /// Submits the contact form through `launcher`.
    ///
    /// Any empty field blocks sending with a form-level error. Fields that
    /// fail validation (a malformed email) block it too, each showing its
    /// own message, as native constraint validation would.
    pub fn submit_contact(&mut self, launcher: &mut dyn MailLauncher) -> SubmitOutcome {
        let form = self.form_values();
        if !form.is_complete() {
            let message =
                self.show_form_message(t(self.locale, TextKey::FillAllFields), MessageKind::Error);
            return SubmitOutcome::Blocked { message };
        }

        let inputs: Vec<NodeId> = FormField::ALL
            .into_iter()
            .filter_map(|field| self.field_input(field))
            .collect();
        let mut valid = true;
        for input in inputs {
            valid &= self.validate_input(input);
        }
        if !valid {
            debug!("Contact form blocked by field validation");
            return SubmitOutcome::Blocked { message: None };
        }

        let button = self.submit_button();
        if let Some(button) = button {
            self.set_button_sending(button, true);
        }

        let mailto = compose_mailto(&self.contact_address, &form, self.locale);
        let delivery = launch_mail(launcher, &mailto);
        let confirmation = delivery.confirmation(self.locale);
        let message = self.show_form_message(confirmation, MessageKind::Success);
        self.reset_form();

        if let Some(button) = button {
            self.set_button_sending(button, false);
        }

        match message {
            Some(message) => SubmitOutcome::Sent {
                mailto,
                delivery,
                message,
            },
            None => SubmitOutcome::Blocked { message: None },
        }
    }

    pub fn contact_html(&self) -> String {
        let Some(form) = self.form() else {
            return String::new();
        };
        let mut html = self.doc.to_html(form);
        if let Some(message) = self.form_message.filter(|&m| self.doc.contains(m)) {
            html.push_str(&self.doc.to_html(message));
        }
        html
    }
}
