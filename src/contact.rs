//! Contact form rules: field validation, `mailto:` composition and handing
//! the link to whatever opens mail on the visitor's side.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::i18n::{t, Locale, TextKey};

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|value| !value.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn input_name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }

    pub fn from_input_name(name: &str) -> Option<Self> {
        FormField::ALL
            .into_iter()
            .find(|field| field.input_name() == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    pub fn message(self, locale: Locale) -> &'static str {
        match self {
            FieldError::Required => t(locale, TextKey::FieldRequired),
            FieldError::InvalidEmail => t(locale, TextKey::InvalidEmail),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Validates one trimmed field value. Every contact field is required.
pub fn validate_field(field: FormField, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if field == FormField::Email && !value.is_empty() && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    Ok(())
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn compose_mailto(address: &str, form: &ContactForm, locale: Locale) -> String {
    let subject = format!(
        "{} {} {}",
        t(locale, TextKey::MailSubjectPrefix),
        form.name,
        t(locale, TextKey::MailSubjectSuffix)
    );
    let body = format!(
        "{}: {}\r\nEmail: {}\r\n\r\n{}:\r\n{}",
        t(locale, TextKey::FormName),
        form.name,
        form.email,
        t(locale, TextKey::FormMessage),
        form.message
    );
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        encode_component(&subject),
        encode_component(&body)
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub u64);

/// Something able to hand a `mailto:` link to the visitor's mail client.
pub trait MailLauncher {
    /// Opens `uri` in a new browsing context; `None` when that was refused.
    fn open(&mut self, uri: &str) -> Option<ContextHandle>;
    fn is_closed(&self, handle: ContextHandle) -> bool;
    /// Sends the current page itself to `uri`.
    fn navigate(&mut self, uri: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    NewContext,
    Navigated,
}

impl Delivery {
    pub fn confirmation(self, locale: Locale) -> &'static str {
        match self {
            Delivery::NewContext => t(locale, TextKey::MessageSent),
            Delivery::Navigated => t(locale, TextKey::EmailClientOpened),
        }
    }
}

/// Opens `uri` in a new context, falling back to navigating the page when
/// the context was refused or closed straight away.
pub fn launch_mail(launcher: &mut dyn MailLauncher, uri: &str) -> Delivery {
    match launcher.open(uri) {
        Some(handle) if !launcher.is_closed(handle) => {
            info!("Mail client opened in a new context");
            Delivery::NewContext
        }
        _ => {
            launcher.navigate(uri);
            info!("Mail client opened by navigating the page");
            Delivery::Navigated
        }
    }
}

/// Launcher for HTTP responses: a server cannot open windows, so every link
/// becomes a navigation the handler turns into a redirect.
#[derive(Debug, Default)]
pub struct RedirectLauncher {
    pub location: Option<String>,
}

impl MailLauncher for RedirectLauncher {
    fn open(&mut self, _uri: &str) -> Option<ContextHandle> {
        None
    }

    fn is_closed(&self, _handle: ContextHandle) -> bool {
        true
    }

    fn navigate(&mut self, uri: &str) {
        self.location = Some(uri.to_string());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Launcher double recording what it was asked to do.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingLauncher {
        pub(crate) allow_open: bool,
        pub(crate) closes_immediately: bool,
        pub(crate) opened: Vec<String>,
        pub(crate) navigated: Vec<String>,
    }

    impl MailLauncher for RecordingLauncher {
        fn open(&mut self, uri: &str) -> Option<ContextHandle> {
            self.opened.push(uri.to_string());
            self.allow_open.then_some(ContextHandle(self.opened.len() as u64))
        }

        fn is_closed(&self, _handle: ContextHandle) -> bool {
            self.closes_immediately
        }

        fn navigate(&mut self, uri: &str) {
            self.navigated.push(uri.to_string());
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Ana María".to_string(),
            email: "ana@example.com".to_string(),
            message: "Hola & adiós".to_string(),
        }
    }

    #[test]
    fn email_needs_at_and_domain() {
        assert_eq!(validate_field(FormField::Email, "ana@example.com"), Ok(()));
        assert_eq!(
            validate_field(FormField::Email, "ana.example.com"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(
            validate_field(FormField::Email, "ana@example"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(
            validate_field(FormField::Email, "a na@example.com"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(validate_field(FormField::Email, "   "), Err(FieldError::Required));
    }

    #[test]
    fn required_fields_reject_blank_values() {
        assert_eq!(validate_field(FormField::Name, " \t"), Err(FieldError::Required));
        assert_eq!(validate_field(FormField::Message, "hi"), Ok(()));
        assert_eq!(
            FieldError::Required.message(Locale::En),
            "This field is required"
        );
    }

    #[test]
    fn completeness_checks_every_field() {
        assert!(form().is_complete());
        let missing = ContactForm {
            message: String::new(),
            ..form()
        };
        assert!(!missing.is_complete());
    }

    #[test]
    fn mailto_encodes_like_uri_components() {
        let link = compose_mailto("me@site.dev", &form(), Locale::Es);
        assert_eq!(
            link,
            "mailto:me@site.dev?subject=Nuevo%20mensaje%20de%20Ana%20Mar%C3%ADa%20desde%20tu%20portfolio\
             &body=Nombre%3A%20Ana%20Mar%C3%ADa%0D%0AEmail%3A%20ana%40example.com%0D%0A%0D%0A\
             Mensaje%3A%0D%0AHola%20%26%20adi%C3%B3s"
        );
        let english = compose_mailto("me@site.dev", &form(), Locale::En);
        assert!(english.contains("subject=New%20message%20from%20Ana%20Mar%C3%ADa%20from%20your%20portfolio"));
    }

    #[test]
    fn launch_prefers_new_context() {
        let mut launcher = RecordingLauncher {
            allow_open: true,
            ..RecordingLauncher::default()
        };
        assert_eq!(launch_mail(&mut launcher, "mailto:x"), Delivery::NewContext);
        assert!(launcher.navigated.is_empty());
    }

    #[test]
    fn launch_falls_back_to_navigation() {
        let mut blocked = RecordingLauncher::default();
        assert_eq!(launch_mail(&mut blocked, "mailto:x"), Delivery::Navigated);
        assert_eq!(blocked.navigated, vec!["mailto:x"]);

        let mut closed = RecordingLauncher {
            allow_open: true,
            closes_immediately: true,
            ..RecordingLauncher::default()
        };
        assert_eq!(launch_mail(&mut closed, "mailto:y"), Delivery::Navigated);
        assert_eq!(closed.opened, vec!["mailto:y"]);
        assert_eq!(closed.navigated, vec!["mailto:y"]);

        let mut redirect = RedirectLauncher::default();
        assert_eq!(launch_mail(&mut redirect, "mailto:z"), Delivery::Navigated);
        assert_eq!(redirect.location.as_deref(), Some("mailto:z"));
    }
}
