//! The site view-model: one [`Site`] owns the document, the loaded project
//! list and every bit of UI state (active filter, open modal, zoom overlay,
//! theme, locale). Browser events enter through [`Site::click`],
//! [`Site::key_down`] and friends, and are resolved against the listeners
//! registered on the document.

use std::sync::Arc;

use tracing::warn;

use crate::{
    core::{
        data::LoadedPortfolio,
        storage::{LocalStore, LANGUAGE_KEY, THEME_KEY},
    },
    dom::{Document, EventType, Fired, ListenerId, Markup, NodeId, Target},
    i18n::Locale,
};

pub mod contact_form;
pub mod filter;
pub mod gallery;
pub(crate) mod layout;
pub mod modal;
pub mod nav;
pub mod theme;

pub use contact_form::SubmitOutcome;
pub use modal::PendingProbe;
pub use theme::Theme;

/// What a listener does when its event fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    OpenProject(i64),
    CloseModal,
    CloseModalOnEscape,
    OpenZoom { src: String, title: String },
    CloseZoom,
    CloseZoomOnEscape,
    MarkLoaded,
    /// Replace the failed element's parent content with a placeholder.
    ReplaceParent(Markup),
    /// Replace the failed element itself.
    ReplaceTarget(Markup),
    SelectFilter,
    SelectDropdownItem,
    ToggleSelect,
    Navigate,
    ToggleSidebar,
    ThemeChanged,
    ValidateField,
    ClearFieldError,
}

pub type SiteDocument = Document<Action>;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ModalState {
    pub(crate) generation: u64,
    pub(crate) project: Option<i64>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ZoomOverlay {
    pub(crate) overlay: NodeId,
    pub(crate) key_listener: ListenerId,
}

pub struct Site {
    pub(crate) doc: SiteDocument,
    pub(crate) locale: Locale,
    pub(crate) theme: Theme,
    pub(crate) portfolio: LoadedPortfolio,
    pub(crate) active_filter: Option<NodeId>,
    pub(crate) modal: ModalState,
    pub(crate) zoom: Option<ZoomOverlay>,
    pub(crate) form_message: Option<NodeId>,
    pub(crate) pending_probe: Option<PendingProbe>,
    pub(crate) store: Arc<LocalStore>,
    pub(crate) contact_address: String,
}

impl Site {
    /// Builds the page for the persisted language (or `detected` when none
    /// was saved) and applies the persisted theme. The project list starts
    /// empty; hand one over with [`Site::set_portfolio`].
    pub fn new(store: Arc<LocalStore>, detected: Locale, contact_address: impl Into<String>) -> Self {
        let locale = store
            .get(LANGUAGE_KEY)
            .and_then(|flag| flag.parse().ok())
            .unwrap_or(detected);
        let theme = store
            .get(THEME_KEY)
            .and_then(|flag| flag.parse().ok())
            .unwrap_or_default();
        let mut site = Site {
            doc: Document::new(layout::skeleton(locale)),
            locale,
            theme,
            portfolio: LoadedPortfolio::default(),
            active_filter: None,
            modal: ModalState::default(),
            zoom: None,
            form_message: None,
            pending_probe: None,
            store,
            contact_address: contact_address.into(),
        };
        site.wire_static_listeners();
        site.apply_theme(theme);
        site.display_portfolio();
        site.setup_filters();
        site
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn portfolio(&self) -> &LoadedPortfolio {
        &self.portfolio
    }

    /// Replaces the project list wholesale and re-renders gallery and filters.
    pub fn set_portfolio(&mut self, portfolio: LoadedPortfolio) {
        self.portfolio = portfolio;
        if self.modal.project.is_some() {
            self.close_modal();
        }
        self.display_portfolio();
        self.setup_filters();
    }

    /// Switches language: persists the flag and rebuilds the page in the new
    /// locale around `portfolio`, which should be that locale's project list.
    pub fn set_language(&mut self, locale: Locale, portfolio: LoadedPortfolio) {
        if let Err(error) = self.store.set(LANGUAGE_KEY, locale.code()) {
            warn!(%error, "Could not persist language flag");
        }
        self.locale = locale;
        self.doc = Document::new(layout::skeleton(locale));
        self.active_filter = None;
        self.modal = ModalState {
            generation: self.modal.generation + 1,
            project: None,
        };
        self.zoom = None;
        self.form_message = None;
        self.pending_probe = None;
        self.wire_static_listeners();
        self.apply_theme(self.theme);
        self.set_portfolio(portfolio);
    }

    fn wire_static_listeners(&mut self) {
        let root = self.doc.root();
        let doc = &mut self.doc;

        if let Some(button) = doc.find_first(root, |e| e.has_attr("data-sidebar-btn")) {
            doc.listen(button, EventType::Click, Action::ToggleSidebar);
        }
        for link in doc.find_all(root, |e| e.has_attr("data-nav-link")) {
            doc.listen(link, EventType::Click, Action::Navigate);
        }
        if let Some(checkbox) = doc.get_element_by_id(layout::THEME_CHECKBOX_ID) {
            doc.listen(checkbox, EventType::Change, Action::ThemeChanged);
        }
        if let Some(select) = doc.find_first(root, |e| e.has_attr("data-select")) {
            doc.listen(select, EventType::Click, Action::ToggleSelect);
        }

        if let Some(overlay) = doc.find_first(root, |e| e.has_attr("data-overlay")) {
            doc.listen(overlay, EventType::Click, Action::CloseModal);
        }
        if let Some(close) = doc.find_first(root, |e| e.has_attr("data-modal-close-btn")) {
            doc.listen(close, EventType::Click, Action::CloseModal);
        }
        if let Some(container) = doc.get_element_by_id(layout::MODAL_ID) {
            doc.listen_self(container, EventType::Click, Action::CloseModal);
            if let Some(panel) = doc.find_first(container, |e| e.has_class("portfolio-modal")) {
                doc.stop_propagation(panel, EventType::Click);
            }
        }
        doc.listen_document(EventType::KeyDown, Action::CloseModalOnEscape);

        if let Some(form) = doc.get_element_by_id(layout::CONTACT_FORM_ID) {
            for input in doc.find_all(form, |e| e.has_class("form-input")) {
                doc.listen(input, EventType::Blur, Action::ValidateField);
                doc.listen(input, EventType::Input, Action::ClearFieldError);
            }
        }
    }

    /// Simulates a click on `node`. Checkboxes flip and report a change
    /// first, as in a browser.
    pub fn click(&mut self, node: NodeId) {
        let is_checkbox = self
            .doc
            .element(node)
            .is_some_and(|e| e.tag == "input" && e.attr("type") == Some("checkbox"));
        if is_checkbox {
            if self.doc.attr(node, "checked").is_some() {
                self.doc.remove_attr(node, "checked");
            } else {
                self.doc.set_attr(node, "checked", "");
            }
            self.fire(EventType::Change, Some(node), None);
        }
        self.fire(EventType::Click, Some(node), None);
    }

    pub fn key_down(&mut self, key: &str) {
        self.fire(EventType::KeyDown, None, Some(key));
    }

    pub fn media_loaded(&mut self, node: NodeId) {
        self.fire(EventType::Load, Some(node), None);
    }

    pub fn media_failed(&mut self, node: NodeId) {
        self.fire(EventType::Error, Some(node), None);
    }

    pub fn blur(&mut self, node: NodeId) {
        self.fire(EventType::Blur, Some(node), None);
    }

    /// Types `value` into a form control.
    pub fn input(&mut self, node: NodeId, value: &str) {
        self.doc.set_attr(node, "value", value);
        self.fire(EventType::Input, Some(node), None);
    }

    fn fire(&mut self, event: EventType, target: Option<NodeId>, key: Option<&str>) {
        for fired in self.doc.dispatch(event, target) {
            self.perform(fired, key);
        }
    }

    fn perform(&mut self, fired: Fired<Action>, key: Option<&str>) {
        let current = match fired.current_target {
            Target::Node(node) => Some(node),
            Target::Document => None,
        };
        let escape = key == Some("Escape");
        match fired.action {
            Action::OpenProject(id) => {
                // Size probes need the async runtime; the caller drives them.
                self.pending_probe = self.open_project(id);
            }
            Action::CloseModal => self.close_modal(),
            Action::CloseModalOnEscape => {
                if escape && self.is_modal_open() {
                    self.close_modal();
                }
            }
            Action::OpenZoom { src, title } => self.open_zoom(&src, &title),
            Action::CloseZoom => self.close_zoom(),
            Action::CloseZoomOnEscape => {
                if escape {
                    self.close_zoom();
                }
            }
            Action::MarkLoaded => {
                if let Some(target) = fired.target {
                    self.doc.add_class(target, "loaded");
                }
            }
            Action::ReplaceParent(markup) => {
                if let Some(parent) = fired.target.and_then(|t| self.doc.parent(t)) {
                    self.doc.replace_children(parent, [markup]);
                }
            }
            Action::ReplaceTarget(markup) => {
                if let Some(target) = fired.target {
                    self.doc.replace_with(target, markup);
                }
            }
            Action::SelectFilter => {
                if let Some(button) = current {
                    self.select_filter_button(button);
                }
            }
            Action::SelectDropdownItem => {
                if let Some(item) = current {
                    self.select_dropdown_item(item);
                }
            }
            Action::ToggleSelect => {
                if let Some(select) = current {
                    self.doc.toggle_class(select, "active", None);
                }
            }
            Action::Navigate => {
                if let Some(link) = current {
                    self.navigate(link);
                }
            }
            Action::ToggleSidebar => self.toggle_sidebar(),
            Action::ThemeChanged => {
                if let Some(checkbox) = current {
                    self.theme_checkbox_changed(checkbox);
                }
            }
            Action::ValidateField => {
                if let Some(input) = current {
                    self.validate_input(input);
                }
            }
            Action::ClearFieldError => {
                if let Some(input) = current {
                    self.clear_field_error(input);
                }
            }
        }
    }

    /// Size probe queued by the last modal opened through a click.
    pub fn take_pending_probe(&mut self) -> Option<PendingProbe> {
        self.pending_probe.take()
    }

    pub fn html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.doc.to_html(self.doc.root()))
    }

    pub fn fragment_html(&self, id: &str) -> Option<String> {
        self.doc.get_element_by_id(id).map(|node| self.doc.to_html(node))
    }
}
