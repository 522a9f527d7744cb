use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    core::storage::THEME_KEY,
    dom::NodeId,
    i18n::{t, TextKey},
    view::{layout::THEME_CHECKBOX_ID, Site},
};

/// How long `theme-changing` stays on the body after a toggle.
pub const THEME_SETTLE_DELAY: Duration = Duration::from_millis(600);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme \"{}\"", other)),
        }
    }
}

impl Site {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn body(&self) -> Option<NodeId> {
        self.doc.find_first(self.doc.root(), |e| e.tag == "body")
    }

    pub(crate) fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        let root = self.doc.root();
        self.doc.set_attr(root, "data-theme", theme.as_str());

        if let Some(checkbox) = self.doc.get_element_by_id(THEME_CHECKBOX_ID) {
            if theme == Theme::Light {
                self.doc.set_attr(checkbox, "checked", "");
            } else {
                self.doc.remove_attr(checkbox, "checked");
            }
        }
        if let Some(label) = self.doc.find_first(root, |e| e.has_class("theme-text")) {
            let key = match theme {
                Theme::Light => TextKey::LightMode,
                Theme::Dark => TextKey::DarkMode,
            };
            self.doc.set_text(label, t(self.locale, key));
        }

        if let Err(error) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(%error, "Could not persist theme flag");
        }
    }

    pub(crate) fn theme_checkbox_changed(&mut self, checkbox: NodeId) {
        let theme = if self.doc.attr(checkbox, "checked").is_some() {
            Theme::Light
        } else {
            Theme::Dark
        };
        if let Some(body) = self.body() {
            self.doc.add_class(body, "theme-changing");
        }
        self.apply_theme(theme);
        info!(%theme, "Theme changed");
    }

    /// Flips the theme switch as a visitor would. The body keeps
    /// `theme-changing` until [`Site::settle_theme_transition`].
    pub fn toggle_theme(&mut self) -> Theme {
        if let Some(checkbox) = self.doc.get_element_by_id(THEME_CHECKBOX_ID) {
            self.click(checkbox);
        }
        self.theme
    }

    pub fn settle_theme_transition(&mut self) {
        if let Some(body) = self.body() {
            self.doc.remove_class(body, "theme-changing");
        }
    }

    pub fn is_theme_changing(&self) -> bool {
        self.body()
            .is_some_and(|body| self.doc.has_class(body, "theme-changing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            data::LoadedPortfolio,
            storage::{LocalStore, THEME_KEY},
        },
        i18n::Locale,
        view::tests::sample_site,
    };
    use std::sync::Arc;

    fn theme_text(site: &Site) -> String {
        let label = site
            .doc
            .find_first(site.doc.root(), |e| e.has_class("theme-text"))
            .unwrap();
        site.doc.text_content(label)
    }

    #[test]
    fn defaults_to_dark() {
        let site = sample_site();
        assert_eq!(site.theme(), Theme::Dark);
        assert_eq!(site.doc.attr(site.doc.root(), "data-theme"), Some("dark"));
        assert_eq!(theme_text(&site), "Modo Oscuro");
        assert_eq!(site.store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn restores_persisted_theme() {
        let store = Arc::new(LocalStore::new());
        store.set(THEME_KEY, "light").unwrap();
        let site = Site::new(store, Locale::En, "me@example.com");
        assert_eq!(site.theme(), Theme::Light);
        assert_eq!(theme_text(&site), "Light Mode");
        let checkbox = site.doc.get_element_by_id(THEME_CHECKBOX_ID).unwrap();
        assert_eq!(site.doc.attr(checkbox, "checked"), Some(""));
    }

    #[test]
    fn toggling_twice_round_trips() {
        let mut site = sample_site();
        assert_eq!(site.toggle_theme(), Theme::Light);
        assert!(site.is_theme_changing());
        assert_eq!(site.store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(theme_text(&site), "Modo Claro");
        site.settle_theme_transition();
        assert!(!site.is_theme_changing());

        assert_eq!(site.toggle_theme(), Theme::Dark);
        site.settle_theme_transition();
        assert_eq!(site.store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(theme_text(&site), "Modo Oscuro");
    }

    #[test]
    fn theme_survives_language_switch() {
        let mut site = sample_site();
        site.toggle_theme();
        site.set_language(Locale::En, LoadedPortfolio::default());
        assert_eq!(site.theme(), Theme::Light);
        assert_eq!(theme_text(&site), "Light Mode");
    }

    #[test]
    fn parses_flags() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
