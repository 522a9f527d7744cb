use crate::{dom::NodeId, view::Site};

impl Site {
    /// Shows the page named by `link`'s text and marks the link at the same
    /// position active; everything else is deactivated.
    pub(crate) fn navigate(&mut self, link: NodeId) {
        let root = self.doc.root();
        let target = self.doc.text_content(link).trim().to_lowercase();
        let links = self.doc.find_all(root, |e| e.has_attr("data-nav-link"));
        let pages = self.doc.find_all(root, |e| e.has_attr("data-page"));

        for (index, page) in pages.into_iter().enumerate() {
            let active = self.doc.attr(page, "data-page") == Some(target.as_str());
            self.doc.toggle_class(page, "active", Some(active));
            if let Some(&link) = links.get(index) {
                self.doc.toggle_class(link, "active", Some(active));
            }
        }
        self.doc.scroll_y = 0;
    }

    pub fn active_page(&self) -> Option<&str> {
        let page = self
            .doc
            .find_first(self.doc.root(), |e| e.has_attr("data-page") && e.has_class("active"))?;
        self.doc.attr(page, "data-page")
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        if let Some(sidebar) = self
            .doc
            .find_first(self.doc.root(), |e| e.has_attr("data-sidebar"))
        {
            self.doc.toggle_class(sidebar, "active", None);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        i18n::Locale,
        view::tests::{sample_projects, sample_site, site_with},
    };

    #[test]
    fn nav_links_switch_pages() {
        let mut site = sample_site();
        assert_eq!(site.active_page(), Some("sobre mí"));
        let root = site.doc.root();
        let links = site.doc.find_all(root, |e| e.has_attr("data-nav-link"));
        site.doc.scroll_y = 480;

        site.click(links[2]);
        assert_eq!(site.active_page(), Some("contacto"));
        assert!(site.doc.has_class(links[2], "active"));
        assert!(!site.doc.has_class(links[0], "active"));
        assert_eq!(site.doc.scroll_y, 0);
        let active_pages = site
            .doc
            .find_all(root, |e| e.has_attr("data-page") && e.has_class("active"));
        assert_eq!(active_pages.len(), 1);
    }

    #[test]
    fn english_pages_match_english_links() {
        let mut site = site_with(Locale::En, sample_projects());
        let links = site
            .doc
            .find_all(site.doc.root(), |e| e.has_attr("data-nav-link"));
        site.click(links[1]);
        assert_eq!(site.active_page(), Some("portfolio"));
    }

    #[test]
    fn sidebar_button_toggles() {
        let mut site = sample_site();
        let root = site.doc.root();
        let button = site.doc.find_first(root, |e| e.has_attr("data-sidebar-btn")).unwrap();
        let sidebar = site.doc.find_first(root, |e| e.has_attr("data-sidebar")).unwrap();
        site.click(button);
        assert!(site.doc.has_class(sidebar, "active"));
        site.click(button);
        assert!(!site.doc.has_class(sidebar, "active"));
    }
}
