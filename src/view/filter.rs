use crate::{
    dom::{el, EventType, NodeId},
    i18n::{category_name, is_all_filter, t, TextKey},
    view::{Action, Site},
};

impl Site {
    /// Rebuilds the filter buttons and the mobile dropdown from the loaded
    /// categories, with "all" active and every gallery item visible.
    pub(crate) fn setup_filters(&mut self) {
        let root = self.doc.root();
        let Some(button_list) = self.doc.find_first(root, |e| e.has_class("filter-list")) else {
            return;
        };
        let Some(select_list) = self.doc.find_first(root, |e| e.has_class("select-list")) else {
            return;
        };

        let locale = self.locale;
        let mut values: Vec<(String, String)> = vec![(
            t(locale, TextKey::FilterAllValue).to_string(),
            t(locale, TextKey::FilterAll).to_string(),
        )];
        for project in &self.portfolio.projects {
            if !values.iter().any(|(value, _)| value == &project.category) {
                values.push((
                    project.category.clone(),
                    category_name(locale, &project.category).into_owned(),
                ));
            }
        }

        self.doc.replace_children(
            button_list,
            values.iter().enumerate().map(|(index, (value, label))| {
                let mut button = el("button")
                    .flag("data-filter-btn")
                    .attr("data-category", value.as_str());
                if index == 0 {
                    button = button.class("active");
                }
                el("li")
                    .class("filter-item")
                    .child(button.text(label.as_str()))
            }),
        );
        self.doc.replace_children(
            select_list,
            values.iter().map(|(value, label)| {
                el("li").class("select-item").child(
                    el("button")
                        .flag("data-select-item")
                        .attr("data-category", value.as_str())
                        .text(label.as_str()),
                )
            }),
        );

        let buttons = self.doc.find_all(button_list, |e| e.has_attr("data-filter-btn"));
        for &button in &buttons {
            self.doc.listen(button, EventType::Click, Action::SelectFilter);
        }
        for item in self.doc.find_all(select_list, |e| e.has_attr("data-select-item")) {
            self.doc
                .listen(item, EventType::Click, Action::SelectDropdownItem);
        }
        self.active_filter = buttons.first().copied();

        if let Some(label) = self.doc.find_first(root, |e| e.has_attr("data-select-value")) {
            self.doc.set_text(label, t(locale, TextKey::SelectCategory));
        }
        self.apply_filter(t(locale, TextKey::FilterAllValue));
    }

    /// Shows the items of `value` (or all of them for the "all" value) and
    /// hides the rest.
    pub fn apply_filter(&mut self, value: &str) {
        let show_all = is_all_filter(value);
        for item in self.gallery_items() {
            let show = show_all || self.doc.attr(item, "data-category") == Some(value);
            self.doc.toggle_class(item, "active", Some(show));
        }
    }

    fn set_select_label(&mut self, source: NodeId) {
        let label = self.doc.text_content(source);
        if let Some(value) = self
            .doc
            .find_first(self.doc.root(), |e| e.has_attr("data-select-value"))
        {
            self.doc.set_text(value, label);
        }
    }

    fn activate_filter_button(&mut self, button: NodeId) {
        if let Some(previous) = self.active_filter {
            self.doc.remove_class(previous, "active");
        }
        self.doc.add_class(button, "active");
        self.active_filter = Some(button);
    }

    pub(crate) fn select_filter_button(&mut self, button: NodeId) {
        let value = self.doc.attr(button, "data-category").unwrap_or_default().to_string();
        self.set_select_label(button);
        self.apply_filter(&value);
        self.activate_filter_button(button);
    }

    pub(crate) fn select_dropdown_item(&mut self, item: NodeId) {
        let value = self.doc.attr(item, "data-category").unwrap_or_default().to_string();
        self.set_select_label(item);
        if let Some(select) = self.doc.find_first(self.doc.root(), |e| e.has_attr("data-select")) {
            self.doc.toggle_class(select, "active", None);
        }
        self.apply_filter(&value);

        let matching = self.doc.find_first(self.doc.root(), |e| {
            e.has_attr("data-filter-btn") && e.attr("data-category") == Some(value.as_str())
        });
        if let Some(button) = matching {
            for other in self
                .doc
                .find_all(self.doc.root(), |e| e.has_attr("data-filter-btn"))
            {
                self.doc.remove_class(other, "active");
            }
            self.doc.add_class(button, "active");
            self.active_filter = Some(button);
        }
    }

    /// Selects `value` the way a visitor would: through its filter button
    /// when one exists, otherwise by filtering directly.
    pub fn filter_by(&mut self, value: &str) {
        let button = self.doc.find_first(self.doc.root(), |e| {
            e.has_attr("data-filter-btn") && e.attr("data-category") == Some(value)
        });
        match button {
            Some(button) => self.click(button),
            None => self.apply_filter(value),
        }
    }

    pub fn active_filter_value(&self) -> Option<&str> {
        self.doc.attr(self.active_filter?, "data-category")
    }

    pub fn visible_items(&self) -> Vec<NodeId> {
        self.gallery_items()
            .into_iter()
            .filter(|&item| self.doc.has_class(item, "active"))
            .collect()
    }
}
