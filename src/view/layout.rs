use crate::{
    dom::{el, El},
    i18n::{t, Locale, TextKey},
};

pub(crate) const PROJECT_LIST_ID: &str = "project-list";
pub(crate) const MODAL_ID: &str = "portfolio-modal";
pub(crate) const MODAL_MEDIA_ID: &str = "modal-media";
pub(crate) const MODAL_TITLE_ID: &str = "modal-title";
pub(crate) const MODAL_CATEGORY_ID: &str = "modal-category";
pub(crate) const MODAL_DESCRIPTION_ID: &str = "modal-description";
pub(crate) const MODAL_TECHNOLOGIES_ID: &str = "modal-technologies";
pub(crate) const THEME_CHECKBOX_ID: &str = "theme-checkbox";
pub(crate) const CONTACT_FORM_ID: &str = "contact-form";

pub(crate) fn icon(name: &str) -> El {
    el("ion-icon").attr("name", name)
}

/// `data-page` value matched against a navigation link's lowercased text.
pub(crate) fn page_name(locale: Locale, key: TextKey) -> String {
    t(locale, key).to_lowercase()
}

pub(crate) fn skeleton(locale: Locale) -> El {
    el("html")
        .attr("lang", locale.code())
        .attr("data-theme", "dark")
        .child(
            el("body")
                .child(sidebar())
                .child(
                    el("main")
                        .child(navbar(locale))
                        .child(
                            el("article")
                                .class("about")
                                .class("active")
                                .attr("data-page", page_name(locale, TextKey::NavAbout)),
                        )
                        .child(portfolio_page(locale))
                        .child(contact_page(locale)),
                )
                .child(modal_shell()),
        )
}

fn sidebar() -> El {
    el("aside")
        .class("sidebar")
        .flag("data-sidebar")
        .child(
            el("button")
                .class("info_more-btn")
                .flag("data-sidebar-btn")
                .child(icon("chevron-down")),
        )
        .child(
            el("label").class("theme-switch").child(
                el("input")
                    .attr("type", "checkbox")
                    .id(THEME_CHECKBOX_ID),
            )
            .child(el("span").class("theme-text")),
        )
}

fn navbar(locale: Locale) -> El {
    let links = [TextKey::NavAbout, TextKey::NavPortfolio, TextKey::NavContact]
        .into_iter()
        .enumerate()
        .map(|(index, key)| {
            let mut link = el("button").class("navbar-link").flag("data-nav-link");
            if index == 0 {
                link = link.class("active");
            }
            el("li").class("navbar-item").child(link.text(t(locale, key)))
        });
    el("nav").class("navbar").child(el("ul").class("navbar-list").children(links))
}

fn portfolio_page(locale: Locale) -> El {
    el("article")
        .class("portfolio")
        .attr("data-page", page_name(locale, TextKey::NavPortfolio))
        .child(
            el("section")
                .class("projects")
                .child(el("ul").class("filter-list"))
                .child(
                    el("div")
                        .class("filter-select-box")
                        .child(
                            el("button")
                                .class("filter-select")
                                .flag("data-select")
                                .child(
                                    el("div")
                                        .class("select-value")
                                        .flag("data-select-value")
                                        .text(t(locale, TextKey::SelectCategory)),
                                )
                                .child(icon("chevron-down")),
                        )
                        .child(el("ul").class("select-list")),
                )
                .child(el("ul").class("project-list").id(PROJECT_LIST_ID)),
        )
}

fn form_field(input: El) -> El {
    el("div").class("form-field").child(input)
}

fn contact_page(locale: Locale) -> El {
    el("article")
        .class("contact")
        .attr("data-page", page_name(locale, TextKey::NavContact))
        .child(
            el("section").class("contact-form").child(
                el("form")
                    .class("form")
                    .id(CONTACT_FORM_ID)
                    .child(
                        el("div")
                            .class("input-wrapper")
                            .child(form_field(
                                el("input")
                                    .class("form-input")
                                    .attr("type", "text")
                                    .attr("name", "name")
                                    .attr("placeholder", t(locale, TextKey::FormName))
                                    .flag("required"),
                            ))
                            .child(form_field(
                                el("input")
                                    .class("form-input")
                                    .attr("type", "email")
                                    .attr("name", "email")
                                    .attr("placeholder", t(locale, TextKey::FormEmail))
                                    .flag("required"),
                            )),
                    )
                    .child(form_field(
                        el("textarea")
                            .class("form-input")
                            .attr("name", "message")
                            .attr("placeholder", t(locale, TextKey::FormMessage))
                            .flag("required"),
                    ))
                    .child(
                        el("button")
                            .class("form-btn")
                            .attr("type", "submit")
                            .child(icon("paper-plane"))
                            .child(el("span").text(t(locale, TextKey::SendMessage))),
                    ),
            ),
        )
}

fn modal_shell() -> El {
    el("div")
        .class("modal-container")
        .id(MODAL_ID)
        .child(el("div").class("overlay").flag("data-overlay"))
        .child(
            el("section")
                .class("portfolio-modal")
                .child(
                    el("button")
                        .class("modal-close-btn")
                        .flag("data-modal-close-btn")
                        .child(icon("close-outline")),
                )
                .child(el("div").class("modal-media").id(MODAL_MEDIA_ID))
                .child(
                    el("div")
                        .class("modal-content")
                        .child(el("h3").class("h3").id(MODAL_TITLE_ID))
                        .child(el("p").class("modal-category").id(MODAL_CATEGORY_ID))
                        .child(el("p").class("modal-description").id(MODAL_DESCRIPTION_ID))
                        .child(el("div").class("technologies").id(MODAL_TECHNOLOGIES_ID)),
                ),
        )
}
