use tracing::debug;

use crate::{
    core::data::{Media, Project},
    dom::{el, El, EventType, Markup, NodeId},
    i18n::{category_name, t, Locale, TextKey},
    view::{
        layout::{icon, PROJECT_LIST_ID},
        Action, Site,
    },
};

/// One gallery entry, tagged with its raw category for filtering.
pub fn gallery_item(project: &Project, locale: Locale) -> El {
    el("li")
        .class("project-item")
        .class("active")
        .flag("data-filter-item")
        .attr("data-category", project.category.as_str())
        .child(
            el("a")
                .class("project-link")
                .attr("href", "#")
                .attr("data-project-id", project.id.to_string())
                .child(
                    el("figure")
                        .class("project-img")
                        .child(
                            el("div")
                                .class("project-item-icon-box")
                                .child(icon("eye-outline")),
                        )
                        .child(media_preview(project, locale)),
                )
                .child(el("h3").class("project-title").text(project.title.as_str()))
                .child(
                    el("p")
                        .class("project-category")
                        .text(category_name(locale, &project.category)),
                ),
        )
}

fn media_preview(project: &Project, locale: Locale) -> El {
    match &project.media {
        Media::Video { src, .. } => el("div").class("video-thumbnail").child(
            el("video")
                .attr("preload", "metadata")
                .flag("muted")
                .child(
                    el("source")
                        .attr("src", src.as_str())
                        .attr("type", "video/mp4"),
                ),
        ),
        Media::Pdf { .. } => el("div")
            .class("pdf-preview")
            .child(icon("document-text-outline").class("pdf-icon"))
            .child(
                el("div")
                    .class("pdf-preview-info")
                    .child(el("div").class("pdf-preview-title").text(project.title.as_str()))
                    .child(
                        el("div")
                            .class("pdf-preview-text")
                            .text(t(locale, TextKey::PdfDocument)),
                    ),
            ),
        Media::Model3d {
            preview: Some(preview),
            ..
        } => el("div")
            .class("image-container")
            .child(lazy_image(preview, &project.title)),
        Media::Model3d { preview: None, .. } => model3d_preview(&project.title, locale),
        Media::Image { src } => el("div")
            .class("image-container")
            .child(lazy_image(src, &project.title)),
    }
}

fn lazy_image(src: &str, title: &str) -> El {
    el("img")
        .attr("src", src)
        .attr("alt", title)
        .attr("loading", "lazy")
}

fn model3d_preview(title: &str, locale: Locale) -> El {
    el("div")
        .class("model3d-preview")
        .child(icon("cube-outline").class("model3d-icon"))
        .child(
            el("div")
                .class("model3d-preview-info")
                .child(el("div").class("model3d-preview-title").text(title))
                .child(
                    el("div")
                        .class("model3d-preview-text")
                        .text(t(locale, TextKey::Model3d)),
                ),
        )
}

/// What replaces a gallery image that fails to load, if it has an image.
fn preview_fallback(project: &Project, locale: Locale) -> Option<Markup> {
    match &project.media {
        Media::Image { .. } => Some(
            el("div")
                .class("media-error")
                .child(icon("image-outline"))
                .child(el("p").text(t(locale, TextKey::ErrorLoadingImage)))
                .into(),
        ),
        Media::Model3d {
            preview: Some(_), ..
        } => Some(model3d_preview(&project.title, locale).into()),
        _ => None,
    }
}

impl Site {
    /// Renders every project into `#project-list` in list order, then asks
    /// video thumbnails for their metadata and wires the modal links.
    pub(crate) fn display_portfolio(&mut self) {
        let Some(list) = self.doc.get_element_by_id(PROJECT_LIST_ID) else {
            return;
        };
        self.doc.clear_children(list);

        let locale = self.locale;
        for project in &self.portfolio.projects {
            let Some(item) = self.doc.append(list, gallery_item(project, locale)) else {
                continue;
            };
            if let Some(fallback) = preview_fallback(project, locale) {
                if let Some(img) = self.doc.find_first(item, |e| e.tag == "img") {
                    self.doc
                        .listen(img, EventType::Error, Action::ReplaceParent(fallback));
                }
            }
        }

        self.init_video_thumbnails(list);
        self.init_project_links(list);
        debug!(count = self.portfolio.projects.len(), "Gallery rendered");
    }

    fn init_video_thumbnails(&mut self, list: NodeId) {
        let videos: Vec<_> = self
            .doc
            .find_all(list, |e| e.has_class("video-thumbnail"))
            .into_iter()
            .flat_map(|thumbnail| self.doc.find_all(thumbnail, |e| e.tag == "video"))
            .collect();
        for video in videos {
            self.doc.load_media(video);
        }
    }

    fn init_project_links(&mut self, list: NodeId) {
        for link in self.doc.find_all(list, |e| e.has_class("project-link")) {
            let id = self
                .doc
                .attr(link, "data-project-id")
                .and_then(|value| value.parse::<i64>().ok());
            if let Some(id) = id {
                self.doc.listen(link, EventType::Click, Action::OpenProject(id));
            }
        }
    }

    pub fn gallery_items(&self) -> Vec<NodeId> {
        self.doc
            .find_all(self.doc.root(), |e| e.has_attr("data-filter-item"))
    }

    pub fn gallery_html(&self) -> String {
        self.fragment_html(PROJECT_LIST_ID).unwrap_or_default()
    }
}
