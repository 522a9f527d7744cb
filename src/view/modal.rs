use tracing::{debug, warn};

use crate::{
    core::{data::Media, probe::format_file_size},
    dom::{el, El, EventType, Markup, NodeId},
    error::Result,
    i18n::{category_name, t, TextKey},
    view::{
        layout::{
            icon, MODAL_CATEGORY_ID, MODAL_DESCRIPTION_ID, MODAL_ID, MODAL_MEDIA_ID,
            MODAL_TECHNOLOGIES_ID, MODAL_TITLE_ID,
        },
        Action, Site, ZoomOverlay,
    },
};

/// A file-size lookup requested by a 3D modal. Its result is only written
/// back while the same modal instance is still showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingProbe {
    pub node: NodeId,
    pub generation: u64,
    pub url: String,
}

fn media_error(key: TextKey, site: &Site) -> Markup {
    el("div")
        .class("media-error")
        .child(icon("alert-circle-outline"))
        .child(el("p").text(t(site.locale, key)))
        .into()
}

fn download_link(class: &str, href: &str, file_name: String, label: &str) -> El {
    el("a")
        .class(class)
        .attr("href", href)
        .attr("download", file_name)
        .child(icon("download-outline"))
        .text(format!(" {}", label))
}

impl Site {
    pub fn is_modal_open(&self) -> bool {
        self.doc
            .get_element_by_id(MODAL_ID)
            .is_some_and(|modal| self.doc.has_class(modal, "active"))
    }

    pub fn open_project_id(&self) -> Option<i64> {
        self.modal.project
    }

    /// Opens the detail modal for `id`. Unknown ids leave everything as is.
    pub fn open_project(&mut self, id: i64) -> Option<PendingProbe> {
        let Some(project) = self.portfolio.find(id).cloned() else {
            debug!(project = id, "Ignoring modal request for unknown project");
            return None;
        };
        let modal = self.doc.get_element_by_id(MODAL_ID)?;
        let media = self.doc.get_element_by_id(MODAL_MEDIA_ID)?;
        let title = self.doc.get_element_by_id(MODAL_TITLE_ID)?;
        let category = self.doc.get_element_by_id(MODAL_CATEGORY_ID)?;
        let description = self.doc.get_element_by_id(MODAL_DESCRIPTION_ID)?;
        let technologies = self.doc.get_element_by_id(MODAL_TECHNOLOGIES_ID)?;

        self.close_zoom();
        self.doc.clear_children(media);
        self.doc.clear_children(technologies);

        self.doc.set_text(title, project.title.as_str());
        self.doc
            .set_text(category, category_name(self.locale, &project.category));
        self.doc.set_text(description, project.description.as_str());
        for technology in &project.technologies {
            self.doc.append(
                technologies,
                el("span").class("technology-tag").text(technology.as_str()),
            );
        }

        self.modal.generation += 1;
        self.modal.project = Some(id);

        let probe = match &project.media {
            Media::Image { src } => {
                self.setup_image_modal(media, src, &project.title);
                None
            }
            Media::Video { src, poster } => {
                self.setup_video_modal(media, src, poster.as_deref());
                None
            }
            Media::Pdf { src } => {
                self.setup_pdf_modal(media, src, &project.title);
                None
            }
            Media::Model3d { src, preview } => {
                self.setup_3d_modal(media, src, preview.as_deref(), &project.title)
            }
        };

        self.doc.add_class(modal, "active");
        debug!(project = id, kind = project.media.kind(), "Modal opened");
        probe
    }

    fn setup_image_modal(&mut self, media: NodeId, src: &str, title: &str) {
        let markup = el("div")
            .class("modal-image-container")
            .child(el("img").class("modal-image").attr("src", src).attr("alt", title))
            .child(
                el("button")
                    .class("image-zoom-btn")
                    .attr("type", "button")
                    .child(icon("search-outline")),
            );
        let Some(container) = self.doc.append(media, markup) else {
            return;
        };
        let zoom = Action::OpenZoom {
            src: src.to_string(),
            title: title.to_string(),
        };
        if let Some(img) = self.doc.find_first(container, |e| e.tag == "img") {
            self.doc.listen(img, EventType::Click, zoom.clone());
            self.doc.listen(img, EventType::Load, Action::MarkLoaded);
            let error = media_error(TextKey::ErrorLoadingImage, self);
            self.doc
                .listen(img, EventType::Error, Action::ReplaceTarget(error));
        }
        if let Some(button) = self.doc.find_first(container, |e| e.has_class("image-zoom-btn")) {
            self.doc.listen(button, EventType::Click, zoom);
            self.doc.stop_propagation(button, EventType::Click);
        }
    }

    fn setup_video_modal(&mut self, media: NodeId, src: &str, poster: Option<&str>) {
        let mut video = el("video")
            .class("modal-video")
            .flag("controls")
            .flag("autoplay");
        if let Some(poster) = poster {
            video = video.attr("poster", poster);
        }
        let video = video.child(el("source").attr("src", src).attr("type", "video/mp4"));
        if let Some(node) = self.doc.append(media, video) {
            let error = media_error(TextKey::ErrorLoadingVideo, self);
            self.doc
                .listen(node, EventType::Error, Action::ReplaceTarget(error));
            self.doc.play(node);
        }
    }

    fn setup_pdf_modal(&mut self, media: NodeId, src: &str, title: &str) {
        let markup = el("div")
            .class("modal-media-content")
            .child(download_link(
                "pdf-download-btn",
                src,
                format!("{}.pdf", title),
                t(self.locale, TextKey::DownloadPdf),
            ))
            .child(
                el("iframe")
                    .class("pdf-viewer")
                    .attr("src", src)
                    .attr("title", title),
            );
        let Some(container) = self.doc.append(media, markup) else {
            return;
        };
        if let Some(viewer) = self.doc.find_first(container, |e| e.tag == "iframe") {
            let error = media_error(TextKey::ErrorLoadingPdf, self);
            self.doc
                .listen(viewer, EventType::Error, Action::ReplaceTarget(error));
        }
    }

    fn model3d_placeholder(&self, title: &str) -> El {
        el("div")
            .class("model3d-placeholder")
            .child(icon("cube-outline"))
            .child(el("h4").text(t(self.locale, TextKey::Model3d)))
            .child(el("p").text(title))
    }

    fn setup_3d_modal(
        &mut self,
        media: NodeId,
        src: &str,
        preview: Option<&str>,
        title: &str,
    ) -> Option<PendingProbe> {
        let locale = self.locale;
        let viewer_content: El = match preview {
            Some(preview) => el("img")
                .class("model3d-preview-img")
                .attr("src", preview)
                .attr("alt", format!("{} {}", t(locale, TextKey::PreviewOf), title)),
            None => self.model3d_placeholder(title),
        };
        let markup = el("div")
            .class("modal-media-content")
            .child(
                download_link(
                    "model3d-download-btn",
                    src,
                    format!("{}.3ds", title),
                    t(locale, TextKey::Download3dModel),
                )
                .child(
                    el("span")
                        .class("file-size")
                        .text(t(locale, TextKey::CalculatingSize)),
                ),
            )
            .child(el("div").class("model3d-viewer").child(viewer_content))
            .child(
                el("p")
                    .class("model3d-note")
                    .text(t(locale, TextKey::Model3dNote)),
            );
        let container = self.doc.append(media, markup)?;

        if preview.is_some() {
            if let Some(img) = self.doc.find_first(container, |e| e.tag == "img") {
                let fallback = self.model3d_placeholder(title).into();
                self.doc
                    .listen(img, EventType::Error, Action::ReplaceTarget(fallback));
            }
        }

        let node = self
            .doc
            .find_first(container, |e| e.has_class("file-size"))?;
        Some(PendingProbe {
            node,
            generation: self.modal.generation,
            url: src.to_string(),
        })
    }

    /// Writes a size probe result into its modal. Returns `false` when the
    /// modal it was started for has since been replaced or cleared.
    pub fn apply_file_size(&mut self, probe: &PendingProbe, size: Result<u64>) -> bool {
        if probe.generation != self.modal.generation || !self.doc.contains(probe.node) {
            debug!(url = %probe.url, "Dropping stale file size result");
            return false;
        }
        let label = match size {
            Ok(bytes) => format_file_size(bytes),
            Err(error) => {
                warn!(url = %probe.url, %error, "File size probe failed");
                t(self.locale, TextKey::SizeUnavailable).to_string()
            }
        };
        self.doc.set_text(probe.node, label);
        true
    }

    /// Hides the modal and stops every video in it at its start.
    pub fn close_modal(&mut self) {
        let Some(modal) = self.doc.get_element_by_id(MODAL_ID) else {
            return;
        };
        self.doc.remove_class(modal, "active");
        for video in self.doc.find_all(modal, |e| e.tag == "video") {
            self.doc.pause(video);
            self.doc.seek(video, 0.0);
        }
        self.modal.project = None;
    }

    /// Full-screen view of a modal image. Only one can be open at a time.
    pub fn open_zoom(&mut self, src: &str, title: &str) {
        if self.zoom.is_some() {
            return;
        }
        let Some(body) = self.doc.find_first(self.doc.root(), |e| e.tag == "body") else {
            return;
        };
        let markup = el("div")
            .class("zoom-overlay")
            .child(el("img").class("zoom-image").attr("src", src).attr("alt", title))
            .child(
                el("button")
                    .class("zoom-close-btn")
                    .attr("type", "button")
                    .child(icon("close-outline")),
            );
        let Some(overlay) = self.doc.append(body, markup) else {
            return;
        };
        self.doc
            .listen_self(overlay, EventType::Click, Action::CloseZoom);
        if let Some(close) = self.doc.find_first(overlay, |e| e.has_class("zoom-close-btn")) {
            self.doc.listen(close, EventType::Click, Action::CloseZoom);
        }
        let key_listener = self
            .doc
            .listen_document(EventType::KeyDown, Action::CloseZoomOnEscape);
        self.zoom = Some(ZoomOverlay {
            overlay,
            key_listener,
        });
    }

    pub fn close_zoom(&mut self) {
        if let Some(zoom) = self.zoom.take() {
            self.doc.remove(zoom.overlay);
            self.doc.unlisten(zoom.key_listener);
        }
    }

    pub fn is_zoom_open(&self) -> bool {
        self.zoom.is_some()
    }

    pub fn modal_html(&self) -> String {
        self.fragment_html(MODAL_ID).unwrap_or_default()
    }
}
