use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use awc::Client;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    core::settings::Settings,
    error::{FolioError, Result},
    i18n::Locale,
};

const REMOTE_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Media attached to a project. Each kind carries only its own fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Media {
    Image { src: String },
    Video { src: String, poster: Option<String> },
    Pdf { src: String },
    Model3d { src: String, preview: Option<String> },
}

impl Media {
    pub fn kind(&self) -> &'static str {
        match self {
            Media::Image { .. } => "image",
            Media::Video { .. } => "video",
            Media::Pdf { .. } => "pdf",
            Media::Model3d { .. } => "3d",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "ProjectRecord", into = "ProjectRecord")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub media: Media,
    pub description: String,
    pub technologies: Vec<String>,
}

/// Wire shape of a project inside the portfolio JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProjectRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model3d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

fn required_source(id: i64, field: &str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        warn!(project = id, field, "Project media source missing");
        String::new()
    })
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        let id = record.id;
        let media = match record.kind.as_deref() {
            Some("video") => Media::Video {
                src: required_source(id, "video", record.video),
                poster: record.poster,
            },
            Some("pdf") => Media::Pdf {
                src: required_source(id, "pdf", record.pdf),
            },
            Some("3d") => Media::Model3d {
                src: required_source(id, "model3d", record.model3d),
                preview: record.preview,
            },
            _ => Media::Image {
                src: required_source(id, "image", record.image),
            },
        };
        Project {
            id,
            title: record.title,
            category: record.category,
            media,
            description: record.description,
            technologies: record.technologies.unwrap_or_default(),
        }
    }
}

impl From<Project> for ProjectRecord {
    fn from(project: Project) -> Self {
        let mut record = ProjectRecord {
            id: project.id,
            title: project.title,
            category: project.category,
            kind: Some(project.media.kind().to_string()),
            description: project.description,
            technologies: (!project.technologies.is_empty()).then_some(project.technologies),
            ..ProjectRecord::default()
        };
        match project.media {
            Media::Image { src } => record.image = Some(src),
            Media::Video { src, poster } => {
                record.video = Some(src);
                record.poster = poster;
            }
            Media::Pdf { src } => record.pdf = Some(src),
            Media::Model3d { src, preview } => {
                record.model3d = Some(src);
                record.preview = preview;
            }
        }
        record
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PortfolioDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// The working project list together with when it was loaded.
#[derive(Clone, Debug)]
pub struct LoadedPortfolio {
    pub projects: Vec<Project>,
    pub loaded_at: DateTime<Local>,
}

impl LoadedPortfolio {
    pub fn new(projects: Vec<Project>) -> Self {
        LoadedPortfolio {
            projects,
            loaded_at: Local::now(),
        }
    }

    pub fn find(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}

impl Default for LoadedPortfolio {
    fn default() -> Self {
        LoadedPortfolio::new(Vec::new())
    }
}

/// File name of the portfolio document for `locale`, unless the settings
/// pin one explicitly.
pub fn portfolio_file_name(settings: &Settings, locale: Locale) -> String {
    match settings.projects_file_name.non_empty() {
        Some(name) => name.to_string(),
        None => format!("portfolio_{}.json", locale.code()),
    }
}

pub fn portfolio_path(settings: &Settings, locale: Locale) -> PathBuf {
    settings
        .data_dir()
        .join(portfolio_file_name(settings, locale))
}

pub fn load_from_storage(local_projects_path: impl AsRef<Path>) -> Result<Vec<Project>> {
    let path = local_projects_path.as_ref();
    let file = File::open(path)?;
    let mut buffer: Vec<u8> = Vec::new();
    let size = BufReader::new(file).read_to_end(&mut buffer)?;
    info!(path = %path.display(), size, "Read local portfolio data");
    let document = serde_json::from_slice::<PortfolioDocument>(&buffer)?;
    Ok(document.projects)
}

pub async fn load_from_cdn(remote_projects_path: &str) -> Result<Vec<Project>> {
    let client = Client::default();
    let mut response = client
        .get(remote_projects_path)
        .send()
        .await
        .map_err(|error| FolioError::Remote(error.to_string()))?;
    if !response.status().is_success() {
        return Err(FolioError::Status(response.status().as_u16()));
    }
    let body = response
        .body()
        .limit(REMOTE_BODY_LIMIT)
        .await
        .map_err(|error| FolioError::Remote(error.to_string()))?;
    info!(url = remote_projects_path, size = body.len(), "Fetched remote portfolio data");
    let document = serde_json::from_slice::<PortfolioDocument>(&body)?;
    Ok(document.projects)
}

/// Reads the project list for `locale` from the remote base URL when one is
/// configured, from the data directory otherwise.
pub async fn fetch_projects(settings: &Settings, locale: Locale) -> Result<Vec<Project>> {
    match settings.remote_url.non_empty() {
        Some(base) => {
            let url = format!(
                "{}/{}",
                base.trim_end_matches('/'),
                portfolio_file_name(settings, locale)
            );
            load_from_cdn(&url).await
        }
        None => load_from_storage(portfolio_path(settings, locale)),
    }
}

/// Loads the portfolio for `locale`. Any failure is logged and yields an
/// empty list so the page stays usable.
pub async fn load_portfolio(settings: &Settings, locale: Locale) -> LoadedPortfolio {
    match fetch_projects(settings, locale).await {
        Ok(projects) => {
            info!(count = projects.len(), %locale, "Portfolio loaded");
            LoadedPortfolio::new(projects)
        }
        Err(error) => {
            error!(%error, %locale, "Failed to load portfolio; continuing with no projects");
            LoadedPortfolio::default()
        }
    }
}
