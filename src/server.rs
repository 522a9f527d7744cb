use std::{
    collections::{BTreeMap, HashMap},
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use actix_cors::Cors;
use actix_web::{
    cookie::{Cookie, SameSite},
    http::header::{self, ContentType},
    web::{self, resource, scope, Json},
    App, HttpRequest, HttpResponse, HttpResponseBuilder, HttpServer,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    contact::{ContactForm, RedirectLauncher},
    core::{
        data::{fetch_projects, load_portfolio, LoadedPortfolio},
        probe::probe_size,
        settings::Settings,
        storage::{LocalStore, LANGUAGE_KEY, PREFERENCE_KEYS, THEME_KEY},
    },
    error::{FolioError, Result},
    i18n::Locale,
    view::{theme::THEME_SETTLE_DELAY, Site, SubmitOutcome, Theme},
};

/// Shared service state: the settings and each language's project list.
/// Every request renders its own [`Site`], so what one visitor does never
/// shows up in another visitor's page.
pub struct AppState {
    pub settings: Settings,
    portfolios: Mutex<HashMap<Locale, LoadedPortfolio>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            settings,
            portfolios: Mutex::new(HashMap::new()),
        }
    }

    /// Loads both languages' projects up front.
    pub async fn bootstrap(settings: Settings) -> Self {
        let state = AppState::new(settings);
        for locale in [Locale::Es, Locale::En] {
            state.portfolio(locale).await;
        }
        state
    }

    fn portfolios(&self) -> MutexGuard<'_, HashMap<Locale, LoadedPortfolio>> {
        self.portfolios.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The project list for `locale`, loaded on first use.
    pub async fn portfolio(&self, locale: Locale) -> LoadedPortfolio {
        let cached = self.portfolios().get(&locale).cloned();
        if let Some(portfolio) = cached {
            return portfolio;
        }
        let loaded = load_portfolio(&self.settings, locale).await;
        self.portfolios().insert(locale, loaded.clone());
        loaded
    }

    /// Re-reads `locale`'s projects. On failure the cached list is kept.
    pub async fn reload(&self, locale: Locale) -> Result<usize> {
        let projects = fetch_projects(&self.settings, locale)
            .await
            .inspect_err(|error| error!(%error, %locale, "Reload failed; keeping cached projects"))?;
        let count = projects.len();
        self.portfolios()
            .insert(locale, LoadedPortfolio::new(projects));
        info!(count, %locale, "Portfolio reloaded");
        Ok(count)
    }

    /// A page skeleton with no projects, for requests that only touch flags.
    fn blank_site(&self, visitor: &Visitor) -> Site {
        Site::new(
            visitor.store.clone(),
            Locale::default(),
            self.settings.contact_address.value.clone(),
        )
    }

    /// A fresh site for one request, in the visitor's language (or
    /// `detected` when they have none yet) with that language's projects.
    async fn site_for(&self, visitor: &Visitor, detected: Locale) -> Site {
        let mut site = Site::new(
            visitor.store.clone(),
            detected,
            self.settings.contact_address.value.clone(),
        );
        let portfolio = self.portfolio(site.locale()).await;
        site.set_portfolio(portfolio);
        site
    }
}

/// The preference flags a browser sent as cookies, loaded into a store of
/// its own for this request.
struct Visitor {
    store: Arc<LocalStore>,
    sent: BTreeMap<String, String>,
}

impl Visitor {
    fn from_request(request: &HttpRequest) -> Self {
        let sent: BTreeMap<String, String> = PREFERENCE_KEYS
            .iter()
            .filter_map(|&key| {
                request
                    .cookie(key)
                    .map(|cookie| (key.to_string(), cookie.value().to_string()))
            })
            .collect();
        Visitor {
            store: Arc::new(LocalStore::seeded(sent.clone())),
            sent,
        }
    }

    fn preferences(&self) -> Preferences {
        Preferences {
            theme: self
                .store
                .get(THEME_KEY)
                .and_then(|flag| flag.parse().ok())
                .unwrap_or_default(),
            language: self.locale(),
        }
    }

    fn locale(&self) -> Locale {
        self.store
            .get(LANGUAGE_KEY)
            .and_then(|flag| flag.parse().ok())
            .unwrap_or_default()
    }

    /// Starts a response that sets a cookie for every flag the browser does
    /// not already hold.
    fn respond(&self, mut response: HttpResponseBuilder) -> HttpResponseBuilder {
        for (key, value) in self.store.entries() {
            if self.sent.get(&key) != Some(&value) {
                response.cookie(
                    Cookie::build(key, value)
                        .path("/")
                        .same_site(SameSite::Lax)
                        .finish(),
                );
            }
        }
        response
    }

    fn html(&self, body: String) -> HttpResponse {
        self.respond(HttpResponse::Ok())
            .content_type(ContentType::html())
            .body(body)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Locale,
}

/// Reply to a theme toggle: the new flags plus how long the page should
/// keep its `theme-changing` transition.
#[derive(Serialize, Debug)]
pub struct ThemeChange {
    #[serde(flatten)]
    pub preferences: Preferences,
    pub settle_ms: u64,
}

#[derive(Deserialize, Debug)]
pub struct LanguageRequest {
    pub language: Locale,
}

#[derive(Deserialize, Debug)]
pub struct GalleryQuery {
    pub filter: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        scope("/v1")
            .service(resource("/folio").route(web::get().to(status_handler)))
            .service(resource("/projects").route(web::get().to(projects_handler)))
            .service(resource("/projects/reload").route(web::post().to(reload_handler)))
            .service(resource("/projects/{id}/modal").route(web::get().to(modal_handler)))
            .service(resource("/gallery").route(web::get().to(gallery_handler)))
            .service(resource("/preferences").route(web::get().to(preferences_handler)))
            .service(resource("/preferences/theme").route(web::put().to(theme_handler)))
            .service(resource("/preferences/language").route(web::put().to(language_handler)))
            .service(resource("/contact").route(web::post().to(contact_handler))),
    )
    .service(resource("/").route(web::get().to(page_handler)))
    .service(resource("/{page}").route(web::get().to(localized_page_handler)));
}

pub async fn start_server(state: web::Data<AppState>) -> io::Result<()> {
    let addr = state.settings.socket_addr();
    info!(%addr, "Starting folio site");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
    })
    .bind(addr)?
    .run()
    .await
}

async fn status_handler(state: web::Data<AppState>, request: HttpRequest) -> HttpResponse {
    let locale = Visitor::from_request(&request).locale();
    let portfolio = state.portfolio(locale).await;
    HttpResponse::Ok().body(format!(
        "folio is running: {} projects ({}) loaded at {}",
        portfolio.projects.len(),
        locale,
        portfolio.loaded_at.format("%Y-%m-%d %H:%M:%S")
    ))
}

async fn page_handler(state: web::Data<AppState>, request: HttpRequest) -> HttpResponse {
    let visitor = Visitor::from_request(&request);
    let site = state.site_for(&visitor, Locale::default()).await;
    visitor.html(site.html())
}

/// `index.html` / `index_en.html`: the page's language wins over the
/// visitor's flag and becomes the new flag.
async fn localized_page_handler(
    state: web::Data<AppState>,
    request: HttpRequest,
    page: web::Path<String>,
) -> HttpResponse {
    let page = page.into_inner();
    if !page.ends_with(".html") {
        return HttpResponse::NotFound().body(format!("No page \"{}\"", page));
    }
    let visitor = Visitor::from_request(&request);
    let requested = Locale::detect(None, &page);
    if let Err(error) = visitor.store.set(LANGUAGE_KEY, requested.code()) {
        warn!(%error, "Could not persist language flag");
    }
    let site = state.site_for(&visitor, requested).await;
    visitor.html(site.html())
}

async fn projects_handler(state: web::Data<AppState>, request: HttpRequest) -> HttpResponse {
    let locale = Visitor::from_request(&request).locale();
    HttpResponse::Ok().json(state.portfolio(locale).await.projects)
}

async fn reload_handler(
    state: web::Data<AppState>,
    request: HttpRequest,
) -> std::result::Result<HttpResponse, FolioError> {
    let count = state
        .reload(Visitor::from_request(&request).locale())
        .await?;
    Ok(HttpResponse::Ok().body(format!("Reloaded {} projects", count)))
}

async fn gallery_handler(
    state: web::Data<AppState>,
    request: HttpRequest,
    query: web::Query<GalleryQuery>,
) -> HttpResponse {
    let visitor = Visitor::from_request(&request);
    let mut site = state.site_for(&visitor, Locale::default()).await;
    if let Some(filter) = query.filter.as_deref() {
        site.filter_by(filter);
    }
    visitor.html(site.gallery_html())
}

async fn modal_handler(
    state: web::Data<AppState>,
    request: HttpRequest,
    id: web::Path<i64>,
) -> HttpResponse {
    let id = id.into_inner();
    let visitor = Visitor::from_request(&request);
    let mut site = state.site_for(&visitor, Locale::default()).await;
    let pending = site.open_project(id);
    if site.open_project_id() != Some(id) {
        return HttpResponse::NoContent().finish();
    }
    if let Some(pending) = pending {
        let size = probe_size(&pending.url, &state.settings.public_dir()).await;
        site.apply_file_size(&pending, size);
    }
    visitor.html(site.modal_html())
}

fn preferences(site: &Site) -> Preferences {
    Preferences {
        theme: site.theme(),
        language: site.locale(),
    }
}

async fn preferences_handler(request: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(Visitor::from_request(&request).preferences())
}

async fn theme_handler(state: web::Data<AppState>, request: HttpRequest) -> HttpResponse {
    let visitor = Visitor::from_request(&request);
    let mut site = state.blank_site(&visitor);
    site.toggle_theme();
    let change = ThemeChange {
        preferences: preferences(&site),
        settle_ms: u64::try_from(THEME_SETTLE_DELAY.as_millis()).unwrap_or(u64::MAX),
    };
    visitor.respond(HttpResponse::Ok()).json(change)
}

async fn language_handler(
    state: web::Data<AppState>,
    request: HttpRequest,
    body: Json<LanguageRequest>,
) -> HttpResponse {
    let visitor = Visitor::from_request(&request);
    let locale = body.language;
    let mut site = state.blank_site(&visitor);
    let portfolio = state.portfolio(locale).await;
    site.set_language(locale, portfolio);
    info!(%locale, "Language switched");
    visitor.respond(HttpResponse::Ok()).json(preferences(&site))
}

async fn contact_handler(
    state: web::Data<AppState>,
    request: HttpRequest,
    form: web::Form<ContactForm>,
) -> HttpResponse {
    let visitor = Visitor::from_request(&request);
    let mut site = state.site_for(&visitor, Locale::default()).await;
    site.fill_form(&form);
    let mut launcher = RedirectLauncher::default();
    match site.submit_contact(&mut launcher) {
        SubmitOutcome::Sent { mailto, .. } => {
            let location = launcher.location.unwrap_or(mailto);
            visitor
                .respond(HttpResponse::SeeOther())
                .insert_header((header::LOCATION, location))
                .finish()
        }
        SubmitOutcome::Blocked { .. } => visitor
            .respond(HttpResponse::UnprocessableEntity())
            .content_type(ContentType::html())
            .body(site.contact_html()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{dev::ServiceResponse, http::StatusCode, test};
    use std::path::Path;

    const PROJECTS_ES: &str = r#"{ "projects": [
        { "id": 1, "title": "Cartel", "category": "diseno-grafico",
          "image": "img/cartel.jpg", "description": "Un cartel" },
        { "id": 2, "title": "Estatua", "category": "realidad-aumentada", "type": "3d",
          "model3d": "models/estatua.3ds", "description": "Una estatua" },
        { "id": 3, "title": "Retrato", "category": "fotografia",
          "image": "img/retrato.jpg", "description": "Un retrato" }
    ] }"#;

    const PROJECTS_EN: &str = r#"{ "projects": [
        { "id": 1, "title": "Poster", "category": "diseno-grafico",
          "image": "img/poster.jpg", "description": "A poster" }
    ] }"#;

    fn settings_for(root: &Path) -> Settings {
        let mut settings = Settings::new();
        settings.local_projects_path.value = root.join("data").display().to_string();
        settings.public_path.value = root.join("public").display().to_string();
        settings.contact_address.value = "me@site.dev".to_string();
        settings
    }

    fn seed(root: &Path) {
        std::fs::create_dir_all(root.join("data")).unwrap();
        std::fs::create_dir_all(root.join("public/models")).unwrap();
        std::fs::write(root.join("data/portfolio_es.json"), PROJECTS_ES).unwrap();
        std::fs::write(root.join("data/portfolio_en.json"), PROJECTS_EN).unwrap();
        std::fs::write(root.join("public/models/estatua.3ds"), vec![7u8; 2048]).unwrap();
    }

    async fn state_for(root: &Path) -> web::Data<AppState> {
        web::Data::new(AppState::bootstrap(settings_for(root)).await)
    }

    fn cookie_value(response: &ServiceResponse, name: &str) -> Option<String> {
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_string())
    }

    macro_rules! service {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure)).await
        };
    }

    macro_rules! body_text {
        ($app:expr, $request:expr) => {
            String::from_utf8_lossy(&test::call_and_read_body(&$app, $request).await).into_owned()
        };
    }

    #[actix_web::test]
    async fn status_and_page_render() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::get().uri("/v1/folio").to_request();
        assert!(body_text!(app, request).starts_with("folio is running: 3 projects (es)"));

        let request = test::TestRequest::get().uri("/").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cookie_value(&response, "theme").as_deref(), Some("dark"));
        let body = test::read_body(response).await;
        let page = String::from_utf8_lossy(&body);
        assert!(page.starts_with("<!DOCTYPE html><html lang=\"es\" data-theme=\"dark\">"));
        assert_eq!(page.matches("data-filter-item").count(), 3);

        let request = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new("theme", "dark"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.response().cookies().count(), 0);
    }

    #[actix_web::test]
    async fn gallery_filters_by_category() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::get()
            .uri("/v1/gallery?filter=fotografia")
            .to_request();
        let gallery = body_text!(app, request);
        assert_eq!(gallery.matches("class=\"project-item active\"").count(), 1);
        assert!(gallery.contains("class=\"project-item active\" data-filter-item data-category=\"fotografia\""));

        let request = test::TestRequest::get().uri("/v1/gallery").to_request();
        let gallery = body_text!(app, request);
        assert_eq!(gallery.matches("class=\"project-item active\"").count(), 3);

        let request = test::TestRequest::get().uri("/v1/gallery?filter=todos").to_request();
        let gallery = body_text!(app, request);
        assert_eq!(gallery.matches("class=\"project-item active\"").count(), 3);
    }

    #[actix_web::test]
    async fn modal_renders_known_projects_only() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::get().uri("/v1/projects/99/modal").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let request = test::TestRequest::get().uri("/v1/projects/1/modal").to_request();
        let modal = body_text!(app, request);
        assert!(modal.contains("<h3 class=\"h3\" id=\"modal-title\">Cartel</h3>"));
        assert!(modal.contains(">Un cartel</p>"));

        let request = test::TestRequest::get().uri("/").to_request();
        let page = body_text!(app, request);
        assert!(page.contains("<div class=\"modal-container\" id=\"portfolio-modal\">"));
        assert!(!page.contains("Un cartel"));
    }

    #[actix_web::test]
    async fn model3d_modal_reports_file_size() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::get().uri("/v1/projects/2/modal").to_request();
        let modal = body_text!(app, request);
        assert!(modal.contains("<span class=\"file-size\">2 KB</span>"));

        std::fs::remove_file(dir.path().join("public/models/estatua.3ds")).unwrap();
        let request = test::TestRequest::get().uri("/v1/projects/2/modal").to_request();
        assert!(body_text!(app, request).contains("Tamaño no disponible"));
    }

    #[actix_web::test]
    async fn theme_flag_travels_in_a_cookie() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::put().uri("/v1/preferences/theme").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(cookie_value(&response, "theme").as_deref(), Some("light"));
        let change: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(change["theme"], "light");
        assert_eq!(change["language"], "es");
        assert_eq!(change["settle_ms"], 600);

        let request = test::TestRequest::put()
            .uri("/v1/preferences/theme")
            .cookie(Cookie::new("theme", "light"))
            .to_request();
        let prefs: Preferences = test::call_and_read_body_json(&app, request).await;
        assert_eq!(prefs.theme, Theme::Dark);

        let request = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new("theme", "light"))
            .to_request();
        assert!(body_text!(app, request).contains("data-theme=\"light\""));

        let request = test::TestRequest::get().uri("/").to_request();
        assert!(body_text!(app, request).contains("data-theme=\"dark\""));

        let request = test::TestRequest::get()
            .uri("/v1/preferences")
            .cookie(Cookie::new("theme", "light"))
            .cookie(Cookie::new("language", "en"))
            .to_request();
        let prefs: Preferences = test::call_and_read_body_json(&app, request).await;
        assert_eq!(
            prefs,
            Preferences {
                theme: Theme::Light,
                language: Locale::En
            }
        );
    }

    #[actix_web::test]
    async fn language_flag_is_per_visitor() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::put()
            .uri("/v1/preferences/language")
            .set_json(serde_json::json!({ "language": "en" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(cookie_value(&response, "language").as_deref(), Some("en"));
        let prefs: Preferences = test::read_body_json(response).await;
        assert_eq!(prefs.language, Locale::En);

        let request = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new("language", "en"))
            .to_request();
        let page = body_text!(app, request);
        assert!(page.contains("<html lang=\"en\""));
        assert!(page.contains("Poster"));

        let request = test::TestRequest::get().uri("/").to_request();
        let page = body_text!(app, request);
        assert!(page.contains("<html lang=\"es\""));
        assert!(page.contains("Cartel"));

        let request = test::TestRequest::get()
            .uri("/v1/projects")
            .cookie(Cookie::new("language", "en"))
            .to_request();
        let projects: Vec<serde_json::Value> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(projects.len(), 1);

        let request = test::TestRequest::get().uri("/index_en.html").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(cookie_value(&response, "language").as_deref(), Some("en"));
        let body = test::read_body(response).await;
        assert!(String::from_utf8_lossy(&body).contains("Poster"));

        let request = test::TestRequest::get().uri("/about").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn contact_redirects_to_mailto() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::post()
            .uri("/v1/contact")
            .set_form([("name", "Ana"), ("email", "ana@example.com"), ("message", "Hola")])
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap();
        assert!(location.starts_with("mailto:me@site.dev?subject=Nuevo%20mensaje%20de%20Ana"));

        let request = test::TestRequest::post()
            .uri("/v1/contact")
            .set_form([("name", "Ana"), ("email", ""), ("message", "Hola")])
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = test::read_body(response).await;
        assert!(String::from_utf8_lossy(&body)
            .contains("<div class=\"form-message error\" data-expires-ms=\"5000\">Por favor completa todos los campos</div>"));
    }

    #[actix_web::test]
    async fn rejected_contact_stays_with_its_sender() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::get().uri("/").to_request();
        let before = body_text!(app, request);

        let request = test::TestRequest::post()
            .uri("/v1/contact")
            .set_form([
                ("name", "Alice Secret"),
                ("email", "alice-at-private"),
                ("message", "my private note"),
            ])
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = test::read_body(response).await;
        assert!(String::from_utf8_lossy(&body).contains("Alice Secret"));

        let request = test::TestRequest::get().uri("/").to_request();
        let after = body_text!(app, request);
        assert_eq!(after, before);
        assert!(!after.contains("Alice Secret"));
        assert!(!after.contains("alice-at-private"));
        assert!(!after.contains("my private note"));
    }

    #[actix_web::test]
    async fn failed_reload_reports_and_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path()).await;
        let app = service!(state);

        let request = test::TestRequest::get().uri("/v1/gallery").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(
            String::from_utf8_lossy(&body),
            "<ul class=\"project-list\" id=\"project-list\"></ul>"
        );

        let request = test::TestRequest::post().uri("/v1/projects/reload").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = test::read_body(response).await;
        assert!(String::from_utf8_lossy(&body).starts_with("I/O error"));

        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/portfolio_es.json"), PROJECTS_ES).unwrap();
        let request = test::TestRequest::post().uri("/v1/projects/reload").to_request();
        assert_eq!(body_text!(app, request), "Reloaded 3 projects");

        std::fs::write(dir.path().join("data/portfolio_es.json"), "{ broken").unwrap();
        let request = test::TestRequest::post().uri("/v1/projects/reload").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let request = test::TestRequest::get().uri("/v1/projects").to_request();
        let projects: Vec<serde_json::Value> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[1]["type"], "3d");
    }
}
