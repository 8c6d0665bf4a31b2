pub mod conflict;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod models;
pub mod openapi;
pub mod periods;
pub mod settings;
pub mod statistics;
pub mod store;
pub mod time;
pub mod upcoming;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use handlers::{
    create_course, delete_course, get_course, get_ical, get_periods, get_statistics,
    healthz_live, healthz_ready, list_courses, root, update_course, upcoming_courses,
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::ICalExporter;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::store::ScheduleStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<ScheduleStore>,
    pub exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn new(settings: Settings, store: ScheduleStore) -> Self {
        let exporter = ICalExporter::new(settings.calendar_name.clone());
        Self {
            settings,
            store: Arc::new(store),
            exporter: Arc::new(exporter),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let store = ScheduleStore::open(&settings.database_path)?;
    info!(path = %settings.database_path, "Opened course database");
    let state = AppState::new(settings, store);

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Course Schedule API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/api/courses.ical", get(get_ical))
        .route("/api/upcoming", get(upcoming_courses))
        .route("/api/statistics", get(get_statistics))
        .route("/api/periods", get(get_periods))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer)
}
