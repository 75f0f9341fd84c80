pub mod countries;
pub mod map;
pub mod minerals;
pub mod production;
pub mod upload;

use askama::Template;
use axum::{
  extract::DefaultBodyLimit,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
  routing::{get, post},
  Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{self, AuthContext, Role};
use crate::config;
use crate::error::DashboardError;
use crate::filters;
use crate::state::AppState;

/// Logged-in user shown in the navigation bar
#[derive(Debug, Clone)]
pub struct Nav {
  pub username: String,
  pub role: Role,
  pub is_admin: bool,
}

impl From<&AuthContext> for Nav {
  fn from(auth: &AuthContext) -> Self {
    Self {
      username: auth.username.clone(),
      role: auth.role,
      is_admin: auth.is_admin(),
    }
  }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
  pub nav: Nav,
}

/// GET /dashboard
pub async fn dashboard(auth: AuthContext) -> Response {
  page(StatusCode::OK, DashboardTemplate { nav: Nav::from(&auth) })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(auth::login_page))
    .route("/login", post(auth::login_submit))
    .route("/logout", get(auth::logout))
    .route("/dashboard", get(dashboard))
    .route("/countries", get(countries::country_list))
    .route("/country/{name}", get(countries::country_profile))
    .route("/minerals", get(minerals::mineral_list))
    .route("/mineral/{name}", get(minerals::mineral_profile))
    .route("/production", get(production::production_list))
    .route("/chart", get(production::production_chart))
    .route("/map", get(map::map_view))
    .route(
      "/upload",
      get(upload::upload_page)
        .post(upload::upload_submit)
        .layer(DefaultBodyLimit::max(config::MAX_UPLOAD_BYTES)),
    )
    .nest_service("/static", ServeDir::new(config::STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Render a template with the given status
pub(crate) fn page<T: Template>(status: StatusCode, template: T) -> Response {
  match template.render() {
    Ok(html) => (status, Html(html)).into_response(),
    Err(e) => {
      tracing::error!("Template render failed: {}", e);
      (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
    }
  }
}

/// Status code for an error shown on a page
pub(crate) fn error_status(err: &DashboardError) -> StatusCode {
  match err {
    DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
    DashboardError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
    DashboardError::DataUnavailable(_, _) | DashboardError::SchemaMismatch(_, _) => {
      StatusCode::SERVICE_UNAVAILABLE
    }
    _ => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

/// Log a load failure and return the status and message for the page
pub(crate) fn load_failure(err: &DashboardError) -> (StatusCode, String) {
  match err {
    DashboardError::NotFound(_) => tracing::debug!("{}", err),
    _ => tracing::warn!("{}", err),
  }
  (error_status(err), err.user_message())
}
