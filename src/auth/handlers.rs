//! Login and logout handlers.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use super::gate;
use super::middleware::{DASHBOARD_PATH, LOGIN_PATH, SESSION_COOKIE_NAME};
use crate::error::DashboardError;
use crate::filters;
use crate::state::AppState;

const LOGIN_UNAVAILABLE: &str = "Login is currently unavailable";

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub version: &'static str,
}

impl LoginTemplate {
    fn with_error(error: Option<String>) -> Self {
        Self {
            error,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET / - Show login page
pub async fn login_page() -> Html<String> {
    Html(LoginTemplate::with_error(None).render().unwrap_or_default())
}

/// POST /login - Process login
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let previous = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string());

    match gate::login(&state.paths, &state.sessions, &form.username, &form.password) {
        Ok((token, session)) => {
            // A fresh token on every login; the old one stops working
            gate::logout(&state.sessions, previous.as_deref());

            tracing::info!("User {} logged in as {}", session.username, session.role);

            let session_cookie = Cookie::build((SESSION_COOKIE_NAME, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(false) // Set to true in production with HTTPS
                .max_age(time::Duration::hours(state.sessions.expiry_hours()))
                .build();

            (jar.add(session_cookie), Redirect::to(DASHBOARD_PATH)).into_response()
        }
        Err(e) => {
            let status = match &e {
                DashboardError::InvalidCredentials => {
                    tracing::warn!("Failed login attempt for {:?}", form.username);
                    StatusCode::OK
                }
                _ => {
                    tracing::error!("Login unavailable: {}", e);
                    StatusCode::SERVICE_UNAVAILABLE
                }
            };
            // Store problems can name stored users; keep the detail in the log
            let message = match &e {
                DashboardError::InvalidCredentials => e.user_message(),
                _ => LOGIN_UNAVAILABLE.to_string(),
            };
            let template = LoginTemplate::with_error(Some(message));
            (status, Html(template.render().unwrap_or_default())).into_response()
        }
    }
}

/// GET /logout - Clear the session and return to the login page
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string());

    if let Some(session) = gate::logout(&state.sessions, token.as_deref()) {
        tracing::info!("User {} logged out", session.username);
    }

    let session_cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();

    (jar.remove(session_cookie), Redirect::to(LOGIN_PATH))
}
