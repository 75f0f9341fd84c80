//! Request extractors that apply the access gate.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use super::gate;
use super::users::Role;
use crate::error::DashboardError;
use crate::session::Session;
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "mine_session";

/// Where anonymous requests are sent
pub const LOGIN_PATH: &str = "/";

/// Where non-admins are sent when they reach an admin page
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Authenticated request context.
/// Add this as a handler parameter to require a login.
/// Redirects to the login page when there is no live session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
    pub role: Role,
}

impl AuthContext {
    fn new(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            role: session.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Live session named by the request's session cookie, if any
fn current_session(parts: &Parts, state: &AppState) -> Option<Session> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE_NAME)?;
    state.sessions.get(token.value())
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = current_session(parts, state);
        let session = gate::require_authenticated(current.as_ref())
            .map_err(|_| Redirect::to(LOGIN_PATH).into_response())?;

        Ok(AuthContext::new(session))
    }
}

/// Admin-only request context.
/// Anonymous requests go to the login page; logged-in non-admins are
/// redirected to the dashboard without an error message.
#[derive(Debug, Clone)]
pub struct AdminContext(pub AuthContext);

impl FromRequestParts<AppState> for AdminContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = current_session(parts, state);

        match gate::require_admin(current.as_ref()) {
            Ok(session) => Ok(AdminContext(AuthContext::new(session))),
            Err(DashboardError::Forbidden) => {
                if let Some(session) = &current {
                    tracing::warn!(
                        "Denied {} {} to non-admin user {}",
                        parts.method,
                        parts.uri.path(),
                        session.username
                    );
                }
                Err(Redirect::to(DASHBOARD_PATH).into_response())
            }
            Err(_) => Err(Redirect::to(LOGIN_PATH).into_response()),
        }
    }
}
