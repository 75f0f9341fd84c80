//! Access control: credential checks at login and role guards for
//! protected operations.
//!
//! The guards are plain functions over the request's session; the
//! extractors in `middleware` call them and turn failures into redirects.

use super::password;
use super::users::{self, User};
use crate::error::{DashboardError, Result};
use crate::paths::DataPaths;
use crate::session::{Session, SessionStore};

/// Match a username/password pair against the credential list.
///
/// Both fields must match exactly. The error does not say which one was wrong.
pub fn authenticate(users: &[User], username: &str, password: &str) -> Result<Session> {
    users
        .iter()
        .find(|u| u.username == username && password::verify_password(password, &u.password))
        .map(|u| Session {
            username: u.username.clone(),
            role: u.role,
        })
        .ok_or(DashboardError::InvalidCredentials)
}

/// Load the credential store, authenticate, and open a session.
/// Returns the new session token together with the session.
pub fn login(
    paths: &DataPaths,
    sessions: &SessionStore,
    username: &str,
    password: &str,
) -> Result<(String, Session)> {
    let users = users::load_users(&paths.users_file())?;
    let session = authenticate(&users, username, password)?;
    let token = sessions.create(session.clone());
    Ok((token, session))
}

/// Drop the session for `token`, if there is one.
pub fn logout(sessions: &SessionStore, token: Option<&str>) -> Option<Session> {
    token.and_then(|t| sessions.destroy(t))
}

pub fn require_authenticated(session: Option<&Session>) -> Result<&Session> {
    session.ok_or(DashboardError::Unauthenticated)
}

pub fn require_admin(session: Option<&Session>) -> Result<&Session> {
    let session = require_authenticated(session)?;
    if session.role.is_admin() {
        Ok(session)
    } else {
        Err(DashboardError::Forbidden)
    }
}
