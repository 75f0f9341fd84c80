//! In-memory session storage for logged-in users.
//!
//! Sessions are keyed by an opaque token carried in the session cookie and
//! expire after a configurable duration of inactivity.

use crate::auth::Role;
use crate::config;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identity held for an authenticated browser
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
  pub username: String,
  pub role: Role,
}

/// Session entry with last access time for expiration
struct SessionEntry {
  session: Session,
  last_access: DateTime<Utc>,
}

/// Shared session store, cheap to clone
#[derive(Clone)]
pub struct SessionStore {
  sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
  expiry: Duration,
}

impl SessionStore {
  pub fn new(expiry_hours: i64) -> Self {
    Self {
      sessions: Arc::new(Mutex::new(HashMap::new())),
      expiry: Duration::hours(expiry_hours),
    }
  }

  /// Idle lifetime, also used as the cookie max-age
  pub fn expiry_hours(&self) -> i64 {
    self.expiry.num_hours()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
    self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Store a session and return its new token
  pub fn create(&self, session: Session) -> String {
    self.create_at(session, Utc::now())
  }

  fn create_at(&self, session: Session, now: DateTime<Utc>) -> String {
    let token = generate_session_id();
    self.lock().insert(
      token.clone(),
      SessionEntry {
        session,
        last_access: now,
      },
    );
    token
  }

  /// Look up a live session and refresh its last access time
  pub fn get(&self, token: &str) -> Option<Session> {
    self.get_at(token, Utc::now())
  }

  fn get_at(&self, token: &str, now: DateTime<Utc>) -> Option<Session> {
    let mut sessions = self.lock();

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions, now - self.expiry);
    }

    let cutoff = now - self.expiry;
    match sessions.get_mut(token) {
      Some(entry) if entry.last_access > cutoff => {
        entry.last_access = now;
        Some(entry.session.clone())
      }
      Some(_) => {
        sessions.remove(token);
        None
      }
      None => None,
    }
  }

  /// Remove a session, returning it if it existed
  pub fn destroy(&self, token: &str) -> Option<Session> {
    self.lock().remove(token).map(|entry| entry.session)
  }

  /// Number of stored sessions (including not-yet-swept expired ones)
  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>, cutoff: DateTime<Utc>) {
  sessions.retain(|_, entry| entry.last_access > cutoff);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
