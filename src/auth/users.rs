//! Credential store: the JSON list of users allowed to log in.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Access level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Viewer => "Viewer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Viewer" => Ok(Role::Viewer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A credential record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    /// Plaintext, or an Argon2 PHC string (see `password::verify_password`)
    pub password: String,
    pub role: Role,
}

/// Record as stored on disk, before the role is checked
#[derive(Debug, Deserialize)]
struct UserRecord {
    username: String,
    password: String,
    role: String,
}

/// Read the whole credential store.
///
/// Any record with a role other than `Admin` or `Viewer` fails the load.
pub fn load_users(path: &Path) -> Result<Vec<User>> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path)
        .map_err(|e| DashboardError::StoreUnavailable(path_str.clone(), e.to_string()))?;

    let records: Vec<UserRecord> = serde_json::from_str(&content)
        .map_err(|e| DashboardError::StoreUnavailable(path_str.clone(), e.to_string()))?;

    records
        .into_iter()
        .map(|record| -> Result<User> {
            let role: Role = record.role.parse().map_err(|e: String| {
                DashboardError::SchemaMismatch(path_str.clone(), format!("user '{}': {}", record.username, e))
            })?;
            Ok(User {
                username: record.username,
                password: record.password,
                role,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;

    #[test]
    fn test_load_seeded_users() {
        let env = TestEnv::new().unwrap();
        let users = load_users(&env.paths.users_file()).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[1].role, Role::Viewer);
    }

    #[test]
    fn test_missing_store() {
        let env = TestEnv::new().unwrap();
        let result = load_users(&env.path().join("nobody.json"));
        assert!(matches!(result, Err(DashboardError::StoreUnavailable(_, _))));
    }

    #[test]
    fn test_malformed_store() {
        let env = TestEnv::new().unwrap();
        env.write("users.json", r#"[{"username": "alice"}]"#);
        let result = load_users(&env.paths.users_file());
        assert!(matches!(result, Err(DashboardError::StoreUnavailable(_, _))));

        env.write("users.json", "not json");
        let result = load_users(&env.paths.users_file());
        assert!(matches!(result, Err(DashboardError::StoreUnavailable(_, _))));
    }

    #[test]
    fn test_unknown_role_is_schema_mismatch() {
        let env = TestEnv::new().unwrap();
        env.write(
            "users.json",
            r#"[{"username": "alice", "password": "pw1", "role": "Admin"},
                {"username": "mallory", "password": "pw", "role": "admin"}]"#,
        );

        match load_users(&env.paths.users_file()) {
            Err(DashboardError::SchemaMismatch(_, detail)) => assert!(detail.contains("mallory")),
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Admin, Role::Viewer] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!(Role::Admin.is_admin());
        assert!(!Role::Viewer.is_admin());
    }
}
