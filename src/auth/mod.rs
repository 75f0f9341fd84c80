//! Authentication: credential store, login/logout and role guards.

pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod users;

pub use handlers::*;
pub use middleware::{AdminContext, AuthContext, SESSION_COOKIE_NAME};
pub use users::{load_users, Role, User};
