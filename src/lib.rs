pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod paths;
pub mod render;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
