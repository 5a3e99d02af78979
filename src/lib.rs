//! # Microblog Backend Library
//!
//! REST backend for a small microblog: users, subjects, posts and replies,
//! stored in SQLite.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access through a shared pool
//! - **Tokio**: async runtime
//! - **Serde**: JSON bodies
//!
//! ## Core Components
//!
//! - [`auth`]: password hashing and bearer tokens
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`db`]: pool construction and schema initialization
//! - [`error`]: HTTP error type and repository error mapping
//! - [`middleware`]: authorization and security headers
//! - [`repository`]: per-entity repository traits and SQLite implementations
//! - [`routes`]: per-entity routers and API assembly
//! - [`state`]: shared application state
//! - [`types`]: entity records and request/response DTOs

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
