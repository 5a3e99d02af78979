//! Middleware components for HTTP request processing.
//!
//! - `auth`: bearer-token check wrapped around every entity route group
//! - `security_headers`: hardening headers and cache policy for responses

pub mod auth;
pub mod security_headers;
