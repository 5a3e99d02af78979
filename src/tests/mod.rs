//! Integration and unit tests for the microblog backend.
//!
//! ## Test Modules
//!
//! - **support**: temporary databases, app construction and request helpers
//! - **repository_tests**: SQLite repositories against a real schema
//! - **api_tests**: HTTP contract of the entity routers (SQLite backed)
//! - **fake_repository_tests**: router behavior against in-memory repositories
//! - **auth_tests**: signup, login and the bearer-token middleware
//! - **error_tests**: error mapping and response envelopes
//! - **config_tests**: configuration loading and validation
//! - **db_tests**: schema initialization and store-level constraints
//! - **health_api_tests**: health, version and security headers

pub mod support;

pub mod db_tests;
pub mod health_api_tests;
