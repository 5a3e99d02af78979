//! Credentials: Argon2 password hashes and HS256 bearer tokens.

pub mod password;
pub mod token;

pub use token::Claims;
