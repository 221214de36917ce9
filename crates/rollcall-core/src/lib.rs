//! # Rollcall Core
//!
//! Core types shared by every Rollcall crate.
//!
//! - [`errors`]: the [`AppError`] type and its JSON error body
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::{AppError, hash_password_with_cost, verify_password};
//!
//! let hash = hash_password_with_cost("secret", 12)?;
//! if !verify_password("secret", &hash)? {
//!     return Err(AppError::unauthorized("Invalid credentials"));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorBody};
pub use password::{DummyHash, hash_password_with_cost, verify_password};
