//! # Rollcall Models
//!
//! Domain models and DTOs for the Rollcall API.
//!
//! - [`ids`]: the strongly-typed [`UserId`]
//! - [`users`]: stored user records, their public view and request DTOs
//! - [`auth`]: login request and response DTOs
//!
//! Request DTOs derive [`validator::Validate`]; handlers accept them through
//! the `ValidatedJson` extractor so a failing field never reaches a service.

pub mod auth;
pub mod ids;
pub mod users;

pub use auth::{LoginRequest, LoginResponse};
pub use ids::UserId;
pub use users::{NewUser, User, UserPayload, UserRecord, UserResponse};
