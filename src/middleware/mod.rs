//! Request middleware and extractors.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor guarding
//!   authenticated routes
//! - [`recovery`]: the outermost layer turning panics into `500` responses
//! - [`route`]: route and status labels for logs and metrics
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` splits the header, verifies the token and yields its claims
//! 3. The handler receives the claims as a typed argument
//!
//! ```ignore
//! async fn get_user(auth_user: AuthUser, Path(id): Path<String>) -> ... {
//!     tracing::info!(caller = %auth_user.email(), "fetching user");
//! }
//! ```

pub mod auth;
pub mod recovery;
pub mod route;
