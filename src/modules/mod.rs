//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic over the [`UserStore`](rollcall_db::UserStore)
//! - `router.rs`: Axum router configuration

pub mod auth;
pub mod health;
pub mod users;
