//! # Rollcall DB
//!
//! The credential store behind the Rollcall API.
//!
//! Handlers and services only ever see the [`UserStore`] trait. Two backends
//! implement it:
//!
//! - [`PgUserStore`]: PostgreSQL through a shared SQLx pool
//! - [`MemoryUserStore`]: an in-process store for tests and local development
//!
//! Every operation is a single atomic statement (insert, replace-by-id,
//! delete-by-id); there are no multi-step transactions and concurrent edits
//! to the same user resolve as last-writer-wins.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::DatabaseConfig;
//! use rollcall_db::{PgUserStore, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! let store = PgUserStore::new(pool);
//! let users = store.find_all().await?;
//! ```

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use pool::{init_db_pool, run_migrations};
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
