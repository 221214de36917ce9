//! # Rollcall CLI
//!
//! Administrative and seeding utilities for the Rollcall user store.
//!
//! ## Usage
//!
//! ```ignore
//! use rollcall_cli::seeder::{generate_users, seed_users};
//!
//! let users = generate_users(100, &password_hash);
//! let report = seed_users(&store, users).await?;
//! ```

pub mod seeder;
