//! Password login and session token issuance.

pub mod controller;
pub mod router;
pub mod service;
