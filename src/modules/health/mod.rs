//! Liveness and store reachability.

pub mod controller;
pub mod router;
