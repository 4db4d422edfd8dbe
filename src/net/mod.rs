//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the authenticated request lifecycle (bearer attachment,
//! 401 refresh-and-retry, timeouts), `api` is the typed endpoint catalog,
//! and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;
