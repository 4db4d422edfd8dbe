//! Shared application state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns persisted credentials and the reactive signed-in state;
//! `feed` owns the paginated home-page list.

pub mod feed;
pub mod session;
