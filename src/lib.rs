//! Dossier: scoped context artifacts and model preferences for chat
//! communities.
//!
//! Members of a community attach named text artifacts either to themselves
//! or to the whole community, and each scope carries its own default-model
//! preference. The persistent store enforces scoped name uniqueness; lookup
//! precedence, the preference fallback chain, and the interactive
//! pagination session live on top of it.

pub mod artifacts;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod pager;
pub mod prefs;
pub mod store;
pub mod types;
