//! Integration tests for the dossier scoped store and its facades

mod artifact_store;
mod preferences;
mod scope_precedence;
