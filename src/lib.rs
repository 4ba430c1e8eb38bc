//! Flico: a heuristic conversational movie and subscription advisor.
//!
//! The engine modules are pure functions over the domain model; the api
//! module is the thin axum surface that owns per-session state.

pub mod api;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
