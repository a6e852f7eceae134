//! dark-grid-core — deterministic tick/action/replay engine for a
//! multiplayer economy game.
//!
//! # Modules
//!
//! - [`config`] — environment-driven settings
//! - [`error`] — unified `CoreError` and HTTP mapping
//! - [`logging`] — `tracing` setup
//! - [`db`] — Postgres connection pool + migrations
//! - [`canonical_json`] — deterministic JSON encoding for replay hashing
//! - [`domain`] — data model shared by every component
//! - [`store`] — transactional session + row-lock helpers
//! - [`broadcaster`] — in-process pub/sub
//! - [`events`] — event recording
//! - [`puzzle`] — proof-of-work verification for encrypted currency packets
//! - [`ledger`] — currency transfers and encrypted packets
//! - [`market`] — listing state machine
//! - [`rules`] — pluggable ruleset registry
//! - [`action_service`] — per-tick action intake and quota enforcement
//! - [`replay`] — hash-chained replay log
//! - [`tick_manager`] — orchestrates one world across a tick boundary
//! - [`gateway`] — HTTP/WebSocket surface
//! - [`websocket`] — WebSocket upgrade + event stream

pub mod action_service;
pub mod broadcaster;
pub mod canonical_json;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod market;
pub mod puzzle;
pub mod replay;
pub mod rules;
pub mod store;
pub mod tick_manager;
pub mod websocket;

pub use config::Settings;
pub use error::{CoreError, CoreResult};
