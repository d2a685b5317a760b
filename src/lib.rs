//! linkshelf - A self-hosted URL shortener with categories
//!
//! # Architecture
//! - `storage`: SeaORM data access (short urls, categories, users, sessions)
//! - `services`: redirect resolution, session/token validation, admin CRUD
//! - `api`: HTTP handlers, middleware and the JSON envelope
//! - `config`: TOML + environment configuration
//! - `runtime`: server startup and shutdown
//! - `system`: logging setup

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
