//! # Printshop API Server Library
//!
//! HTTP surface of the print storefront: account signup/login and the
//! catalog category taxonomy.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Response hardening
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
