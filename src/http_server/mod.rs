//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/records` - Records API
//! - `/records-view` - Server-rendered record pages

pub mod config;
pub mod health;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
