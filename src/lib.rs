//! # clubdesk
//!
//! Multi-role fitness-club management service.
//!
//! The heart of the crate is the access engine in [`auth`]: a compact
//! role-plus-ownership model that decides, for an authenticated principal,
//! whether an operation on a resource is allowed, which record it may touch,
//! which roles it may provision, and which slice of a collection it may see.
//! Every privileged route handler and every UI permission query goes through
//! it, so list views, detail views, and rendered affordances always agree.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use clubdesk::config::Config;
//! use clubdesk::server::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/clubdesk.yaml").await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export the main types
pub use auth::{AccessControl, AccessEngine, Action, PermissionFacade, Resource};
pub use config::Config;
pub use core::models::{Principal, Role};
pub use utils::error::{AppError, Result};
