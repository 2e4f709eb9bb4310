//! Server-rendered dashboard pages.
//!
//! Pages are rendered with Askama from the [`crate::dashboard`] view-model.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie session authentication
//! - [`routes`] - Dashboard route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
