//! JSON API mounted under `/api`.
//!
//! Handlers stay thin: they extract the session user, call one service
//! method and map the result onto the `{success, ...}` envelope.
//!
//! - [`dto`] - wire types (camelCase JSON)
//! - [`handlers`] - templates, profile and health endpoints
//! - [`middleware`] - bearer/cookie auth, rate limits, request tracing
//! - [`routes`] - the authenticated router

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
