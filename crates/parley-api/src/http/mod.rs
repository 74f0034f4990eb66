//! HTTP/REST API layer for Parley.
//!
//! Axum-based JSON API at `/api/` with CORS support and the
//! `{error, message, code}` error envelope.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
