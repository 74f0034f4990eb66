//! Chat session and message persistence abstractions for Parley.
//!
//! This module defines the `ChatRepository` trait that the
//! infrastructure layer implements, and the `ChatService` that carries
//! the session/message business logic on top of it.

pub mod repository;
pub mod service;
