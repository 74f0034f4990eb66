//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley
//! backend: Session, Message, Reaction, and their associated error and
//! configuration types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono,
//! thiserror, secrecy.

pub mod config;
pub mod error;
pub mod message;
pub mod session;
