//! Core types and trait definitions for the rolodex contact service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod event;
pub mod list;
pub mod store;

pub use error::{Error, Result};
