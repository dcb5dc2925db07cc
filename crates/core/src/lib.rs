//! Minimart Core - Shared types library.
//!
//! This crate provides common types used across all Minimart components:
//! - `shop` - The catalog/cart state manager library
//! - `cli` - Command-line harness that drives a shop session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! filesystem access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and article codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
