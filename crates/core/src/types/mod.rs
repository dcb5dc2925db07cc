//! Core types for Minimart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod article;
pub mod id;

pub use article::{Article, ArticleError};
pub use id::*;
