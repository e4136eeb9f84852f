//! # Book Rules
//!
//! The "bible" of the book - contains the content catalog, the unlock code table,
//! and the book definition loaded from configuration.
//! This crate is the single source of truth for what exists and how it is unlocked;
//! it holds no reader state.

pub mod codes;
pub mod config;
pub mod content;
pub mod error;

pub use codes::*;
pub use config::*;
pub use content::*;
pub use error::*;
