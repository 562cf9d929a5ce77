//! Configuration module
//!
//! Export, search and logging settings loaded from the user's config file.

pub mod config;
