//! Rendering adapters and viewer preferences

pub mod preference;
pub mod render;
