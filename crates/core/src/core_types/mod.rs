//! Core types and utilities

pub mod source;
pub mod vec2;
pub mod wall;

pub use source::*;
pub use vec2::Vec2;
pub use wall::*;
