//! HTTP handlers for the restaurant CRUD surface.

pub mod restaurant;
pub use restaurant::*;
