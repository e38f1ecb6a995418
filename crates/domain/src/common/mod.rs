//! Common utility functions shared across the Notiflow engine and player.
//!
//! Pure functions only: no side effects, no I/O.

pub mod string;

pub use string::slugify;
