//! Application layer - plan header logic independent of any renderer.

pub mod billing;
