//! Notiflow Engine library.
//!
//! Server side of workflow retrieval and management.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over repository ports
//! - `infrastructure/` - Port traits, SQLite adapters, clock and configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
