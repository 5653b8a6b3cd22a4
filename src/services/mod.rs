//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the post-generation logic and the controller state
//! so route handlers can stay focused on protocol translation.

pub mod composer;
pub mod post;
pub mod session;
