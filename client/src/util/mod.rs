//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

pub mod auth;
pub mod csv;
pub mod download;
pub mod export;
pub mod location;
pub mod task;
pub mod xlsx;
