//! Networking modules for the Gradyze backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` owns the shared call/decode/error contract, `types` defines the
//! backend DTOs, and the remaining modules map one backend area each to typed
//! async functions generic over a `Transport`.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod classroom;
pub mod contact;
pub mod marks;
pub mod oauth;
pub mod quiz;
pub mod request;
pub mod roster;
pub mod types;
