//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome (role gate, header, tables, notices)
//! while reading the session from the `AuthContext` provider.

pub mod dashboard_layout;
pub mod data_table;
pub mod nav_bar;
pub mod notice;
pub mod role_gate;
