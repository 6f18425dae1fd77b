//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `marks_grid`, `roll_call`, `quiz`)
//! so pages depend on small focused models that can be tested without a
//! browser.

pub mod marks_grid;
pub mod quiz;
pub mod roll_call;
pub mod session;
