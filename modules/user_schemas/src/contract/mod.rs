//! Public records and error types. External consumers should only need this module
//! and the entry points re-exported from the crate root.

pub mod error;
pub mod model;
