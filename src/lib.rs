//! Integration test host for the spotless-applier workspace
pub use spotless_applier_core::*;
