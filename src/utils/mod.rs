// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod validation;

pub use validation::{AcceptedUpload, RejectReason, ValidationVerdict, Validator};
