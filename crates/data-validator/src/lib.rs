//! Recording Cleaning and Validation
//!
//! Fills sensor gaps by linear interpolation, drops rows that stay
//! incomplete, and checks cleaned recordings before windowing.

mod error;
mod interpolate;
mod validator;

pub use error::ValidationError;
pub use interpolate::{clean, interpolate_linear, CleaningReport};
pub use validator::{ValidationConfig, ValidationResult, Validator};
