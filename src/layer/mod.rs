//! Tower Layer implementations for the task bridge

pub mod validation;

pub use validation::{validate_envelope, EnvelopeValidationLayer, EnvelopeValidationService};
