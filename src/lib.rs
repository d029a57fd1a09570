pub mod backend;
pub mod config;
pub mod directory;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod models;
pub mod registration;
pub mod resource;
pub mod startup;
pub mod utils;
pub mod validation;

// Re-export commonly used types for easier access
pub use models::{Customer, PersonType, RegistrationForm};
pub use registration::{register, Outcome, RegistrationError};
