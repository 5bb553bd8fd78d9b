//! Domain models
//!
//! Request input is checked at the HTTP boundary; invalid input
//! returns ValidationError, not panic.

pub mod user;
pub mod validation;

pub use user::{NewUser, User, UserId};
pub use validation::ValidationError;
