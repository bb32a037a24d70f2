mod error;
mod state;
mod types;

pub use error::FieldError;
pub use state::FormState;
pub use types::{AsteroidParameters, Field};
