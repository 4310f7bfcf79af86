pub mod requests;
pub mod validation;

pub use requests::*;
pub use validation::ValidationError;
