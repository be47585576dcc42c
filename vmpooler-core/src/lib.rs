pub mod error;
pub mod format;
pub mod output_macros;
pub mod user_paths;
pub mod validation;

pub use error::{PoolerError, Result};
pub use validation::{validate_lifetime, MAX_LIFETIME};
