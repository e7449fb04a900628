pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod prelude;
pub mod utils;

// Re-export types
pub use crate::core::{relu, relu_derivative, softmax, Dense, DenseCache};
pub use error::{NNError, Result};
pub use models::Network;
