// src/core.rs
pub mod activations;
pub mod layers;

// Re-export commonly used items
pub use activations::{relu, relu_derivative, softmax};
pub use layers::{Dense, DenseCache};
