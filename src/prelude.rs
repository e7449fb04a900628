pub use serde::{Deserialize, Serialize};

pub use ndarray::*;
pub use ndarray_rand::rand_distr::Uniform;
pub use ndarray_rand::RandomExt;

pub use crate::error::*;
pub use crate::models::Network;

// Internal re-exports
pub use crate::core::{relu, relu_derivative, softmax, Dense, DenseCache};
pub use crate::utils::{argmax, one_hot};
