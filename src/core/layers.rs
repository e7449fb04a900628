use crate::core::activations::{relu, relu_derivative};
use crate::prelude::*;
use rand::Rng;

/// A fully-connected layer with ReLU activation.
///
/// `w` has shape `(output_size, input_size)`; `b` has length `output_size`.
#[derive(Debug, Clone)]
pub struct Dense {
    pub input_size: usize,
    pub output_size: usize,
    pub w: Array2<f64>,
    pub b: Array1<f64>,
}

/// Activations captured by a single [`Dense::forward`] call.
///
/// [`Dense::backward`] needs the values seen during the matching forward
/// pass; the cache carries them between the two calls.
#[derive(Debug, Clone)]
pub struct DenseCache {
    input: Array1<f64>,
    output: Array1<f64>,
}

impl Dense {
    /// Variance-scaled uniform initialization: weights in `[-scale, scale]`
    /// with `scale = sqrt(2 / (input_size + output_size))`, biases at 0.01.
    pub fn new<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Result<Self> {
        if input_size == 0 || output_size == 0 {
            return Err(NNError::InvalidNetworkConfiguration(
                "layer dimensions must be greater than 0".to_string(),
            ));
        }
        let scale = (2.0 / (input_size + output_size) as f64).sqrt();
        Ok(Self {
            input_size,
            output_size,
            w: Array2::random_using((output_size, input_size), Uniform::new(-scale, scale), rng),
            b: Array1::from_elem(output_size, 0.01),
        })
    }

    pub fn forward(&self, input: &Array1<f64>) -> Result<(Array1<f64>, DenseCache)> {
        if input.len() != self.input_size {
            return Err(NNError::DimensionMismatch(format!(
                "layer expects input of length {}, got {}",
                self.input_size,
                input.len()
            )));
        }
        let z = self.w.dot(input) + &self.b;
        let output = relu(&z);
        let cache = DenseCache {
            input: input.clone(),
            output: output.clone(),
        };
        Ok((output, cache))
    }

    /// One gradient-descent step. Returns the gradient with respect to the
    /// layer input, for the preceding layer's own backward call.
    pub fn backward(
        &mut self,
        cache: &DenseCache,
        output_gradient: &Array1<f64>,
        learning_rate: f64,
    ) -> Result<Array1<f64>> {
        if output_gradient.len() != self.output_size {
            return Err(NNError::DimensionMismatch(format!(
                "layer expects output gradient of length {}, got {}",
                self.output_size,
                output_gradient.len()
            )));
        }
        // ReLU derivative at the post-activation value
        let delta = output_gradient * &relu_derivative(&cache.output);
        // Input gradient uses the pre-update weights
        let input_gradient = self.w.t().dot(&delta);
        let dw = delta
            .view()
            .insert_axis(Axis(1))
            .dot(&cache.input.view().insert_axis(Axis(0)));
        self.w = &self.w - learning_rate * dw;
        self.b = &self.b - learning_rate * delta;
        Ok(input_gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_layer() -> Dense {
        Dense {
            input_size: 2,
            output_size: 1,
            w: array![[1.0, 1.0]],
            b: array![0.0],
        }
    }

    #[test]
    fn forward_computes_relu_affine() {
        let layer = unit_layer();
        let (out, _) = layer.forward(&array![1.0, 1.0]).unwrap();
        assert_eq!(out, array![2.0]);
    }

    #[test]
    fn backward_updates_weights_and_returns_input_gradient() {
        let mut layer = unit_layer();
        let (_, cache) = layer.forward(&array![1.0, 1.0]).unwrap();
        let grad = layer.backward(&cache, &array![1.0], 0.1).unwrap();
        assert_eq!(grad, array![1.0, 1.0]);
        assert_abs_diff_eq!(layer.w[[0, 0]], 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(layer.w[[0, 1]], 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(layer.b[0], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn backward_through_dead_unit_produces_no_gradient() {
        let mut layer = Dense {
            input_size: 2,
            output_size: 1,
            w: array![[-1.0, -1.0]],
            b: array![0.0],
        };
        let (out, cache) = layer.forward(&array![1.0, 1.0]).unwrap();
        assert_eq!(out, array![0.0]);
        let grad = layer.backward(&cache, &array![1.0], 0.1).unwrap();
        // Output was clamped to zero, so nothing flows back
        assert_eq!(grad, array![0.0, 0.0]);
        assert_eq!(layer.w, array![[-1.0, -1.0]]);
        assert_eq!(layer.b, array![0.0]);
    }

    #[test]
    fn forward_output_is_nonnegative_with_expected_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let layer = Dense::new(4, 3, &mut rng).unwrap();
        let (out, _) = layer.forward(&array![0.2, -0.7, 1.5, 0.0]).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn forward_rejects_wrong_input_length() {
        let layer = unit_layer();
        let err = layer.forward(&array![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, NNError::DimensionMismatch(_)));
    }

    #[test]
    fn backward_rejects_wrong_gradient_length() {
        let mut layer = unit_layer();
        let (_, cache) = layer.forward(&array![1.0, 1.0]).unwrap();
        let err = layer.backward(&cache, &array![1.0, 2.0], 0.1).unwrap_err();
        assert!(matches!(err, NNError::DimensionMismatch(_)));
    }

    #[test]
    fn new_initializes_within_scale_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer = Dense::new(10, 5, &mut rng).unwrap();
        let scale = (2.0 / 15.0f64).sqrt();
        assert!(layer.w.iter().all(|&v| v.abs() <= scale));
        assert!(layer.b.iter().all(|&v| v == 0.01));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Dense::new(0, 3, &mut rng).is_err());
        assert!(Dense::new(3, 0, &mut rng).is_err());
    }
}
