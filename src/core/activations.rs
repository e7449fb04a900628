use ndarray::Array1;

pub fn relu(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(|v| if v > 0.0 { v } else { 0.0 })
}

// Derivative taken at the post-activation value: an output of exactly
// zero contributes no gradient.
pub fn relu_derivative(a: &Array1<f64>) -> Array1<f64> {
    a.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
}

// Plain exp/sum without the shift-by-max trick; very large activations
// overflow to inf.
pub fn softmax(v: &Array1<f64>) -> Array1<f64> {
    let exp = v.mapv(|v| v.exp());
    let sum = exp.sum();
    exp / sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn relu_clamps_negatives() {
        let out = relu(&array![-3.0, -0.5, 0.0, 0.5, 3.0]);
        assert_eq!(out, array![0.0, 0.0, 0.0, 0.5, 3.0]);
    }

    #[test]
    fn relu_derivative_is_zero_at_zero() {
        let out = relu_derivative(&array![-1.0, 0.0, 2.0]);
        assert_eq!(out, array![0.0, 0.0, 1.0]);
    }

    #[test]
    fn softmax_is_a_distribution() {
        let p = softmax(&array![1.0, 2.0, 3.0, 4.0]);
        assert_abs_diff_eq!(p.sum(), 1.0, epsilon = 1e-9);
        assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
        // Larger activations get larger probabilities
        assert!(p[3] > p[2] && p[2] > p[1] && p[1] > p[0]);
    }

    #[test]
    fn softmax_of_uniform_input_is_uniform() {
        let p = softmax(&array![0.5, 0.5, 0.5, 0.5]);
        for &v in p.iter() {
            assert_abs_diff_eq!(v, 0.25, epsilon = 1e-12);
        }
    }
}
