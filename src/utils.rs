use ndarray::Array1;

/// Index of the largest entry; ties go to the lowest index.
pub fn argmax(values: &Array1<f64>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// One-hot indicator vector for a class label.
pub fn one_hot(label: usize, classes: usize) -> Array1<f64> {
    let mut target = Array1::zeros(classes);
    target[label] = 1.0;
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn argmax_picks_the_maximum() {
        assert_eq!(argmax(&array![0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&array![3.0, 1.0, 2.0]), 0);
    }

    #[test]
    fn argmax_breaks_ties_toward_the_lowest_index() {
        assert_eq!(argmax(&array![0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&array![0.1, 0.4, 0.4]), 1);
    }

    #[test]
    fn one_hot_places_a_single_one() {
        let target = one_hot(3, 10);
        assert_eq!(target.len(), 10);
        assert_eq!(target.sum(), 1.0);
        assert_eq!(target[3], 1.0);
    }
}
