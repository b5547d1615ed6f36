/// Small numeric helpers shared by the scoring components.

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population variance (divides by N, not N - 1).
/// A single observation has zero variance.
pub fn population_variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_population_variance() {
        // numpy.var([1, 2, 3, 4]) == 1.25
        let v = population_variance(&[1.0, 2.0, 3.0, 4.0]);
        assert!((v - 1.25).abs() < 1e-12);
        assert_eq!(population_variance(&[0.7]), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.8326, 3), 0.833);
        assert_eq!(round_to(-0.12345, 2), -0.12);
    }
}
