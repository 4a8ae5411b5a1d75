//! Spearman rank correlation between listing price and satisfaction.

use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::PriceSatisfaction;
use crate::analyzers::utility::{average_ranks, pearson, student_t_two_sided_p};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    /// Rank correlation coefficient in `[-1, 1]`.
    pub coefficient: f64,
    /// Two-sided significance. NaN when only two points were given.
    pub p_value: f64,
    pub points: usize,
}

/// Rank correlation between price and overall satisfaction.
///
/// # Errors
///
/// See [`spearman`].
pub fn correlation(points: &[PriceSatisfaction]) -> Result<Correlation> {
    let (prices, satisfaction): (Vec<f64>, Vec<f64>) =
        points.iter().map(|p| (p.price, p.satisfaction)).unzip();
    spearman(&prices, &satisfaction)
}

/// Spearman rank correlation of two equal-length series.
///
/// Tied values share the average of their ranks. The p-value comes from
/// Student's t distribution with `n - 2` degrees of freedom.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for fewer than two observations or
/// series of different lengths, and [`Error::UndefinedCorrelation`] when
/// either series is constant.
pub fn spearman(xs: &[f64], ys: &[f64]) -> Result<Correlation> {
    if xs.len() != ys.len() {
        return Err(Error::insufficient(format!(
            "series lengths differ ({} vs {})",
            xs.len(),
            ys.len()
        )));
    }

    let n = xs.len();
    if n < 2 {
        return Err(Error::insufficient(format!(
            "rank correlation needs at least 2 points, got {n}"
        )));
    }

    let coefficient = pearson(&average_ranks(xs), &average_ranks(ys)).ok_or_else(|| {
        Error::UndefinedCorrelation("one of the series has no variation".to_string())
    })?;

    let df = (n - 2) as f64;
    let p_value = if df == 0.0 {
        f64::NAN
    } else if coefficient.abs() >= 1.0 {
        0.0
    } else {
        let t = coefficient * (df / ((1.0 + coefficient) * (1.0 - coefficient))).sqrt();
        student_t_two_sided_p(t, df)
    };

    debug!(n, coefficient, p_value, "Computed rank correlation");

    Ok(Correlation {
        coefficient,
        p_value,
        points: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(values: &[(f64, f64)]) -> Vec<PriceSatisfaction> {
        values
            .iter()
            .map(|&(price, satisfaction)| PriceSatisfaction {
                price,
                satisfaction,
            })
            .collect()
    }

    #[test]
    fn test_perfect_increasing_relationship() {
        let points = pairs(&[(10.0, 1.0), (20.0, 2.0), (30.0, 3.0), (40.0, 4.0), (50.0, 5.0)]);
        let result = correlation(&points).unwrap();

        assert_eq!(result.coefficient, 1.0);
        assert!(result.p_value < 1e-10);
        assert_eq!(result.points, 5);
    }

    #[test]
    fn test_monotonic_nonlinear_is_perfect() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 8.0, 27.0, 64.0];
        assert_eq!(spearman(&xs, &ys).unwrap().coefficient, 1.0);
    }

    #[test]
    fn test_perfect_decreasing_relationship() {
        let result = spearman(&[1.0, 2.0, 3.0], &[9.0, 5.0, 1.0]).unwrap();
        assert_eq!(result.coefficient, -1.0);
        assert_eq!(result.p_value, 0.0);
    }

    #[test]
    fn test_three_points_known_p_value() {
        // r = 0.5, t = 1/sqrt(3), one degree of freedom: p = 2/3
        let result = spearman(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]).unwrap();
        assert!((result.coefficient - 0.5).abs() < 1e-12);
        assert!((result.p_value - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_ties_are_rank_averaged() {
        // ranks x = [1, 2, 3, 4], y = [1.5, 1.5, 3, 4]
        let result = spearman(&[1.0, 2.0, 3.0, 4.0], &[4.0, 4.0, 4.5, 5.0]).unwrap();
        let expected = 4.5 / (5.0_f64 * 4.5).sqrt();
        assert!((result.coefficient - expected).abs() < 1e-12);
        assert!(result.p_value > 0.0 && result.p_value < 1.0);
    }

    #[test]
    fn test_two_points_has_undefined_p_value() {
        let result = spearman(&[1.0, 2.0], &[3.0, 1.0]).unwrap();
        assert_eq!(result.coefficient, -1.0);
        assert!(result.p_value.is_nan());
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            correlation(&pairs(&[(10.0, 4.5)])),
            Err(Error::InsufficientData(_))
        ));
        assert!(matches!(correlation(&[]), Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_constant_series_is_undefined() {
        assert!(matches!(
            spearman(&[1.0, 2.0, 3.0], &[4.5, 4.5, 4.5]),
            Err(Error::UndefinedCorrelation(_))
        ));
    }
}
