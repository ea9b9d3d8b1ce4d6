//! Pluggable regression capability
//!
//! The impact estimator only needs `fit` and `predict`. The default
//! implementation is a linear model with a bias term, solved through
//! nalgebra's SVD so rank-deficient designs (a one-hot block plus a bias,
//! or events missing from the window) still yield the minimum-norm fit.

use nalgebra::{DMatrix, DVector};

use crate::core::error::{DreadError, Result};

/// A trained model
pub trait FittedModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> f64;
}

/// Something that can be trained on a feature matrix and target vector
///
/// Fitting must be deterministic for identical inputs.
pub trait Regressor: Send + Sync {
    fn fit(&self, features: &DMatrix<f64>, targets: &DVector<f64>) -> Result<Box<dyn FittedModel>>;
}

/// `bias + weights · x`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub bias: f64,
    pub weights: Vec<f64>,
}

impl FittedModel for LinearModel {
    fn predict(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.weights.len());
        self.bias
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

/// Ordinary or ridge least squares
#[derive(Debug, Clone)]
pub struct LeastSquaresRegressor {
    /// L2 penalty on feature weights (bias is not penalized)
    pub ridge: f64,
    /// Singular values below `tolerance * largest` are treated as zero
    pub tolerance: f64,
}

impl Default for LeastSquaresRegressor {
    fn default() -> Self {
        Self {
            ridge: 0.0,
            tolerance: 1e-10,
        }
    }
}

impl LeastSquaresRegressor {
    pub fn with_ridge(ridge: f64) -> Self {
        Self {
            ridge,
            ..Default::default()
        }
    }

    pub fn fit_linear(&self, features: &DMatrix<f64>, targets: &DVector<f64>) -> Result<LinearModel> {
        let (rows, cols) = features.shape();
        if rows == 0 {
            return Err(DreadError::Regression("empty training matrix".into()));
        }
        if targets.len() != rows {
            return Err(DreadError::Regression(format!(
                "{} feature rows but {} targets",
                rows,
                targets.len()
            )));
        }

        // Ridge via row augmentation: sqrt(lambda) * I under the feature block
        let extra = if self.ridge > 0.0 { cols } else { 0 };
        let penalty = self.ridge.sqrt();
        let design = DMatrix::from_fn(rows + extra, cols + 1, |r, c| {
            if r < rows {
                if c == 0 { 1.0 } else { features[(r, c - 1)] }
            } else if c == r - rows + 1 {
                penalty
            } else {
                0.0
            }
        });
        let rhs = DVector::from_fn(rows + extra, |r, _| if r < rows { targets[r] } else { 0.0 });

        let svd = design.svd(true, true);
        let largest = svd.singular_values.max();
        let eps = self.tolerance * largest.max(1.0);
        let coefficients = svd
            .solve(&rhs, eps)
            .map_err(|e| DreadError::Regression(e.to_string()))?;

        Ok(LinearModel {
            bias: coefficients[0],
            weights: coefficients.iter().skip(1).copied().collect(),
        })
    }
}

impl Regressor for LeastSquaresRegressor {
    fn fit(&self, features: &DMatrix<f64>, targets: &DVector<f64>) -> Result<Box<dyn FittedModel>> {
        Ok(Box::new(self.fit_linear(features, targets)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_line() {
        // y = 3 + 2x
        let features = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let targets = DVector::from_row_slice(&[3.0, 5.0, 7.0, 9.0]);
        let model = LeastSquaresRegressor::default().fit_linear(&features, &targets).unwrap();

        assert!((model.bias - 3.0).abs() < 1e-8);
        assert!((model.weights[0] - 2.0).abs() < 1e-8);
        assert!((model.predict(&[10.0]) - 23.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_one_hot_predicts_group_means() {
        // Two-event one-hot plus a bias is rank deficient; fitted values are
        // still the per-group means.
        let features = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
        let targets = DVector::from_row_slice(&[90.0, 100.0, 60.0, 70.0]);
        let model = LeastSquaresRegressor::default().fit(&features, &targets).unwrap();

        assert!((model.predict(&[1.0, 0.0]) - 95.0).abs() < 1e-6);
        assert!((model.predict(&[0.0, 1.0]) - 65.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_row_is_finite() {
        let features = DMatrix::from_row_slice(1, 3, &[1.0, 0.0, 0.0]);
        let targets = DVector::from_row_slice(&[88.0]);
        let model = LeastSquaresRegressor::default().fit(&features, &targets).unwrap();
        let prediction = model.predict(&[1.0, 0.0, 0.0]);
        assert!(prediction.is_finite());
        assert!((prediction - 88.0).abs() < 1e-6);
    }

    #[test]
    fn test_ridge_shrinks_weights() {
        let features = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let targets = DVector::from_row_slice(&[3.0, 5.0, 7.0, 9.0]);
        let plain = LeastSquaresRegressor::default().fit_linear(&features, &targets).unwrap();
        let ridge = LeastSquaresRegressor::with_ridge(10.0).fit_linear(&features, &targets).unwrap();
        assert!(ridge.weights[0].abs() < plain.weights[0].abs());
    }

    #[test]
    fn test_mismatched_targets_rejected() {
        let features = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        let targets = DVector::from_row_slice(&[1.0]);
        let result = LeastSquaresRegressor::default().fit(&features, &targets);
        assert!(matches!(result, Err(DreadError::Regression(_))));
    }
}
