//! Impact estimation: fit heart rate against (event, time), then average
//! the fitted predictions per event

pub mod estimator;
pub mod features;
pub mod regression;

pub use estimator::{EventImpact, ImpactEstimator, ImpactTable};
pub use features::FeatureEncoder;
pub use regression::{FittedModel, LeastSquaresRegressor, LinearModel, Regressor};
