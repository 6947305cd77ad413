use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{traits::CostFunction, Float};

/// Describes an evaluated (or not-yet-evaluated) position in the search space.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Point {
    /// The point's position.
    pub x: DVector<Float>,
    /// The point's evaluation (`None` if the point has not yet been evaluated).
    pub fx: Option<Float>,
}

impl Point {
    /// Compare two points by their `fx` value.
    ///
    /// Unevaluated points compare greater than evaluated ones, and NaN values (of either sign)
    /// compare greater than all other values, so degenerate evaluations never win a best-of
    /// scan. [`f64::total_cmp`] alone is not enough here: it orders a sign-negative NaN below
    /// every finite value.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (&self.fx, &other.fx) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(s), Some(o)) => match (s.is_nan(), o.is_nan()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => s.total_cmp(o),
            },
        }
    }
    /// Move the point to a new position, resetting the evaluation of the point.
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }
    /// Get the current evaluation of the point, if it has been evaluated.
    ///
    /// # Panics
    ///
    /// This method will panic if the point is unevaluated.
    pub fn fx_checked(&self) -> Float {
        #[allow(clippy::expect_used)]
        self.fx.expect("Point value requested before evaluation")
    }
    /// Evaluate the given function at the point's coordinate and set the `fx` value to the result.
    /// Does nothing if the point has already been evaluated at its current position.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        if self.fx.is_none() {
            self.fx = Some(func.evaluate(self.x.as_slice(), user_data)?);
        }
        Ok(())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x: {:?}, f(x): {:?}", self.x.as_slice(), self.fx)
    }
}

impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.fx == other.fx
    }
}
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.fx.partial_cmp(&other.fx)
    }
}
