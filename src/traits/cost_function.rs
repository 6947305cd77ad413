use std::convert::Infallible;

use crate::Float;

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$.
///
/// Such a function may also take a `user_data: &mut U` field which can be used to pass external
/// arguments to the function during minimization, or can be modified by the function itself.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// The dimension of the problem is implied by the length of `x`; passing a slice of the wrong
    /// length to a fixed-dimension function is a programming error, not a recoverable condition.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &[Float], user_data: &mut U) -> Result<Float, E>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Paraboloid;
    impl CostFunction for Paraboloid {
        fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
            Ok(x.iter().map(|xi| xi * xi).sum::<Float>() + 1.0)
        }
    }

    #[test]
    fn test_cost_function() {
        let y = Paraboloid.evaluate(&[1.0, 2.0], &mut ()).unwrap();
        assert_eq!(y, 6.0);
    }
}
