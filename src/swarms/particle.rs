use fastrand::Rng;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{
    benchmarks::Benchmark,
    core::{
        utils::{generate_random_vector, SampleFloat},
        Point, PsoConfig,
    },
    traits::CostFunction,
    Float,
};

/// A single member of a [`Swarm`](crate::swarms::Swarm).
///
/// A particle carries its current position, its velocity, and the best position it has personally
/// visited. The reference position it is pulled toward each step is supplied externally by the
/// swarm's topology, so the particle itself is agnostic to whether that reference is a global or a
/// neighborhood best.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Particle {
    /// The particle's current position and evaluation.
    pub position: Point,
    /// The particle's velocity.
    pub velocity: DVector<Float>,
    /// The best position the particle has visited.
    pub best: Point,
}

impl Particle {
    /// Create and evaluate a new particle with position and velocity drawn uniformly
    /// per-component from the given benchmark's initialization ranges.
    ///
    /// The initialization ranges deliberately sit away from each benchmark's global minimum.
    /// Immediately after construction, `best` equals `position` and both carry the evaluated
    /// objective value.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the initial evaluation fails. See [`CostFunction::evaluate`] for
    /// more information.
    pub fn new<U, E>(
        dimension: usize,
        benchmark: Benchmark,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        rng: &mut Rng,
    ) -> Result<Self, E> {
        let (x_lb, x_ub) = benchmark.location_limits();
        let (v_lb, v_ub) = benchmark.velocity_limits();
        let mut position = Point::from(generate_random_vector(dimension, x_lb, x_ub, rng));
        position.evaluate(func, user_data)?;
        let best = position.clone();
        Ok(Self {
            position,
            velocity: generate_random_vector(dimension, v_lb, v_ub, rng),
            best,
        })
    }
    /// Update the particle's velocity, pulling it toward its personal best and toward the given
    /// reference position:
    ///
    /// ```math
    /// \vec{v} \to \chi\left(\vec{v} + \vec{u}_1 \circ (\vec{p} - \vec{x}) + \vec{u}_2 \circ (\vec{r} - \vec{x})\right)
    /// ```
    ///
    /// with $`\vec{u}_1`$ and $`\vec{u}_2`$ drawn fresh per component from $`U(0, \varphi_1)`$ and
    /// $`U(0, \varphi_2)`$. Each component of the result is clamped to `[-v_max, v_max]`.
    pub fn update_velocity(
        &mut self,
        reference: &DVector<Float>,
        config: &PsoConfig,
        v_max: Float,
        rng: &mut Rng,
    ) {
        let u1 = DVector::from_iterator(
            self.velocity.len(),
            (0..self.velocity.len()).map(|_| rng.float() * config.phi1),
        );
        let u2 = DVector::from_iterator(
            self.velocity.len(),
            (0..self.velocity.len()).map(|_| rng.float() * config.phi2),
        );
        let cognitive = u1.component_mul(&(&self.best.x - &self.position.x));
        let social = u2.component_mul(&(reference - &self.position.x));
        self.velocity = (&self.velocity + cognitive + social).scale(config.chi);
        self.velocity.apply(|v| *v = v.clamp(-v_max, v_max));
    }
    /// Step the particle's position by its velocity. The position's evaluation is cleared and not
    /// recomputed here.
    pub fn update_position(&mut self) {
        let x = &self.position.x + &self.velocity;
        self.position.set_position(x);
    }
    /// Evaluate the objective at the particle's current position and update the personal best if
    /// the new value is at least as good (ties keep the newest location).
    ///
    /// A NaN evaluation compares greater than every finite value, so a degenerate position never
    /// displaces a finite personal best.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<Float, E> {
        self.position.evaluate(func, user_data)?;
        if self.position.total_cmp(&self.best) != std::cmp::Ordering::Greater {
            self.best = self.position.clone();
        }
        Ok(self.position.fx_checked())
    }
}

impl Display for Particle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position: {}velocity: {:?}\nbest: {}",
            self.position,
            self.velocity.as_slice(),
            self.best
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_new_particle_is_evaluated_and_in_range() {
        let mut rng = Rng::with_seed(0);
        let p = Particle::new(3, Benchmark::Rastrigin, &Benchmark::Rastrigin, &mut (), &mut rng)
            .unwrap();
        assert!(p.position.x.iter().all(|x| (2.56..5.12).contains(x)));
        assert!(p.velocity.iter().all(|v| (-2.0..4.0).contains(v)));
        assert_eq!(p.position.fx, p.best.fx);
        assert_eq!(p.position.x, p.best.x);
        assert_eq!(
            p.position.fx_checked(),
            Benchmark::Rastrigin.value(p.position.x.as_slice())
        );
    }

    #[test]
    fn test_update_position_steps_by_velocity_and_clears_fx() {
        let mut p = Particle {
            position: Point {
                x: dvector![1.0, 2.0],
                fx: Some(5.0),
            },
            velocity: dvector![0.5, -1.0],
            best: Point::from(vec![1.0, 2.0]),
        };
        p.update_position();
        assert_eq!(p.position.x, dvector![1.5, 1.0]);
        assert!(p.position.fx.is_none());
    }

    #[test]
    fn test_update_velocity_is_clamped() {
        let mut rng = Rng::with_seed(0);
        let config = PsoConfig::default();
        let mut p = Particle {
            position: Point {
                x: dvector![100.0, -100.0],
                fx: Some(0.0),
            },
            velocity: dvector![50.0, -50.0],
            best: Point {
                x: dvector![-100.0, 100.0],
                fx: Some(0.0),
            },
        };
        p.update_velocity(&dvector![-100.0, 100.0], &config, 5.12, &mut rng);
        assert!(p.velocity.iter().all(|v| (-5.12..=5.12).contains(v)));
    }

    #[test]
    fn test_stationary_particle_at_its_best_stays_put() {
        // with best == reference == position, the update reduces to v' = chi * v
        let mut rng = Rng::with_seed(0);
        let config = PsoConfig::default();
        let mut p = Particle {
            position: Point {
                x: dvector![1.0],
                fx: Some(0.0),
            },
            velocity: dvector![1.0],
            best: Point {
                x: dvector![1.0],
                fx: Some(0.0),
            },
        };
        p.update_velocity(&dvector![1.0], &config, 32.768, &mut rng);
        assert_eq!(p.velocity, dvector![0.7298]);
    }

    #[test]
    fn test_evaluate_updates_best_weakly() {
        let mut p = Particle {
            position: Point::from(vec![1.0, 1.0]),
            velocity: dvector![0.0, 0.0],
            best: Point {
                x: dvector![0.9, 0.9],
                fx: Some(0.0)
            },
        };
        // new value ties the best; the newer location wins
        let fx = p.evaluate(&Benchmark::Rosenbrock, &mut ()).unwrap();
        assert_eq!(fx, 0.0);
        assert_eq!(p.best.x, dvector![1.0, 1.0]);
    }

    #[test]
    fn test_evaluate_keeps_better_best() {
        let mut p = Particle {
            position: Point::from(vec![2.0, 3.0]),
            velocity: dvector![0.0, 0.0],
            best: Point {
                x: dvector![1.0, 1.0],
                fx: Some(0.0),
            },
        };
        let fx = p.evaluate(&Benchmark::Rosenbrock, &mut ()).unwrap();
        assert_eq!(fx, 101.0);
        assert_eq!(p.best.x, dvector![1.0, 1.0]);
        assert_eq!(p.best.fx, Some(0.0));
    }

    struct NanFunction(Float);
    impl CostFunction for NanFunction {
        fn evaluate(
            &self,
            _x: &[Float],
            _user_data: &mut (),
        ) -> Result<Float, std::convert::Infallible> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_nan_never_displaces_finite_best() {
        // both NaN signs; f64::total_cmp alone would let -NaN win
        for nan in [Float::NAN, -Float::NAN] {
            let mut p = Particle {
                position: Point::from(vec![1.0]),
                velocity: dvector![0.0],
                best: Point {
                    x: dvector![0.0],
                    fx: Some(10.0),
                },
            };
            p.evaluate(&NanFunction(nan), &mut ()).unwrap();
            assert_eq!(p.best.fx, Some(10.0));
        }
    }
}
