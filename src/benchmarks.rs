#![allow(clippy::suboptimal_flops)]
use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{core::ConfigError, traits::CostFunction, Float, E, PI};

/// The closed set of benchmark objective functions the engine can minimize.
///
/// Each benchmark also carries the constants that shape a swarm searching it: the ranges from
/// which initial locations and velocities are drawn, and the velocity clamp applied after every
/// update. Benchmarks are selected by the short codes `"ack"`, `"ras"`, and `"rok"`;
/// unrecognized codes are rejected at configuration time rather than falling through to a
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Benchmark {
    /// The Ackley function, a nearly flat outer region with a large hole at the centre.
    ///
    /// ```math
    /// f(\vec{x}) = -20\exp\left(-0.2\sqrt{\frac{1}{n}\sum_{i=1}^{n} x_i^2}\right)
    ///              - \exp\left(\frac{1}{n}\sum_{i=1}^{n} \cos(2\pi x_i)\right) + 20 + e
    /// ```
    /// The global minimum is $`f(\vec{0}) = 0`$.
    Ackley,
    /// The Rastrigin function, a non-convex function with multiple modes.
    ///
    /// ```math
    /// f(\vec{x}) = 10n + \sum_{i=1}^{n} [x_i^2 - 10\cos(2\pi x_i)]
    /// ```
    /// The global minimum is $`f(\vec{0}) = 0`$.
    Rastrigin,
    /// The Rosenbrock function, a non-convex function with a single minimum inside a long,
    /// narrow valley.
    ///
    /// ```math
    /// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
    /// ```
    /// where $`n \geq 2`$. The global minimum is $`f(\vec{1}) = 0`$.
    Rosenbrock,
}

impl Benchmark {
    /// The short code used to select this benchmark.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ackley => "ack",
            Self::Rastrigin => "ras",
            Self::Rosenbrock => "rok",
        }
    }
    /// The closed range initial particle locations are drawn from.
    ///
    /// These ranges sit away from each benchmark's global minimum, so a swarm has to travel to
    /// find it rather than starting on top of it.
    pub const fn location_limits(&self) -> (Float, Float) {
        match self {
            Self::Ackley => (16.0, 32.0),
            Self::Rastrigin => (2.56, 5.12),
            Self::Rosenbrock => (15.0, 30.0),
        }
    }
    /// The closed range initial particle velocities are drawn from.
    pub const fn velocity_limits(&self) -> (Float, Float) {
        match self {
            Self::Ackley | Self::Rastrigin => (-2.0, 4.0),
            Self::Rosenbrock => (-2.0, 2.0),
        }
    }
    /// The velocity clamp, equal to the benchmark's canonical domain half-width. Applied to every
    /// velocity component after every update.
    pub const fn v_max(&self) -> Float {
        match self {
            Self::Ackley => 32.768,
            Self::Rastrigin => 5.12,
            Self::Rosenbrock => 2.048,
        }
    }
    /// The value of the benchmark function at the point `x`.
    pub fn value(&self, x: &[Float]) -> Float {
        match self {
            Self::Ackley => ackley(x),
            Self::Rastrigin => rastrigin(x),
            Self::Rosenbrock => rosenbrock(x),
        }
    }
}

fn ackley(x: &[Float]) -> Float {
    let n = x.len() as Float;
    let square_mean = (0..x.len()).map(|i| x[i].powi(2)).sum::<Float>() / n;
    let cos_mean = (0..x.len())
        .map(|i| Float::cos(2.0 * PI * x[i]))
        .sum::<Float>()
        / n;
    -20.0 * Float::exp(-0.2 * Float::sqrt(square_mean)) - Float::exp(cos_mean) + 20.0 + E
}

// Full-dimension sum; some PSO course material truncates this at n-1 terms, which is a defect of
// those sources, not a variant worth reproducing.
fn rastrigin(x: &[Float]) -> Float {
    (0..x.len())
        .map(|i| x[i].powi(2) - 10.0 * Float::cos(2.0 * PI * x[i]) + 10.0)
        .sum()
}

fn rosenbrock(x: &[Float]) -> Float {
    debug_assert!(!x.is_empty(), "Rosenbrock requires at least one dimension");
    (0..(x.len().saturating_sub(1)))
        .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (x[i] - 1.0).powi(2))
        .sum()
}

impl FromStr for Benchmark {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ack" => Ok(Self::Ackley),
            "ras" => Ok(Self::Rastrigin),
            "rok" => Ok(Self::Rosenbrock),
            _ => Err(ConfigError::UnknownBenchmark(s.to_string())),
        }
    }
}

impl CostFunction for Benchmark {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(self.value(x))
    }
}
