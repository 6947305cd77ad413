//! `murmuration` implements constricted particle swarm optimization (PSO) over a small set of
//! classic benchmark functions. A swarm of particles explores an $`n`$-dimensional space, each
//! particle pulled toward its own best-known position and toward the best position found by its
//! neighborhood, where "neighborhood" is determined by a configurable [`Topology`](swarms::Topology)
//! (global, ring, von Neumann, or random).
//!
//! The velocity update follows the standard Clerc–Kennedy constriction formulation:
//!
//! ```math
//! v_i^{t+1} = \chi\left(v_i^t + u_1^{t+1} \circ (p_i^t - x_i^t) + u_2^{t+1} \circ (n_i^t - x_i^t)\right)
//! ```
//!
//! where $`u_1`$ and $`u_2`$ are uniform random vectors in $`[0, \varphi_1]`$ and
//! $`[0, \varphi_2]`$ redrawn every step, $`p_i`$ is the particle's personal best, and $`n_i`$ is
//! the reference best supplied by the topology. Velocity components are clamped to the benchmark's
//! domain half-width after every update.
//!
//! # Quick Start
//!
//! The simplest entry point takes the swarm dimensions and the short codes for the benchmark and
//! topology, and returns the best value found every 1000 iterations:
//!
//! ```rust
//! use murmuration::run;
//!
//! fn main() -> Result<(), murmuration::core::ConfigError> {
//!     let history = run(30, 2000, 2, "ack", "gl")?;
//!     assert_eq!(history.len(), 3);
//!     Ok(())
//! }
//! ```
//!
//! For finer control (seeded random source, custom constriction constants, observers), build the
//! engine directly:
//!
//! ```rust
//! use fastrand::Rng;
//! use murmuration::benchmarks::Benchmark;
//! use murmuration::core::PsoConfig;
//! use murmuration::swarms::{Swarm, Topology, PSO};
//!
//! let config = PsoConfig::default().with_iterations(2000);
//! let swarm = Swarm::for_benchmark(30, 2, Benchmark::Rastrigin);
//! let mut pso: PSO = PSO::new(Rng::with_seed(0)).with_config(config);
//! let summary = pso
//!     .minimize(&Benchmark::Rastrigin, swarm, Topology::Ring, &mut ())
//!     .expect("benchmark evaluation is infallible");
//! println!("{}", summary);
//! ```
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the benchmark objective functions.
pub mod benchmarks;
/// Module containing core types shared across the crate.
pub mod core;
/// Module containing the swarm, its particles, topologies, and the PSO engine.
pub mod swarms;
/// Module containing the traits used at the crate's seams.
pub mod traits;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes.
pub mod prelude {
    pub use crate::benchmarks::Benchmark;
    pub use crate::core::{ConfigError, Point, PsoConfig};
    pub use crate::swarms::{run, Particle, Swarm, SwarmSummary, Topology, PSO};
    pub use crate::traits::{AbortSignal, CostFunction, SwarmObserver};
}

pub use nalgebra::DVector;
pub use swarms::pso::run;

/// A floating-point number type (defaults to [`f64`], see the `f32` feature).
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// A floating-point number type (defaults to [`f64`], see the `f32` feature).
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant $`\pi`$.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Euler's number $`e`$.
#[cfg(not(feature = "f32"))]
pub const E: Float = std::f64::consts::E;

/// Euler's number $`e`$.
#[cfg(feature = "f32")]
pub const E: Float = std::f32::consts::E;
