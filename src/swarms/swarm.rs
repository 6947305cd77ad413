use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{
    benchmarks::Benchmark,
    core::Point,
    swarms::Particle,
    traits::CostFunction,
};

/// A collection of [`Particle`]s searching a benchmark's space, together with the best position
/// any of them has found.
///
/// Construction and population are split: [`Swarm::for_benchmark`] fixes the shape of the swarm,
/// and the engine populates it through [`initialize`](Swarm::initialize) with its own random
/// source, so a seeded engine fully determines a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Swarm {
    /// The particles in the swarm.
    pub particles: Vec<Particle>,
    /// The best personal best found by any particle so far.
    pub gbest: Point,
    swarm_size: usize,
    dimension: usize,
    benchmark: Benchmark,
}

impl Swarm {
    /// Create an unpopulated swarm of `swarm_size` particles in `dimension` dimensions, drawing
    /// initial positions and velocities from `benchmark`'s ranges.
    ///
    /// # Panics
    ///
    /// This method will panic if `swarm_size` or `dimension` is zero.
    pub fn for_benchmark(swarm_size: usize, dimension: usize, benchmark: Benchmark) -> Self {
        assert!(swarm_size > 0);
        assert!(dimension > 0);
        Self {
            particles: Vec::new(),
            gbest: Point::default(),
            swarm_size,
            dimension,
            benchmark,
        }
    }
    /// The benchmark whose initialization ranges and velocity clamp this swarm uses.
    pub const fn benchmark(&self) -> Benchmark {
        self.benchmark
    }
    /// The number of dimensions each particle searches.
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
    /// Populate the swarm with freshly drawn, evaluated particles and seed the global best from
    /// their personal bests.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any initial evaluation fails. See [`CostFunction::evaluate`] for
    /// more information.
    pub fn initialize<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        rng: &mut Rng,
    ) -> Result<(), E> {
        self.particles = (0..self.swarm_size)
            .map(|_| Particle::new(self.dimension, self.benchmark, func, user_data, rng))
            .collect::<Result<Vec<Particle>, E>>()?;
        self.gbest = self.particles[self.index_of_best()].best.clone();
        Ok(())
    }
    /// The index of the particle with the best personal best, scanning left to right and keeping
    /// the first on ties, so the lowest index wins.
    pub fn index_of_best(&self) -> usize {
        let mut best = 0;
        for i in 1..self.particles.len() {
            if self.particles[i]
                .best
                .total_cmp(&self.particles[best].best)
                == std::cmp::Ordering::Less
            {
                best = i;
            }
        }
        best
    }
    /// Re-scan all personal bests and replace the global best only on a strict improvement, so
    /// the tracked best value never increases over a run.
    pub fn update_gbest(&mut self) {
        let candidate = &self.particles[self.index_of_best()].best;
        if candidate.total_cmp(&self.gbest) == std::cmp::Ordering::Less {
            self.gbest = candidate.clone();
        }
    }
    /// The number of particles currently in the swarm (zero before
    /// [`initialize`](Swarm::initialize)).
    pub fn len(&self) -> usize {
        self.particles.len()
    }
    /// Whether the swarm contains no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Display for Swarm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "gbest: {}", self.gbest)?;
        for (i, particle) in self.particles.iter().enumerate() {
            writeln!(f, "particle {i}:\n{particle}")?;
        }
        Ok(())
    }
}
