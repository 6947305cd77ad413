use std::{ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    core::Point,
    swarms::{Particle, Swarm},
};

/// A trait which holds a [`callback`](`SwarmObserver::callback`) function that can be used to
/// watch (or stop) a swarm during a minimization.
pub trait SwarmObserver<U = ()> {
    /// A function that is called after every iteration of the engine. Returning
    /// [`ControlFlow::Break`] ends the run early.
    fn callback(&mut self, iteration: usize, swarm: &Swarm, user_data: &mut U) -> ControlFlow<()>;
}

/// An observer which reports the swarm's best value on a fixed interval through the [`log`]
/// facade.
///
/// Lines have the form `Iteration: <n> - Best Value: <v>` at `info` level. Suppressing or
/// redirecting them does not affect the programmatic contract of a run.
pub struct ProgressObserver {
    interval: usize,
}

impl ProgressObserver {
    /// Create a new [`ProgressObserver`] reporting every `interval` iterations.
    ///
    /// # Panics
    ///
    /// This method will panic if `interval` is zero.
    pub fn new(interval: usize) -> Self {
        assert!(interval > 0);
        Self { interval }
    }
    /// Finalize the [`SwarmObserver`] by wrapping it in an [`Arc`] and [`RwLock`].
    ///
    /// # Panics
    ///
    /// This method will panic if `interval` is zero.
    pub fn build(interval: usize) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new(interval)))
    }
}

impl<U> SwarmObserver<U> for ProgressObserver {
    fn callback(&mut self, iteration: usize, swarm: &Swarm, _user_data: &mut U) -> ControlFlow<()> {
        if iteration % self.interval == 0 {
            log::info!(
                "Iteration: {} - Best Value: {}",
                iteration,
                swarm.gbest.fx_checked()
            );
        }
        ControlFlow::Continue(())
    }
}

/// An observer which stores the swarm particles' history as well as the history of global best
/// positions.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct TrackingSwarmObserver {
    /// The history of the swarm particles.
    pub history: Vec<Vec<Particle>>,
    /// The history of the best position in the swarm.
    pub best_history: Vec<Point>,
}

impl TrackingSwarmObserver {
    /// Finalize the [`SwarmObserver`] by wrapping it in an [`Arc`] and [`RwLock`].
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<U> SwarmObserver<U> for TrackingSwarmObserver {
    fn callback(
        &mut self,
        _iteration: usize,
        swarm: &Swarm,
        _user_data: &mut U,
    ) -> ControlFlow<()> {
        self.history.push(swarm.particles.clone());
        self.best_history.push(swarm.gbest.clone());
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{benchmarks::Benchmark, core::PsoConfig, swarms::Topology, swarms::PSO};
    use fastrand::Rng;

    #[test]
    fn test_tracking_observer_records_every_iteration() {
        let tracker = TrackingSwarmObserver::build();
        let config = PsoConfig::default().with_iterations(10).with_check_interval(5);
        let swarm = Swarm::for_benchmark(5, 2, Benchmark::Ackley);
        let mut pso: PSO = PSO::new(Rng::with_seed(0))
            .with_config(config)
            .with_observer(tracker.clone());
        pso.minimize(&Benchmark::Ackley, swarm, Topology::Global, &mut ())
            .unwrap();
        let tracker = tracker.read();
        assert_eq!(tracker.history.len(), 10);
        assert_eq!(tracker.best_history.len(), 10);
        assert_eq!(tracker.history[0].len(), 5);
    }

    #[test]
    #[should_panic]
    fn test_progress_observer_zero_interval_panics() {
        let _ = ProgressObserver::new(0);
    }
}
