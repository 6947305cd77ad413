use fastrand::Rng;
use nalgebra::DVector;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;

use crate::{
    benchmarks::Benchmark,
    core::{utils::SampleFloat, ConfigError, CtrlCAbortSignal, NopAbortSignal, PsoConfig},
    swarms::{Neighborhoods, Swarm, Topology},
    traits::{AbortSignal, CostFunction, ProgressObserver, SwarmObserver},
    Float,
};

/// The result of a minimization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwarmSummary {
    /// The best position found over the whole run.
    pub x: DVector<Float>,
    /// The objective value at the best position.
    pub fx: Float,
    /// The best value at initialization and after every `check_interval` iterations. For a full
    /// run this holds `iterations / check_interval + 1` entries and never increases.
    pub history: Vec<Float>,
    /// A status message for the run.
    pub message: String,
    /// Whether the run performed all of its iterations (`false` if an observer or abort signal
    /// ended it early).
    pub completed: bool,
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "f(x) = {}", self.fx)?;
        writeln!(f, "x = {:?}", self.x.as_slice())?;
        writeln!(f, "message: {}", self.message)
    }
}

/// The particle swarm optimization engine.
///
/// The engine owns its random source, so a run is fully determined by the seed, the swarm shape,
/// and the configuration. Observers registered with [`with_observer`](PSO::with_observer) are
/// called after every iteration; an abort signal set with
/// [`with_abort_signal`](PSO::with_abort_signal) is polled at the start of every iteration.
pub struct PSO<U = ()> {
    config: PsoConfig,
    rng: Rng,
    observers: Vec<Arc<RwLock<dyn SwarmObserver<U>>>>,
    abort_signal: Box<dyn AbortSignal>,
}

impl<U> PSO<U> {
    /// Create a new engine with the default [`PsoConfig`] and no observers. The abort signal
    /// defaults to [`NopAbortSignal`], so a bare engine never grabs process-wide handlers.
    pub fn new(rng: Rng) -> Self {
        Self {
            config: PsoConfig::default(),
            rng,
            observers: Vec::new(),
            abort_signal: Box::new(NopAbortSignal::new()),
        }
    }
    /// Replace the engine's configuration.
    pub fn with_config(mut self, config: PsoConfig) -> Self {
        self.config = config;
        self
    }
    /// Register an observer to be called after every iteration.
    pub fn with_observer(mut self, observer: Arc<RwLock<dyn SwarmObserver<U>>>) -> Self {
        self.observers.push(observer);
        self
    }
    /// Replace the engine's abort signal. The signal is reset when a minimization starts.
    pub fn with_abort_signal(mut self, abort_signal: Box<dyn AbortSignal>) -> Self {
        self.abort_signal = abort_signal;
        self
    }
    /// Minimize `func` with the given swarm and topology.
    ///
    /// Each iteration first computes every particle's reference position from the personal bests
    /// as they stand at the start of the iteration, then sweeps the particles in index order
    /// (velocity update, position update, evaluation), then re-scans for the global best. The
    /// best value is recorded at initialization and after every
    /// [`check_interval`](PsoConfig::check_interval) iterations.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any objective evaluation fails. See [`CostFunction::evaluate`] for
    /// more information. Configuration problems are not recoverable errors here; validate ahead
    /// of time (as [`run`] does) when the settings come from user input.
    ///
    /// # Panics
    ///
    /// This method will panic if the topology is [`Topology::Random`] and the configured
    /// neighborhood size exceeds the swarm size.
    pub fn minimize<E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        mut swarm: Swarm,
        topology: Topology,
        user_data: &mut U,
    ) -> Result<SwarmSummary, E> {
        self.abort_signal.reset();
        swarm.initialize(func, user_data, &mut self.rng)?;
        let v_max = swarm.benchmark().v_max();
        let mut neighborhoods = Neighborhoods::build(
            swarm.len(),
            topology,
            self.config.neighborhood_size,
            &mut self.rng,
        );
        let mut history = vec![swarm.gbest.fx_checked()];
        let mut message = "Completed".to_string();
        let mut completed = true;
        'run: for iteration in 1..=self.config.iterations {
            if self.abort_signal.is_aborted() {
                message = "Aborted".to_string();
                completed = false;
                break;
            }
            if topology == Topology::Random && self.rng.float() < self.config.reset_probability {
                neighborhoods.rebuild(&mut self.rng);
            }
            let references = neighborhoods.reference_locations(&swarm);
            for (particle, reference) in swarm.particles.iter_mut().zip(&references) {
                particle.update_velocity(reference, &self.config, v_max, &mut self.rng);
                particle.update_position();
                particle.evaluate(func, user_data)?;
            }
            swarm.update_gbest();
            if iteration % self.config.check_interval == 0 {
                history.push(swarm.gbest.fx_checked());
            }
            for observer in &self.observers {
                if observer
                    .write()
                    .callback(iteration, &swarm, user_data)
                    .is_break()
                {
                    message = "Terminated by observer".to_string();
                    completed = false;
                    break 'run;
                }
            }
        }
        Ok(SwarmSummary {
            x: swarm.gbest.x.clone(),
            fx: swarm.gbest.fx_checked(),
            history,
            message,
            completed,
        })
    }
}

/// Run a particle swarm minimization over one of the built-in benchmarks, selected by short
/// codes (benchmarks: `"ack"`, `"ras"`, `"rok"`; topologies: `"gl"`, `"ri"`, `"vn"`, `"ra"`).
///
/// All settings are validated before the first iteration runs; a bad code or a zero size never
/// produces a partial run. Progress lines of the form `Iteration: <n> - Best Value: <v>` are
/// emitted through the [`log`] facade every 1000 iterations, followed by `Final Solution: <v>`,
/// and the run can be interrupted with `Ctrl-C`.
///
/// Returns the best value found at initialization and after every 1000 iterations, so the result
/// holds `iterations / 1000 + 1` entries for a full run.
///
/// # Errors
///
/// Returns a [`ConfigError`] if either code is unrecognized or any of the sizes is zero.
pub fn run(
    swarm_size: usize,
    iterations: usize,
    dimensions: usize,
    benchmark: &str,
    topology: &str,
) -> Result<Vec<Float>, ConfigError> {
    let benchmark: Benchmark = benchmark.parse()?;
    let topology: Topology = topology.parse()?;
    if swarm_size == 0 {
        return Err(ConfigError::NonPositive("swarm size"));
    }
    if iterations == 0 {
        return Err(ConfigError::NonPositive("iterations"));
    }
    if dimensions == 0 {
        return Err(ConfigError::NonPositive("dimensions"));
    }
    let config = PsoConfig::default().with_iterations(iterations);
    if topology == Topology::Random && config.neighborhood_size > swarm_size {
        return Err(ConfigError::NeighborhoodTooLarge {
            k: config.neighborhood_size,
            n: swarm_size,
        });
    }
    let check_interval = config.check_interval;
    let mut pso: PSO = PSO::new(Rng::new())
        .with_config(config)
        .with_observer(ProgressObserver::build(check_interval))
        .with_abort_signal(Box::new(CtrlCAbortSignal::new()));
    let swarm = Swarm::for_benchmark(swarm_size, dimensions, benchmark);
    let summary = match pso.minimize(&benchmark, swarm, topology, &mut ()) {
        Ok(summary) => summary,
        Err(never) => match never {},
    };
    log::info!("Final Solution: {}", summary.fx);
    Ok(summary.history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AtomicAbortSignal;
    use std::ops::ControlFlow;

    fn seeded_summary(seed: u64, benchmark: Benchmark, topology: Topology) -> SwarmSummary {
        let config = PsoConfig::default()
            .with_iterations(2000)
            .with_check_interval(500);
        let swarm = Swarm::for_benchmark(30, 2, benchmark);
        let mut pso: PSO = PSO::new(Rng::with_seed(seed)).with_config(config);
        pso.minimize(&benchmark, swarm, topology, &mut ()).unwrap()
    }

    #[test]
    fn test_run_snapshot_length() {
        let history = run(30, 2000, 2, "ack", "gl").unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_run_rejects_bad_configuration() {
        assert_eq!(
            run(30, 2000, 2, "ackley", "gl"),
            Err(ConfigError::UnknownBenchmark("ackley".to_string()))
        );
        assert_eq!(
            run(30, 2000, 2, "ack", "star"),
            Err(ConfigError::UnknownTopology("star".to_string()))
        );
        assert_eq!(
            run(0, 2000, 2, "ack", "gl"),
            Err(ConfigError::NonPositive("swarm size"))
        );
        assert_eq!(
            run(30, 0, 2, "ack", "gl"),
            Err(ConfigError::NonPositive("iterations"))
        );
        assert_eq!(
            run(30, 2000, 0, "ack", "gl"),
            Err(ConfigError::NonPositive("dimensions"))
        );
        assert_eq!(
            run(3, 2000, 2, "ack", "ra"),
            Err(ConfigError::NeighborhoodTooLarge { k: 5, n: 3 })
        );
    }

    #[test]
    fn test_global_topology_converges_on_ackley() {
        let summary = seeded_summary(0, Benchmark::Ackley, Topology::Global);
        assert!(summary.completed);
        assert_eq!(summary.history.len(), 5);
        assert!(summary.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(summary.fx < 0.1, "fx = {}", summary.fx);
        assert_eq!(summary.fx, *summary.history.last().unwrap());
    }

    #[test]
    fn test_ring_topology_converges_on_rastrigin() {
        let summary = seeded_summary(1, Benchmark::Rastrigin, Topology::Ring);
        assert!(summary.completed);
        assert!(summary.fx < 2.0, "fx = {}", summary.fx);
    }

    #[test]
    fn test_von_neumann_topology_converges_on_rosenbrock() {
        let summary = seeded_summary(2, Benchmark::Rosenbrock, Topology::VonNeumann);
        assert!(summary.completed);
        assert!(summary.fx < 10.0, "fx = {}", summary.fx);
    }

    #[test]
    fn test_random_topology_runs_to_completion() {
        let summary = seeded_summary(3, Benchmark::Ackley, Topology::Random);
        assert!(summary.completed);
        assert_eq!(summary.history.len(), 5);
        assert!(summary.history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let first = seeded_summary(42, Benchmark::Rastrigin, Topology::Random);
        let second = seeded_summary(42, Benchmark::Rastrigin, Topology::Random);
        assert_eq!(first.history, second.history);
        assert_eq!(first.x, second.x);
    }

    struct StopAfter(usize);
    impl SwarmObserver for StopAfter {
        fn callback(
            &mut self,
            iteration: usize,
            _swarm: &Swarm,
            _user_data: &mut (),
        ) -> ControlFlow<()> {
            if iteration >= self.0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    #[test]
    fn test_observer_break_ends_the_run() {
        let swarm = Swarm::for_benchmark(5, 2, Benchmark::Ackley);
        let mut pso: PSO = PSO::new(Rng::with_seed(0))
            .with_observer(Arc::new(RwLock::new(StopAfter(3))));
        let summary = pso
            .minimize(&Benchmark::Ackley, swarm, Topology::Global, &mut ())
            .unwrap();
        assert!(!summary.completed);
        assert_eq!(summary.message, "Terminated by observer");
        assert_eq!(summary.history.len(), 1);
    }

    struct AbortAfter {
        iteration: usize,
        signal: Arc<AtomicAbortSignal>,
    }
    impl SwarmObserver for AbortAfter {
        fn callback(
            &mut self,
            iteration: usize,
            _swarm: &Swarm,
            _user_data: &mut (),
        ) -> ControlFlow<()> {
            if iteration >= self.iteration {
                self.signal.abort();
            }
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn test_abort_signal_ends_the_run() {
        let signal = Arc::new(AtomicAbortSignal::new());
        let observer = AbortAfter {
            iteration: 2,
            signal: signal.clone(),
        };
        let swarm = Swarm::for_benchmark(5, 2, Benchmark::Ackley);
        let mut pso: PSO = PSO::new(Rng::with_seed(0))
            .with_observer(Arc::new(RwLock::new(observer)))
            .with_abort_signal(Box::new(signal));
        let summary = pso
            .minimize(&Benchmark::Ackley, swarm, Topology::Global, &mut ())
            .unwrap();
        assert!(!summary.completed);
        assert_eq!(summary.message, "Aborted");
    }
}
