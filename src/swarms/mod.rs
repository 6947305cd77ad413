/// Module containing the [`Particle`] type.
pub mod particle;
/// Module containing the [`PSO`] engine, the [`run`] entry point, and [`SwarmSummary`].
pub mod pso;
/// Module containing the [`Swarm`] type.
pub mod swarm;
/// Module containing [`Topology`] and the [`Neighborhoods`] table built from it.
pub mod topology;

pub use particle::Particle;
pub use pso::{run, SwarmSummary, PSO};
pub use swarm::Swarm;
pub use topology::{Neighborhoods, Topology};
