use thiserror::Error;

/// Errors raised while validating a run configuration.
///
/// Every variant is detected before the first iteration runs; the engine never attempts a partial
/// run with defaulted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The benchmark code did not match any known objective function.
    #[error("unknown benchmark code {0:?} (expected one of \"ack\", \"ras\", \"rok\")")]
    UnknownBenchmark(String),
    /// The topology code did not match any known neighborhood topology.
    #[error("unknown topology code {0:?} (expected one of \"gl\", \"ri\", \"vn\", \"ra\")")]
    UnknownTopology(String),
    /// A run dimension (swarm size, iterations, or dimensions) was zero.
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    /// The random topology was asked for more distinct neighbors than the swarm holds.
    #[error("neighborhood size {k} exceeds swarm size {n}")]
    NeighborhoodTooLarge {
        /// The requested number of neighbors per particle.
        k: usize,
        /// The number of particles in the swarm.
        n: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::UnknownBenchmark("ackley".to_string()).to_string(),
            "unknown benchmark code \"ackley\" (expected one of \"ack\", \"ras\", \"rok\")"
        );
        assert_eq!(
            ConfigError::UnknownTopology("star".to_string()).to_string(),
            "unknown topology code \"star\" (expected one of \"gl\", \"ri\", \"vn\", \"ra\")"
        );
        assert_eq!(
            ConfigError::NonPositive("swarm size").to_string(),
            "swarm size must be positive"
        );
        assert_eq!(
            ConfigError::NeighborhoodTooLarge { k: 5, n: 3 }.to_string(),
            "neighborhood size 5 exceeds swarm size 3"
        );
    }
}
