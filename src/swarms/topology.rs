use fastrand::Rng;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{core::ConfigError, swarms::Swarm, Float};

/// The neighborhood structure a swarm communicates through.
///
/// Topologies are selected by the short codes `"gl"`, `"ri"`, `"vn"`, and `"ra"`. The topology
/// determines which personal bests a particle can see when it computes its reference position:
/// sparser topologies slow the spread of information through the swarm, trading convergence speed
/// for resistance to premature convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Every particle sees the entire swarm.
    Global,
    /// Each particle sees itself and its two index-adjacent neighbors, wrapping at the ends.
    Ring,
    /// Each particle sees itself and four lattice neighbors at strides `1` and `⌊√n⌋`, wrapping.
    VonNeumann,
    /// Each particle sees a fixed-size set of distinct particles drawn uniformly at random,
    /// periodically redrawn during the run.
    Random,
}

impl Topology {
    /// The short code used to select this topology.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Global => "gl",
            Self::Ring => "ri",
            Self::VonNeumann => "vn",
            Self::Random => "ra",
        }
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gl" => Ok(Self::Global),
            "ri" => Ok(Self::Ring),
            "vn" => Ok(Self::VonNeumann),
            "ra" => Ok(Self::Random),
            _ => Err(ConfigError::UnknownTopology(s.to_string())),
        }
    }
}

/// The per-particle neighbor index table realized from a [`Topology`] for a swarm of a particular
/// size.
///
/// The global topology carries no table at all, so the engine's common case stays a plain clone of
/// the swarm's best position. Fixed tables (ring, von Neumann) are built once; the random table is
/// periodically redrawn through [`rebuild`](Neighborhoods::rebuild).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Neighborhoods {
    /// No table; every particle's reference is the swarm's global best.
    Global,
    /// A table built once and never redrawn.
    Fixed(Vec<Vec<usize>>),
    /// A table of `k` distinct indices per particle, redrawn on demand.
    Random {
        /// The number of distinct neighbors per particle.
        k: usize,
        /// The current neighbor table.
        sets: Vec<Vec<usize>>,
    },
}

impl Neighborhoods {
    /// Realize `topology` for a swarm of `n` particles. `neighborhood_size` only applies to the
    /// random topology.
    ///
    /// # Panics
    ///
    /// This method will panic if `n` is zero, or if the topology is [`Topology::Random`] and
    /// `neighborhood_size` is zero or exceeds `n`.
    pub fn build(n: usize, topology: Topology, neighborhood_size: usize, rng: &mut Rng) -> Self {
        assert!(n > 0);
        match topology {
            Topology::Global => Self::Global,
            Topology::Ring => Self::Fixed((0..n).map(|i| ring_set(i, n)).collect()),
            Topology::VonNeumann => Self::Fixed((0..n).map(|i| von_neumann_set(i, n)).collect()),
            Topology::Random => {
                assert!(neighborhood_size > 0 && neighborhood_size <= n);
                Self::Random {
                    k: neighborhood_size,
                    sets: random_sets(n, neighborhood_size, rng),
                }
            }
        }
    }
    /// Redraw the whole neighbor table. Only the random topology changes; fixed tables and the
    /// global topology are untouched.
    pub fn rebuild(&mut self, rng: &mut Rng) {
        if let Self::Random { k, sets } = self {
            *sets = random_sets(sets.len(), *k, rng);
        }
    }
    /// Compute each particle's reference position from the personal bests as they stand right
    /// now, before any particle moves. Computing all references up front keeps the sweep
    /// order-independent.
    ///
    /// Ties within a neighborhood break toward the member appearing earliest in the set's
    /// iteration order.
    pub fn reference_locations(&self, swarm: &Swarm) -> Vec<DVector<Float>> {
        match self {
            Self::Global => {
                let gbest = swarm.gbest.x.clone();
                (0..swarm.len()).map(|_| gbest.clone()).collect()
            }
            Self::Fixed(sets) | Self::Random { sets, .. } => sets
                .iter()
                .map(|set| {
                    let mut best = set[0];
                    for &j in &set[1..] {
                        if swarm.particles[j]
                            .best
                            .total_cmp(&swarm.particles[best].best)
                            == std::cmp::Ordering::Less
                        {
                            best = j;
                        }
                    }
                    swarm.particles[best].best.x.clone()
                })
                .collect(),
        }
    }
}

/// `{i-1, i, i+1} mod n`, duplicates removed preserving first occurrence.
fn ring_set(i: usize, n: usize) -> Vec<usize> {
    dedup_preserving_order(vec![(i + n - 1) % n, i, (i + 1) % n])
}

/// `{i-1, i, i+1, i-⌊√n⌋, i+⌊√n⌋} mod n`, duplicates removed preserving first occurrence. Small
/// swarms fold the lattice cross onto itself.
fn von_neumann_set(i: usize, n: usize) -> Vec<usize> {
    #[allow(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )]
    let stride = (n as Float).sqrt().floor() as usize;
    dedup_preserving_order(vec![
        (i + n - 1) % n,
        i,
        (i + 1) % n,
        (i + n - stride) % n,
        (i + stride) % n,
    ])
}

fn dedup_preserving_order(indices: Vec<usize>) -> Vec<usize> {
    let mut out = Vec::with_capacity(indices.len());
    for i in indices {
        if !out.contains(&i) {
            out.push(i);
        }
    }
    out
}

/// One set of `k` distinct indices per particle, drawn uniformly without replacement by a partial
/// Fisher–Yates shuffle. A particle need not appear in its own set.
fn random_sets(n: usize, k: usize, rng: &mut Rng) -> Vec<Vec<usize>> {
    (0..n)
        .map(|_| {
            let mut pool: Vec<usize> = (0..n).collect();
            for j in 0..k {
                let r = rng.usize(j..n);
                pool.swap(j, r);
            }
            pool.truncate(k);
            pool
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for topology in [
            Topology::Global,
            Topology::Ring,
            Topology::VonNeumann,
            Topology::Random,
        ] {
            assert_eq!(topology.code().parse::<Topology>().unwrap(), topology);
        }
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert_eq!(
            "star".parse::<Topology>(),
            Err(ConfigError::UnknownTopology("star".to_string()))
        );
    }

    #[test]
    fn test_ring_wraps_at_the_ends() {
        let mut rng = Rng::with_seed(0);
        let Neighborhoods::Fixed(sets) = Neighborhoods::build(5, Topology::Ring, 5, &mut rng)
        else {
            panic!("expected a fixed table");
        };
        assert_eq!(sets[0], vec![4, 0, 1]);
        assert_eq!(sets[2], vec![1, 2, 3]);
        assert_eq!(sets[4], vec![3, 4, 0]);
    }

    #[test]
    fn test_ring_folds_for_tiny_swarms() {
        let mut rng = Rng::with_seed(0);
        let Neighborhoods::Fixed(sets) = Neighborhoods::build(2, Topology::Ring, 5, &mut rng)
        else {
            panic!("expected a fixed table");
        };
        assert_eq!(sets[0], vec![1, 0]);
        assert_eq!(sets[1], vec![0, 1]);
    }

    #[test]
    fn test_von_neumann_square_swarm() {
        // n = 16 is a perfect square, so the cross is {i±1, i, i±4} mod 16
        let mut rng = Rng::with_seed(0);
        let Neighborhoods::Fixed(sets) =
            Neighborhoods::build(16, Topology::VonNeumann, 5, &mut rng)
        else {
            panic!("expected a fixed table");
        };
        assert_eq!(sets[5], vec![4, 5, 6, 1, 9]);
        assert_eq!(sets[0], vec![15, 0, 1, 12, 4]);
        assert!(sets.iter().all(|set| set.len() == 5));
    }

    #[test]
    fn test_random_sets_are_distinct_and_sized() {
        let mut rng = Rng::with_seed(0);
        let Neighborhoods::Random { sets, .. } =
            Neighborhoods::build(20, Topology::Random, 5, &mut rng)
        else {
            panic!("expected a random table");
        };
        assert_eq!(sets.len(), 20);
        for set in &sets {
            assert_eq!(set.len(), 5);
            let mut sorted = set.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 5);
            assert!(set.iter().all(|&i| i < 20));
        }
    }

    #[test]
    fn test_rebuild_only_redraws_random_tables() {
        let mut rng = Rng::with_seed(0);
        let mut fixed = Neighborhoods::build(5, Topology::Ring, 5, &mut rng);
        let before = fixed.clone();
        fixed.rebuild(&mut rng);
        let (Neighborhoods::Fixed(a), Neighborhoods::Fixed(b)) = (&before, &fixed) else {
            panic!("expected fixed tables");
        };
        assert_eq!(a, b);

        let mut random = Neighborhoods::build(20, Topology::Random, 5, &mut rng);
        let Neighborhoods::Random { sets: before, .. } = random.clone() else {
            panic!("expected a random table");
        };
        random.rebuild(&mut rng);
        let Neighborhoods::Random { sets: after, .. } = random else {
            panic!("expected a random table");
        };
        assert_eq!(after.len(), 20);
        assert_ne!(before, after);
    }

    #[test]
    #[should_panic]
    fn test_oversized_random_neighborhood_panics() {
        let mut rng = Rng::with_seed(0);
        let _ = Neighborhoods::build(3, Topology::Random, 5, &mut rng);
    }
}
