//! Benchmark circuit generators.
//!
//! | Kind | Depth | Sparse depths | Layer content |
//! |------|-------|---------------|---------------|
//! | `random` | yes | | random single gates, random pairing with `{swap, cx, cz}` |
//! | `random-extended` | yes | 5, 10, 15, 20 | as above plus controlled-Y, anti-controls and Toffoli-family triples |
//! | `qft` | no | | controlled-phase ladder and Hadamards |
//! | `sycamore` | yes | | no-repeat `{sqrt_x, sqrt_y, sqrt_w}`, then `cp(pi/6)` + `iswap` per grid coupling |
//! | `nearest-neighbor` | yes | | random single gates, then a random two-qubit gate per grid coupling |
//! | `single-qubits` | yes | 5, 10, 15, 20 | random single gates only |
//! | `dense` | yes | | random Pauli basis change and `rz(theta)` per qubit, then the extended entangling pass |
//! | `mirror` | yes | | random permutation, extended layers, then their inverse; the outcome is checked |
//!
//! Every generated circuit ends with a measurement of all qubits.
//! A circuit carrying [`Circuit::expected_outcome`] turns a differing
//! measurement into a failed trial.

mod dense;
mod mirror;
mod nearest_neighbor;
mod qft;
mod random;
mod single_qubit;
mod sycamore;

pub use dense::DenseRandom;
pub use mirror::MirrorValidation;
pub use nearest_neighbor::NearestNeighborGrid;
pub use qft::Qft;
pub use random::RandomUniversal;
pub use single_qubit::SingleQubitLayers;
pub use sycamore::SycamoreGrid;

use std::fmt;
use std::str::FromStr;

use qsweep_ir::Circuit;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};
use crate::topology::CouplingConvention;

/// Depths sampled by generators that skip most of the depth range.
pub const SPARSE_DEPTHS: &[u32] = &[5, 10, 15, 20];

/// Builds one benchmark circuit per trial.
pub trait CircuitGenerator {
    /// Short name used in record names.
    fn name(&self) -> &str;

    /// Whether circuits vary with depth. Width-only generators get one
    /// cell per width and ignore the depth argument.
    fn uses_depth(&self) -> bool {
        true
    }

    /// Curated depths to sample instead of the full configured range.
    fn sparse_depths(&self) -> Option<&[u32]> {
        None
    }

    /// Build a circuit of `num_qubits` qubits and `depth` layers.
    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit>;
}

/// The built-in generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    Random,
    RandomExtended,
    Qft,
    Sycamore,
    NearestNeighbor,
    SingleQubits,
    Dense,
    Mirror,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 8] = [
        GeneratorKind::Random,
        GeneratorKind::RandomExtended,
        GeneratorKind::Qft,
        GeneratorKind::Sycamore,
        GeneratorKind::NearestNeighbor,
        GeneratorKind::SingleQubits,
        GeneratorKind::Dense,
        GeneratorKind::Mirror,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorKind::Random => "random",
            GeneratorKind::RandomExtended => "random-extended",
            GeneratorKind::Qft => "qft",
            GeneratorKind::Sycamore => "sycamore",
            GeneratorKind::NearestNeighbor => "nearest-neighbor",
            GeneratorKind::SingleQubits => "single-qubits",
            GeneratorKind::Dense => "dense",
            GeneratorKind::Mirror => "mirror",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            GeneratorKind::Random => "random universal circuit with random qubit pairing",
            GeneratorKind::RandomExtended => {
                "random universal circuit with anti-controlled and three-qubit gates"
            }
            GeneratorKind::Qft => "quantum Fourier transform, width only",
            GeneratorKind::Sycamore => "Sycamore-style grid circuit with sqrt gates and iSWAP",
            GeneratorKind::NearestNeighbor => "grid circuit with random nearest-neighbor couplings",
            GeneratorKind::SingleQubits => "single-qubit layers only",
            GeneratorKind::Dense => "random basis changes with arbitrary Z rotations",
            GeneratorKind::Mirror => "random circuit then its inverse, checked against the start state",
        }
    }

    /// Instantiate the generator. The convention only affects grid kinds.
    pub fn build(self, convention: CouplingConvention) -> BenchResult<Box<dyn CircuitGenerator>> {
        Ok(match self {
            GeneratorKind::Random => Box::new(RandomUniversal::standard()),
            GeneratorKind::RandomExtended => Box::new(RandomUniversal::extended()),
            GeneratorKind::Qft => Box::new(Qft),
            GeneratorKind::Sycamore => Box::new(SycamoreGrid::new(convention)?),
            GeneratorKind::NearestNeighbor => Box::new(NearestNeighborGrid::new(convention)),
            GeneratorKind::SingleQubits => Box::new(SingleQubitLayers::new()),
            GeneratorKind::Dense => Box::new(DenseRandom::new()),
            GeneratorKind::Mirror => Box::new(MirrorValidation::new()),
        })
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('_', "-");
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                BenchError::Configuration(format!(
                    "unknown generator '{s}' (run `qsweep variants` for the list)"
                ))
            })
    }
}
