//! Random single-qubit gate choice without immediate repeats.

use qsweep_ir::SingleQubitGate;
use rand::{Rng, RngCore};

use crate::error::{BenchError, BenchResult};

/// Draws gates uniformly from a fixed set, never repeating the gate a qubit
/// received on the previous layer.
///
/// When a previous gate exists the draw is uniform over the other `k - 1`
/// members, so no rejection loop is involved.
#[derive(Debug, Clone)]
pub struct SingleQubitGateSelector {
    gates: Vec<SingleQubitGate>,
}

impl SingleQubitGateSelector {
    /// Fails unless the set has at least two distinct gates.
    pub fn new(gates: &[SingleQubitGate]) -> BenchResult<Self> {
        let mut unique: Vec<SingleQubitGate> = Vec::with_capacity(gates.len());
        for &gate in gates {
            if !unique.contains(&gate) {
                unique.push(gate);
            }
        }
        if unique.len() < 2 {
            return Err(BenchError::Generation(format!(
                "no-repeat selection needs at least 2 distinct gates, got {}",
                unique.len()
            )));
        }
        Ok(Self { gates: unique })
    }

    pub fn select(&self, previous: Option<SingleQubitGate>, rng: &mut dyn RngCore) -> SingleQubitGate {
        let excluded = previous.and_then(|p| self.gates.iter().position(|&g| g == p));
        match excluded {
            Some(skip) => {
                let pick = rng.gen_range(0..self.gates.len() - 1);
                self.gates[if pick >= skip { pick + 1 } else { pick }]
            }
            None => self.gates[rng.gen_range(0..self.gates.len())],
        }
    }

    /// Replace each qubit's last gate with a fresh no-repeat choice.
    pub fn select_layer(&self, memory: &mut [Option<SingleQubitGate>], rng: &mut dyn RngCore) {
        for slot in memory.iter_mut() {
            *slot = Some(self.select(*slot, rng));
        }
    }
}
