//! Near-square qubit grids and nearest-neighbor coupling schedules.
//!
//! Qubit `b` sits at `(b / col_len, b % col_len)`. A coupling pattern is a
//! small integer whose bit 1 picks the row direction (set: down, clear: up)
//! and whose bit 0 picks the column shift. How bit 0 maps to a column shift
//! depends on the [`CouplingConvention`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// Number of distinct coupling pattern indices.
pub const NUM_PATTERNS: usize = 8;

/// Row and column counts of a qubit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    pub row_len: u32,
    pub col_len: u32,
}

impl GridDimensions {
    /// Factor `num_qubits` into the most square `row_len x col_len` grid.
    ///
    /// `col_len` is the largest divisor of `num_qubits` not exceeding
    /// `floor(sqrt(num_qubits))`, so `col_len <= row_len` always holds.
    pub fn factorize(num_qubits: u32) -> Self {
        let mut col_len = num_qubits.isqrt().max(1);
        while num_qubits % col_len != 0 {
            col_len -= 1;
        }
        Self {
            row_len: num_qubits / col_len,
            col_len,
        }
    }

    pub fn num_qubits(&self) -> u32 {
        self.row_len * self.col_len
    }

    /// Linear qubit index of a grid coordinate.
    pub fn index(&self, row: u32, col: u32) -> u32 {
        row * self.col_len + col
    }

    /// Neighbor of `(row, col)` under `pattern`, if it lies on the grid.
    pub fn partner(
        &self,
        row: u32,
        col: u32,
        pattern: u8,
        convention: CouplingConvention,
    ) -> Option<(u32, u32)> {
        let row_delta: i64 = if pattern & 2 != 0 { 1 } else { -1 };
        let col_delta: i64 = match convention {
            CouplingConvention::Simple => i64::from(pattern & 1 != 0 && self.col_len != 1),
            CouplingConvention::ParityStart => {
                if convention.row_start(pattern) % 2 == 0 {
                    if pattern & 1 != 0 { 0 } else { -1 }
                } else if pattern & 1 != 0 {
                    1
                } else {
                    0
                }
            }
        };

        let r = i64::from(row) + row_delta;
        let c = i64::from(col) + col_delta;
        if r < 0 || c < 0 || r >= i64::from(self.row_len) || c >= i64::from(self.col_len) {
            return None;
        }
        Some((r as u32, c as u32))
    }
}

/// Which column-shift rule a grid schedule follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CouplingConvention {
    /// Rows scanned from 1 at stride 2; bit 0 shifts one column right
    /// unless the grid is a single column.
    #[default]
    Simple,
    /// Start row chosen per pattern; the column shift depends on whether
    /// the scan started on an even or odd row.
    ParityStart,
}

impl CouplingConvention {
    /// The layer schedule generators start from under this convention.
    pub fn default_sequence(self) -> [u8; 8] {
        match self {
            CouplingConvention::Simple => [0, 3, 2, 1, 2, 1, 0, 3],
            CouplingConvention::ParityStart => [0, 3, 1, 2, 1, 2, 0, 3],
        }
    }

    /// First row scanned for `pattern`.
    pub fn row_start(self, pattern: u8) -> u32 {
        match self {
            CouplingConvention::Simple => 1,
            CouplingConvention::ParityStart => match pattern & 3 {
                0 | 1 => 1,
                _ => 0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CouplingConvention::Simple => "simple",
            CouplingConvention::ParityStart => "parity-start",
        }
    }
}

impl fmt::Display for CouplingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouplingConvention {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(CouplingConvention::Simple),
            "parity-start" | "parity" => Ok(CouplingConvention::ParityStart),
            other => Err(BenchError::Configuration(format!(
                "unknown coupling convention '{other}' (expected simple or parity-start)"
            ))),
        }
    }
}

/// Coupled qubit pairs for every pattern on one grid.
///
/// Built once per width so that circuit layers only walk a list.
#[derive(Debug, Clone)]
pub struct CouplingTable {
    dims: GridDimensions,
    convention: CouplingConvention,
    pairs: [Vec<(u32, u32)>; NUM_PATTERNS],
}

impl CouplingTable {
    pub fn new(num_qubits: u32, convention: CouplingConvention) -> Self {
        let dims = GridDimensions::factorize(num_qubits);
        let pairs = std::array::from_fn(|pattern| {
            let pattern = pattern as u8;
            let mut pairs = Vec::new();
            let mut row = convention.row_start(pattern);
            while row < dims.row_len {
                for col in 0..dims.col_len {
                    if let Some((r, c)) = dims.partner(row, col, pattern, convention) {
                        pairs.push((dims.index(row, col), dims.index(r, c)));
                    }
                }
                row += 2;
            }
            pairs
        });
        Self {
            dims,
            convention,
            pairs,
        }
    }

    pub fn convention(&self) -> CouplingConvention {
        self.convention
    }

    pub fn num_qubits(&self) -> u32 {
        self.dims.num_qubits()
    }

    /// Ordered `(scanned, partner)` pairs active under `pattern`.
    pub fn pairs(&self, pattern: u8) -> &[(u32, u32)] {
        &self.pairs[usize::from(pattern) % NUM_PATTERNS]
    }
}

/// Keeps the table for the most recently requested width.
#[derive(Debug, Default)]
pub struct CouplingCache {
    table: Option<CouplingTable>,
}

impl CouplingCache {
    pub fn get(&mut self, num_qubits: u32, convention: CouplingConvention) -> &CouplingTable {
        let stale = self
            .table
            .as_ref()
            .is_none_or(|t| t.num_qubits() != num_qubits || t.convention() != convention);
        if stale {
            self.table = Some(CouplingTable::new(num_qubits, convention));
        }
        self.table.get_or_insert_with(|| CouplingTable::new(num_qubits, convention))
    }
}
