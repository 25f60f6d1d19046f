//! Rotating coupling-pattern schedule.

use std::collections::VecDeque;

/// Fixed-period rotation of coupling patterns, one step per circuit layer.
///
/// Each [`advance`](Self::advance) moves the front pattern to the back, so
/// after eight layers the schedule is back in its initial order.
#[derive(Debug, Clone)]
pub struct GateSequenceCycler {
    sequence: VecDeque<u8>,
}

impl GateSequenceCycler {
    pub fn new(sequence: [u8; 8]) -> Self {
        Self {
            sequence: VecDeque::from(sequence),
        }
    }

    /// Pattern for this layer.
    pub fn advance(&mut self) -> u8 {
        self.sequence.rotate_left(1);
        // Non-empty by construction.
        self.sequence.back().copied().unwrap_or_default()
    }

    /// Current order, front first.
    pub fn order(&self) -> [u8; 8] {
        let mut order = [0u8; 8];
        for (slot, &pattern) in order.iter_mut().zip(&self.sequence) {
            *slot = pattern;
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_yields_front() {
        let mut cycler = GateSequenceCycler::new([0, 3, 2, 1, 2, 1, 0, 3]);
        let layers: Vec<u8> = (0..10).map(|_| cycler.advance()).collect();
        assert_eq!(layers, vec![0, 3, 2, 1, 2, 1, 0, 3, 0, 3]);
    }

    #[test]
    fn test_order_after_one_step() {
        let mut cycler = GateSequenceCycler::new([1, 2, 3, 4, 5, 6, 7, 0]);
        cycler.advance();
        assert_eq!(cycler.order(), [2, 3, 4, 5, 6, 7, 0, 1]);
    }
}
