//! Ring buffer holding the synaptic input a neuron will receive over the next steps.

use crate::utils::buffer_len;

/// A circular array of accumulators, one per step of synaptic delay plus the slot being read.
///
/// The buffer does not track any position itself: the network owns the read and write indices and
/// advances them in lock-step for all neurons.
#[derive(Debug, PartialEq, Clone)]
pub struct DelayBuffer {
    slots: Vec<f64>,
}

impl DelayBuffer {
    /// Create an empty buffer sized for the synaptic delay.
    pub fn new() -> Self {
        DelayBuffer::with_len(buffer_len())
    }

    /// Create an empty buffer with the specified number of slots.
    pub fn with_len(len: usize) -> Self {
        DelayBuffer {
            slots: vec![0.0; len],
        }
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the buffer has no slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the input accumulated in a slot.
    pub fn get(&self, slot: usize) -> f64 {
        self.slots[slot]
    }

    /// Add input to a slot. Inputs landing in the same slot sum up.
    pub fn add(&mut self, slot: usize, amount: f64) {
        self.slots[slot] += amount;
    }

    /// Empty a slot once it has been consumed.
    pub fn clear(&mut self, slot: usize) {
        self.slots[slot] = 0.0;
    }

    /// Returns a slice of all slots.
    pub fn slots(&self) -> &[f64] {
        &self.slots[..]
    }
}

impl Default for DelayBuffer {
    fn default() -> Self {
        DelayBuffer::new()
    }
}
