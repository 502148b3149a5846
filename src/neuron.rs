//! This module provides the `Neuron` structure which composes the `Network` structure.
//!
//! A neuron is a leaky integrate-and-fire unit. At each step it is either refractory (potential held at
//! [`POTENTIAL_RESET`]), firing (potential above [`THRESHOLD`]) or integrating its inputs exactly over
//! the step with the closed-form solution of the membrane equation.

use crate::buffer::DelayBuffer;
use crate::utils::{decay, refractory_steps};
use crate::{AMPLITUDE, POTENTIAL_RESET, RESISTANCE, THRESHOLD};

/// Represents a leaky integrate-and-fire neuron.
#[derive(Debug, PartialEq, Clone)]
pub struct Neuron {
    // The time at which the simulation of the neuron ends [ms].
    stop_time: f64,
    // The constant current injected into the neuron.
    external_current: f64,
    // The membrane potential [mV].
    potential: f64,
    // The number of steps left in the refractory period.
    refractory_timer: u32,
    // The number of spikes fired so far.
    spike_count: u32,
    // Whether the neuron fired during the last update.
    has_spiked: bool,
    // Whether the neuron is inhibitory (otherwise excitatory).
    is_inhibitory: bool,
    // Synaptic input waiting to be integrated, one slot per step of delay.
    buffer: DelayBuffer,
}

impl Neuron {
    /// Create a new excitatory neuron with the specified stop time, external current and initial potential.
    pub fn new(stop_time: f64, external_current: f64, potential: f64) -> Self {
        Neuron {
            stop_time,
            external_current,
            potential,
            refractory_timer: 0,
            spike_count: 0,
            has_spiked: false,
            is_inhibitory: false,
            buffer: DelayBuffer::new(),
        }
    }

    /// Returns the time at which the simulation of the neuron ends.
    pub fn stop_time(&self) -> f64 {
        self.stop_time
    }

    /// Returns the membrane potential.
    pub fn potential(&self) -> f64 {
        self.potential
    }

    /// Set the membrane potential.
    pub fn set_potential(&mut self, potential: f64) {
        self.potential = potential;
    }

    /// Returns the external current.
    pub fn external_current(&self) -> f64 {
        self.external_current
    }

    /// Set the external current. It is used from the next update on.
    pub fn set_external_current(&mut self, external_current: f64) {
        self.external_current = external_current;
    }

    /// Returns the number of steps left in the refractory period.
    pub fn refractory_timer(&self) -> u32 {
        self.refractory_timer
    }

    /// Returns the number of spikes fired so far.
    pub fn spike_count(&self) -> u32 {
        self.spike_count
    }

    /// Returns `true` if the neuron fired during the last update.
    pub fn has_spiked(&self) -> bool {
        self.has_spiked
    }

    /// Returns `true` if the neuron is inhibitory, `false` if it is excitatory.
    pub fn is_inhibitory(&self) -> bool {
        self.is_inhibitory
    }

    /// Set the neuron type. The network sets it once, at construction.
    pub fn set_inhibitory(&mut self, is_inhibitory: bool) {
        self.is_inhibitory = is_inhibitory;
    }

    /// Returns the delay buffer of the neuron.
    pub fn buffer(&self) -> &DelayBuffer {
        &self.buffer
    }

    /// Returns the potential after one step, given the input accumulated in the specified slot.
    ///
    /// This is the exact solution of `tau dV/dt = -V + R I` over one step for a constant current,
    /// to which the synaptic input is added instantaneously.
    pub fn membrane_equation(&self, read_slot: usize) -> f64 {
        let decay = decay();
        decay * self.potential
            + self.external_current * RESISTANCE * (1.0 - decay)
            + self.buffer.get(read_slot) * AMPLITUDE
    }

    /// Advance the neuron by one step, reading its synaptic input from the specified slot.
    ///
    /// A neuron crossing the threshold fires but keeps its potential until the next update, which
    /// starts the refractory period and resets the potential.
    /// The slot is not consumed: the caller must clear it.
    pub fn update(&mut self, read_slot: usize) {
        self.has_spiked = false;

        if self.refractory_timer > 0 {
            self.potential = POTENTIAL_RESET;
            self.refractory_timer -= 1;
        } else if self.potential > THRESHOLD {
            self.has_spiked = true;
            self.spike_count += 1;
            self.refractory_timer = refractory_steps();
        } else {
            self.potential = self.membrane_equation(read_slot);
        }
    }

    /// Add synaptic input to the specified slot of the delay buffer.
    pub fn fill_buffer(&mut self, amount: f64, write_slot: usize) {
        self.buffer.add(write_slot, amount);
    }

    /// Empty the specified slot of the delay buffer.
    pub fn clear_buffer(&mut self, slot: usize) {
        self.buffer.clear(slot);
    }
}
