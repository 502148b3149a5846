//! Network of leaky integrate-and-fire neurons connected by delayed synapses.
//!
//! The network advances all its neurons in lock-step. At every step:
//! 1. every neuron integrates the input stored in the read slot of its delay buffer;
//! 2. every neuron of a large network receives a Poisson number of background spikes in its write slot;
//! 3. every neuron which fired sends its spike to the write slot of its targets (negative if inhibitory);
//! 4. every neuron's read slot is emptied;
//! 5. the read and write indices move forward by one slot, wrapping around the buffers.
//!
//! Since the write index is always `delay_steps` slots ahead of the read index, a spike fired at step
//! `t` is integrated by its targets exactly at step `t + delay_steps`.
use rayon::prelude::*;

use crate::connectivity::{self, Connectivity, ConnectivitySummary};
use crate::error::SNNError;
use crate::neuron::Neuron;
use crate::random::RandomSource;
use crate::recorder::{NullRecorder, SpikeRecorder};
use crate::utils::{buffer_len, delay_steps, steps_from_time, time_from_steps};
use crate::{MIN_NEURONS_PAR, RELATIVE_INHIBITORY_STRENGTH, SMALL_NETWORK_LIMIT};

/// The buffer input carried by a spike from an excitatory neuron, or by a background spike.
pub const EXCITATORY_INPUT: f64 = 1.0;
/// The buffer input carried by a spike from an inhibitory neuron.
pub const INHIBITORY_INPUT: f64 = -RELATIVE_INHIBITORY_STRENGTH;

/// A network owning its neurons, their connections and the random source driving them.
#[derive(Debug, Clone)]
pub struct Network {
    neurons: Vec<Neuron>,
    connectivity: Connectivity,
    rng: RandomSource,
    stop_time: f64,
    stop_step: usize,
    clock: usize,
    read_index: usize,
    write_index: usize,
    spikes_this_step: u32,
    total_spikes: u64,
}

impl Network {
    /// Create a network with the specified neurons, simulated until the stop time [ms].
    ///
    /// Networks of at least [`SMALL_NETWORK_LIMIT`] neurons have their first fifth of neurons made
    /// inhibitory and are connected at random following Brunel's model; smaller networks are fully
    /// connected and keep the neuron types they were given.
    /// The function returns an error for an empty network or a non-positive stop time.
    pub fn build(
        stop_time: f64,
        neurons: Vec<Neuron>,
        mut rng: RandomSource,
    ) -> Result<Self, SNNError> {
        if neurons.is_empty() {
            return Err(SNNError::InvalidConfiguration(
                "The network must contain at least one neuron".to_string(),
            ));
        }
        if !(stop_time.is_finite() && stop_time > 0.0) {
            return Err(SNNError::InvalidConfiguration(format!(
                "The stop time must be positive and finite, got {}",
                stop_time
            )));
        }

        let mut neurons = neurons;
        if neurons.len() >= SMALL_NETWORK_LIMIT {
            define_neuron_types(&mut neurons);
        }
        let connectivity = Connectivity::generate(neurons.len(), &mut rng);

        let network = Network {
            neurons,
            connectivity,
            rng,
            stop_time,
            stop_step: steps_from_time(stop_time),
            clock: 0,
            read_index: 0,
            write_index: delay_steps(),
            spikes_this_step: 0,
            total_spikes: 0,
        };

        log::info!(
            "Network built: {} neurons ({} inhibitory), {} connections, {} steps",
            network.num_neurons(),
            network.num_inhibitory_neurons(),
            network.num_connections(),
            network.stop_step
        );

        Ok(network)
    }

    /// Returns the number of neurons in the network.
    pub fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Returns a slice of the neurons of the network.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons[..]
    }

    /// A reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    pub fn neuron_ref(&self, neuron_id: usize) -> Option<&Neuron> {
        self.neurons.get(neuron_id)
    }

    /// A mutable reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    pub fn neuron_mut(&mut self, neuron_id: usize) -> Option<&mut Neuron> {
        self.neurons.get_mut(neuron_id)
    }

    /// Returns the number of inhibitory neurons.
    pub fn num_inhibitory_neurons(&self) -> usize {
        self.neurons.iter().filter(|n| n.is_inhibitory()).count()
    }

    /// Returns the number of excitatory neurons.
    pub fn num_excitatory_neurons(&self) -> usize {
        self.num_neurons() - self.num_inhibitory_neurons()
    }

    /// Returns the connectivity of the network.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Returns the total number of connections.
    pub fn num_connections(&self) -> usize {
        self.connectivity.num_connections()
    }

    /// Returns the number of excitatory inputs of every neuron in Brunel's model.
    ///
    /// Below [`SMALL_NETWORK_LIMIT`] neurons this is the nominal Brunel count for the network size,
    /// not the in-degree of the generated all-to-all connectivity (see [`Connectivity::num_inputs`]).
    /// The same holds for [`Network::num_inhibitory_connections`] and [`Network::num_external_connections`].
    pub fn num_excitatory_connections(&self) -> usize {
        connectivity::num_excitatory_connections(self.num_neurons())
    }

    /// Returns the number of inhibitory inputs of every neuron in Brunel's model.
    pub fn num_inhibitory_connections(&self) -> usize {
        connectivity::num_inhibitory_connections(self.num_neurons())
    }

    /// Returns the number of background inputs of every neuron in Brunel's model.
    pub fn num_external_connections(&self) -> usize {
        connectivity::num_external_connections(self.num_neurons())
    }

    /// Summarize the connectivity of the network.
    pub fn connectivity_summary(&self) -> ConnectivitySummary {
        self.connectivity.summary(self.num_inhibitory_neurons())
    }

    /// Returns the time at which the simulation ends [ms].
    pub fn stop_time(&self) -> f64 {
        self.stop_time
    }

    /// Returns the number of steps the simulation runs for.
    pub fn stop_step(&self) -> usize {
        self.stop_step
    }

    /// Returns the number of steps simulated so far.
    pub fn clock(&self) -> usize {
        self.clock
    }

    /// Returns the simulated time so far [ms].
    pub fn time(&self) -> f64 {
        time_from_steps(self.clock)
    }

    /// Returns the index of the buffer slots integrated at the next step.
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    /// Returns the index of the buffer slots receiving the spikes fired at the next step.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Returns the total number of spikes fired so far.
    pub fn total_spikes(&self) -> u64 {
        self.total_spikes
    }

    /// Returns the number of spikes fired by every neuron so far.
    pub fn spike_counts(&self) -> Vec<u32> {
        self.neurons.iter().map(|n| n.spike_count()).collect()
    }

    /// Returns the mean firing rate of the neurons so far [Hz].
    pub fn mean_firing_rate(&self) -> f64 {
        match self.clock {
            0 => 0.0,
            _ => self.total_spikes as f64 / (self.num_neurons() as f64 * self.time() * 1e-3),
        }
    }

    /// Run the simulation until the stop time, discarding the spikes.
    pub fn run(&mut self) {
        self.run_with(&mut NullRecorder);
    }

    /// Run the simulation until the stop time, recording the spikes with the specified recorder.
    pub fn run_with<R: SpikeRecorder + ?Sized>(&mut self, recorder: &mut R) {
        log::info!(
            "Starting simulation of {} neurons for {} ms...",
            self.num_neurons(),
            self.stop_time
        );

        let log_interval = (self.stop_step / 10).max(1);
        while self.clock < self.stop_step {
            self.step(recorder);

            if self.clock % log_interval == 0 {
                log::debug!(
                    "Simulation progress: {:.0}% (Time: {:.1}/{:.1} ms, {} spikes)",
                    100.0 * self.clock as f64 / self.stop_step as f64,
                    self.time(),
                    self.stop_time,
                    self.total_spikes
                );
            }
        }
        recorder.flush();

        log::info!(
            "Simulation completed: {} spikes, mean firing rate {:.2} Hz",
            self.total_spikes,
            self.mean_firing_rate()
        );
    }

    /// Simulate one step of the network, recording its spikes with the specified recorder.
    /// The step is simulated even past the stop time.
    pub fn step<R: SpikeRecorder + ?Sized>(&mut self, recorder: &mut R) {
        let parallel = self.num_neurons() >= MIN_NEURONS_PAR;
        self.step_neurons(recorder, parallel);
    }

    /// Simulate one step, updating the neurons in parallel or one after the other.
    fn step_neurons<R: SpikeRecorder + ?Sized>(&mut self, recorder: &mut R, parallel: bool) {
        let read_index = self.read_index;
        let write_index = self.write_index;

        // Neurons only read their own read slot, which no spike of this step can reach
        if parallel {
            self.neurons
                .par_iter_mut()
                .for_each(|neuron| neuron.update(read_index));
        } else {
            self.neurons
                .iter_mut()
                .for_each(|neuron| neuron.update(read_index));
        }

        let with_background = self.num_neurons() >= SMALL_NETWORK_LIMIT;
        for source_id in 0..self.neurons.len() {
            if with_background {
                let num_background_spikes = self.rng.poisson();
                self.neurons[source_id]
                    .fill_buffer(num_background_spikes as f64 * EXCITATORY_INPUT, write_index);
            }

            if self.neurons[source_id].has_spiked() {
                self.spikes_this_step += 1;
                recorder.record_spike(self.clock, source_id);

                let input = match self.neurons[source_id].is_inhibitory() {
                    true => INHIBITORY_INPUT,
                    false => EXCITATORY_INPUT,
                };
                for &target_id in self.connectivity.targets(source_id) {
                    self.neurons[target_id].fill_buffer(input, write_index);
                }
            }

            self.neurons[source_id].clear_buffer(read_index);
        }

        self.advance_buffer_indices();

        recorder.record_step(time_from_steps(self.clock), self.spikes_this_step);
        self.total_spikes += self.spikes_this_step as u64;
        self.spikes_this_step = 0;
        self.clock += 1;
    }

    /// Move the read and write indices to the next slot, wrapping around the buffers.
    fn advance_buffer_indices(&mut self) {
        let len = buffer_len();
        self.read_index = (self.read_index + 1) % len;
        self.write_index = (self.write_index + 1) % len;
    }
}

/// Make the first fifth of the neurons inhibitory and the others excitatory.
fn define_neuron_types(neurons: &mut [Neuron]) {
    let num_inhibitory = connectivity::num_inhibitory_neurons(neurons.len());
    for (id, neuron) in neurons.iter_mut().enumerate() {
        neuron.set_inhibitory(id < num_inhibitory);
    }
}
