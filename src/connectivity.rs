//! Module generating the synaptic connections of the network.
//!
//! Small networks (below [`SMALL_NETWORK_LIMIT`] neurons) are fully connected without self-loops.
//! Larger networks follow Brunel's model: the first fifth of the neurons are inhibitory, and every
//! neuron receives [`num_inhibitory_connections`] inputs drawn uniformly from the inhibitory neurons
//! and [`num_excitatory_connections`] inputs drawn uniformly from the excitatory neurons.
//! Draws are with replacement, so duplicate connections and self-loops may occur.
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::random::RandomSource;
use crate::{CONNECTION_PERCENT, SMALL_NETWORK_LIMIT};

/// Returns the number of excitatory inputs of every neuron in a network of the specified size.
pub fn num_excitatory_connections(num_neurons: usize) -> usize {
    (num_neurons as f64 * CONNECTION_PERCENT * 0.8) as usize
}

/// Returns the number of inhibitory inputs of every neuron in a network of the specified size.
pub fn num_inhibitory_connections(num_neurons: usize) -> usize {
    (num_neurons as f64 * CONNECTION_PERCENT * 0.2) as usize
}

/// Returns the number of background (external) inputs of every neuron, equal to its number of excitatory inputs.
pub fn num_external_connections(num_neurons: usize) -> usize {
    num_excitatory_connections(num_neurons)
}

/// Returns the number of inhibitory neurons in a network of the specified size.
/// They are the first neurons of the network.
pub fn num_inhibitory_neurons(num_neurons: usize) -> usize {
    if num_neurons < SMALL_NETWORK_LIMIT {
        0
    } else {
        num_neurons / 5
    }
}

/// Maps every source neuron to the (ordered) list of neurons it sends spikes to.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Connectivity {
    targets: Vec<Vec<usize>>,
}

impl Connectivity {
    /// Create a connectivity without any connection between the specified number of neurons.
    pub fn empty(num_neurons: usize) -> Self {
        Connectivity {
            targets: vec![vec![]; num_neurons],
        }
    }

    /// Connect every neuron to every other neuron.
    pub fn all_to_all(num_neurons: usize) -> Self {
        let targets = (0..num_neurons)
            .map(|i| (0..num_neurons).filter(|&j| j != i).collect())
            .collect();
        Connectivity { targets }
    }

    /// Sample Brunel's sparse random connectivity.
    /// The first `num_neurons / 5` neurons are assumed to be inhibitory, the rest excitatory.
    pub fn brunel(num_neurons: usize, rng: &mut RandomSource) -> Self {
        let mut connectivity = Connectivity::empty(num_neurons);
        let num_inhibitory = num_neurons / 5;
        let num_excitatory = num_neurons - num_inhibitory;

        for target_id in 0..num_neurons {
            for _ in 0..num_inhibitory_connections(num_neurons) {
                let source_id = rng.uniform(num_inhibitory);
                connectivity.add_connection(source_id, target_id);
            }
            for _ in 0..num_excitatory_connections(num_neurons) {
                let source_id = rng.uniform(num_excitatory) + num_inhibitory;
                connectivity.add_connection(source_id, target_id);
            }
        }

        connectivity
    }

    /// Generate the connectivity of a network of the specified size, fully connected if it is small,
    /// following Brunel's model otherwise.
    pub fn generate(num_neurons: usize, rng: &mut RandomSource) -> Self {
        if num_neurons < SMALL_NETWORK_LIMIT {
            Connectivity::all_to_all(num_neurons)
        } else {
            Connectivity::brunel(num_neurons, rng)
        }
    }

    /// Add a connection from the source to the target neuron.
    /// Panics if the source neuron is out of bounds.
    pub fn add_connection(&mut self, source_id: usize, target_id: usize) {
        self.targets[source_id].push(target_id);
    }

    /// Returns the neurons receiving the spikes of the specified source neuron.
    pub fn targets(&self, source_id: usize) -> &[usize] {
        &self.targets[source_id][..]
    }

    /// Returns the number of neurons.
    pub fn num_neurons(&self) -> usize {
        self.targets.len()
    }

    /// Returns the total number of connections.
    pub fn num_connections(&self) -> usize {
        self.targets.iter().map(|targets| targets.len()).sum()
    }

    /// Returns the number of connections leaving the specified neuron.
    pub fn num_outputs(&self, source_id: usize) -> usize {
        self.targets[source_id].len()
    }

    /// Returns the number of connections reaching every neuron.
    pub fn num_inputs(&self) -> Vec<usize> {
        let mut num_inputs = vec![0; self.num_neurons()];
        self.targets
            .iter()
            .flatten()
            .for_each(|&target_id| num_inputs[target_id] += 1);
        num_inputs
    }

    /// Summarize the connectivity of a network with the specified number of inhibitory neurons.
    pub fn summary(&self, num_inhibitory_neurons: usize) -> ConnectivitySummary {
        let num_neurons = self.num_neurons();
        let (min_outputs, max_outputs) =
            match (0..num_neurons).map(|id| self.num_outputs(id)).minmax() {
                MinMaxResult::NoElements => (0, 0),
                MinMaxResult::OneElement(n) => (n, n),
                MinMaxResult::MinMax(min, max) => (min, max),
            };
        let mean_outputs = match num_neurons {
            0 => 0.0,
            n => self.num_connections() as f64 / n as f64,
        };

        ConnectivitySummary {
            num_neurons,
            num_inhibitory_neurons,
            num_excitatory_neurons: num_neurons - num_inhibitory_neurons,
            num_connections: self.num_connections(),
            num_inhibitory_inputs: num_inhibitory_connections(num_neurons),
            num_excitatory_inputs: num_excitatory_connections(num_neurons),
            min_outputs,
            max_outputs,
            mean_outputs,
        }
    }
}

/// Read-only description of a network connectivity, e.g., for reporting.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ConnectivitySummary {
    pub num_neurons: usize,
    pub num_inhibitory_neurons: usize,
    pub num_excitatory_neurons: usize,
    pub num_connections: usize,
    /// The number of inhibitory inputs per neuron in Brunel's model.
    pub num_inhibitory_inputs: usize,
    /// The number of excitatory inputs per neuron in Brunel's model.
    pub num_excitatory_inputs: usize,
    pub min_outputs: usize,
    pub max_outputs: usize,
    pub mean_outputs: f64,
}
