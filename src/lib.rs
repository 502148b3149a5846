//! This crate simulates Brunel's balanced network of leaky integrate-and-fire (LIF) neurons.
//!
//! Neurons are point neurons whose membrane potential is integrated exactly over each time step.
//! Spikes travel along random sparse connections with a fixed transmission delay, implemented with
//! one ring buffer per neuron. Networks with at least [`SMALL_NETWORK_LIMIT`] neurons follow Brunel's
//! 80/20 excitatory/inhibitory split and receive Poisson background noise; smaller networks are fully
//! connected and deterministic.
//!
//! # Simulating a Network
//!
//! ```rust
//! use brunel_snn::network::Network;
//! use brunel_snn::neuron::Neuron;
//! use brunel_snn::random::RandomSource;
//! use brunel_snn::recorder::MemoryRecorder;
//!
//! // 100 neurons at rest, simulated for 10 ms with a fixed seed
//! let neurons = (0..100).map(|_| Neuron::new(10.0, 0.0, 0.0)).collect();
//! let mut network = Network::build(10.0, neurons, RandomSource::seed_from_u64(42)).unwrap();
//! let mut recorder = MemoryRecorder::new();
//! network.run_with(&mut recorder);
//!
//! assert_eq!(network.clock(), 100);
//! assert_eq!(recorder.step_counts().len(), 100);
//! assert_eq!(network.num_inhibitory_neurons(), 20);
//! ```
//!
//! # Connectivity
//!
//! ```rust
//! use brunel_snn::connectivity;
//!
//! // Each neuron receives 10% of the network as inputs, 20% of them inhibitory
//! assert_eq!(connectivity::num_inhibitory_connections(1000), 20);
//! assert_eq!(connectivity::num_excitatory_connections(1000), 80);
//! ```

pub mod buffer;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod network;
pub mod neuron;
pub mod random;
pub mod recorder;
pub mod utils;

/// The potential above which a neuron fires [mV].
pub const THRESHOLD: f64 = 20.0;
/// The potential at which a refractory neuron is held [mV].
pub const POTENTIAL_RESET: f64 = 0.0;
/// The duration of one simulation step [ms].
pub const STEP_SIZE: f64 = 0.1;
/// The membrane resistance.
pub const RESISTANCE: f64 = 20.0;
/// The membrane capacity.
pub const CAPACITY: f64 = 1.0;
/// The membrane time constant [ms].
pub const TAU: f64 = RESISTANCE * CAPACITY;
/// The duration during which a neuron cannot fire after a spike [ms].
pub const REFRACTORY_PERIOD: f64 = 2.0;
/// The jump of potential caused by one excitatory spike [mV].
pub const AMPLITUDE: f64 = 0.1;
/// The synaptic transmission delay [ms].
pub const DELAY: f64 = 1.5;
/// The fraction of the network each neuron receives inputs from.
pub const CONNECTION_PERCENT: f64 = 0.1;
/// The strength of inhibitory synapses relative to excitatory ones (Brunel's `g`).
pub const RELATIVE_INHIBITORY_STRENGTH: f64 = 5.0;
/// The ratio between the external frequency and the frequency needed to reach threshold (Brunel's `eta`).
pub const ETA: f64 = 2.0;
/// The frequency of background spikes from outside the network [1/ms].
pub const EXTERNAL_FREQUENCY: f64 = THRESHOLD * ETA / (AMPLITUDE * TAU);
/// Networks below this size are fully connected and receive no background noise.
pub const SMALL_NETWORK_LIMIT: usize = 50;
/// Minimum number of neurons to update the neurons in parallel.
pub const MIN_NEURONS_PAR: usize = 1000;
