//! Simulation configuration, loadable from a JSON file.
//!
//! # Examples
//!
//! ```rust
//! use brunel_snn::config::SimulationConfig;
//!
//! let config: SimulationConfig = serde_json::from_str(r#"{"num_neurons": 2, "stop_time": 100.0}"#).unwrap();
//! let network = config.build_network().unwrap();
//!
//! assert_eq!(network.num_neurons(), 2);
//! assert_eq!(network.stop_step(), 1000);
//! ```
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SNNError;
use crate::network::Network;
use crate::neuron::Neuron;
use crate::random::RandomSource;
use crate::recorder::FileRecorder;

/// Default path of the spike-count stream.
pub const DEFAULT_SPIKE_COUNT_PATH: &str = "res/spikes2.txt";
/// Default path of the spike-index stream.
pub const DEFAULT_SPIKE_INDEX_PATH: &str = "res/spikes.gdf";

/// The parameters of a simulation run.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// The number of neurons in the network.
    pub num_neurons: usize,
    /// The simulated duration [ms].
    pub stop_time: f64,
    /// The seed of the random source, drawn from the operating system if absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// The external current injected into every neuron.
    #[serde(default)]
    pub external_current: f64,
    /// The initial membrane potential of every neuron [mV].
    #[serde(default)]
    pub initial_potential: f64,
    /// Where to write the number of spikes per step.
    #[serde(default = "default_spike_count_path")]
    pub spike_count_path: PathBuf,
    /// Where to write the spikes of every neuron.
    #[serde(default = "default_spike_index_path")]
    pub spike_index_path: PathBuf,
}

fn default_spike_count_path() -> PathBuf {
    PathBuf::from(DEFAULT_SPIKE_COUNT_PATH)
}

fn default_spike_index_path() -> PathBuf {
    PathBuf::from(DEFAULT_SPIKE_INDEX_PATH)
}

impl SimulationConfig {
    /// Create a configuration with the specified network size and duration, and default values otherwise.
    pub fn new(num_neurons: usize, stop_time: f64) -> Self {
        SimulationConfig {
            num_neurons,
            stop_time,
            seed: None,
            external_current: 0.0,
            initial_potential: 0.0,
            spike_count_path: default_spike_count_path(),
            spike_index_path: default_spike_index_path(),
        }
    }

    /// Check the configuration.
    /// The function returns an error for an empty network, a non-positive stop time, or non-finite neuron parameters.
    pub fn validate(&self) -> Result<(), SNNError> {
        if self.num_neurons == 0 {
            return Err(SNNError::InvalidConfiguration(
                "The number of neurons must be positive".to_string(),
            ));
        }
        if !(self.stop_time.is_finite() && self.stop_time > 0.0) {
            return Err(SNNError::InvalidConfiguration(format!(
                "The stop time must be positive and finite, got {}",
                self.stop_time
            )));
        }
        if !(self.external_current.is_finite() && self.initial_potential.is_finite()) {
            return Err(SNNError::InvalidConfiguration(
                "The external current and the initial potential must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Create the neurons of the network.
    pub fn build_neurons(&self) -> Vec<Neuron> {
        (0..self.num_neurons)
            .map(|_| Neuron::new(self.stop_time, self.external_current, self.initial_potential))
            .collect()
    }

    /// Create the random source of the network.
    pub fn build_random_source(&self) -> RandomSource {
        match self.seed {
            Some(seed) => RandomSource::seed_from_u64(seed),
            None => RandomSource::from_entropy(),
        }
    }

    /// Create the network described by the configuration.
    /// The function returns an error for invalid configurations.
    pub fn build_network(&self) -> Result<Network, SNNError> {
        self.validate()?;
        Network::build(self.stop_time, self.build_neurons(), self.build_random_source())
    }

    /// Open the output streams described by the configuration.
    pub fn build_recorder(&self) -> FileRecorder {
        FileRecorder::open(&self.spike_count_path, &self.spike_index_path)
    }

    /// Save the configuration to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SNNError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a configuration from a JSON file, without checking its values.
    /// The function returns an error if the file cannot be read or parsed.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: SimulationConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    /// The function returns an error if the file cannot be read or the configuration is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let config = SimulationConfig::read_from(path)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate() {
        assert!(SimulationConfig::new(10, 100.0).validate().is_ok());
        assert!(matches!(
            SimulationConfig::new(0, 100.0).validate(),
            Err(SNNError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SimulationConfig::new(10, 0.0).validate(),
            Err(SNNError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SimulationConfig::new(10, f64::INFINITY).validate(),
            Err(SNNError::InvalidConfiguration(_))
        ));

        let mut config = SimulationConfig::new(10, 100.0);
        config.external_current = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(SNNError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"num_neurons": 12500, "stop_time": 500.0}"#).unwrap();
        assert_eq!(config, SimulationConfig::new(12500, 500.0));
        assert_eq!(config.spike_count_path, PathBuf::from("res/spikes2.txt"));
        assert_eq!(config.spike_index_path, PathBuf::from("res/spikes.gdf"));
    }

    #[test]
    fn test_build_neurons() {
        let mut config = SimulationConfig::new(3, 10.0);
        config.external_current = 1.01;
        config.initial_potential = 5.0;
        let neurons = config.build_neurons();
        assert_eq!(neurons.len(), 3);
        assert!(neurons.iter().all(|n| n.external_current() == 1.01
            && n.potential() == 5.0
            && n.stop_time() == 10.0));
    }

    #[test]
    fn test_build_network_with_seed() {
        let mut config = SimulationConfig::new(100, 10.0);
        config.seed = Some(42);
        let network_1 = config.build_network().unwrap();
        let network_2 = config.build_network().unwrap();
        assert_eq!(network_1.connectivity(), network_2.connectivity());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SimulationConfig::new(50, 20.0);
        config.seed = Some(7);
        config.save_to(&path).unwrap();
        assert_eq!(SimulationConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"num_neurons": 0, "stop_time": 20.0}"#).unwrap();
        assert!(matches!(
            SimulationConfig::load_from(&path),
            Err(SNNError::InvalidConfiguration(_))
        ));

        // Reading leaves the values to be checked later on
        let config = SimulationConfig::read_from(&path).unwrap();
        assert_eq!(config.num_neurons, 0);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            SimulationConfig::read_from(&path),
            Err(SNNError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SimulationConfig::load_from(&path),
            Err(SNNError::InvalidConfiguration(_))
        ));

        assert!(matches!(
            SimulationConfig::load_from(dir.path().join("missing.json")),
            Err(SNNError::IOError(_))
        ));
    }
}
