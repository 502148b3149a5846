use clap::Parser;
use std::path::{Path, PathBuf};

use brunel_snn::config::SimulationConfig;
use brunel_snn::error::SNNError;

#[derive(Parser, Debug)]
#[command(about = "Simulate Brunel's balanced network of leaky integrate-and-fire neurons")]
struct Args {
    /// The number of neurons
    #[arg(short = 'N', long)]
    neurons: Option<usize>,
    /// The simulated duration [ms]
    #[arg(short = 'T', long)]
    stop_time: Option<f64>,
    /// A JSON configuration file; the other options override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// The seed of the random source
    #[arg(long)]
    seed: Option<u64>,
    /// The external current injected into every neuron
    #[arg(long)]
    external_current: Option<f64>,
    /// Where to write the number of spikes per step
    #[arg(long)]
    spike_counts: Option<PathBuf>,
    /// Where to write the spikes of every neuron
    #[arg(long)]
    spike_index: Option<PathBuf>,
    /// Print the connectivity and the run statistics as JSON
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig, SNNError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::read_from(path)?,
            None => match (self.neurons, self.stop_time) {
                (Some(num_neurons), Some(stop_time)) => SimulationConfig::new(num_neurons, stop_time),
                _ => {
                    return Err(SNNError::InvalidConfiguration(
                        "Either a configuration file or both the number of neurons and the stop time are required".to_string(),
                    ))
                }
            },
        };

        if let Some(num_neurons) = self.neurons {
            config.num_neurons = num_neurons;
        }
        if let Some(stop_time) = self.stop_time {
            config.stop_time = stop_time;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(external_current) = self.external_current {
            config.external_current = external_current;
        }
        if let Some(path) = self.spike_counts {
            config.spike_count_path = path;
        }
        if let Some(path) = self.spike_index {
            config.spike_index_path = path;
        }

        config.validate()?;
        Ok(config)
    }
}

fn create_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::warn!("Cannot create directory {}: {}", parent.display(), e);
        }
    }
}

fn main() -> Result<(), SNNError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let print_summary = args.summary;
    let config = args.into_config()?;
    log::info!("{:?}", config);

    let mut network = config.build_network()?;
    log::info!("Network construction: done!");

    create_parent_dir(&config.spike_count_path);
    create_parent_dir(&config.spike_index_path);
    let mut recorder = config.build_recorder();

    network.run_with(&mut recorder);
    drop(recorder);
    log::info!(
        "Results written to {} and {}",
        config.spike_count_path.display(),
        config.spike_index_path.display()
    );

    if print_summary {
        let summary = serde_json::json!({
            "connectivity": network.connectivity_summary(),
            "total_spikes": network.total_spikes(),
            "mean_firing_rate": network.mean_firing_rate(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
