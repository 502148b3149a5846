//! Sinks receiving the spikes and spike counts produced by a simulation.
//!
//! Two streams are produced:
//! - the spike-count stream, one `(time, count)` record per simulation step;
//! - the spike-index stream, one `(clock, neuron index)` record per spike, emitted as soon as the spike occurs.
//!
//! The [`FileRecorder`] writes them in the text formats consumed by the plotting scripts:
//! `"<time_ms> <count>"` lines after a `dt,spikes` header, and `"<clock>\t<neuron_index + 1>"` lines.
//! Times always carry [`TIME_PRECISION`] decimals (`0.0`, `100.0`) and the spike-index fields are
//! tab-separated; both streams are meant for whitespace-splitting readers.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SNNError;

/// The number of decimals of the times written to the spike-count stream.
pub const TIME_PRECISION: usize = 1;
/// The header line of the spike-count stream.
pub const SPIKE_COUNT_HEADER: &str = "dt,spikes";

/// A spike fired by a neuron of the network.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SpikeEvent {
    /// The step at which the spike is fired.
    pub clock: usize,
    /// The (0-based) index of the neuron firing the spike.
    pub neuron_id: usize,
}

/// The number of spikes fired by the whole network during one step.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct StepCount {
    /// The time of the step [ms].
    pub time: f64,
    /// The number of spikes fired during the step.
    pub num_spikes: u32,
}

/// A sink for the spikes produced by a network.
pub trait SpikeRecorder {
    /// Record a spike fired by a neuron at the specified step.
    fn record_spike(&mut self, clock: usize, neuron_id: usize);

    /// Record the number of spikes fired by the network during the step at the specified time [ms].
    fn record_step(&mut self, time: f64, num_spikes: u32);

    /// Flush any buffered record.
    fn flush(&mut self) {}
}

/// A recorder discarding everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl SpikeRecorder for NullRecorder {
    fn record_spike(&mut self, _clock: usize, _neuron_id: usize) {}

    fn record_step(&mut self, _time: f64, _num_spikes: u32) {}
}

/// A recorder keeping all records in memory.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct MemoryRecorder {
    spikes: Vec<SpikeEvent>,
    step_counts: Vec<StepCount>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        MemoryRecorder::default()
    }

    /// Returns the recorded spikes, in the order they were fired.
    pub fn spikes(&self) -> &[SpikeEvent] {
        &self.spikes[..]
    }

    /// Returns the recorded spike counts, one per step.
    pub fn step_counts(&self) -> &[StepCount] {
        &self.step_counts[..]
    }

    /// Returns the steps at which the specified neuron fired.
    pub fn spike_clocks(&self, neuron_id: usize) -> Vec<usize> {
        self.spikes
            .iter()
            .filter(|spike| spike.neuron_id == neuron_id)
            .map(|spike| spike.clock)
            .collect()
    }
}

impl SpikeRecorder for MemoryRecorder {
    fn record_spike(&mut self, clock: usize, neuron_id: usize) {
        self.spikes.push(SpikeEvent { clock, neuron_id });
    }

    fn record_step(&mut self, time: f64, num_spikes: u32) {
        self.step_counts.push(StepCount { time, num_spikes });
    }
}

/// A recorder writing the spike-count and spike-index streams to text files.
///
/// A stream whose file cannot be created is reported with a warning and then ignored, so that the
/// simulation can run without its outputs.
#[derive(Debug)]
pub struct FileRecorder {
    spike_counts: Option<BufWriter<File>>,
    spike_indices: Option<BufWriter<File>>,
}

impl FileRecorder {
    /// Open the spike-count and spike-index streams at the specified paths.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(spike_count_path: P, spike_index_path: Q) -> Self {
        let spike_counts = open_stream(spike_count_path.as_ref()).and_then(|mut writer| {
            match writeln!(writer, "{}", SPIKE_COUNT_HEADER) {
                Ok(()) => Some(writer),
                Err(e) => {
                    log::warn!("{}", SNNError::ResourceUnavailable(e.to_string()));
                    None
                }
            }
        });
        let spike_indices = open_stream(spike_index_path.as_ref());
        FileRecorder {
            spike_counts,
            spike_indices,
        }
    }

    /// Returns `true` if the spike-count stream is being written.
    pub fn has_spike_counts(&self) -> bool {
        self.spike_counts.is_some()
    }

    /// Returns `true` if the spike-index stream is being written.
    pub fn has_spike_indices(&self) -> bool {
        self.spike_indices.is_some()
    }
}

fn open_stream(path: &Path) -> Option<BufWriter<File>> {
    match File::create(path) {
        Ok(file) => Some(BufWriter::new(file)),
        Err(e) => {
            log::warn!(
                "{}",
                SNNError::ResourceUnavailable(format!("cannot open {}: {}", path.display(), e))
            );
            None
        }
    }
}

/// Write a line to a stream, dropping the stream on failure.
fn write_line(stream: &mut Option<BufWriter<File>>, line: std::fmt::Arguments) {
    let result = match stream.as_mut() {
        Some(writer) => writeln!(writer, "{}", line),
        None => return,
    };
    if let Err(e) = result {
        log::warn!("{}", SNNError::ResourceUnavailable(e.to_string()));
        *stream = None;
    }
}

impl SpikeRecorder for FileRecorder {
    fn record_spike(&mut self, clock: usize, neuron_id: usize) {
        write_line(
            &mut self.spike_indices,
            format_args!("{}\t{}", clock, neuron_id + 1),
        );
    }

    fn record_step(&mut self, time: f64, num_spikes: u32) {
        write_line(
            &mut self.spike_counts,
            format_args!("{:.*} {}", TIME_PRECISION, time, num_spikes),
        );
    }

    fn flush(&mut self) {
        for stream in [&mut self.spike_counts, &mut self.spike_indices] {
            if let Some(writer) = stream {
                if let Err(e) = writer.flush() {
                    log::warn!("{}", SNNError::ResourceUnavailable(e.to_string()));
                }
            }
        }
    }
}

impl Drop for FileRecorder {
    fn drop(&mut self) {
        self.flush();
    }
}
