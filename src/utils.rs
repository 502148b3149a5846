//! Conversions between simulated time and simulation steps.
use crate::{DELAY, REFRACTORY_PERIOD, STEP_SIZE, TAU};

/// Convert a duration [ms] into a number of simulation steps.
/// The conversion truncates: a duration that is not a whole number of steps is rounded down,
/// e.g., 0.25 ms is 2 steps. Negative or NaN durations give 0 steps.
pub fn steps_from_time(time: f64) -> usize {
    (time / STEP_SIZE).floor() as usize
}

/// Convert a number of simulation steps into a duration [ms].
pub fn time_from_steps(steps: usize) -> f64 {
    steps as f64 * STEP_SIZE
}

/// Returns the synaptic delay expressed in steps.
pub fn delay_steps() -> usize {
    steps_from_time(DELAY)
}

/// Returns the refractory period expressed in steps.
pub fn refractory_steps() -> u32 {
    steps_from_time(REFRACTORY_PERIOD) as u32
}

/// Returns the length of the delay ring buffers, i.e., one slot per step of delay plus the slot being read.
pub fn buffer_len() -> usize {
    delay_steps() + 1
}

/// Returns the factor by which the membrane potential decays over one step.
pub fn decay() -> f64 {
    (-STEP_SIZE / TAU).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_from_time() {
        assert_eq!(steps_from_time(1.0), 10);
        assert_eq!(steps_from_time(0.25), 2);
        assert_eq!(steps_from_time(0.0), 0);
        assert_eq!(steps_from_time(-1.0), 0);
        assert_eq!(steps_from_time(92.4 + 1.5), 939);
    }

    #[test]
    fn test_derived_steps() {
        assert_eq!(delay_steps(), 15);
        assert_eq!(refractory_steps(), 20);
        assert_eq!(buffer_len(), 16);
    }

    #[test]
    fn test_decay() {
        assert!(decay() < 1.0);
        assert!(decay() > 0.99);
        assert_eq!(decay(), (-0.1_f64 / 20.0).exp());
    }
}
