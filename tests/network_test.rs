use brunel_snn::network::Network;
use brunel_snn::neuron::Neuron;
use brunel_snn::random::RandomSource;
use brunel_snn::recorder::MemoryRecorder;
use brunel_snn::{AMPLITUDE, DELAY, RELATIVE_INHIBITORY_STRENGTH};

// A neuron driven by a current of 1.01 first fires at 92.4 ms.
const FIRST_SPIKE_TIME: f64 = 92.4;
const FIRST_SPIKE_STEP: usize = 924;

fn two_neurons(source_is_inhibitory: bool) -> Network {
    let mut source = Neuron::new(1.0, 1.01, 0.0);
    source.set_inhibitory(source_is_inhibitory);
    let target = Neuron::new(1.0, 0.0, 0.0);
    Network::build(
        FIRST_SPIKE_TIME + DELAY,
        vec![source, target],
        RandomSource::seed_from_u64(42),
    )
    .unwrap()
}

/// Run the network until just before the spike reaches the target, then let the target integrate it.
fn target_potential_after_delay(source_is_inhibitory: bool) -> f64 {
    let mut network = two_neurons(source_is_inhibitory);
    let mut recorder = MemoryRecorder::new();
    network.run_with(&mut recorder);

    assert_eq!(network.clock(), FIRST_SPIKE_STEP + 15);
    assert_eq!(recorder.spike_clocks(0), vec![FIRST_SPIKE_STEP]);
    assert_eq!(network.neuron_ref(0).unwrap().spike_count(), 1);
    assert_eq!(network.neuron_ref(1).unwrap().potential(), 0.0);

    let read_index = network.read_index();
    let target = network.neuron_mut(1).unwrap();
    target.update(read_index);
    assert_eq!(target.spike_count(), 0);
    target.potential()
}

#[test]
fn test_excitatory_spike_arrival() {
    assert_eq!(target_potential_after_delay(false), AMPLITUDE);
}

#[test]
fn test_inhibitory_spike_arrival() {
    assert_eq!(
        target_potential_after_delay(true),
        -RELATIVE_INHIBITORY_STRENGTH * AMPLITUDE
    );
}

#[test]
fn test_spike_is_applied_exactly_once() {
    let mut network = two_neurons(false);
    let mut recorder = MemoryRecorder::new();
    let mut target_potentials = vec![];
    for _ in 0..FIRST_SPIKE_STEP + 40 {
        network.step(&mut recorder);
        target_potentials.push(network.neuron_ref(1).unwrap().potential());
    }

    let arrival = FIRST_SPIKE_STEP + 15;
    assert!(target_potentials[..arrival].iter().all(|&v| v == 0.0));
    assert_eq!(target_potentials[arrival], AMPLITUDE);

    // Afterwards the potential only decays, no second copy of the spike arrives
    for window in target_potentials[arrival..].windows(2) {
        assert!(window[1] < window[0]);
        assert!(window[1] > 0.0);
    }
}

#[test]
fn test_spike_records() {
    let mut network = two_neurons(false);
    let mut recorder = MemoryRecorder::new();
    network.run_with(&mut recorder);

    let step_counts = recorder.step_counts();
    assert_eq!(step_counts.len(), FIRST_SPIKE_STEP + 15);
    assert_eq!(step_counts[FIRST_SPIKE_STEP].num_spikes, 1);
    assert_eq!(
        step_counts.iter().map(|c| c.num_spikes).sum::<u32>(),
        1
    );
    assert_eq!(network.total_spikes(), 1);
}

#[test]
fn test_network_neuron_types() {
    let neurons = (0..100).map(|_| Neuron::new(1.0, 0.0, 0.0)).collect();
    let network = Network::build(1.0, neurons, RandomSource::seed_from_u64(42)).unwrap();

    let num_inhibitory = network
        .neurons()
        .iter()
        .filter(|neuron| neuron.is_inhibitory())
        .count();
    assert_eq!(num_inhibitory, 20);
    assert_eq!(network.num_neurons() - num_inhibitory, 80);
}

#[test]
fn test_network_connections() {
    let neurons = (0..1000).map(|_| Neuron::new(1.0, 0.0, 0.0)).collect();
    let network = Network::build(1.0, neurons, RandomSource::seed_from_u64(42)).unwrap();

    assert_eq!(network.num_inhibitory_connections(), 20);
    assert_eq!(network.num_excitatory_connections(), 80);

    // Every neuron receives exactly the announced number of inputs of each type
    let num_inhibitory = network.num_inhibitory_neurons();
    let mut inputs = vec![(0, 0); network.num_neurons()];
    for source_id in 0..network.num_neurons() {
        for &target_id in network.connectivity().targets(source_id) {
            if source_id < num_inhibitory {
                inputs[target_id].0 += 1;
            } else {
                inputs[target_id].1 += 1;
            }
        }
    }
    assert!(inputs.iter().all(|&counts| counts == (20, 80)));
}
