use approx::assert_relative_eq;
use lif_core::{
    run, simulate, Integrator, NeuronConstants, SimulationConfig, SimulationError,
    SimulationResult,
};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = SimulationConfig> {
    (1usize..5, 0.01f64..1.0, -100.0f64..100.0, 0.0f64..20.0).prop_flat_map(
        |(units, dt, t_min, span)| {
            prop::collection::vec(-5.0f64..5.0, units).prop_map(move |currents| {
                SimulationConfig::new(units, dt, t_min, t_min + span, currents)
            })
        },
    )
}

/// Replays the recorded trace against one Euler step from the previous
/// post-reset potential.
fn check_recurrence(cfg: &SimulationConfig, c: &NeuronConstants, r: &SimulationResult) {
    for unit in 0..cfg.unit_count {
        let spikes = &r.spike_times()[unit];
        let trace = r.unit_trace(unit);
        let mut v = c.e_l;
        for s in 0..r.step_count() {
            let next = v + c.derivative(v, cfg.input_current[unit]) * cfg.dt;
            if spikes.contains(&s) {
                assert!(next > c.v_th, "unit {} spiked at {} below threshold", unit, s);
                assert_eq!(trace[s], c.v_peak);
                v = c.v_reset;
            } else {
                assert!(next <= c.v_th, "unit {} missed a spike at {}", unit, s);
                assert_eq!(trace[s], next);
                v = next;
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shapes_follow_the_time_grid(
        units in 1usize..5,
        steps in 0usize..2000,
        dt_exp in 1i32..6,
        t_min in -100i32..100,
    ) {
        // Dyadic dt with an integer start keeps `steps * dt` exact
        let dt = 2f64.powi(-dt_exp);
        let t_min = t_min as f64;
        let cfg = SimulationConfig::uniform(units, dt, t_min, t_min + steps as f64 * dt, 1.0);
        let r = Integrator::default().run(&cfg).unwrap();
        let expected = steps + 1;
        prop_assert_eq!(r.step_count(), expected);
        prop_assert_eq!(r.potential_trace().dim(), (cfg.unit_count, expected));
        prop_assert_eq!(r.spike_times().len(), cfg.unit_count);
    }

    #[test]
    fn trace_obeys_euler_and_reset(cfg in config_strategy()) {
        let c = NeuronConstants::default();
        let r = run(&cfg, &c).unwrap();
        check_recurrence(&cfg, &c, &r);
    }

    #[test]
    fn spike_times_are_strictly_increasing(cfg in config_strategy()) {
        let r = Integrator::default().run(&cfg).unwrap();
        for steps in r.spike_times() {
            prop_assert!(steps.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn repeated_runs_are_bit_identical(cfg in config_strategy()) {
        let integrator = Integrator::default();
        let a = integrator.run(&cfg).unwrap();
        let b = integrator.run(&cfg).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn boundary_configurations_fail() {
    let cases = [
        SimulationConfig::uniform(1, 1e-300, 0.0, 1.0, 1.0),
        SimulationConfig::uniform(0, 0.1, 0.0, 10.0, 1.0),
        SimulationConfig::uniform(1, 0.0, 0.0, 10.0, 1.0),
        SimulationConfig::uniform(1, -1.0, 0.0, 10.0, 1.0),
        SimulationConfig::uniform(1, 0.1, 10.0, 0.0, 1.0),
        SimulationConfig::new(3, 0.1, 0.0, 10.0, vec![1.0, 1.0]),
    ];
    for cfg in cases.iter() {
        match Integrator::default().run(cfg) {
            Err(SimulationError::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration for {:?}, got {:?}", cfg, other),
        }
    }
}

#[test]
fn equal_bounds_produce_a_single_point() {
    let (t, v) = simulate(2, 0.1, 3.0, 3.0, &[1.0, 0.0]).unwrap();
    assert_eq!(t.to_vec(), vec![3.0]);
    assert_eq!(v.dim(), (2, 1));
}

#[test]
fn unit_current_drives_periodic_spiking() {
    let cfg = SimulationConfig::default();
    let c = NeuronConstants::default();
    let r = run(&cfg, &c).unwrap();

    assert_eq!(r.step_count(), 10_001);
    assert_relative_eq!(r.time_axis()[10_000], 1000.0, epsilon = 1e-9);

    let spikes = &r.spike_times()[0];
    assert!(spikes.len() > 1, "expected repeated spiking, got {:?}", spikes);
    for &s in spikes {
        assert_eq!(r.potential_trace()[[0, s]], 0.0);
    }

    // Monotone rise from rest up to the first threshold crossing
    let first = spikes[0];
    let trace = r.unit_trace(0);
    assert!((1..first).all(|s| trace[s] > trace[s - 1]));

    // Constant drive gives a constant inter-spike interval
    let isi: Vec<usize> = spikes.windows(2).map(|w| w[1] - w[0]).collect();
    assert!(isi.windows(2).all(|w| w[0] == w[1]), "irregular intervals {:?}", isi);

    check_recurrence(&cfg, &c, &r);
}

#[test]
fn zero_current_stays_at_rest() {
    let cfg = SimulationConfig::uniform(1, 0.1, 0.0, 1000.0, 0.0);
    let r = Integrator::default().run(&cfg).unwrap();
    assert!(r.spike_times()[0].is_empty());
    assert!(r.unit_trace(0).iter().all(|&v| v == -70.0));
}

#[test]
fn units_do_not_interact() {
    let batch = SimulationConfig::new(3, 0.1, 0.0, 200.0, vec![1.0, 0.0, 2.5]);
    let together = Integrator::default().run(&batch).unwrap();
    for (unit, &current) in batch.input_current.iter().enumerate() {
        let alone = SimulationConfig::uniform(1, 0.1, 0.0, 200.0, current);
        let single = Integrator::default().run(&alone).unwrap();
        assert_eq!(together.unit_trace(unit), single.unit_trace(0));
        assert_eq!(together.spike_times()[unit], single.spike_times()[0]);
    }
}
