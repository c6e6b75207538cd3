use approx::assert_abs_diff_eq;
use gpe1d::{
    evolve::{ Evolution, Stage },
    grid::{ Direction, reorder },
    params::Params,
    system::System,
    utils::wf_norm,
};

#[test]
fn reference_ground_state() {
    let params = Params::default();
    let sys = System::new(&params).expect("system setup failed");
    let mut evol = Evolution::new(&sys, &params).expect("evolution setup failed");
    let report = evol.run().expect("evolution failed");

    assert_eq!(evol.stage(), Stage::Finished);
    assert_eq!(report.steps, 5000);
    assert_abs_diff_eq!(report.t, 25.0, epsilon = 1e-9);

    assert_abs_diff_eq!(report.initial.mean, 10.4736, epsilon = 1e-3);
    assert_abs_diff_eq!(report.initial.mu, 20.4471, epsilon = 1e-3);

    let e = report.last;
    assert_abs_diff_eq!(e.mean, 5.391, epsilon = 1e-2);
    assert_abs_diff_eq!(e.mu, 8.925, epsilon = 1e-2);
    assert_abs_diff_eq!(e.kinetic, 0.0495, epsilon = 2e-3);
    assert_abs_diff_eq!(e.potential, 1.808, epsilon = 1e-2);
    assert_abs_diff_eq!(e.interaction, 3.534, epsilon = 1e-2);
    assert!(report.change.abs() < 1e-8);

    // relaxation only ever lowers the energy
    let hist = evol.history();
    assert_eq!(hist.len(), 5001);
    let energies = hist.energies();
    let mean = energies.column(0);
    assert!(mean.iter().zip(mean.iter().skip(1)).all(|(a, b)| b <= &(a + 1e-10)));

    assert_abs_diff_eq!(wf_norm(evol.state()), 1.0, epsilon = 1e-12);
}

#[test]
fn ground_state_is_symmetric() {
    let params = Params { evolution_time: 10.0, nstep: 2000, ..Params::default() };
    let sys = System::new(&params).expect("system setup failed");
    let mut evol = Evolution::new(&sys, &params).expect("evolution setup failed");
    evol.run().expect("evolution failed");

    // the trap is even about z = 0, and so is the relaxed density; in
    // ascending order, z[j] and z[N - 2 - j] are mirror images
    let rho = sys.density(evol.state()).expect("density failed");
    let rho_asc = reorder(&rho, Direction::ToAscending).expect("reorder failed");
    let n = rho_asc.len();
    for j in 0..n - 1 {
        assert_abs_diff_eq!(rho_asc[j], rho_asc[n - 2 - j], epsilon = 1e-8);
    }
    // and peaked at the center
    let peak
        = rho_asc.iter().enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (j, r)| if *r > acc.1 { (j, *r) } else { acc })
        .0;
    assert_eq!(peak, n / 2 - 1);
}
