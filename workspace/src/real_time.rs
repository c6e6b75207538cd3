use std::f64::consts::PI;
use clap::Parser;
use ndarray as nd;
use num_complex::Complex64 as C64;
use gpe1d::{
    evolve::Evolution,
    system::System,
    utils::renormalize,
};
use lib::{ RunArgs, init_logging, load_params, prepare_outdir, write_npz };

#[derive(Debug, Parser)]
struct Args {
    #[clap(flatten)]
    run: RunArgs,

    /// Displacement applied to the ground state before real-time evolution.
    #[clap(long, default_value_t = 1.0)]
    shift: f64,

    /// Duration of the real-time evolution, in trap periods.
    #[clap(long, default_value_t = 2.0)]
    periods: f64,

    /// Number of real-time steps.
    #[clap(long, default_value_t = 4000)]
    nstep: usize,
}

// expectation value of z over the ascending grid
fn center_of_mass(z: &nd::Array1<f64>, rho: &nd::Array1<f64>) -> f64 {
    (z * rho).sum() / rho.sum()
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let params = load_params(args.run.config.as_deref())?;
    let sys = System::new(&params)?;

    // relax to the ground state first
    let mut relax = Evolution::new(&sys, &params)?;
    let report = relax.run()?;
    println!("ground state:\n{}", report);

    let c_shifted: nd::Array1<C64>
        = renormalize(&sys.translate(relax.state(), args.shift)?)?;

    let duration = args.periods * 2.0 * PI / params.whoz;
    let dt = duration / args.nstep as f64;
    let mut evol = Evolution::with_state(
        &sys, &c_shifted, 0.0, dt, args.nstep, params.integrator)?;

    let z: nd::Array1<f64> = sys.grid.z_ascending();
    let mut zbar: Vec<f64>
        = vec![center_of_mass(&z, &sys.density_ascending(evol.state())?)];
    while evol.step()?.is_some() {
        zbar.push(center_of_mass(&z, &sys.density_ascending(evol.state())?));
    }
    let report = evol.report();
    println!("real time:\n{}", report);

    let hist = evol.history();
    let norm_drift: nd::Array1<f64> = hist.norms().mapv(|n| n - 1.0);
    log::info!(
        "max norm drift: {:.3e}",
        norm_drift.iter().fold(0.0_f64, |acc, d| acc.max(d.abs())),
    );
    let zbar: nd::Array1<f64> = zbar.into_iter().collect();
    let rho: nd::Array1<f64> = sys.density_ascending(evol.state())?;

    let outdir = prepare_outdir(&args.run.outdir)?;
    write_npz!(
        outdir.join("real_time.npz"),
        arrays: {
            "z" => &z,
            "rho" => &rho,
            "t" => &hist.times(),
            "zbar" => &zbar,
            "norm_drift" => &norm_drift,
            "energies" => &hist.energies(),
        }
    );
    Ok(())
}
