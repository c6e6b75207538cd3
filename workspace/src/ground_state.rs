use clap::Parser;
use ndarray as nd;
use gpe1d::{ evolve::Evolution, system::System };
use lib::{ RunArgs, init_logging, load_params, prepare_outdir, write_npz };

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = RunArgs::parse();
    let params = load_params(args.config.as_deref())?;

    let sys = System::new(&params)?;
    let mut evol = Evolution::new(&sys, &params)?;
    let report = evol.run()?;
    println!("{}", report);

    let z: nd::Array1<f64> = sys.grid.z_ascending();
    let v: nd::Array1<f64> = sys.grid.to_ascending(&sys.ops.v)?;
    let rho: nd::Array1<f64> = sys.density_ascending(evol.state())?;
    let c_re: nd::Array1<f64> = evol.state().mapv(|ck| ck.re);
    let c_im: nd::Array1<f64> = evol.state().mapv(|ck| ck.im);
    let hist = evol.history();

    let outdir = prepare_outdir(&args.outdir)?;
    write_npz!(
        outdir.join("ground_state.npz"),
        arrays: {
            "z" => &z,
            "v" => &v,
            "rho" => &rho,
            "k" => &sys.grid.k,
            "c_re" => &c_re,
            "c_im" => &c_im,
            "t" => &hist.times(),
            "energies" => &hist.energies(),
            "norms" => &hist.norms(),
        }
    );
    Ok(())
}
