//! Shared plumbing for the driver binaries: command-line arguments, logging
//! setup, parameter loading, and `.npz` output.

use std::path::{ Path, PathBuf };
use anyhow::Context;
use clap::Parser;
use gpe1d::params::Params;

/// Common command-line arguments.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// TOML file of run parameters; omitted keys take their default values.
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Directory to write output to; created if it doesn't exist.
    #[clap(long, short, default_value = "output")]
    pub outdir: PathBuf,
}

/// Initialize `env_logger`, showing `info` and above unless overridden by
/// `RUST_LOG`.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

/// Read parameters from `config` if given, otherwise use the defaults.
pub fn load_params(config: Option<&Path>) -> anyhow::Result<Params> {
    let params
        = match config {
            Some(path) => {
                log::info!("reading parameters from {}", path.display());
                Params::from_file(path)?
            },
            None => {
                log::info!("no config given; using default parameters");
                Params::default()
            },
        };
    log::debug!("{:?}", params);
    Ok(params)
}

/// Create `outdir` (and parents) if needed, returning it.
pub fn prepare_outdir(outdir: &Path) -> anyhow::Result<&Path> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("couldn't create {}", outdir.display()))?;
    Ok(outdir)
}

/// Write a collection of real arrays to an `.npz` file.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "z" => &z,
///         "rho" => &rho,
///     }
/// );
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $path:expr,
        arrays: { $( $name:expr => $arr:expr ),* $(,)? } $(,)?
    ) => {
        {
            let path: std::path::PathBuf = $path;
            let file = std::fs::File::create(&path)
                .map_err(|e| anyhow::anyhow!(
                    "couldn't create {}: {}", path.display(), e))?;
            let mut npz = ndarray_npy::NpzWriter::new(file);
            $(
                npz.add_array($name, $arr)?;
            )*
            npz.finish()?;
            log::info!("wrote {}", path.display());
        }
    }
}
