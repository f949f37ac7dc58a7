use clap::Parser;
use rtransect::config::PickerConfig;
use rtransect::im::F32Im;
use rtransect::{logging, viewer, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(clap::Parser, Debug)]
#[command(name = "rtransect", version, about = "Pick a transect over a raster", long_about = None)]
struct Arguments {
    /// Image to pick over. Without one a synthetic raster is used.
    image: Option<PathBuf>,

    /// JSON file with key bindings and display settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the synthetic raster
    #[arg(long, default_value_t = 50)]
    size: usize,
}

/// Smooth bumpy field so the transect has something to cross.
fn synthetic_raster(n: usize) -> F32Im {
    let k = std::f32::consts::TAU / n.max(1) as f32;
    F32Im::from_fn(n, n, |x, y| {
        let (fx, fy) = (x as f32 * k, y as f32 * k);
        0.5 + 0.25 * (2.0 * fx).sin() * (3.0 * fy).cos() + 0.25 * (fx + fy).sin()
    })
}

fn load_raster(args: &Arguments) -> Result<F32Im> {
    match &args.image {
        #[cfg(feature = "im-io")]
        Some(path) => Ok(F32Im::load_luma(path)?),
        #[cfg(not(feature = "im-io"))]
        Some(_) => Err(rtransect::TransectError::Viewer(
            "built without the `im-io` feature, cannot load images".to_owned(),
        )),
        None => Ok(synthetic_raster(args.size)),
    }
}

fn run(args: Arguments) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };
    let raster = load_raster(&args)?;

    match viewer::run(raster, cfg)? {
        Some(transect) => {
            for (x, y) in transect.iter() {
                println!("{x} {y}");
            }
        }
        None => eprintln!("no transect picked"),
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init_logging();

    match run(Arguments::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
