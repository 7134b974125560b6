// std
use std::path::PathBuf;
use std::process;
// others
use clap::Parser;
// manysuns
use manysuns::core::api::{generate_many_suns, ManySunsRun};
use manysuns::core::error::Result;
use manysuns::core::manysuns::MAX_SQUARE_SIDE;
use manysuns::core::options::PipelineOptions;
use manysuns::core::renderer::{Renderer, RendererKind};
use manysuns::renderers::native::NativeRenderer;
use manysuns::renderers::radiance::RadianceRenderer;
use manysuns::VERSION;

/// Generates a RADIANCE sun description of many small suns, based on a
/// RADIANCE sun description of one sun. An image of the sun is
/// simulated and every pixel showing the sun becomes a mini sun. The
/// radiance of the mini suns is adapted to deliver the irradiance of
/// the original sun. A solar angular opening of 0.533 degrees is
/// assumed.
#[derive(Parser, Debug)]
#[command(name = "manysuns", version)]
struct Args {
    /// A path to a folder with the template files
    #[arg(long = "folderpath", visible_alias = "FP")]
    folderpath: PathBuf,
    /// A path to a RADIANCE sun description file
    #[arg(long = "filepath", visible_alias = "SP")]
    filepath: PathBuf,
    /// Side (in pixels) of the square the suns are based on; 32 pixels
    /// result in 632 suns with the default view
    #[arg(
        long = "square-side",
        visible_alias = "ss",
        value_parser = clap::value_parser!(u32).range(1..=MAX_SQUARE_SIDE as i64)
    )]
    square_side: u32,
    /// Renderer backend (native or radiance)
    #[arg(long, default_value = "radiance")]
    renderer: RendererKind,
    /// Placeholder radiance used in the many suns template
    #[arg(long, default_value = "1E4")]
    placeholder: String,
    /// Log every artifact written
    #[arg(short, long)]
    verbose: bool,
}

fn run<R: Renderer>(renderer: &R, options: &PipelineOptions) -> Result<ManySunsRun> {
    generate_many_suns(renderer, options)
}

fn main() {
    let args = Args::parse();
    let filter: &str = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    log::info!("manysuns version {}", VERSION);
    let folder: PathBuf = args.folderpath.canonicalize().unwrap_or(args.folderpath.clone());
    let filepath: PathBuf = args.filepath.canonicalize().unwrap_or(args.filepath.clone());
    let mut options = PipelineOptions::new(&folder, &filepath, args.square_side);
    options.placeholder_token = args.placeholder.clone();
    let result = match args.renderer {
        RendererKind::Native => run(&NativeRenderer::new(), &options),
        RendererKind::Radiance => run(&RadianceRenderer::new(&folder), &options),
    };
    match result {
        Ok(done) => {
            log::info!(
                "{} mini suns at altitude {} and azimuth {}, radiance {} each",
                done.count,
                done.position.altitude,
                done.position.azimuth,
                done.scale
            );
            println!("{}", done.output.display());
        }
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
