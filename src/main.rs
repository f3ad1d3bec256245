use std::fs;
use std::process::ExitCode;

use log::{info, LevelFilter};

use stokesmap::cli::{self, Options, USAGE};
use stokesmap::scene::build_scene;
use stokesmap::trajectory::parse::parse_trajectories;
use stokesmap::{metapost, Result};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stokesmap: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let options = cli::parse(args)?;
    if options.help {
        print!("{USAGE}");
        return Ok(());
    }
    init_logging(&options);

    // With no input file only the sphere, equators and axes are drawn.
    let trajectories = match &options.input {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            parse_trajectories(&text)?
        }
        None => Vec::new(),
    };
    info!("scanned {} trajectories", trajectories.len());

    let scene = build_scene(&trajectories, &options.arrows, &options.view, &options.style)?;

    // The document is rendered fully in memory so a failure never leaves
    // a truncated file behind.
    let mut document = Vec::new();
    metapost::write_document(
        &mut document,
        &scene,
        &options.view,
        &options.style,
        options.aux_source.as_deref(),
    )?;
    let output = options.output_path();
    fs::write(&output, document)?;
    info!("wrote {}", output.display());
    Ok(())
}

fn init_logging(options: &Options) {
    let default_level = if options.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG still overrides the --verbose default.
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}
