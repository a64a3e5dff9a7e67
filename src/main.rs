use clap::Parser;
use log::{Level, debug, info, log_enabled};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use nereus::{Config, SimulationResults};

/// Runs one OSOAA simulation and summarizes its flux and radiance outputs.
#[derive(Parser)]
#[command(name = "nereus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run configuration (JSON).
    config: PathBuf,

    /// Write a JSON run report to this file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::from_file(&cli.config)?;
    let ctx = config.run_context()?;

    let mut builder = ctx.builder();
    if let Some(name) = config.vza_file() {
        builder = builder.with_vza_file(name);
    }

    info!("Simulating {}", config.scenario());
    let engine_config = builder.build(config.scenario())?;
    let results = ctx.run(engine_config)?;

    if log_enabled!(Level::Debug) {
        for path in ctx.standard_outputs()? {
            debug!("Angular output {}", path.display());
        }
        for path in ctx.result_files() {
            debug!("  {}", path.display());
        }
    }

    print_summary(&results, config.depth_range());

    if let Some(path) = &cli.report {
        let report = results.report(config.depth_range());
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn print_summary(results: &SimulationResults, depth_range: Option<(f64, f64)>) {
    println!(
        "Run started {} - {:.1} s",
        results.started.format("%Y-%m-%d %H:%M:%S UTC"),
        results.duration.as_secs_f64()
    );

    match &results.flux {
        Some(flux) => {
            let ocean = flux.ocean_profile();
            println!(
                "Flux profile: {} levels, {} below the surface, max depth {:.1} m",
                flux.len(),
                ocean.len(),
                flux.max_depth().unwrap_or(0.0)
            );

            match ocean.attenuation(depth_range) {
                Ok(fit) => {
                    println!("  Kd: {:.4} m-1", fit.kd);
                    println!("  Ed0: {:.4}", fit.ed0);
                    println!("  R2: {:.4}", fit.r_squared);
                    println!("  Euphotic depth: {:.1} m", fit.euphotic_depth);
                }
                Err(e) => println!("  Kd fit failed: {}", e),
            }
        }
        None => println!("Flux profile: not produced"),
    }

    match &results.vza {
        Some(vza) => {
            println!("Radiance vs VZA: {} directions", vza.len());
            if let Some((lo, hi)) = vza.vza_range() {
                println!("  VZA range: {:.1} to {:.1} deg", lo, hi);
            }
            if let Some(nadir) = vza.nadir() {
                println!(
                    "  Nadir: reflectance {:.5}, DoLP {:.2} %",
                    nadir.reflectance, nadir.dolp
                );
            }
        }
        None => println!("Radiance vs VZA: not produced"),
    }
}
