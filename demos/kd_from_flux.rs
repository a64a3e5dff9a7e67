use nereus::readers::{DataReader, FluxReader};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Flux.txt of a previous run
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: kd_from_flux <Advanced_outputs/Flux.txt>")?;

    let flux = FluxReader::default()
        .read_data(&path)?
        .ok_or_else(|| format!("{} not found", path.display()))?;

    let fit = flux.ocean_profile().attenuation(Some((0.0, 50.0)))?;

    println!("Kd (0-50 m): {:.4} m-1", fit.kd);
    println!("R2: {:.4}", fit.r_squared);
    println!("Euphotic depth: {:.1} m", fit.euphotic_depth);

    Ok(())
}
