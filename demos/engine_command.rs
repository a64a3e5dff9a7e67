use nereus::engine::{ParameterBuilder, WorkDirs, build_command, display_command};
use nereus::scenario::ScenarioParameters;
use std::path::Path;

fn main() {
    let scenario = ScenarioParameters::default()
        .with_wavelength(443.0)
        .with_chlorophyll(1.0);

    let builder = ParameterBuilder::new(WorkDirs::new("/tmp/osoaa_demo"));
    match builder.build(&scenario) {
        Ok(config) => {
            let cmd = build_command(Path::new("/opt/OSOAA/exe/OSOAA_MAIN.exe"), &config);
            println!("{}", display_command(&cmd));
        }
        Err(e) => eprintln!("{}", e),
    }
}
