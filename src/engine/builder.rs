use std::path::{Path, PathBuf};

use super::defaults::ScienceDefaults;
use super::error::EngineError;
use super::params::{EngineConfiguration, RES_ROOT, VZA_FILE, WAVELENGTH};
use crate::scenario::ScenarioParameters;

/// Engine-mandated cache directories under a working directory.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkDirs {
    pub root: PathBuf,
    pub mie_aer: PathBuf,
    pub mie_hyd: PathBuf,
    pub surf: PathBuf,
}

impl WorkDirs {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            mie_aer: root.join("MIE_AER"),
            mie_hyd: root.join("MIE_HYD"),
            surf: root.join("SURF"),
            root,
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.mie_aer, &self.mie_hyd, &self.surf]
    }

    /// Creates the three cache directories (and the root) if needed.
    pub fn create(&self) -> std::io::Result<()> {
        for dir in self.all() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Turns a [`ScenarioParameters`] into a complete [`EngineConfiguration`].
///
/// Only reads the working-directory paths; never touches the filesystem.
#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    dirs: WorkDirs,
    defaults: ScienceDefaults,
}

impl ParameterBuilder {
    pub fn new(dirs: WorkDirs) -> Self {
        Self {
            dirs,
            defaults: ScienceDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: ScienceDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Output file name of the radiance-vs-VZA table for the following builds.
    pub fn with_vza_file(mut self, file_name: &str) -> Self {
        self.defaults.vza_file = file_name.to_string();
        self
    }

    pub fn defaults(&self) -> &ScienceDefaults {
        &self.defaults
    }

    pub fn dirs(&self) -> &WorkDirs {
        &self.dirs
    }

    pub fn build(&self, scenario: &ScenarioParameters) -> Result<EngineConfiguration, EngineError> {
        scenario.validate()?;

        let d = &self.defaults;
        let wavelength_um = scenario.wavelength_um();
        let mut config = EngineConfiguration::new();

        config.set(RES_ROOT, self.dirs.root.as_path());
        config.set(WAVELENGTH, wavelength_um);
        config.set("ANG.Thetas", scenario.solar_zenith);

        config.set("OSOAA.View.Phi", d.view.relative_azimuth);
        config.set("OSOAA.View.Level", d.view.level);
        config.set("OSOAA.View.Z", d.view.depth);

        config.set("AP.Pressure", d.atmosphere.pressure);
        config.set("AP.HR", d.atmosphere.rayleigh_scale_height);
        config.set("AP.HA", d.atmosphere.aerosol_scale_height);

        // Aerosols: the reference wavelength is the simulation wavelength
        config.set("AER.DirMie", self.dirs.mie_aer.as_path());
        config.set("AER.Waref", wavelength_um);
        config.set("AER.AOTref", scenario.aot);
        config.set("AER.Model", d.aerosol.model);
        config.set("AER.MMD.MRwa", d.aerosol.real_index);
        config.set("AER.MMD.MIwa", d.aerosol.imaginary_index);
        config.set("AER.MMD.SDtype", d.aerosol.size_distribution);
        config.set("AER.MMD.LNDradius", d.aerosol.modal_radius);
        config.set("AER.MMD.LNDvar", d.aerosol.log_variance);

        // The sea depth sets the range of the flux profile
        config.set("SEA.Depth", scenario.sea_depth);

        config.set("HYD.DirMie", self.dirs.mie_hyd.as_path());
        config.set("HYD.Model", d.hydrosol.model);
        config.set("PHYTO.Chl", scenario.chlorophyll);
        config.set("PHYTO.ProfilType", d.hydrosol.profile_type);
        config.set("PHYTO.JD.slope", d.hydrosol.junge_slope);
        config.set("PHYTO.JD.rmin", d.hydrosol.r_min);
        config.set("PHYTO.JD.rmax", d.hydrosol.r_max);
        config.set("PHYTO.JD.MRwa", d.hydrosol.real_index);
        config.set("PHYTO.JD.MIwa", d.hydrosol.imaginary_index);
        config.set("PHYTO.JD.rate", d.hydrosol.mode_rate);

        config.set("SED.Csed", d.dissolved.sediment_concentration);
        config.set("YS.Abs440", d.dissolved.yellow_substance_abs440);
        config.set("DET.Abs440", d.dissolved.detritus_abs440);

        config.set("SEA.Dir", self.dirs.surf.as_path());
        config.set("SEA.Ind", d.sea.refractive_index);
        config.set("SEA.Wind", scenario.wind_speed);
        config.set("SEA.SurfAlb", d.sea.surface_albedo);
        config.set("SEA.BotType", d.sea.bottom_type);
        config.set("SEA.BotAlb", d.sea.bottom_albedo);

        config.set(VZA_FILE, d.vza_file.as_str());

        ensure_complete(&config)?;

        Ok(config)
    }
}

/// Rejects configurations that lack any required engine key.
pub fn ensure_complete(config: &EngineConfiguration) -> Result<(), EngineError> {
    let missing = config.missing_keys();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Incomplete(missing))
    }
}
