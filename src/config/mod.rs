use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::{DEFAULT_TIMEOUT, EngineError, RunContext};
use crate::readers::{HeaderLabels, HeaderPattern};
use crate::scenario::ScenarioParameters;

pub mod error;
pub use error::ConfigError;

/// Header labels overriding the built-in ones, per table.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Headers {
    pub flux: Option<HeaderLabels>,
    pub vza: Option<HeaderLabels>,
}

/// One simulation run, as described by a JSON file.
#[derive(Debug, Clone)]
pub struct Config {
    osoaa_root: PathBuf,
    work_dir: Option<PathBuf>,
    timeout: Duration,
    scenario: ScenarioParameters,
    vza_file: Option<String>,
    depth_range: Option<(f64, f64)>,
    headers: Headers,
}

// Deserializes a Config, checking the scenario ranges, the timeout and the
// order of the depth window.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            osoaa_root: PathBuf,
            work_dir: Option<PathBuf>,
            timeout_secs: Option<u64>,
            #[serde(default)]
            scenario: ScenarioParameters,
            vza_file: Option<String>,
            depth_range: Option<(f64, f64)>,
            #[serde(default)]
            headers: Headers,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        helper
            .scenario
            .validate()
            .map_err(|e| D::Error::custom(ConfigError::Scenario(e)))?;

        let timeout = match helper.timeout_secs {
            Some(0) => return Err(D::Error::custom(ConfigError::Timeout)),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        if let Some((lo, hi)) = helper.depth_range
            && lo > hi
        {
            return Err(D::Error::custom(ConfigError::DepthRange(lo, hi)));
        }

        Ok(Config {
            osoaa_root: helper.osoaa_root,
            work_dir: helper.work_dir,
            timeout,
            scenario: helper.scenario,
            vza_file: helper.vza_file,
            depth_range: helper.depth_range,
            headers: helper.headers,
        })
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(osoaa_root: P, scenario: ScenarioParameters) -> Self {
        Self {
            osoaa_root: osoaa_root.as_ref().to_path_buf(),
            work_dir: None,
            timeout: DEFAULT_TIMEOUT,
            scenario,
            vza_file: None,
            depth_range: None,
            headers: Headers::default(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn osoaa_root(&self) -> &Path {
        &self.osoaa_root
    }

    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn scenario(&self) -> &ScenarioParameters {
        &self.scenario
    }

    pub fn vza_file(&self) -> Option<&str> {
        self.vza_file.as_deref()
    }

    pub fn depth_range(&self) -> Option<(f64, f64)> {
        self.depth_range
    }

    pub fn flux_pattern(&self) -> HeaderPattern {
        match &self.headers.flux {
            Some(labels) => HeaderPattern::flux().with_labels(labels),
            None => HeaderPattern::flux(),
        }
    }

    pub fn vza_pattern(&self) -> HeaderPattern {
        match &self.headers.vza {
            Some(labels) => HeaderPattern::vza().with_labels(labels),
            None => HeaderPattern::vza(),
        }
    }

    /// Run context with this config's directories, timeout and headers.
    pub fn run_context(&self) -> Result<RunContext, EngineError> {
        Ok(RunContext::new(&self.osoaa_root, self.work_dir.clone())?
            .with_timeout(self.timeout)
            .with_headers(self.flux_pattern(), self.vza_pattern()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(dir: &Path, data: &str) -> PathBuf {
        let file_path = dir.join("config.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(data.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let config_data = r#"
    {
        "osoaa_root": "/opt/OSOAA",
        "work_dir": "runs/clear",
        "timeout_secs": 120,
        "scenario": {
            "wavelength_nm": 443.0,
            "chlorophyll": 3.0
        },
        "vza_file": "LUM_443.txt",
        "depth_range": [0.0, 50.0],
        "headers": { "flux": ["LEVEL", "ALT"] }
    }
    "#;

        let config = Config::from_file(write_config(dir.path(), config_data)).unwrap();

        assert_eq!(config.osoaa_root(), Path::new("/opt/OSOAA"));
        assert_eq!(config.work_dir(), Some(Path::new("runs/clear")));
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.scenario().wavelength_nm, 443.0);
        assert_eq!(config.scenario().chlorophyll, 3.0);
        // unspecified scenario fields keep their defaults
        assert_eq!(config.scenario().sea_depth, 100.0);
        assert_eq!(config.vza_file(), Some("LUM_443.txt"));
        assert_eq!(config.depth_range(), Some((0.0, 50.0)));
        assert_eq!(config.flux_pattern().first, "LEVEL");
        assert_eq!(config.vza_pattern(), HeaderPattern::vza());
    }

    #[test]
    fn test_minimal_config() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "osoaa_root": "/opt/OSOAA" }"#);

        let config = Config::from_file(path).unwrap();

        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.scenario(), &ScenarioParameters::default());
        assert!(config.work_dir().is_none());
        assert!(config.depth_range().is_none());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{ "osoaa_root": "/opt/OSOAA", "timeout_secs": 0 }"#,
        );

        let err = Config::from_file(path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_reversed_depth_range_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{ "osoaa_root": "/opt/OSOAA", "depth_range": [50.0, 10.0] }"#,
        );

        assert!(matches!(Config::from_file(path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{ "osoaa_root": "/opt/OSOAA", "scenario": { "solar_zenith": 95.0 } }"#,
        );

        let err = Config::from_file(path).unwrap_err();
        assert!(err.to_string().contains("Invalid scenario"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::from_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_run_context_requires_engine() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path(), ScenarioParameters::default());

        assert!(matches!(
            config.run_context(),
            Err(EngineError::MissingExecutable(_))
        ));
    }
}
