use chrono::Utc;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use walkdir::WalkDir;

use super::builder::{ParameterBuilder, WorkDirs, ensure_complete};
use super::command::build_command;
use super::defaults::DEFAULT_VZA_FILE;
use super::error::EngineError;
use super::params::EngineConfiguration;
use super::runner::ProcessRunner;
use crate::readers::{DataReader, FluxReader, HeaderPattern, OutputKind, STANDARD_OUTPUTS, VzaReader};
use crate::results::SimulationResults;
use crate::scenario::ScenarioParameters;

/// Engine binary, relative to the installation root.
pub const EXECUTABLE: &str = "exe/OSOAA_MAIN.exe";

const TEMP_PREFIX: &str = "osoaa_";

/// One engine installation bound to one working directory.
///
/// The working directory and its cache subdirectories belong to this context;
/// two contexts must not share one. A temporary directory is removed when the
/// context is dropped.
#[derive(Debug)]
pub struct RunContext {
    root: PathBuf,
    exe: PathBuf,
    dirs: WorkDirs,
    runner: ProcessRunner,
    flux_reader: FluxReader,
    vza_reader: VzaReader,
    _temp: Option<TempDir>,
}

impl RunContext {
    /// Binds the installation at `root` to `work_dir`, or to a fresh
    /// temporary directory when `work_dir` is `None`.
    ///
    /// Fails with [`EngineError::MissingExecutable`] before touching the
    /// filesystem if the engine binary is absent.
    pub fn new<P: AsRef<Path>>(root: P, work_dir: Option<PathBuf>) -> Result<Self, EngineError> {
        let exe = root.as_ref().join(EXECUTABLE);
        if !exe.is_file() {
            return Err(EngineError::MissingExecutable(exe));
        }

        // The engine runs from its root, so every path it is given must be absolute.
        let root = root.as_ref().canonicalize()?;
        let exe = root.join(EXECUTABLE);

        let (work_dir, temp) = match work_dir {
            Some(dir) => (dir, None),
            None => {
                let temp = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
                (temp.path().to_path_buf(), Some(temp))
            }
        };

        std::fs::create_dir_all(&work_dir)?;
        let work_dir = work_dir.canonicalize()?;

        let dirs = WorkDirs::new(&work_dir);
        dirs.create()?;

        info!(
            "Engine at {}, working directory {}",
            root.display(),
            work_dir.display()
        );

        Ok(Self {
            runner: ProcessRunner::new(&root),
            root,
            exe,
            dirs,
            flux_reader: FluxReader::default(),
            vza_reader: VzaReader::default(),
            _temp: temp,
        })
    }

    pub fn with_temp_dir<P: AsRef<Path>>(root: P) -> Result<Self, EngineError> {
        Self::new(root, None)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.runner = self.runner.with_timeout(timeout);
        self
    }

    /// Replaces the header patterns used to locate the data in both tables.
    pub fn with_headers(mut self, flux: HeaderPattern, vza: HeaderPattern) -> Self {
        self.flux_reader = FluxReader { pattern: flux };
        self.vza_reader = VzaReader { pattern: vza };
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn executable(&self) -> &Path {
        &self.exe
    }

    pub fn work_dir(&self) -> &Path {
        &self.dirs.root
    }

    pub fn dirs(&self) -> &WorkDirs {
        &self.dirs
    }

    pub fn timeout(&self) -> Duration {
        self.runner.timeout()
    }

    pub fn builder(&self) -> ParameterBuilder {
        ParameterBuilder::new(self.dirs.clone())
    }

    /// Configuration for `scenario` with the default science settings.
    pub fn build(&self, scenario: &ScenarioParameters) -> Result<EngineConfiguration, EngineError> {
        self.builder().build(scenario)
    }

    /// Builds and runs `scenario`.
    pub fn simulate(&self, scenario: &ScenarioParameters) -> Result<SimulationResults, EngineError> {
        info!("Simulating {}", scenario);
        let config = self.build(scenario)?;
        self.run(config)
    }

    /// Runs the engine on a complete configuration and reads what it wrote.
    pub fn run(&self, config: EngineConfiguration) -> Result<SimulationResults, EngineError> {
        ensure_complete(&config)?;

        let cmd = build_command(&self.exe, &config);
        let started = Utc::now();
        let output = self.runner.run(&cmd)?;
        info!("Engine run took {:.1} s", output.elapsed.as_secs_f64());

        self.parse_results(config, started, output.elapsed)
    }

    /// Reads both output tables named by `config`. An absent file leaves the
    /// matching profile at `None`.
    pub fn parse_results(
        &self,
        config: EngineConfiguration,
        started: chrono::DateTime<Utc>,
        duration: Duration,
    ) -> Result<SimulationResults, EngineError> {
        let result_root = self.result_root(&config);
        let vza_file = config.vza_file().unwrap_or(DEFAULT_VZA_FILE);

        let flux_path = OutputKind::Flux.path(&result_root, vza_file);
        let flux = self.flux_reader.read_data(&flux_path)?;
        if flux.is_none() {
            warn!("No {} at {}", OutputKind::Flux, flux_path.display());
        }

        let vza_path = OutputKind::Vza.path(&result_root, vza_file);
        let vza = self.vza_reader.read_data(&vza_path)?;
        if vza.is_none() {
            warn!("No {} at {}", OutputKind::Vza, vza_path.display());
        }

        Ok(SimulationResults {
            flux_path: flux.as_ref().map(|_| flux_path),
            flux,
            vza_path: vza.as_ref().map(|_| vza_path),
            vza,
            config,
            started,
            duration,
        })
    }

    /// Radiance tables currently in `Standard_outputs`.
    pub fn standard_outputs(&self) -> Result<Vec<PathBuf>, EngineError> {
        let dir = self.dirs.root.join(STANDARD_OUTPUTS);
        let pattern = format!(
            "{}/*.txt",
            glob::Pattern::escape(&dir.to_string_lossy())
        );

        let paths = glob::glob(&pattern).map_err(|e| {
            EngineError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let mut files: Vec<PathBuf> = paths.filter_map(|p| p.ok()).collect();
        files.sort();
        Ok(files)
    }

    /// Every file under the working directory, sorted.
    pub fn result_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.dirs.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        files.sort();
        debug!("{} files under {}", files.len(), self.dirs.root.display());
        files
    }

    fn result_root(&self, config: &EngineConfiguration) -> PathBuf {
        config
            .result_root()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.dirs.root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fake_install() -> TempDir {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("exe")).unwrap();
        fs::write(root.path().join(EXECUTABLE), "").unwrap();
        root
    }

    #[test]
    fn test_missing_executable_fails_early() {
        let root = tempdir().unwrap();
        let work = root.path().join("work");

        let result = RunContext::new(root.path(), Some(work.clone()));

        assert!(matches!(result, Err(EngineError::MissingExecutable(_))));
        assert!(!work.exists());
    }

    #[test]
    fn test_context_creates_cache_dirs() {
        let root = fake_install();
        let work = root.path().join("runs/a");

        let ctx = RunContext::new(root.path(), Some(work.clone())).unwrap();

        assert_eq!(ctx.work_dir(), work.canonicalize().unwrap());
        assert_eq!(ctx.root(), root.path().canonicalize().unwrap());
        for dir in ctx.dirs().all() {
            assert!(dir.is_dir(), "{} missing", dir.display());
        }
    }

    #[test]
    fn test_paths_are_made_absolute() {
        let root = fake_install();
        let work = root.path().join("runs/b");
        let dotted = root.path().join("exe/..");

        let ctx = RunContext::new(&dotted, Some(work.join("../b"))).unwrap();

        assert!(ctx.root().is_absolute());
        assert_eq!(ctx.root(), root.path().canonicalize().unwrap());
        assert_eq!(ctx.work_dir(), work.canonicalize().unwrap());
        assert_eq!(ctx.dirs().surf, ctx.work_dir().join("SURF"));
    }

    #[test]
    fn test_temp_dir_is_removed_on_drop() {
        let root = fake_install();
        let ctx = RunContext::with_temp_dir(root.path()).unwrap();
        let work = ctx.work_dir().to_path_buf();

        assert!(work.join("MIE_AER").is_dir());
        assert!(
            work.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(TEMP_PREFIX)
        );

        drop(ctx);
        assert!(!work.exists());
    }

    #[test]
    fn test_build_points_at_work_dir() {
        let root = fake_install();
        let ctx = RunContext::with_temp_dir(root.path()).unwrap();

        let config = ctx.build(&ScenarioParameters::default()).unwrap();

        assert!(config.is_complete());
        assert_eq!(
            config.result_root(),
            Some(&*ctx.work_dir().to_string_lossy())
        );
    }

    #[test]
    fn test_parse_results_with_no_outputs() {
        let root = fake_install();
        let ctx = RunContext::with_temp_dir(root.path()).unwrap();
        let config = ctx.build(&ScenarioParameters::default()).unwrap();

        let results = ctx
            .parse_results(config, Utc::now(), Duration::ZERO)
            .unwrap();

        assert!(results.flux.is_none());
        assert!(results.flux_path.is_none());
        assert!(results.vza.is_none());
        assert!(ctx.standard_outputs().unwrap().is_empty());
    }

    #[test]
    fn test_parse_results_reads_custom_vza_file() {
        let root = fake_install();
        let ctx = RunContext::with_temp_dir(root.path()).unwrap();
        let config = ctx
            .builder()
            .with_vza_file("run_443.txt")
            .build(&ScenarioParameters::default())
            .unwrap();

        let std_dir = ctx.work_dir().join(STANDARD_OUTPUTS);
        fs::create_dir_all(&std_dir).unwrap();
        fs::write(
            std_dir.join("run_443.txt"),
            "VZA SCA_ANG I REFL POL_RATE LPOL REFL_POL\n0.0 150.0 0.01 0.02 3.0 0.0003 0.0006\n",
        )
        .unwrap();

        let results = ctx
            .parse_results(config, Utc::now(), Duration::ZERO)
            .unwrap();

        assert_eq!(results.vza.map(|p| p.len()), Some(1));
        assert_eq!(results.vza_path, Some(std_dir.join("run_443.txt")));
        assert_eq!(ctx.standard_outputs().unwrap(), vec![std_dir.join("run_443.txt")]);
        assert!(ctx.result_files().contains(&std_dir.join("run_443.txt")));
    }

    #[test]
    fn test_run_rejects_incomplete_configuration() {
        let root = fake_install();
        let ctx = RunContext::with_temp_dir(root.path()).unwrap();
        let mut config = ctx.build(&ScenarioParameters::default()).unwrap();
        config.remove("SEA.Dir");

        match ctx.run(config) {
            Err(EngineError::Incomplete(missing)) => assert_eq!(missing, vec!["SEA.Dir"]),
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }
}
