use std::ffi::OsString;
use std::path::Path;

use super::params::EngineConfiguration;

/// Flattens a configuration into the engine's argument vector:
/// the executable followed by one `-Key value` pair per entry, in insertion
/// order.
pub fn build_command(executable: &Path, config: &EngineConfiguration) -> Vec<OsString> {
    let mut cmd = Vec::with_capacity(1 + 2 * config.len());
    cmd.push(executable.as_os_str().to_os_string());

    for (key, value) in config.iter() {
        cmd.push(OsString::from(format!("-{}", key)));
        cmd.push(OsString::from(value.to_string()));
    }

    cmd
}

/// Shell-like rendering of an argument vector, for logs only.
pub fn display_command(cmd: &[OsString]) -> String {
    cmd.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<String>>()
        .join(" ")
}
