use log::{debug, warn};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::command::display_command;
use super::error::EngineError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Captured output is cut to this many characters in error reports.
pub const DIAGNOSTIC_CHARS: usize = 1000;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Launches the engine from its installation root and waits for it, up to a
/// wall-clock limit.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    root: PathBuf,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `cmd` (executable first) to completion.
    ///
    /// A non-zero exit is reported as [`EngineError::Failed`] with truncated
    /// stdout/stderr; exceeding the limit kills the process and reports
    /// [`EngineError::Timeout`].
    pub fn run(&self, cmd: &[OsString]) -> Result<RunOutput, EngineError> {
        let (program, args) = cmd.split_first().ok_or_else(|| {
            EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command line",
            ))
        })?;

        debug!("Launching: {}", display_command(cmd));

        let start = Instant::now();
        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .env("OSOAA_ROOT", &self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain both pipes while polling so a verbose engine cannot block on
        // a full pipe buffer.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                kill(&mut child);
                // The readers may still be held open by grandchildren of the
                // engine; they are left to finish on their own.
                return Err(EngineError::Timeout {
                    limit: self.timeout,
                });
            }

            thread::sleep(POLL_INTERVAL.min(self.timeout - elapsed));
        };

        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);
        let elapsed = start.elapsed();

        if !status.success() {
            return Err(EngineError::Failed {
                code: status.code(),
                stdout: truncate_chars(&stdout, DIAGNOSTIC_CHARS),
                stderr: truncate_chars(&stderr, DIAGNOSTIC_CHARS),
            });
        }

        debug!("Engine finished in {:.2} s", elapsed.as_secs_f64());

        Ok(RunOutput {
            stdout,
            stderr,
            elapsed,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = pipe.read_to_end(&mut buf) {
                warn!("Failed to read engine output: {}", e);
            }
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_reader(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!("Failed to kill timed-out engine process: {}", e);
    }
    // reap
    let _ = child.wait();
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        // multi-byte characters are never split
        assert_eq!(truncate_chars("µµµµ", 2), "µµ");
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let runner = ProcessRunner::new(".");
        assert!(matches!(runner.run(&[]), Err(EngineError::Io(_))));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(ProcessRunner::new(".").timeout(), Duration::from_secs(600));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_codes_and_timeout() {
        let runner = ProcessRunner::new(".").with_timeout(Duration::from_millis(300));
        let sh = |script: &str| {
            vec![
                OsString::from("/bin/sh"),
                OsString::from("-c"),
                OsString::from(script),
            ]
        };

        let ok = runner.run(&sh("echo $OSOAA_ROOT")).unwrap();
        assert_eq!(ok.stdout.trim(), ".");

        match runner.run(&sh("echo boom >&2; exit 3")) {
            Err(EngineError::Failed { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        let timed_out = runner.run(&sh("exec sleep 5"));
        assert!(matches!(timed_out, Err(EngineError::Timeout { .. })));
    }
}
