//! External summarizer commands.
//!
//! The command receives one JSON document on stdin and must print a JSON
//! object on stdout. It is started once per parameter file.
//!
//! **Input**:
//! ```json
//! {"versions": {"Roddy": "3.5.9", "AlignmentAndQCWorkflows": "1.2.51-1"},
//!  "parameters": {"BWA_MEM_THREADS": "8", "useAdapterTrimming": "true"}}
//! ```
//!
//! **Output**: the summarized configuration, e.g.
//! ```json
//! {"alignment": {"bwa": "0.7.15", "adapterTrimming": "true"}}
//! ```
//!
//! Exit status must be zero. Output is capped and the run is killed after the
//! configured timeout.

use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::{SummarizeError, Summarizer};
use crate::collect::{RawParameters, Versions};
use rcg_common::{ConfigMap, ConfigValue};
use rcg_config::SummarizerSettings;

const POLL_INTERVAL: Duration = Duration::from_millis(5);
const STDERR_LIMIT: usize = 64 * 1024;

/// Document written to the command's stdin.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizerInput<'a> {
    pub versions: &'a Versions,
    pub parameters: &'a RawParameters,
}

/// A summarizer implemented by an external executable.
#[derive(Debug, Clone)]
pub struct CommandSummarizer {
    program: PathBuf,
    name: String,
    timeout: Duration,
    max_output_bytes: usize,
}

impl CommandSummarizer {
    /// The program must exist; it is not started until the first summary.
    pub fn new(program: &Path, settings: &SummarizerSettings) -> rcg_common::Result<Self> {
        if !program.is_file() {
            return Err(rcg_common::Error::SummarizerMissing(program.to_path_buf()));
        }
        Ok(Self {
            program: program.to_path_buf(),
            name: program.display().to_string(),
            timeout: Duration::from_millis(settings.timeout_ms),
            max_output_bytes: settings.max_output_bytes,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn failed(&self, message: impl Into<String>) -> SummarizeError {
        SummarizeError::ExecutionFailed {
            summarizer: self.name.clone(),
            message: message.into(),
        }
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<ExitStatus, SummarizeError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SummarizeError::Timeout {
                        summarizer: self.name.clone(),
                        timeout_ms: self.timeout.as_millis() as u64,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(self.failed(format!("wait failed: {e}"))),
            }
        }
    }

    fn run(&self, payload: Vec<u8>) -> Result<Vec<u8>, SummarizeError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failed(format!("cannot start: {e}")))?;

        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload)?;
            }
            Ok(())
        });
        let stdout = spawn_capped_reader(child.stdout.take(), self.max_output_bytes);
        let stderr = spawn_capped_reader(child.stderr.take(), STDERR_LIMIT);

        let status = self.wait_with_timeout(&mut child)?;

        if let Ok(Err(e)) = writer.join() {
            // The command may legitimately exit without reading its input.
            debug!(summarizer = %self.name, error = %e, "stdin not fully consumed");
        }
        let (stdout, truncated) = join_reader(stdout).map_err(|e| self.failed(e))?;
        let (stderr, _) = join_reader(stderr).map_err(|e| self.failed(e))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(self.failed(format!("{status}: {}", stderr.trim())));
        }
        if truncated {
            return Err(SummarizeError::OutputTooLarge {
                summarizer: self.name.clone(),
                limit: self.max_output_bytes,
            });
        }
        Ok(stdout)
    }
}

type ReaderHandle = JoinHandle<io::Result<(Vec<u8>, bool)>>;

/// Read up to `limit` bytes, then drain the rest so the child never blocks on
/// a full pipe. The flag reports whether anything was dropped.
fn spawn_capped_reader(source: Option<impl Read + Send + 'static>, limit: usize) -> ReaderHandle {
    thread::spawn(move || -> io::Result<(Vec<u8>, bool)> {
        let mut buf = Vec::new();
        let Some(source) = source else {
            return Ok((buf, false));
        };
        let mut limited = source.take(limit as u64);
        limited.read_to_end(&mut buf)?;
        let dropped = io::copy(&mut limited.into_inner(), &mut io::sink())?;
        Ok((buf, dropped > 0))
    })
}

fn join_reader(handle: ReaderHandle) -> Result<(Vec<u8>, bool), String> {
    match handle.join() {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(format!("reading output failed: {e}")),
        Err(_) => Err("output reader panicked".to_string()),
    }
}

/// Parse a command's stdout into a configuration mapping.
pub fn parse_summary_output(summarizer: &str, stdout: &[u8]) -> Result<ConfigMap, SummarizeError> {
    let value: ConfigValue =
        serde_json::from_slice(stdout).map_err(|source| SummarizeError::InvalidOutput {
            summarizer: summarizer.to_string(),
            source,
        })?;
    match value {
        ConfigValue::Map(map) => Ok(map),
        _ => Err(SummarizeError::NotAnObject {
            summarizer: summarizer.to_string(),
        }),
    }
}

impl Summarizer for CommandSummarizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn summarize(
        &self,
        versions: &Versions,
        parameters: &RawParameters,
    ) -> Result<ConfigMap, SummarizeError> {
        let input = SummarizerInput {
            versions,
            parameters,
        };
        let payload = serde_json::to_vec(&input).map_err(|e| self.failed(e.to_string()))?;
        trace!(summarizer = %self.name, bytes = payload.len(), "invoking summarizer");
        let stdout = self.run(payload)?;
        parse_summary_output(&self.name, &stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> Versions {
        [("Roddy".to_string(), "3.5.9".to_string())].into_iter().collect()
    }

    fn parameters() -> RawParameters {
        [("BWA_MEM_THREADS".to_string(), "8".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_input_serialization() {
        let versions = versions();
        let parameters = parameters();
        let json = serde_json::to_string(&SummarizerInput {
            versions: &versions,
            parameters: &parameters,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"versions":{"Roddy":"3.5.9"},"parameters":{"BWA_MEM_THREADS":"8"}}"#
        );
    }

    #[test]
    fn test_parse_output_object() {
        let map = parse_summary_output("s", br#"{"bwa": {"threads": "8"}}"#).unwrap();
        assert!(map["bwa"].as_map().is_some());
    }

    #[test]
    fn test_parse_output_rejects_non_object() {
        let err = parse_summary_output("s", b"[1, 2]").unwrap_err();
        assert!(matches!(err, SummarizeError::NotAnObject { .. }));
        let err = parse_summary_output("s", b"not json").unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidOutput { .. }));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("summarize.sh");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn settings(timeout_ms: u64, max_output_bytes: usize) -> SummarizerSettings {
            SummarizerSettings {
                timeout_ms,
                max_output_bytes,
            }
        }

        #[test]
        fn test_echoing_command_sees_input() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "cat");
            let summarizer = CommandSummarizer::new(&program, &settings(10_000, 1 << 20)).unwrap();

            let summary = summarizer.summarize(&versions(), &parameters()).unwrap();
            assert_eq!(
                summary["versions"].as_map().unwrap()["Roddy"].as_str(),
                Some("3.5.9")
            );
            assert_eq!(
                summary["parameters"].as_map().unwrap()["BWA_MEM_THREADS"].as_str(),
                Some("8")
            );
        }

        #[test]
        fn test_command_ignoring_stdin() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), r#"echo '{"fixed": true}'"#);
            let summarizer = CommandSummarizer::new(&program, &settings(10_000, 1 << 20)).unwrap();
            let summary = summarizer.summarize(&versions(), &parameters()).unwrap();
            assert_eq!(summary["fixed"], ConfigValue::Bool(true));
        }

        #[test]
        fn test_nonzero_exit_is_failure() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "echo broken >&2; exit 3");
            let summarizer = CommandSummarizer::new(&program, &settings(10_000, 1 << 20)).unwrap();
            let err = summarizer.summarize(&versions(), &parameters()).unwrap_err();
            match err {
                SummarizeError::ExecutionFailed { message, .. } => {
                    assert!(message.contains("broken"))
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_timeout_kills_command() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "exec sleep 5");
            let summarizer = CommandSummarizer::new(&program, &settings(100, 1 << 20)).unwrap();
            let err = summarizer.summarize(&versions(), &parameters()).unwrap_err();
            assert!(matches!(err, SummarizeError::Timeout { timeout_ms: 100, .. }));
        }

        #[test]
        fn test_output_cap() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "cat");
            let summarizer = CommandSummarizer::new(&program, &settings(10_000, 8)).unwrap();
            let err = summarizer.summarize(&versions(), &parameters()).unwrap_err();
            assert!(matches!(err, SummarizeError::OutputTooLarge { limit: 8, .. }));
        }
    }
}
