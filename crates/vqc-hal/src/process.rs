//! Executor backed by an external simulator engine.
//!
//! The engine is invoked once per call as
//!
//! ```text
//! <program> [extra args...] -f <circuit file> -s <shots> -r <seed>
//! ```
//!
//! and must print the histogram on standard output, one
//! `<bitstring>: <count>` line per outcome.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, trace};

use vqc_ir::CircuitInstance;

use crate::error::{HalError, HalResult};
use crate::executor::CircuitExecutor;
use crate::parse::parse_counts;
use crate::result::Counts;

/// Runs circuits through an external engine process.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
    args: Vec<String>,
    work_dir: PathBuf,
}

impl ProcessExecutor {
    /// Create an executor for `program`, writing circuit files to the
    /// system temporary directory.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            work_dir: std::env::temp_dir(),
        }
    }

    /// Arguments placed before the circuit/shots/seed flags.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Directory for circuit files.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// The engine program.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The directory circuit files are written to.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

/// Removes the circuit file when the call finishes or is cancelled.
struct CircuitFile(PathBuf);

impl Drop for CircuitFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            trace!("could not remove {}: {}", self.0.display(), e);
        }
    }
}

#[async_trait]
impl CircuitExecutor for ProcessExecutor {
    fn name(&self) -> &str {
        "process"
    }

    async fn execute(&self, circuit: &CircuitInstance, shots: u32, seed: u64) -> HalResult<Counts> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shot count must be positive".into()));
        }

        let path = self
            .work_dir
            .join(format!("vqc-{}.qasm", uuid::Uuid::new_v4()));
        fs::write(&path, circuit.to_text()).await?;
        let file = CircuitFile(path);

        debug!(
            "running {} on {} ({} shots, seed {})",
            self.program.display(),
            file.0.display(),
            shots,
            seed
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-f")
            .arg(&file.0)
            .arg("-s")
            .arg(shots.to_string())
            .arg("-r")
            .arg(seed.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;
        drop(file);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HalError::ProcessFailed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_counts(&stdout, shots, circuit.num_qubits())
    }
}
