//! Shared helpers for CLI commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use vqc_adapter_sim::SimulatorExecutor;
use vqc_hal::{CircuitExecutor, ProcessExecutor};
use vqc_train::TrainingConfig;

/// Load a training configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<TrainingConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            TrainingConfig::from_path(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => Ok(TrainingConfig::default()),
    }
}

/// Build the executor: an external engine when a program is given, the
/// in-process simulator otherwise.
pub fn make_executor(program: Option<&Path>, args: &[String]) -> Arc<dyn CircuitExecutor> {
    match program {
        Some(program) => Arc::new(ProcessExecutor::new(program).with_args(args.iter().cloned())),
        None => Arc::new(SimulatorExecutor::new()),
    }
}
