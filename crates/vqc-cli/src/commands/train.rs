//! Train command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use vqc_train::{Dataset, Trainer, TrainingConfig};

use super::common::{load_config, make_executor};

/// Command-line overrides for individual configuration fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub iterations: Option<u32>,
    pub shots: Option<u32>,
    pub seed: Option<u64>,
}

impl Overrides {
    /// Write every set field into `config`.
    pub fn apply(&self, config: &mut TrainingConfig) {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

/// An external engine program and its leading arguments.
#[derive(Debug, Clone)]
pub struct Engine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Execute the train command.
pub async fn execute(
    data: &Path,
    config_path: Option<&Path>,
    overrides: Overrides,
    engine: Option<Engine>,
    report_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    overrides.apply(&mut config);

    println!(
        "{} Training on {} ({} iterations, {} shots, seed {})",
        style("→").cyan().bold(),
        style(data.display()).green(),
        config.iterations,
        config.shots,
        config.seed
    );

    let dataset = Dataset::from_csv_path(data, config.circuit.qubits as usize)
        .with_context(|| format!("Failed to load dataset: {}", data.display()))?;
    println!(
        "  Loaded: {} samples, {} positive",
        dataset.len(),
        dataset.num_positive()
    );

    let executor = match &engine {
        Some(e) => make_executor(Some(&e.program), &e.args),
        None => make_executor(None, &[]),
    };
    println!("  Executor: {}", style(executor.name()).yellow());

    let iterations = config.iterations;
    let mut trainer = Trainer::new(config, executor)?;
    println!(
        "  Circuit: {} qubits, {} layers, {} trainable angles",
        trainer.template().num_qubits(),
        trainer.template().layers(),
        trainer.template().num_trainable()
    );

    let split = trainer.split(&dataset)?;
    println!(
        "  Split: {} train / {} test ({:?}, {} attempts)",
        split.train.len(),
        split.test.len(),
        split.strategy,
        split.attempts
    );

    let bar = ProgressBar::new(u64::from(iterations));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    let report = trainer
        .train_with(&split.train, |record| {
            bar.set_message(format!("loss {:.5}", record.loss));
            bar.inc(1);
        })
        .await;
    bar.finish_and_clear();
    let report = report?;

    println!(
        "{} Finished {} iterations in {:.1}s",
        style("✓").green().bold(),
        report.iterations.len(),
        report.elapsed_secs
    );
    if let Some(loss) = report.final_loss() {
        println!("  Final loss:     {loss:.6}");
    }
    if let Some(path) = report_path {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("  Report: {}", style(path.display()).green());
    }

    let train_eval = trainer.evaluate(&split.train).await?;
    println!(
        "  Train accuracy: {} (risk {:.4})",
        style(format!("{:.3}", train_eval.accuracy)).cyan(),
        train_eval.risk
    );
    let mut failures = train_eval.failures;

    if split.test.is_empty() {
        warn!("test split is empty; {} samples are too few to hold any out", dataset.len());
        println!("  Test accuracy:  {}", style("n/a (empty test split)").dim());
    } else {
        let test_eval = trainer.evaluate(&split.test).await?;
        println!(
            "  Test accuracy:  {} (risk {:.4})",
            style(format!("{:.3}", test_eval.accuracy)).cyan(),
            test_eval.risk
        );
        failures += test_eval.failures;
    }

    if failures > 0 {
        println!(
            "  {} {} samples penalized after failed executions",
            style("!").yellow().bold(),
            failures
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_only_set_fields() {
        let mut config = TrainingConfig::default();
        let overrides = Overrides {
            iterations: Some(3),
            shots: None,
            seed: Some(1),
        };
        overrides.apply(&mut config);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.shots, TrainingConfig::default().shots);
        assert_eq!(config.seed, 1);
    }

    #[tokio::test]
    async fn test_train_on_simulator_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.csv");
        let mut csv = String::from("x0,x1,label\n");
        for i in 0..10 {
            let x = f64::from(i) / 10.0;
            let label = u8::from(x >= 0.5);
            csv.push_str(&format!("{x},{},{label}\n", 1.0 - x));
        }
        std::fs::write(&data, csv).unwrap();

        let config = dir.path().join("run.yaml");
        std::fs::write(
            &config,
            "shots: 50\ncircuit:\n  qubits: 2\n  layers: 1\n  gates: [ry]\n",
        )
        .unwrap();

        let report = dir.path().join("report.json");
        let overrides = Overrides {
            iterations: Some(2),
            ..Overrides::default()
        };
        execute(&data, Some(&config), overrides, None, Some(&report))
            .await
            .unwrap();

        let json = std::fs::read_to_string(&report).unwrap();
        assert!(json.contains("\"iterations\""));
    }

    #[tokio::test]
    async fn test_tiny_dataset_keeps_report() {
        // Four rows put every sample in the train split.
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("tiny.csv");
        std::fs::write(&data, "x0,x1,label\n0.1,0.9,0\n0.2,0.8,0\n0.8,0.2,1\n0.9,0.1,1\n")
            .unwrap();
        let config = dir.path().join("run.yaml");
        std::fs::write(
            &config,
            "shots: 20\ncircuit:\n  qubits: 2\n  layers: 1\n  gates: [ry]\n",
        )
        .unwrap();
        let report = dir.path().join("r.json");
        let overrides = Overrides {
            iterations: Some(1),
            ..Overrides::default()
        };

        execute(&data, Some(&config), overrides, None, Some(&report))
            .await
            .unwrap();
        assert!(report.exists());
    }

    #[tokio::test]
    async fn test_train_missing_dataset() {
        let err = execute(
            Path::new("/nonexistent/data.csv"),
            None,
            Overrides::default(),
            None,
            None,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Failed to load dataset"));
    }
}
