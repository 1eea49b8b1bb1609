use anyhow::Context;
use bb_runner::{default_experiments, ExperimentConfig, ExperimentRunner};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut experiments = match std::env::var("BB_EXPERIMENTS") {
        Ok(path) => ExperimentConfig::load_list(&path)
            .with_context(|| format!("loading experiments from {path}"))?,
        Err(_) => default_experiments(),
    };

    if let Ok(seed) = std::env::var("BB_SEED") {
        let seed: u64 = seed
            .parse()
            .with_context(|| format!("BB_SEED must be an unsigned integer, got '{seed}'"))?;
        for experiment in &mut experiments {
            experiment.seed = Some(seed);
        }
    }

    let mut runner = ExperimentRunner::new();
    let stdout = std::io::stdout();
    for experiment in &experiments {
        let summary = runner
            .run(experiment, stdout.lock())
            .with_context(|| format!("experiment {} with {}", experiment.suite_name, experiment.alg))?;
        println!(
            "{} {}: {} problems, {} evaluations",
            summary.suite_name,
            summary.algorithm,
            summary.problems.len(),
            summary.total_evaluations()
        );
    }
    Ok(())
}
