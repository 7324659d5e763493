//! ilm-rollover - run the lifecycle rollover step against a project state file

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ilm_rollover::config::Config;
use ilm_rollover::rollover::RolloverDecision;
use ilm_rollover::{LocalRolloverClient, ProjectMetadata, RolloverStep};

#[derive(Parser, Debug)]
#[command(name = "ilm-rollover")]
#[command(about = "Decide whether an index needs rolling over and perform the rollover")]
struct Args {
    /// Path to the project state (JSON)
    #[arg(long, env = "ILM_STATE_PATH")]
    state: PathBuf,

    /// Index to evaluate
    #[arg(long)]
    index: String,

    /// Policy phase (overrides ILM_POLICY_PHASE)
    #[arg(long)]
    phase: Option<String>,

    /// Log level (overrides ILM_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the updated project back to the state file
    #[arg(long, default_value_t = false)]
    write_back: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(phase) = args.phase {
        config.phase = phase;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    // Logs go to stderr, the summary to stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let project = ProjectMetadata::load(&args.state)?;
    let index = project
        .index(&args.index)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("index [{}] not found in {}", args.index, args.state.display()))?;

    tracing::info!(
        index = %index.name,
        project = %project.id,
        step = %config.step_key(),
        "Evaluating rollover"
    );

    let shared = Arc::new(Mutex::new(project.clone()));
    let client = Arc::new(LocalRolloverClient::new(Arc::clone(&shared)));
    let step = RolloverStep::new(config.step_key(), config.next_step_key(), client);

    let summary = match step.execute(&index, &project).await {
        Ok(RolloverDecision::Skip(reason)) => serde_json::json!({
            "index": index.name,
            "outcome": "skipped",
            "skip": reason,
        }),
        Ok(RolloverDecision::Rollover(target)) => serde_json::json!({
            "index": index.name,
            "outcome": "rolled_over",
            "target": target,
        }),
        Err(e) => serde_json::json!({
            "index": index.name,
            "outcome": "failed",
            "error": e.to_string(),
            "code": e.error_code(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary["outcome"] == "failed" {
        anyhow::bail!("rollover step failed for index [{}]", index.name);
    }

    if args.write_back {
        shared.lock().await.save(&args.state)?;
        tracing::info!(path = %args.state.display(), "State written back");
    }

    Ok(())
}
