use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use assessor_core::app::SAVE_STATE_NAMESPACE;
use assessor_core::domain::{AssessmentConfig, ItemId, Location};
use assessor_core::impls::{InMemoryCourse, InMemoryStateStore, TracingEventSink};
use assessor_core::ports::{Navigator, StateStore};
use assessor_core::{AssessmentBuilder, AssessmentSet};

mod scenario;

use scenario::{Scenario, Step};

#[derive(Parser)]
#[command(name = "assessor", about = "Drive an assessment through a scripted learner session")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print the status after every step
    Run {
        /// Path to the scenario JSON
        scenario: PathBuf,
    },
    /// Print an assessment configuration with every default filled in
    Config {
        /// Path to a `_scoringAssessment` JSON object
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { scenario } => run(Scenario::load(&scenario)?).await,
        Commands::Config { path } => print_config(&path),
    }
}

fn print_config(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let config = AssessmentConfig::from_value(&value);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

async fn run(scenario: Scenario) -> Result<()> {
    let config = AssessmentConfig::from_value(&scenario.config);
    let course = Arc::new(InMemoryCourse::new(
        scenario.page_id.as_str(),
        scenario.container_id.as_str(),
        scenario.items.iter().map(|item| item.state()).collect(),
    ));
    for item in &scenario.items {
        if item.min_score.is_some() || item.max_score.is_some() {
            course.set_score_range(
                &ItemId::new(item.id.as_str()),
                item.min_score.unwrap_or(0.0),
                item.max_score.unwrap_or(1.0),
            );
        }
    }

    let store = Arc::new(InMemoryStateStore::new());
    if let Some(saved) = &scenario.saved_state {
        store.set(SAVE_STATE_NAMESPACE, config.id.as_str(), saved.to_string())?;
    }

    let mut set = AssessmentBuilder::new(config)
        .container(scenario.container_id.as_str())
        .backward_compatible(scenario.backward_compatible)
        .host(Arc::clone(&course))
        .store(store.clone())
        .events(Arc::new(TracingEventSink))
        .build()?;
    set.restore()?;

    info!(assessment_id = %set.id(), steps = scenario.steps.len(), "running scenario");
    for (index, step) in scenario.steps.iter().enumerate() {
        apply(&mut set, &course, step).await?;
        let line = json!({ "step": index, "action": step_name(step), "status": set.status() });
        println!("{line}");
    }

    let saved = store.get(SAVE_STATE_NAMESPACE, set.id().as_str())?;
    println!("{}", json!({ "saved_state": saved }));
    Ok(())
}

async fn apply(set: &mut AssessmentSet, course: &InMemoryCourse, step: &Step) -> Result<()> {
    match step {
        Step::Visit { location } => {
            let target = location
                .as_deref()
                .map(ItemId::new)
                .unwrap_or_else(|| course.page_id().clone());
            course.set_location(target.clone());
            set.on_navigation(&Location::page(target)).await?;
        }
        Step::Leave { location } => {
            course.set_location(location.as_str());
            set.on_navigation(&Location::menu(location.as_str())).await?;
        }
        Step::Answer { item, correct } => {
            course.answer(&ItemId::new(item.as_str()), *correct);
            set.update()?;
        }
        Step::View { item } => {
            course.complete_item(&ItemId::new(item.as_str()));
            set.update()?;
        }
        Step::Complete => set.on_completed()?,
        Step::ContainerCompletion { complete } => {
            set.on_container_completion_changed(*complete).await?;
        }
        Step::Update => set.update()?,
        Step::Reset => {
            let reloads = course.reloads().len();
            let was_reset = set.reset().await?;
            info!(assessment_id = %set.id(), was_reset, "reset requested");
            // a reload re-enters the page, which the router reports as navigation
            if course.reloads().len() > reloads {
                if let Some(location) = course.current_location() {
                    set.on_navigation(&Location::page(location)).await?;
                }
            }
        }
        Step::Restore => set.restore()?,
    }
    Ok(())
}

fn step_name(step: &Step) -> &'static str {
    match step {
        Step::Visit { .. } => "visit",
        Step::Leave { .. } => "leave",
        Step::Answer { .. } => "answer",
        Step::View { .. } => "view",
        Step::Complete => "complete",
        Step::ContainerCompletion { .. } => "container_completion",
        Step::Update => "update",
        Step::Reset => "reset",
        Step::Restore => "restore",
    }
}
