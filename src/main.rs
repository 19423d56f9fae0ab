//! Restructuring Plan CLI
//!
//! Runs the full plan pipeline for one or more input directories and writes
//! every computed table as CSV plus a JSON report per scenario.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use restructuring_plan::store::write_csv;
use restructuring_plan::{
    EngineConfig, PipelineReport, PlanInputs, ProjectionStore, ScenarioRunner, Scope, Statement,
};

#[derive(Parser, Debug)]
#[command(name = "restructuring-plan", version, about = "Project a restructuring plan and its creditor distribution")]
struct Cli {
    /// Input directories, one scenario each (named after the directory)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long = "output", default_value = "plan_output")]
    output: PathBuf,

    /// Case identifier
    #[arg(long = "case", default_value = "case")]
    case_id: String,

    /// Maximum cash difference accepted between balance sheet and treasury
    #[arg(long)]
    threshold: Option<rust_decimal::Decimal>,

    /// Maximum convergence iterations
    #[arg(long)]
    max_iterations: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = EngineConfig::default();
    if let Some(threshold) = cli.threshold {
        config.convergence.threshold = threshold;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.convergence.max_iterations = max_iterations;
    }

    let runner = ScenarioRunner::new(config);
    let mut scopes = Vec::with_capacity(cli.inputs.len());
    for dir in &cli.inputs {
        let scenario_id = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "base".to_string());
        let inputs = PlanInputs::load_from(dir)
            .with_context(|| format!("loading inputs from {}", dir.display()))?;
        let scope = Scope::new(cli.case_id.clone(), scenario_id);
        runner.add_scope(scope.clone(), inputs)?;
        scopes.push(scope);
    }

    info!("Running {} scenario(s) for case {}", scopes.len(), cli.case_id);
    let results = runner.run_batch(&scopes);

    let mut failures = 0;
    for (scope, result) in scopes.iter().zip(results) {
        match result {
            Ok(report) => {
                let dir = cli.output.join(&scope.case_id).join(&scope.scenario_id);
                write_outputs(runner.store(), &report, &dir)
                    .with_context(|| format!("writing results for {}", scope))?;
                print_summary(&report);
            }
            Err(e) => {
                error!("{} failed: {}", scope, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} scenario(s) failed", failures, scopes.len());
    }
    Ok(())
}

fn write_outputs(store: &dyn ProjectionStore, report: &PipelineReport, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let scope = &report.scope;
    for statement in Statement::ALL {
        let rows = store.rows(scope, statement)?;
        write_csv(&dir.join(format!("{}.csv", statement.name())), &rows)?;
    }
    write_csv(&dir.join("liquidation.csv"), &store.liquidation(scope)?)?;
    write_csv(&dir.join("settlement.csv"), &store.settlement(scope)?)?;
    write_csv(&dir.join("instruments.csv"), &store.instruments(scope)?)?;

    let file = File::create(dir.join("report.json"))?;
    serde_json::to_writer_pretty(file, report)?;
    info!("Results for {} written to {}", scope, dir.display());
    Ok(())
}

fn print_summary(report: &PipelineReport) {
    let convergence = &report.convergence;
    let assessment = &report.assessment;
    println!("{}", report.scope);
    println!(
        "  Convergence: {} after {} iteration(s), max delta {}",
        if convergence.converged { "reached" } else { "not reached" },
        convergence.iterations,
        convergence.max_delta
    );
    println!(
        "  Feasibility: ratio {} ({})",
        assessment.feasibility.ratio,
        assessment.feasibility.band.description()
    );
    println!("  Sustainability: {:?}", assessment.sustainability.overall);
    println!("  Comparison: {:?}", assessment.comparison.outcome);
}
