//! Command line entry point wiring inputs, run context, API client,
//! reconciler, and step outputs together.

mod args;

pub use args::Args;

use log::info;

use crate::config::RunConfig;
use crate::context::RunContext;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::outputs::OutputSink;
use crate::reconcile::{Outcome, Reconciler};

/// Main CLI entry point: one reconciliation per invocation.
pub async fn run() -> Result<Outcome> {
    let args = Args::parse_args();
    let context = RunContext::from_env()?;
    let config = RunConfig::resolve(&args, &context)?;
    info!(
        "reconciling release for tag {} in {}/{}",
        config.tag, config.owner, config.repo
    );

    let client = GitHubClient::new(&context, &config.owner, &config.repo)?;
    let outcome = Reconciler::new(&client, &config, &context.sha).run().await?;

    // Outputs are set exactly once, only after the reconciliation
    // completed; a failure above leaves them unset.
    OutputSink::from_env().publish(&outcome)?;
    info!("release {} reconciled: {}", outcome.id, outcome.html_url);
    Ok(outcome)
}
