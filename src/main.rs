//! release-sync - idempotent GitHub release creation for CI pipelines.
//!
//! One invocation reconciles one release with one tag reference and
//! reports the result back to the pipeline through step outputs.

use release_sync::{cli, outputs};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = cli::run().await {
        // Failure contract: a workflow error annotation plus a log line,
        // a non-zero exit, and no outputs set.
        outputs::report_failure(&e.to_string());
        log::error!("run failed: {e}");
        process::exit(1);
    }
}
