//! Administrator sweep: one independent run per administrator, executed concurrently.

use digest_core::{Chat, Window};
use futures::future::join_all;
use tracing::{error, info};

use crate::error::RunError;
use crate::run::{Pipeline, RunReport};

/// Window used by the scheduled sweep.
pub const SWEEP_WINDOW: Window = Window::days(1);

/// One administrator's result.
#[derive(Debug)]
pub struct SweepOutcome {
    pub admin_id: i64,
    pub result: Result<RunReport, RunError>,
}

/// Runs `window` for every administrator. A failed run never affects the others.
pub async fn run_sweep(pipeline: &Pipeline, admins: &[i64], window: Window) -> Vec<SweepOutcome> {
    info!(admins = admins.len(), window = %window, "step: sweep started");

    let runs = admins.iter().map(|&admin_id| async move {
        let requester = Chat::private(admin_id);
        let result = pipeline.run(&requester, window).await;
        if let Err(ref e) = result {
            error!(admin_id = admin_id, error = %e, "Sweep run failed");
        }
        SweepOutcome { admin_id, result }
    });
    let outcomes = join_all(runs).await;

    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    info!(ok = ok, failed = outcomes.len() - ok, "step: sweep finished");
    outcomes
}
