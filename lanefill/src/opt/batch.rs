use anyhow::Result;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use marker_core::entities::{Instance, RunResult};

use crate::config::LFConfig;
use crate::opt::lanefill_opt::LaneFillOptimizer;
use crate::opt::monitor::CancelToken;

/// An independent run: its own instance, config and therefore its own sheet.
#[derive(Clone, Debug)]
pub struct RunJob {
    pub instance: Instance,
    pub config: LFConfig,
}

/// Solves all `jobs` in parallel on the rayon thread pool.
/// Results are returned in the order of `jobs` and are identical to those of sequential runs.
/// Cancelling `cancel` stops every job that is still running.
pub fn solve_batch(jobs: Vec<RunJob>, cancel: &CancelToken) -> Vec<Result<RunResult>> {
    jobs.into_par_iter()
        .map(|job| {
            let optimizer = LaneFillOptimizer::new(job.instance, job.config)?;
            Ok(optimizer.solve(&mut cancel.clone()))
        })
        .collect()
}
