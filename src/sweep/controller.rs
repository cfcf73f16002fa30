//! Sweep orchestration.
//!
//! For every combination of the grid:
//!
//! 1. build its directory path
//! 2. load the candidate series from the source
//! 3. align it onto the reference x values
//! 4. score it against the reference y values
//! 5. offer the score to the running best
//!
//! The grid is processed one `ct` block at a time. Within a block, combinations
//! may be evaluated in parallel, but results are always folded in grid order,
//! so the log, the tie-breaking and the final best do not depend on `jobs`.

use std::io::Write;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::domain::{EvalResult, FailurePolicy, ParamCombo, ParamGrid, Series, SkippedCombo};
use crate::error::{EvalError, SweepError};
use crate::grid::{at_segment, candidate_path, css_segment, ct_segment};
use crate::io::log::RunLog;
use crate::math::{align, normalized_distance};
use crate::sweep::tracker::BestTracker;

/// Something that can produce the candidate series of a combination.
///
/// The filesystem implementation is `io::tree::SimulationTree`.
pub trait CandidateSource: Sync {
    fn load(&self, combo: &ParamCombo, path: &str) -> Result<Series, EvalError>;
}

#[derive(Debug, Clone, Copy)]
pub struct SweepOptions {
    /// Worker threads; values <= 1 run sequentially.
    pub jobs: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            failure_policy: FailurePolicy::Skip,
        }
    }
}

/// Everything a finished sweep produced.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// `None` when no combination could be scored.
    pub best: Option<EvalResult>,
    /// Scored combinations in grid order.
    pub evaluated: Vec<EvalResult>,
    /// Failed combinations in grid order.
    pub skipped: Vec<SkippedCombo>,
    pub total_jobs: usize,
}

impl SweepOutcome {
    /// The `n` lowest errors; ties keep grid order.
    pub fn top(&self, n: usize) -> Vec<EvalResult> {
        let mut sorted = self.evaluated.clone();
        sorted.sort_by(|a, b| a.error.total_cmp(&b.error).then(a.index.cmp(&b.index)));
        sorted.truncate(n);
        sorted
    }
}

/// Align `candidate` onto the reference x values and score it.
pub fn score_candidate(reference: &Series, candidate: &Series) -> Result<f64, EvalError> {
    let aligned = align(candidate, &reference.x)?;
    score_aligned(reference, &aligned)
}

/// Score values already aligned onto the reference x values.
pub fn score_aligned(reference: &Series, aligned: &[f64]) -> Result<f64, EvalError> {
    let error = normalized_distance(aligned, &reference.y)?;
    if !error.is_finite() {
        return Err(EvalError::NonFinite { value: error });
    }
    Ok(error)
}

/// Run a full sweep over `grid`.
pub fn run_sweep<S: CandidateSource, W: Write>(
    grid: &ParamGrid,
    reference: &Series,
    source: &S,
    options: SweepOptions,
    log: &mut RunLog<W>,
) -> Result<SweepOutcome, SweepError> {
    let mut controller = SweepController::new(reference, source, options);
    controller.run(grid, log)?;
    Ok(controller.into_outcome(grid.total_jobs()))
}

/// Stateful sweep driver.
///
/// `run_sweep` is the usual entry point; the controller is exposed so callers
/// can inspect the best result after an aborted run.
pub struct SweepController<'a, S> {
    reference: &'a Series,
    source: &'a S,
    options: SweepOptions,
    tracker: BestTracker,
    evaluated: Vec<EvalResult>,
    skipped: Vec<SkippedCombo>,
    // Last (at, css) logged, for the indented progress lines.
    last_at: Option<f64>,
    last_css: Option<f64>,
}

impl<'a, S: CandidateSource> SweepController<'a, S> {
    pub fn new(reference: &'a Series, source: &'a S, options: SweepOptions) -> Self {
        Self {
            reference,
            source,
            options,
            tracker: BestTracker::new(),
            evaluated: Vec::new(),
            skipped: Vec::new(),
            last_at: None,
            last_css: None,
        }
    }

    pub fn best(&self) -> Option<&EvalResult> {
        self.tracker.best()
    }

    pub fn run<W: Write>(&mut self, grid: &ParamGrid, log: &mut RunLog<W>) -> Result<(), SweepError> {
        grid.validate()?;

        let total = grid.total_jobs();
        let block_len = grid.block_len();
        log.line(format!("Cts = {:?}", grid.ct))?;
        log.line(format!("Ats = {:?}", grid.at))?;
        log.line(format!("Csss = {:?}", grid.css))?;
        log.line(format!("a2s = {:?}", grid.a2))?;
        log.line(format!("amount of jobs = {total}"))?;
        log.line(format!("max jobs       = {}", self.options.jobs.max(1)))?;
        info!(total, jobs = self.options.jobs.max(1), "starting sweep");

        let pool = build_pool(self.options.jobs)?;

        for (block_idx, &ct) in grid.ct.iter().enumerate() {
            let started = block_idx * block_len;
            let percent = started as f64 / total as f64 * 100.0;
            log.line("")?;
            log.line(format!("----------------------------------{percent:.2}% complete"))?;
            log.line(ct_segment(ct))?;
            info!(ct, "sweep {percent:.1}% complete");
            self.last_at = None;
            self.last_css = None;

            let combos = grid.block(ct);
            let outcomes = self.evaluate_block(&combos, pool.as_ref());
            for (offset, (combo, outcome)) in combos.into_iter().zip(outcomes).enumerate() {
                self.record(started + offset, combo, outcome, log)?;
            }
        }

        log.line(" ")?;
        Ok(())
    }

    /// Fold one evaluated combination into the sweep state.
    ///
    /// With `FailurePolicy::Abort` a failure is returned as an error; the best
    /// result found so far is left untouched either way.
    pub fn record<W: Write>(
        &mut self,
        index: usize,
        combo: ParamCombo,
        outcome: Result<f64, EvalError>,
        log: &mut RunLog<W>,
    ) -> Result<(), SweepError> {
        self.log_descent(&combo, log)?;
        let path = candidate_path(&combo);

        match outcome {
            Ok(error) => {
                let result = EvalResult {
                    index,
                    combo,
                    path,
                    error,
                };
                if self.tracker.offer(&result) {
                    log.line(format!("New min error found {} for {}", result.error, result.path))?;
                    info!(error = result.error, path = %result.path, "new minimum");
                } else {
                    debug!(error = result.error, path = %result.path, "evaluated");
                }
                self.evaluated.push(result);
                Ok(())
            }
            Err(source) => match self.options.failure_policy {
                FailurePolicy::Abort => {
                    log.line(format!("Aborting at {path}: {source}"))?;
                    Err(SweepError::Combination { path, source })
                }
                FailurePolicy::Skip => {
                    let reason = source.to_string();
                    log.line(format!("Skipped {path}: {reason}"))?;
                    warn!(path = %path, %reason, "skipping combination");
                    self.skipped.push(SkippedCombo {
                        index,
                        combo,
                        path,
                        reason,
                    });
                    Ok(())
                }
            },
        }
    }

    pub fn into_outcome(self, total_jobs: usize) -> SweepOutcome {
        SweepOutcome {
            best: self.tracker.into_best(),
            evaluated: self.evaluated,
            skipped: self.skipped,
            total_jobs,
        }
    }

    fn evaluate_block(&self, combos: &[ParamCombo], pool: Option<&ThreadPool>) -> Vec<Result<f64, EvalError>> {
        match pool {
            Some(pool) => pool.install(|| combos.par_iter().map(|c| self.evaluate(c)).collect()),
            None => combos.iter().map(|c| self.evaluate(c)).collect(),
        }
    }

    fn evaluate(&self, combo: &ParamCombo) -> Result<f64, EvalError> {
        let path = candidate_path(combo);
        let candidate = self.source.load(combo, &path)?;
        score_candidate(self.reference, &candidate)
    }

    fn log_descent<W: Write>(&mut self, combo: &ParamCombo, log: &mut RunLog<W>) -> Result<(), SweepError> {
        if self.last_at != Some(combo.at) {
            log.line(format!("  {}", at_segment(combo.at)))?;
            self.last_at = Some(combo.at);
            self.last_css = None;
        }
        if self.last_css != Some(combo.css) {
            log.line(format!("    {}", css_segment(combo.css)))?;
            self.last_css = Some(combo.css);
        }
        Ok(())
    }
}

fn build_pool(jobs: usize) -> Result<Option<ThreadPool>, SweepError> {
    if jobs <= 1 {
        return Ok(None);
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    Ok(Some(pool))
}
