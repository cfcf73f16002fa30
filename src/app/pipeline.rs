//! Shared sweep workflow:
//! reference file -> simulation tree -> sweep -> run log -> outcome
//!
//! Kept apart from `app` so the same workflow can be driven from tests with a
//! temporary directory tree.

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::domain::{ParamGrid, Series, SweepConfig, SweepSummary};
use crate::error::AppError;
use crate::io::log::RunLog;
use crate::io::series::{SeriesFormat, read_series_file};
use crate::io::tree::SimulationTree;
use crate::sweep::{SweepOptions, SweepOutcome};

/// Parse the experimental reference curve (done once per run).
pub fn load_reference(path: &Path) -> Result<Series, AppError> {
    read_series_file(path, SeriesFormat::Experimental).map_err(|e| {
        AppError::new(
            e.exit_code(),
            format!("Experimental file '{}': {e}", path.display()),
        )
    })
}

/// Execute a full sweep as configured.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepOutcome, AppError> {
    let reference = load_reference(&config.experimental_path)?;
    info!(points = reference.len(), path = %config.experimental_path.display(), "loaded reference");

    let tree = SimulationTree::new(&config.root, config.simulation_file.clone());

    match &config.log_dir {
        Some(dir) => {
            let log = RunLog::create_in(dir).map_err(|e| {
                AppError::new(2, format!("Failed to create run log in '{}': {e}", dir.display()))
            })?;
            if let Some(path) = log.path() {
                info!(path = %path.display(), "writing run log");
            }
            sweep_with_log(config, &reference, &tree, log)
        }
        None => {
            let log = RunLog::from_writer(io::sink())
                .map_err(|e| AppError::new(2, format!("Failed to start run log: {e}")))?;
            sweep_with_log(config, &reference, &tree, log)
        }
    }
}

fn sweep_with_log<W: Write>(
    config: &SweepConfig,
    reference: &Series,
    tree: &SimulationTree,
    mut log: RunLog<W>,
) -> Result<SweepOutcome, AppError> {
    let options = SweepOptions {
        jobs: config.jobs,
        failure_policy: config.failure_policy,
    };
    let result = crate::sweep::run_sweep(&config.grid, reference, tree, options, &mut log);

    // The log is closed out even when the sweep aborts.
    let closing = match &result {
        Ok(outcome) => close_log(&mut log, outcome),
        Err(e) => log.line(format!("Sweep aborted: {e}")),
    };
    let finished = closing
        .and_then(|()| log.line("Program finished"))
        .and_then(|()| log.finish().map(|_| ()));

    let outcome = result?;
    finished.map_err(|e| AppError::new(2, format!("Failed to write run log: {e}")))?;
    Ok(outcome)
}

fn close_log<W: Write>(log: &mut RunLog<W>, outcome: &SweepOutcome) -> io::Result<()> {
    log.line(format!(
        "Evaluated {} of {} combinations, skipped {}",
        outcome.evaluated.len(),
        outcome.total_jobs,
        outcome.skipped.len()
    ))?;
    match &outcome.best {
        Some(best) => log.line(format!("Best combination {} with error {}", best.path, best.error)),
        None => log.line("No combination could be evaluated"),
    }
}

/// Summary written by `--export-best`.
pub fn build_summary(grid: &ParamGrid, outcome: &SweepOutcome) -> SweepSummary {
    SweepSummary {
        tool: "cfsweep".to_string(),
        finished_at: chrono::Local::now(),
        grid: grid.clone(),
        total_jobs: outcome.total_jobs,
        evaluated: outcome.evaluated.len(),
        skipped: outcome.skipped.len(),
        best: outcome.best.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{FailurePolicy, ParamCombo};
    use crate::grid::candidate_path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cf-sweep-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Simulation file whose cf is `level` everywhere on Rex in [0, 3e5].
    fn write_simulation(root: &Path, combo: &ParamCombo, level: f64) {
        let dir = root.join(candidate_path(combo));
        fs::create_dir_all(&dir).unwrap();
        let mut text = String::from("TITLE\nVARIABLES\nZONE\n");
        for raw in [0.07, 0.17, 0.27, 0.37] {
            text.push_str(&format!("{raw} 0.0 {level}\n"));
        }
        fs::write(dir.join("di_uduct.tec"), text).unwrap();
    }

    fn config(root: &Path, grid: ParamGrid, policy: FailurePolicy) -> SweepConfig {
        SweepConfig {
            root: root.to_path_buf(),
            experimental_path: root.join("t3a_exp.tec"),
            simulation_file: "di_uduct.tec".to_string(),
            grid,
            jobs: 1,
            failure_policy: policy,
            log_dir: Some(root.join("logs")),
            top_n: 3,
            export_results: None,
            export_best: None,
        }
    }

    #[test]
    fn end_to_end_sweep_over_directory_tree() {
        let root = scratch_dir("pipeline");
        fs::write(
            root.join("t3a_exp.tec"),
            "Rex,cf\n50000,0.004\n150000,0.004\n250000,0.004\n",
        )
        .unwrap();

        let grid = ParamGrid {
            ct: vec![3.0, 4.0],
            at: vec![1.0],
            css: vec![0.5, 1.0],
            a2: vec![0.4],
        };
        let levels = [0.006, 0.0041, 0.005];
        for (combo, level) in grid.combinations().zip(levels) {
            write_simulation(&root, &combo, level);
        }
        // The fourth combination (Ct 4.0 / Css 1.0) is left missing.

        let cfg = config(&root, grid.clone(), FailurePolicy::Skip);
        let outcome = run_sweep(&cfg).unwrap();

        let best = outcome.best.clone().unwrap();
        assert_eq!(best.path, "Ct_=_3.0/At_=_1.0/Css_=_1.0/a2_=_0.4");
        let expected = (3.0 * 0.0001_f64.powi(2)).sqrt() / 3.0;
        assert!((best.error - expected).abs() < 1e-12);
        assert_eq!(outcome.evaluated.len(), 3);
        assert_eq!(outcome.skipped.len(), 1);

        let logs: Vec<PathBuf> = fs::read_dir(root.join("logs"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(logs.len(), 1);
        let text = fs::read_to_string(&logs[0]).unwrap();
        assert!(text.contains("amount of jobs = 4"));
        assert!(text.contains("Skipped Ct_=_4.0/At_=_1.0/Css_=_1.0/a2_=_0.4"));
        assert!(text.contains("Best combination Ct_=_3.0/At_=_1.0/Css_=_1.0/a2_=_0.4"));
        assert!(text.trim_end().ends_with("-- Program finished"));

        let summary = build_summary(&grid, &outcome);
        assert_eq!(summary.best, Some(best));
        assert_eq!(summary.skipped, 1);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn strict_sweep_aborts_and_still_closes_log() {
        let root = scratch_dir("pipeline-strict");
        fs::write(root.join("t3a_exp.tec"), "Rex,cf\n50000,0.004\n").unwrap();

        let grid = ParamGrid {
            ct: vec![3.0],
            at: vec![1.0],
            css: vec![0.5],
            a2: vec![0.4],
        };
        let err = run_sweep(&config(&root, grid, FailurePolicy::Abort)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("file not found"));

        let log = fs::read_dir(root.join("logs")).unwrap().next().unwrap().unwrap().path();
        let text = fs::read_to_string(log).unwrap();
        assert!(text.contains("Sweep aborted"));
        assert!(text.contains("Program finished"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn empty_axis_is_reported_by_the_sweep() {
        let root = scratch_dir("pipeline-grid");
        fs::write(root.join("t3a_exp.tec"), "Rex,cf\n50000,0.004\n").unwrap();

        let mut grid = ParamGrid::default();
        grid.css.clear();
        let err = run_sweep(&config(&root, grid, FailurePolicy::Skip)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("invalid css axis"));

        let log = fs::read_dir(root.join("logs")).unwrap().next().unwrap().unwrap().path();
        let text = fs::read_to_string(log).unwrap();
        assert!(text.contains("Sweep aborted"));
        assert!(!text.contains("amount of jobs"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn missing_reference_is_fatal() {
        let root = scratch_dir("pipeline-noref");
        let err = run_sweep(&config(&root, ParamGrid::default(), FailurePolicy::Skip)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Experimental file"));
        fs::remove_dir_all(&root).unwrap();
    }
}
