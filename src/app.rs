//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves them into a `SweepConfig`
//! - runs the sweep (or a single evaluation)
//! - prints reports and writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::cli::{Command, EvalArgs, InputArgs, SweepArgs};
use crate::domain::{FailurePolicy, ParamCombo, ParamGrid, Series, SweepConfig};
use crate::error::{AppError, EvalError};
use crate::grid::candidate_path;
use crate::io::tree::{SimulationTree, resolve_root};
use crate::math::align;
use crate::sweep::{CandidateSource, score_aligned};

pub mod pipeline;

/// Entry point for the `cfsweep` binary.
pub fn run() -> Result<(), AppError> {
    // `cfsweep` and `cfsweep --ct 3,4` behave like `cfsweep sweep ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Sweep(args) => handle_sweep(args),
        Command::Eval(args) => handle_eval(args),
    }
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(&args)?;
    let outcome = pipeline::run_sweep(&config)?;

    println!("{}", crate::report::format_sweep_summary(&config, &outcome));

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &outcome)?;
        info!(path = %path.display(), "wrote results CSV");
    }
    if let Some(path) = &config.export_best {
        let summary = pipeline::build_summary(&config.grid, &outcome);
        crate::io::export::write_summary_json(path, &summary)?;
        info!(path = %path.display(), "wrote summary JSON");
    }

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let (root, experimental_path) = resolve_inputs(&args.input)?;
    let reference = pipeline::load_reference(&experimental_path)?;

    let combo = ParamCombo {
        ct: args.ct,
        at: args.at,
        css: args.css,
        a2: args.a2,
    };
    let tree = SimulationTree::new(root, args.input.sim_file.clone());
    let (path, aligned, error) = evaluate_combination(&tree, &reference, &combo)?;

    println!(
        "{}",
        crate::report::format_alignment(&path, &reference, &aligned, error)
    );
    Ok(())
}

/// Load, align and score one combination, keeping the aligned values for display.
fn evaluate_combination<S: CandidateSource>(
    source: &S,
    reference: &Series,
    combo: &ParamCombo,
) -> Result<(String, Vec<f64>, f64), AppError> {
    let path = candidate_path(combo);
    let with_path = |e: EvalError| AppError::new(e.exit_code(), format!("{path}: {e}"));

    let candidate = source.load(combo, &path).map_err(with_path)?;
    let aligned = align(&candidate, &reference.x).map_err(with_path)?;
    let error = score_aligned(reference, &aligned).map_err(with_path)?;
    Ok((path, aligned, error))
}

/// Build the sweep configuration from parsed arguments.
pub fn sweep_config_from_args(args: &SweepArgs) -> Result<SweepConfig, AppError> {
    let (root, experimental_path) = resolve_inputs(&args.input)?;

    let grid = ParamGrid {
        ct: args.ct.0.clone(),
        at: args.at.0.clone(),
        css: args.css.0.clone(),
        a2: args.a2.0.clone(),
    };
    grid.validate()?;

    Ok(SweepConfig {
        root,
        experimental_path,
        simulation_file: args.input.sim_file.clone(),
        grid,
        jobs: args.jobs.max(1),
        failure_policy: if args.strict {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Skip
        },
        log_dir: if args.no_log {
            None
        } else {
            Some(args.log_dir.clone())
        },
        top_n: args.top,
        export_results: args.export.clone(),
        export_best: args.export_best.clone(),
    })
}

/// Root directory plus the experimental file resolved against it.
fn resolve_inputs(input: &InputArgs) -> Result<(PathBuf, PathBuf), AppError> {
    let root = resolve_root(input.root.clone())?;
    let experimental_path = resolve_against(&root, &input.experimental);
    Ok((root, experimental_path))
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Rewrite argv so `cfsweep` defaults to `cfsweep sweep`.
///
/// Rules:
/// - `cfsweep`                      -> `cfsweep sweep`
/// - `cfsweep --ct 3,4 ...`         -> `cfsweep sweep --ct 3,4 ...`
/// - `cfsweep --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("sweep".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "sweep" | "eval");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "sweep flags".
    if arg1.starts_with('-') {
        argv.insert(1, "sweep".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_sweep() {
        assert_eq!(rewrite_args(argv(&["cfsweep"])), argv(&["cfsweep", "sweep"]));
        assert_eq!(
            rewrite_args(argv(&["cfsweep", "--ct", "3"])),
            argv(&["cfsweep", "sweep", "--ct", "3"])
        );
        assert_eq!(
            rewrite_args(argv(&["cfsweep", "eval", "--ct", "3"])),
            argv(&["cfsweep", "eval", "--ct", "3"])
        );
        assert_eq!(rewrite_args(argv(&["cfsweep", "--help"])), argv(&["cfsweep", "--help"]));
    }

    #[test]
    fn config_from_args_resolves_paths_and_policy() {
        let cli = crate::cli::Cli::parse_from([
            "cfsweep", "sweep", "--root", "/runs", "--ct", "3,4", "--strict", "--no-log", "-j", "0",
        ]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        let config = sweep_config_from_args(&args).unwrap();
        assert_eq!(config.root, PathBuf::from("/runs"));
        assert_eq!(config.experimental_path, PathBuf::from("/runs/t3a_exp.tec"));
        assert_eq!(config.grid.ct, vec![3.0, 4.0]);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert!(config.log_dir.is_none());
        assert_eq!(config.jobs, 1);
    }

    /// Serves the same candidate for every combination.
    struct FixedSource(Series);

    impl CandidateSource for FixedSource {
        fn load(&self, _combo: &ParamCombo, _path: &str) -> Result<Series, EvalError> {
            Ok(self.0.clone())
        }
    }

    fn combo() -> ParamCombo {
        ParamCombo {
            ct: 3.0,
            at: 1.0,
            css: 0.5,
            a2: 0.4,
        }
    }

    #[test]
    fn eval_scores_like_the_sweep() {
        let reference = Series::new(vec![0.0, 10.0], vec![0.0, 0.0]).unwrap();
        let source = FixedSource(Series::new(vec![0.0, 10.0], vec![1.0, 1.0]).unwrap());
        let (path, aligned, error) = evaluate_combination(&source, &reference, &combo()).unwrap();
        assert_eq!(path, "Ct_=_3.0/At_=_1.0/Css_=_0.5/a2_=_0.4");
        assert_eq!(aligned, vec![1.0, 1.0]);
        assert!((error - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn eval_rejects_non_finite_error() {
        let reference = Series::new(vec![0.0, 10.0], vec![0.0, 0.0]).unwrap();
        let source = FixedSource(Series::new(vec![0.0, 10.0], vec![f64::INFINITY, 1.0]).unwrap());
        let err = evaluate_combination(&source, &reference, &combo()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("Ct_=_3.0/At_=_1.0/Css_=_0.5/a2_=_0.4: "));
    }

    #[test]
    fn absolute_experimental_path_is_kept() {
        assert_eq!(
            resolve_against(Path::new("/runs"), Path::new("/data/exp.tec")),
            PathBuf::from("/data/exp.tec")
        );
    }
}
