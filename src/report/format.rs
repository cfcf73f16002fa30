//! Terminal output formatting.
//!
//! Formatting lives here so the sweep code stays free of presentation and
//! output changes stay localized.

use crate::domain::{EvalResult, ParamGrid, Series, SkippedCombo, SweepConfig};
use crate::grid::format_param;
use crate::sweep::SweepOutcome;

/// Maximum skipped combinations listed individually.
const MAX_SKIPPED_LISTED: usize = 20;

/// Full run summary: grids, counts, best combination, top-N, skipped.
pub fn format_sweep_summary(config: &SweepConfig, outcome: &SweepOutcome) -> String {
    let mut out = String::new();

    out.push_str("=== cfsweep - skin-friction constant sweep ===\n");
    out.push_str(&format!("Root: {}\n", config.root.display()));
    out.push_str(&format!("Reference: {}\n", config.experimental_path.display()));
    out.push_str(&format_grid(&config.grid));
    out.push_str(&format!(
        "Jobs: total={} | evaluated={} | skipped={} | workers={}\n",
        outcome.total_jobs,
        outcome.evaluated.len(),
        outcome.skipped.len(),
        config.jobs.max(1)
    ));

    out.push_str("\nBest combination:\n");
    match &outcome.best {
        Some(best) => {
            out.push_str(&format!(
                "- Ct={} At={} Css={} a2={}\n",
                format_param(best.combo.ct),
                format_param(best.combo.at),
                format_param(best.combo.css),
                format_param(best.combo.a2)
            ));
            out.push_str(&format!("- path : {}\n", best.path));
            out.push_str(&format!("- error: {:.6e}\n", best.error));
        }
        None => out.push_str("- none (no combination could be evaluated)\n"),
    }

    if config.top_n > 0 && !outcome.evaluated.is_empty() {
        out.push_str(&format!("\nTop {} combinations:\n", config.top_n));
        out.push_str(&format_top_table(&outcome.top(config.top_n)));
    }

    if !outcome.skipped.is_empty() {
        out.push_str(&format!("\nSkipped combinations ({}):\n", outcome.skipped.len()));
        out.push_str(&format_skipped(&outcome.skipped));
    }

    out
}

pub fn format_grid(grid: &ParamGrid) -> String {
    format!(
        "Ct : {}\nAt : {}\nCss: {}\na2 : {}\n",
        fmt_axis(&grid.ct),
        fmt_axis(&grid.at),
        fmt_axis(&grid.css),
        fmt_axis(&grid.a2)
    )
}

/// Ranked results table.
pub fn format_top_table(rows: &[EvalResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>8} {:>8} {:>8} {:>8} {:>14}\n",
        "rank", "Ct", "At", "Css", "a2", "error"
    ));
    out.push_str(&format!(
        "{:-<4} {:-<8} {:-<8} {:-<8} {:-<8} {:-<14}\n",
        "", "", "", "", "", ""
    ));
    for (rank, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>8} {:>8} {:>8} {:>8} {:>14.6e}\n",
            rank + 1,
            format_param(r.combo.ct),
            format_param(r.combo.at),
            format_param(r.combo.css),
            format_param(r.combo.a2),
            r.error
        ));
    }
    out
}

fn format_skipped(skipped: &[SkippedCombo]) -> String {
    let mut out = String::new();
    for s in skipped.iter().take(MAX_SKIPPED_LISTED) {
        out.push_str(&format!("- {}: {}\n", s.path, s.reason));
    }
    if skipped.len() > MAX_SKIPPED_LISTED {
        out.push_str(&format!("- ... and {} more\n", skipped.len() - MAX_SKIPPED_LISTED));
    }
    out
}

/// Side-by-side reference vs aligned candidate for a single combination.
pub fn format_alignment(path: &str, reference: &Series, aligned: &[f64], error: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("Combination: {path}\n"));
    out.push_str(&format!(
        "{:>14} {:>14} {:>14} {:>14}\n",
        "Rex", "cf_exp", "cf_sim", "diff"
    ));
    out.push_str(&format!("{:-<14} {:-<14} {:-<14} {:-<14}\n", "", "", "", ""));
    for ((x, y_ref), y_sim) in reference.x.iter().zip(&reference.y).zip(aligned) {
        out.push_str(&format!(
            "{:>14.1} {:>14.6e} {:>14.6e} {:>14.6e}\n",
            x,
            y_ref,
            y_sim,
            y_sim - y_ref
        ));
    }
    out.push_str(&format!("\nerror = {error:.6e}\n"));
    out
}

fn fmt_axis(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format_param(*v)).collect();
    format!("[{}] ({} values)", parts.join(", "), values.len())
}
