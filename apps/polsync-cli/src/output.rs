//! Terminal output for plans, run statistics and validation reports.

use serde::Serialize;

use polsync_engine::{
    OperationKind, PlannedOperation, ReconciliationPlan, RunStatistics, ValidationReport,
};

use crate::error::CliResult;

const RESET: &str = "\x1b[0m";

fn use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

fn color(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Create => "\x1b[32m", // Green
        OperationKind::Update => "\x1b[33m", // Yellow
        OperationKind::Delete => "\x1b[31m", // Red
    }
}

/// Print the command banner.
pub fn banner(title: &str) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("  polsync {} - {title}", env!("CARGO_PKG_VERSION"));
    println!("{rule}");
    println!();
}

/// One plan line without color, e.g. `~ Update ReadOnly (Statement)`.
pub fn format_operation(op: &PlannedOperation) -> String {
    let kind = op.kind();
    let mut line = format!("{} {} {}", kind.symbol(), kind.label(), op.name());
    let keys = op.changed_keys();
    if !keys.is_empty() {
        line.push_str(&format!(" ({})", keys.join(", ")));
    }
    line
}

/// Print planned operations followed by the summary line.
pub fn print_plan(plan: &ReconciliationPlan) {
    if plan.is_empty() {
        println!("No changes required. Remote policies are up to date.");
        println!();
        println!("Summary: {}", plan.summary());
        return;
    }

    println!("Planned changes:");
    let colored = use_color();
    for op in plan.operations() {
        let line = format_operation(op);
        if colored {
            let (symbol, rest) = line.split_at(1);
            println!("  {}{symbol}{RESET}{rest}", color(op.kind()));
        } else {
            println!("  {line}");
        }
    }

    println!();
    println!("Summary: {}", plan.summary());
    println!();
}

/// Print the outcome of an applied plan.
pub fn print_statistics(stats: &RunStatistics) {
    let total = stats.applied();
    if total > 0 {
        println!("Applied {total} change(s) successfully.");
    }
    println!("{stats}");
}

/// Print surfaced warnings and the report summary.
pub fn print_report(report: &ValidationReport) {
    if report.has_warnings() {
        let (start, end) = if use_color() {
            ("\x1b[33m", RESET)
        } else {
            ("", "")
        };
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {start}!{end} {warning}");
            if let Some(link) = &warning.learn_more_link {
                println!("    {link}");
            }
        }
        println!();
    }
    println!("{report}");
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
