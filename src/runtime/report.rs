//! Text rendering of scan and organize results for the terminal.

use crate::library::ScanReport;
use crate::organize::{OrganizePlan, Outcome, Progress, RunReport, RunState};

pub fn scan_summary(report: &ScanReport) -> String {
    let mut line = format!(
        "{} tracks indexed, {} skipped",
        report.indexed,
        report.skipped.len()
    );
    if report.removed > 0 {
        line.push_str(&format!(", {} removed", report.removed));
    }
    line
}

pub fn skipped_lines(report: &ScanReport) -> Vec<String> {
    report
        .skipped
        .iter()
        .map(|s| format!("skipped {}: {}", s.path.display(), s.reason))
        .collect()
}

pub fn plan_lines(plan: &OrganizePlan) -> Vec<String> {
    plan.entries()
        .iter()
        .map(|e| format!("{} -> {}", e.source.display(), e.destination.display()))
        .collect()
}

pub fn progress_line(p: &Progress) -> String {
    let status = match &p.outcome {
        Outcome::Success => "ok".to_string(),
        Outcome::Failed(err) => format!("failed: {err}"),
    };
    format!(
        "[{}/{}] {} -> {} ({status})",
        p.completed,
        p.total,
        p.entry.source.display(),
        p.entry.destination.display()
    )
}

pub fn run_summary(report: &RunReport) -> String {
    match (&report.state, &report.error) {
        (RunState::Failed, Some(err)) => format!("organize failed: {err}"),
        (state, _) => format!(
            "organize {state}: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        ),
    }
}
