//! End-of-run summary.

use colored::Colorize;
use listing_core::{PackageOutcome, RunReport};

/// Print one line per package and the totals.
pub fn print(report: &RunReport) {
    println!();
    for package in &report.packages {
        let origin = format!("{}@{}", package.repository, package.git_ref);
        match &package.outcome {
            PackageOutcome::Produced(artifact) => println!(
                "{} {} {} ({} bytes, sha256:{})",
                "✓".green().bold(),
                artifact.id.bold(),
                origin.dimmed(),
                artifact.size,
                artifact.sha256
            ),
            PackageOutcome::Skipped(reason) => println!(
                "{} {} skipped: {}",
                "✗".yellow().bold(),
                origin,
                reason
            ),
        }
    }
    println!(
        "\n{} {} packaged, {} skipped",
        "Done:".green().bold(),
        report.produced_count(),
        report.skipped_count()
    );
}
