//! Summary output

use clap::ValueEnum;
use colored::Colorize;
use geolabel_core::{PassSummary, UpdateOutcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn print_summary(summary: &PassSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary).unwrap_or_default());
        }
        OutputFormat::Table => {
            println!("labeled {} of {} nodes", summary.applied, summary.total());
            println!("  applied:           {}", summary.applied);
            println!("  resolution failed: {}", summary.resolution_failed);
            println!("  lookup failed:     {}", summary.lookup_failed);
            println!("  patch failed:      {}", summary.patch_failed);
            for entry in &summary.outcomes {
                if entry.outcome != UpdateOutcome::Applied {
                    println!("  {}: {}", entry.node, entry.outcome.to_string().as_str().red());
                }
            }
            if summary.succeeded() {
                println!("{}", "all nodes labeled".green());
            } else {
                let failed = summary.total() - summary.applied;
                println!("{}", format!("{} nodes failed", failed).as_str().red());
            }
        }
    }
}
