//! Report rendering and JSON export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::report::types::Report;

/// Name of the JSON export, written to the working directory.
pub const EXPORT_FILE: &str = "report.json";

/// Prints the report to stdout. Sections follow the declared component
/// order; the error section only appears when diagnostics exist.
pub fn print_report(report: &Report) {
    println!("Summary Report:");
    println!("Overall Averages:");
    for (component, avg) in &report.averages {
        println!(" {}: {:.2}", component.name(), avg);
    }

    println!("\nBranch-wise Averages (Total Scores):");
    for (branch, avg) in &report.branch_averages {
        println!(" Branch {}: {:.2}", branch, avg);
    }

    println!("\nTop 3 Rankings per Component:");
    for (component, entries) in &report.rankings {
        println!(" {}:", component.name());
        for entry in entries {
            println!("  {} - {} ({})", entry.campus_id, entry.score, entry.rank);
        }
    }

    if !report.errors.is_empty() {
        println!("\nData Validation Errors:");
        for message in &report.errors {
            println!("  {}", message);
        }
    }
}

/// Serializes the report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the JSON export as [`EXPORT_FILE`] under `dir`.
pub fn export_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILE);
    let json = to_json(report)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;
    use crate::report::types::RankingEntry;

    fn sample_report() -> Report {
        Report {
            averages: vec![(Component::Quiz, 12.5)],
            branch_averages: [("A7".to_string(), 60.0)].into_iter().collect(),
            rankings: vec![(
                Component::Quiz,
                vec![RankingEntry {
                    campus_id: "2021A7PS0001G".to_string(),
                    score: 25,
                    rank: "1st",
                }],
            )],
            errors: vec!["Error: Mismatch for CAMPUSID X -> Expected 1, Found 2".to_string()],
        }
    }

    #[test]
    fn test_print_report_does_not_panic() {
        print_report(&sample_report());
        print_report(&Report::default());
    }

    #[test]
    fn test_to_json_top_level_key_order() {
        let json = to_json(&sample_report()).unwrap();
        let averages = json.find("\"Averages\"").unwrap();
        let branches = json.find("\"BranchAverages\"").unwrap();
        let rankings = json.find("\"Rankings\"").unwrap();
        let errors = json.find("\"Errors\"").unwrap();
        assert!(averages < branches && branches < rankings && rankings < errors);
    }

    #[test]
    fn test_export_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_report(&sample_report(), dir.path()).unwrap();

        assert!(path.ends_with(EXPORT_FILE));
        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["Averages"]["Quiz"], 12.5);
        assert_eq!(value["BranchAverages"]["A7"], 60.0);
        assert_eq!(value["Rankings"]["Quiz"][0]["Rank"], "1st");
        assert_eq!(value["Errors"].as_array().unwrap().len(), 1);
    }
}
