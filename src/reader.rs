//! Gradebook intake: workbook/CSV loading, header mapping, row parsing.
//!
//! Both file formats funnel into the same shape, a header row plus string
//! rows, so column mapping, filtering, parsing and validation run the same
//! way regardless of source.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, warn};

use crate::model::{Component, StudentRecord};
use crate::validate;

/// Column holding the student identifier.
pub const ID_COLUMN: &str = "CampusID";
/// Column holding the class/section label.
pub const CLASS_COLUMN: &str = "ClassNo.";

/// Columns that must be present in the header row. Absence of any of them
/// is a fatal precondition failure.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    ID_COLUMN,
    CLASS_COLUMN,
    "Quiz",
    "MidSem",
    "LabTest",
    "WeeklyLabs",
    "PreCompre",
    "Compre",
    "Total",
];

/// Intake options supplied by the CLI.
#[derive(Debug, Default, Clone)]
pub struct ReadOptions {
    /// Only keep rows whose class label matches. Applied during intake,
    /// before validation and aggregation.
    pub class_filter: Option<String>,
    /// Collect a diagnostic per malformed non-empty numeric cell instead of
    /// only defaulting it to 0.
    pub strict_parse: bool,
}

/// Records plus the diagnostics collected during intake, in input order.
#[derive(Debug)]
pub struct Intake {
    pub records: Vec<StudentRecord>,
    pub diagnostics: Vec<String>,
}

/// Loads a gradebook file and turns it into validated records.
///
/// `.csv` goes through the csv crate; everything else is handed to calamine,
/// which accepts the Excel family (xlsx, xls, ods) and rejects the rest.
///
/// # Errors
///
/// Fails on an unreadable file, an empty sheet, or a missing required column.
pub fn read_gradebook(path: &Path, opts: &ReadOptions) -> Result<Intake> {
    let rows = match path.extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => load_csv(path)?,
        _ => load_workbook(path)?,
    };
    debug!(path = %path.display(), rows = rows.len(), "Gradebook rows loaded");
    parse_rows(rows, opts)
}

fn load_workbook(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        bail!("the workbook has no sheets");
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet '{sheet_name}'"))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn load_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Renders a spreadsheet cell the way it would appear in a CSV export.
/// Whole floats print without the fractional part so integer scores stored
/// as floats still parse.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}

fn parse_rows(rows: Vec<Vec<String>>, opts: &ReadOptions) -> Result<Intake> {
    let Some((header, body)) = rows.split_first() else {
        bail!("the sheet is empty");
    };

    let mut index_map: HashMap<&str, usize> = HashMap::new();
    for (i, name) in header.iter().enumerate() {
        index_map.insert(name.trim(), i);
    }
    for column in REQUIRED_COLUMNS {
        if !index_map.contains_key(column) {
            bail!("missing required column: {column}");
        }
    }

    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    for row in body {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |name: &str| {
            row.get(index_map[name])
                .map(String::as_str)
                .unwrap_or("")
                .trim()
        };

        let campus_id = cell(ID_COLUMN);
        let class_no = cell(CLASS_COLUMN);
        if let Some(filter) = &opts.class_filter {
            if class_no != filter {
                continue;
            }
        }

        let mut score = |component: Component| {
            parse_score(
                cell(component.name()),
                campus_id,
                component,
                opts.strict_parse,
                &mut diagnostics,
            )
        };

        let quiz = score(Component::Quiz);
        let mid_sem = score(Component::MidSem);
        let lab_test = score(Component::LabTest);
        let weekly_labs = score(Component::WeeklyLabs);
        let pre_compre = score(Component::PreCompre);
        let compre = score(Component::Compre);
        let total = score(Component::Total);

        let record = StudentRecord::new(
            campus_id,
            class_no,
            quiz,
            mid_sem,
            lab_test,
            weekly_labs,
            pre_compre,
            compre,
            total,
        );
        if let Some(diagnostic) = validate::validate(&record) {
            diagnostics.push(diagnostic);
        }
        records.push(record);
    }

    Ok(Intake {
        records,
        diagnostics,
    })
}

/// Parses one numeric cell. Unparsable cells become 0; in strict mode each
/// malformed non-empty cell also yields a diagnostic.
fn parse_score(
    raw: &str,
    campus_id: &str,
    component: Component,
    strict: bool,
    diagnostics: &mut Vec<String>,
) -> i64 {
    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            if !raw.is_empty() {
                if strict {
                    diagnostics.push(format!(
                        "Error: Unparsable {} for CAMPUSID {} -> '{}' treated as 0",
                        component.name(),
                        campus_id,
                        raw
                    ));
                } else {
                    warn!(
                        campus_id,
                        component = component.name(),
                        raw,
                        "Unparsable cell treated as 0"
                    );
                }
            }
            0
        }
    }
}
