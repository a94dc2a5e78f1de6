use std::fs::File;
use std::path::{Path, PathBuf};

use crate::chart::ChartSpec;
use crate::error::AnalysisError;
use crate::report::RankedTable;

/// A table ready for display: header labels plus pre-formatted cells.
/// Computation never reads this back.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&RankedTable> for Table {
    fn from(table: &RankedTable) -> Self {
        Table {
            columns: vec![table.group_column.clone(), table.value_column.clone()],
            rows: table
                .rows
                .iter()
                .map(|row| vec![row.group.clone(), format!("{:.0}", row.value)])
                .collect(),
        }
    }
}

pub fn print_heading(heading: &str) {
    println!();
    println!("### {heading}");
}

pub fn print_table(table: &Table) {
    let mut header = String::new();
    for (i, column) in table.columns.iter().enumerate() {
        if i == 0 {
            header.push_str(&format!("|     | {column:28} "));
        } else {
            header.push_str(&format!("| {column:>12} "));
        }
    }
    println!("{header}");

    for (i, row) in table.rows.iter().enumerate() {
        let mut line = format!("|{:3}. ", i + 1);
        for (j, cell) in row.iter().enumerate() {
            if j == 0 {
                line.push_str(&format!("| {cell:28} "));
            } else {
                line.push_str(&format!("| {cell:>12} "));
            }
        }
        println!("{line}");
    }
}

/// Writes one chart specification as a pretty-printed JSON document named
/// after the question. Returns the path it landed at.
pub fn write_chart(dir: &Path, slug: &str, chart: &ChartSpec) -> Result<PathBuf, AnalysisError> {
    let path = dir.join(format!("{slug}.json"));
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, chart)?;
    Ok(path)
}
