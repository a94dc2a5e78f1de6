use serde::Serialize;

use crate::report::RankedTable;

// Set2 qualitative palette, cycled per category.
pub const PALETTE: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

fn palette_color(index: usize) -> String {
    PALETTE[index % PALETTE.len()].to_string()
}

/// Axis title from a column name: underscores to spaces, each word
/// capitalized. "free_kick_accuracy" becomes "Free Kick Accuracy".
pub fn title_case(column: &str) -> String {
    column
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A rendering request. Computation ends at this value; whoever consumes it
/// (console, JSON document, an actual plotting frontend) decides how it is
/// displayed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar {
        title: String,
        x_title: String,
        y_title: String,
        value_labels: bool,
        bars: Vec<Bar>,
    },
    Pie {
        title: String,
        slices: Vec<Slice>,
    },
    Scatter {
        title: String,
        x_title: String,
        y_title: String,
        points: Vec<Point>,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Bar chart over a ranked table: x = group identity, y = aggregated value,
/// one palette color per group, value labels on.
pub fn bar_chart(title: &str, table: &RankedTable) -> ChartSpec {
    ChartSpec::Bar {
        title: title.to_string(),
        x_title: title_case(&table.group_column),
        y_title: title_case(&table.value_column),
        value_labels: true,
        bars: table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| Bar {
                label: row.group.clone(),
                value: row.value,
                color: palette_color(i),
            })
            .collect(),
    }
}

pub fn pie_chart<I>(title: &str, slices: I) -> ChartSpec
where
    I: IntoIterator<Item = (String, f64)>,
{
    ChartSpec::Pie {
        title: title.to_string(),
        slices: slices
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| Slice {
                label,
                value,
                color: palette_color(i),
            })
            .collect(),
    }
}

pub fn scatter_chart(title: &str, x_column: &str, y_column: &str, points: Vec<Point>) -> ChartSpec {
    ChartSpec::Scatter {
        title: title.to_string(),
        x_title: title_case(x_column),
        y_title: title_case(y_column),
        points,
    }
}
