//! The ranked-attribute reporter: group a metric (or a composite of several
//! columns) by an identity column, aggregate, and keep the top N.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::chart::{self, ChartSpec};
use crate::error::AnalysisError;
use crate::record::{numeric_column, categorical_column, NumericAccessor, PlayerRecord};
use crate::stats;

/// Per-group aggregation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Max,
    Mean,
    Min,
    Sum,
}

impl Statistic {
    // Group buckets are never empty: a group only exists because at least
    // one row landed in it.
    fn apply(self, values: &[f64]) -> f64 {
        match self {
            Statistic::Max => values.iter().copied().fold(f64::MIN, f64::max),
            Statistic::Mean => stats::mean(values),
            Statistic::Min => values.iter().copied().fold(f64::MAX, f64::min),
            Statistic::Sum => values.iter().sum(),
        }
    }
}

impl FromStr for Statistic {
    type Err = AnalysisError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "max" => Ok(Statistic::Max),
            "mean" => Ok(Statistic::Mean),
            "min" => Ok(Statistic::Min),
            "sum" => Ok(Statistic::Sum),
            _ => Err(AnalysisError::InvalidStatistic {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Statistic::Max => "max",
            Statistic::Mean => "mean",
            Statistic::Min => "min",
            Statistic::Sum => "sum",
        };
        f.write_str(name)
    }
}

/// What to rank and how. `attribute_set` switches the metric from a single
/// column to the rounded row-wise mean of several; `label` only affects the
/// chart title.
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub group_key: &'a str,
    pub metric: &'a str,
    pub statistic: Statistic,
    pub attribute_set: Option<&'a [&'a str]>,
    pub top_n: usize,
    pub label: Option<&'a str>,
}

impl<'a> ReportRequest<'a> {
    pub fn new(group_key: &'a str, metric: &'a str) -> Self {
        Self {
            group_key,
            metric,
            statistic: Statistic::Max,
            attribute_set: None,
            top_n: 10,
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub group: String,
    pub value: f64,
}

/// The ranked result: one row per group, ordered by aggregated value
/// descending. Ties are broken by group identity ascending, so the output
/// does not depend on input row order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    pub group_column: String,
    pub value_column: String,
    pub rows: Vec<RankedRow>,
}

/// Ranks groups by an aggregated metric and returns the top N alongside the
/// bar-chart rendering request for it.
///
/// With an attribute set, each row's metric is the mean of the named columns
/// rounded to the nearest integer, and the result is presented under the
/// `metric` name; otherwise `metric` itself is aggregated. The aggregated
/// value is rounded either way. The input is only read, never reordered.
pub fn report(
    records: &[PlayerRecord],
    request: &ReportRequest<'_>,
) -> Result<(RankedTable, ChartSpec), AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let group = categorical_column(request.group_key)?;

    // An empty attribute set degenerates to the plain single-column case.
    let metric_values: Vec<f64> = match request.attribute_set.filter(|set| !set.is_empty()) {
        Some(columns) => {
            let accessors: Vec<NumericAccessor> = columns
                .iter()
                .map(|column| numeric_column(column))
                .collect::<Result<_, _>>()?;
            records
                .iter()
                .map(|r| {
                    let sum: f64 = accessors.iter().map(|get| get(r)).sum();
                    (sum / accessors.len() as f64).round()
                })
                .collect()
        }
        None => {
            let get = numeric_column(request.metric)?;
            records.iter().map(|r| get(r)).collect()
        }
    };

    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (record, value) in records.iter().zip(&metric_values) {
        groups.entry(group(record)).or_default().push(*value);
    }

    let mut rows: Vec<RankedRow> = groups
        .into_iter()
        .map(|(name, values)| RankedRow {
            group: name.to_string(),
            value: request.statistic.apply(&values).round(),
        })
        .collect();

    rows.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.group.cmp(&b.group)));
    rows.truncate(request.top_n);

    let table = RankedTable {
        group_column: request.group_key.to_string(),
        value_column: request.metric.to_string(),
        rows,
    };

    let title = match request.label {
        Some(label) => format!("Top {} {}", request.top_n, label),
        None => format!("Top {}", request.top_n),
    };
    let chart = chart::bar_chart(&title, &table);

    Ok((table, chart))
}
