//! The question suite: each function answers one of the fixed research
//! questions over the joined table and hands back a display table plus an
//! optional rendering request. Nothing here prints or writes anything.

use tracing::debug;

use crate::chart::{self, ChartSpec, Point};
use crate::error::AnalysisError;
use crate::record::{numeric_column, PlayerRecord, NUMERIC_COLUMNS};
use crate::render::Table;
use crate::report::{report, RankedTable, ReportRequest};
use crate::stats;

// Skill subsets that jointly describe one position. Averaged per row, they
// stand in for a positional rating the data set does not carry directly.
pub const GOALKEEPER_SKILLS: &[&str] = &[
    "gk_diving",
    "gk_handling",
    "gk_kicking",
    "reactions",
    "gk_positioning",
    "gk_reflexes",
];

pub const DEFENDER_SKILLS: &[&str] = &[
    "jumping",
    "stamina",
    "strength",
    "aggression",
    "interceptions",
    "marking",
    "standing_tackle",
    "sliding_tackle",
    "positioning",
    "reactions",
];

pub const MIDFIELDER_SKILLS: &[&str] = &[
    "short_passing",
    "long_passing",
    "ball_control",
    "agility",
    "balance",
    "stamina",
    "crossing",
    "vision",
    "interceptions",
];

pub const FORWARD_SKILLS: &[&str] = &[
    "ball_control",
    "finishing",
    "heading_accuracy",
    "balance",
    "agility",
    "stamina",
];

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Result size for the ranked questions.
    pub top_n: usize,
    /// Whose rating progression to chart.
    pub progression_player: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            progression_player: "Kaka".to_string(),
        }
    }
}

/// One answered question, ready for the renderer.
#[derive(Debug, Clone)]
pub struct QuestionResult {
    pub slug: &'static str,
    pub heading: String,
    pub table: Option<Table>,
    pub chart: Option<ChartSpec>,
}

pub fn run_all(
    records: &[PlayerRecord],
    options: &AnalysisOptions,
) -> Result<Vec<QuestionResult>, AnalysisError> {
    let results = vec![
        top_players(records, options.top_n)?,
        top_goalkeepers(records, options.top_n)?,
        top_defenders(records, options.top_n)?,
        top_midfielders(records, options.top_n)?,
        top_forwards(records, options.top_n)?,
        top_penalty_takers(records)?,
        tallest_player(records)?,
        preferred_foot_split(records)?,
        top_free_kick_takers(records)?,
        fastest_players(records, options.top_n)?,
        updates_per_year(records)?,
        rating_correlations(records)?,
        player_progression(records, &options.progression_player)?,
    ];
    debug!(questions = results.len(), "analysis complete");
    Ok(results)
}

fn ranked(
    records: &[PlayerRecord],
    slug: &'static str,
    heading: &str,
    request: &ReportRequest<'_>,
) -> Result<QuestionResult, AnalysisError> {
    let (table, chart) = report(records, request)?;
    Ok(QuestionResult {
        slug,
        heading: heading.to_string(),
        table: Some(Table::from(&table)),
        chart: Some(chart),
    })
}

fn top_players(records: &[PlayerRecord], top_n: usize) -> Result<QuestionResult, AnalysisError> {
    ranked(
        records,
        "top_players",
        "Top rated players",
        &ReportRequest {
            top_n,
            label: Some("Players"),
            ..ReportRequest::new("player_name", "overall_rating")
        },
    )
}

fn top_goalkeepers(
    records: &[PlayerRecord],
    top_n: usize,
) -> Result<QuestionResult, AnalysisError> {
    ranked(
        records,
        "top_goalkeepers",
        "Top rated goalkeepers",
        &ReportRequest {
            top_n,
            attribute_set: Some(GOALKEEPER_SKILLS),
            label: Some("Goalkeepers"),
            ..ReportRequest::new("player_name", "overall_rating")
        },
    )
}

fn top_defenders(records: &[PlayerRecord], top_n: usize) -> Result<QuestionResult, AnalysisError> {
    ranked(
        records,
        "top_defenders",
        "Top rated defenders",
        &ReportRequest {
            top_n,
            attribute_set: Some(DEFENDER_SKILLS),
            label: Some("Defenders"),
            ..ReportRequest::new("player_name", "overall_rating")
        },
    )
}

fn top_midfielders(
    records: &[PlayerRecord],
    top_n: usize,
) -> Result<QuestionResult, AnalysisError> {
    ranked(
        records,
        "top_midfielders",
        "Top rated midfielders",
        &ReportRequest {
            top_n,
            attribute_set: Some(MIDFIELDER_SKILLS),
            label: Some("Midfielders"),
            ..ReportRequest::new("player_name", "overall_rating")
        },
    )
}

fn top_forwards(records: &[PlayerRecord], top_n: usize) -> Result<QuestionResult, AnalysisError> {
    ranked(
        records,
        "top_forwards",
        "Top rated forwards",
        &ReportRequest {
            top_n,
            attribute_set: Some(FORWARD_SKILLS),
            label: Some("Forwards"),
            ..ReportRequest::new("player_name", "overall_rating")
        },
    )
}

// The penalty and free-kick questions keep their original presentation: a
// short top list shown as a pie rather than bars.
fn top_penalty_takers(records: &[PlayerRecord]) -> Result<QuestionResult, AnalysisError> {
    let (table, _) = report(
        records,
        &ReportRequest {
            top_n: 6,
            ..ReportRequest::new("player_name", "penalties")
        },
    )?;
    Ok(QuestionResult {
        slug: "penalty_takers",
        heading: "Highest penalty ratings".to_string(),
        chart: Some(chart::pie_chart("Top rated penalty takers", ranked_slices(&table))),
        table: Some(Table::from(&table)),
    })
}

fn top_free_kick_takers(records: &[PlayerRecord]) -> Result<QuestionResult, AnalysisError> {
    let (table, _) = report(
        records,
        &ReportRequest {
            top_n: 6,
            ..ReportRequest::new("player_name", "free_kick_accuracy")
        },
    )?;
    Ok(QuestionResult {
        slug: "free_kick_takers",
        heading: "Highest free kick accuracy".to_string(),
        chart: Some(chart::pie_chart("Top rated free kick takers", ranked_slices(&table))),
        table: Some(Table::from(&table)),
    })
}

fn ranked_slices(table: &RankedTable) -> Vec<(String, f64)> {
    table
        .rows
        .iter()
        .map(|row| (row.group.clone(), row.value))
        .collect()
}

fn tallest_player(records: &[PlayerRecord]) -> Result<QuestionResult, AnalysisError> {
    let (table, _) = report(
        records,
        &ReportRequest {
            top_n: 1,
            ..ReportRequest::new("player_name", "height")
        },
    )?;
    Ok(QuestionResult {
        slug: "tallest_player",
        heading: "Tallest player (centimeters)".to_string(),
        table: Some(Table::from(&table)),
        chart: None,
    })
}

fn fastest_players(
    records: &[PlayerRecord],
    top_n: usize,
) -> Result<QuestionResult, AnalysisError> {
    let (table, _) = report(
        records,
        &ReportRequest {
            top_n,
            ..ReportRequest::new("player_name", "sprint_speed")
        },
    )?;
    Ok(QuestionResult {
        slug: "fastest_players",
        heading: "Fastest players".to_string(),
        table: Some(Table::from(&table)),
        chart: None,
    })
}

fn preferred_foot_split(records: &[PlayerRecord]) -> Result<QuestionResult, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let counts = stats::value_counts(records.iter().map(|r| r.preferred_foot.as_str()));
    Ok(counts_question(
        "preferred_foot",
        "Preferred foot split",
        "Share of right footed to left footed players",
        "preferred_foot",
        counts,
    ))
}

fn updates_per_year(records: &[PlayerRecord]) -> Result<QuestionResult, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let counts = stats::value_counts(records.iter().map(|r| r.year.to_string()));
    Ok(counts_question(
        "updates_per_year",
        "Attribute updates per year",
        "Attribute updates for each year",
        "year",
        counts,
    ))
}

fn counts_question(
    slug: &'static str,
    heading: &str,
    chart_title: &str,
    column: &str,
    counts: Vec<(String, usize)>,
) -> QuestionResult {
    let table = Table {
        columns: vec![column.to_string(), "count".to_string()],
        rows: counts
            .iter()
            .map(|(label, count)| vec![label.clone(), count.to_string()])
            .collect(),
    };
    let chart = chart::pie_chart(
        chart_title,
        counts
            .into_iter()
            .map(|(label, count)| (label, count as f64)),
    );
    QuestionResult {
        slug,
        heading: heading.to_string(),
        table: Some(table),
        chart: Some(chart),
    }
}

/// Pearson correlation of the overall rating against every other numeric
/// column, strongest first.
fn rating_correlations(records: &[PlayerRecord]) -> Result<QuestionResult, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let overall = numeric_column("overall_rating")?;
    let ratings: Vec<f64> = records.iter().map(overall).collect();

    let mut coefficients = Vec::new();
    for column in NUMERIC_COLUMNS {
        if *column == "overall_rating" {
            continue;
        }
        let get = numeric_column(column)?;
        let values: Vec<f64> = records.iter().map(|r| get(r)).collect();
        coefficients.push((*column, stats::pearson(&ratings, &values)));
    }
    coefficients.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let table = Table {
        columns: vec!["attribute".to_string(), "pearson_r".to_string()],
        rows: coefficients
            .iter()
            .map(|(column, r)| vec![column.to_string(), format!("{r:+.4}")])
            .collect(),
    };

    Ok(QuestionResult {
        slug: "rating_correlations",
        heading: "Correlation with overall rating".to_string(),
        table: Some(table),
        chart: None,
    })
}

/// One player's snapshots in date order, charted as potential against
/// overall rating. Shows how closely the two move together over a career.
fn player_progression(
    records: &[PlayerRecord],
    player: &str,
) -> Result<QuestionResult, AnalysisError> {
    let mut snapshots: Vec<&PlayerRecord> = records
        .iter()
        .filter(|r| r.player_name == player)
        .collect();
    if snapshots.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    snapshots.sort_by_key(|r| r.date);

    let table = Table {
        columns: vec![
            "date".to_string(),
            "potential".to_string(),
            "overall_rating".to_string(),
        ],
        rows: snapshots
            .iter()
            .map(|r| {
                vec![
                    r.date.format("%Y-%m-%d").to_string(),
                    format!("{:.0}", r.potential),
                    format!("{:.0}", r.overall_rating),
                ]
            })
            .collect(),
    };

    let points = snapshots
        .iter()
        .map(|r| Point {
            x: r.potential,
            y: r.overall_rating,
        })
        .collect();

    Ok(QuestionResult {
        slug: "rating_progression",
        heading: format!("Potential vs overall rating: {player}"),
        table: Some(table),
        chart: Some(chart::scatter_chart(
            &format!("Player potential against overall rating for {player}"),
            "potential",
            "overall_rating",
            points,
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSpec;
    use crate::test_support::record;

    fn squad() -> Vec<PlayerRecord> {
        let mut records = Vec::new();

        let mut keeper = record("Gianluigi Buffon", 88.0, 2012);
        keeper.gk_diving = 93.0;
        keeper.gk_handling = 92.0;
        keeper.gk_kicking = 78.0;
        keeper.gk_positioning = 94.0;
        keeper.gk_reflexes = 95.0;
        keeper.reactions = 88.0;
        keeper.sprint_speed = 48.0;
        records.push(keeper);

        let mut winger = record("Mathis Bolly", 70.0, 2013);
        winger.sprint_speed = 97.0;
        winger.preferred_foot = "left".to_string();
        records.push(winger);

        let mut striker = record("Rickie Lambert", 77.0, 2013);
        striker.penalties = 96.0;
        striker.height = 188;
        records.push(striker);

        records
    }

    #[test]
    fn run_all_answers_every_question() {
        let records = squad();
        let options = AnalysisOptions {
            progression_player: "Rickie Lambert".to_string(),
            ..AnalysisOptions::default()
        };
        let results = run_all(&records, &options).unwrap();
        assert_eq!(results.len(), 13);

        let slugs: Vec<&str> = results.iter().map(|q| q.slug).collect();
        assert!(slugs.contains(&"top_goalkeepers"));
        assert!(slugs.contains(&"rating_progression"));
    }

    #[test]
    fn goalkeeper_ranking_uses_the_composite() {
        let records = squad();
        let result = top_goalkeepers(&records, 3).unwrap();
        let table = result.table.unwrap();
        // (93+92+78+88+94+95)/6 = 90 for Buffon, well clear of the outfielders.
        assert_eq!(table.rows[0][0], "Gianluigi Buffon");
        assert_eq!(table.rows[0][1], "90");
    }

    #[test]
    fn penalty_takers_come_back_as_a_pie() {
        let records = squad();
        let result = top_penalty_takers(&records).unwrap();
        let Some(ChartSpec::Pie { slices, .. }) = result.chart else {
            panic!("expected a pie chart");
        };
        assert_eq!(slices[0].label, "Rickie Lambert");
        assert_eq!(slices[0].value, 96.0);
    }

    #[test]
    fn tallest_player_returns_a_single_row() {
        let records = squad();
        let result = tallest_player(&records).unwrap();
        let table = result.table.unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec!["Rickie Lambert".to_string(), "188".to_string()]);
    }

    #[test]
    fn foot_split_counts_every_snapshot() {
        let records = squad();
        let result = preferred_foot_split(&records).unwrap();
        let table = result.table.unwrap();
        assert_eq!(
            table.rows,
            vec![
                vec!["right".to_string(), "2".to_string()],
                vec!["left".to_string(), "1".to_string()],
            ]
        );
    }

    #[test]
    fn correlation_table_covers_every_other_numeric_column() {
        let records = squad();
        let result = rating_correlations(&records).unwrap();
        let table = result.table.unwrap();
        assert_eq!(table.rows.len(), NUMERIC_COLUMNS.len() - 1);
        assert!(table.rows.iter().all(|row| row[0] != "overall_rating"));
    }

    #[test]
    fn progression_is_date_ordered() {
        let mut records = Vec::new();
        let mut late = record("Kaka", 86.0, 2014);
        late.potential = 87.0;
        let mut early = record("Kaka", 90.0, 2009);
        early.potential = 95.0;
        records.push(late);
        records.push(early);

        let result = player_progression(&records, "Kaka").unwrap();
        let table = result.table.unwrap();
        assert_eq!(table.rows[0][0], "2009-01-01");
        assert_eq!(table.rows[1][0], "2014-01-01");

        let Some(ChartSpec::Scatter { points, x_title, .. }) = result.chart else {
            panic!("expected a scatter chart");
        };
        assert_eq!(points[0].x, 95.0);
        assert_eq!(points[0].y, 90.0);
        assert_eq!(x_title, "Potential");
    }

    #[test]
    fn unknown_progression_player_is_an_error() {
        let records = squad();
        assert!(matches!(
            player_progression(&records, "Nobody"),
            Err(AnalysisError::EmptyInput)
        ));
    }
}
