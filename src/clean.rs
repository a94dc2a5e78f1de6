use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;

use crate::data_loader::{AttributeRow, AttributeSnapshot, Player, PlayerRow};
use crate::error::AnalysisError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, AnalysisError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| AnalysisError::BadTimestamp(value.to_string()))
}

/// Removes exact duplicate rows, keeping the first occurrence. The key
/// closure decides what "exact" means for the row type at hand.
pub fn drop_duplicates<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

/// Full-row key for a raw biography row. Floats go in by bit pattern so the
/// comparison stays exact.
pub fn player_row_key(row: &PlayerRow) -> (u32, u32, String, u32, String, u64, u64) {
    (
        row.id,
        row.player_api_id,
        row.player_name.clone(),
        row.player_fifa_api_id,
        row.birthday.clone(),
        row.height.to_bits(),
        row.weight.to_bits(),
    )
}

/// Full-row fingerprint for a cleaned attribute snapshot. The `id` column is
/// deliberately left out, same as a full-row comparison after the identifier
/// columns are dropped.
pub fn snapshot_key(snapshot: &AttributeSnapshot) -> u64 {
    let mut hasher = DefaultHasher::new();
    snapshot.player_fifa_api_id.hash(&mut hasher);
    snapshot.player_api_id.hash(&mut hasher);
    snapshot.date.hash(&mut hasher);
    snapshot.preferred_foot.hash(&mut hasher);
    snapshot.attacking_work_rate.hash(&mut hasher);
    snapshot.defensive_work_rate.hash(&mut hasher);
    for value in snapshot.numeric_values() {
        hasher.write_u64(value.to_bits());
    }
    hasher.finish()
}

/// Applies the biography type fixes: birthday string to timestamp, height
/// truncated from fractional to whole centimeters.
pub fn coerce_players(rows: Vec<PlayerRow>) -> Result<Vec<Player>, AnalysisError> {
    let mut players = Vec::with_capacity(rows.len());
    for row in rows {
        players.push(Player {
            player_api_id: row.player_api_id,
            player_fifa_api_id: row.player_fifa_api_id,
            player_name: row.player_name,
            birthday: parse_timestamp(&row.birthday)?,
            height: row.height as i64,
            weight: row.weight,
        });
    }
    Ok(players)
}

// Turns Ok(None) into "skip this row" at the call site below.
macro_rules! field {
    ($opt:expr) => {
        match $opt {
            Some(value) => value,
            None => return Ok(None),
        }
    };
}

fn snapshot_from_row(row: AttributeRow) -> Result<Option<AttributeSnapshot>, AnalysisError> {
    let date = parse_timestamp(&row.date)?;
    Ok(Some(AttributeSnapshot {
        player_fifa_api_id: row.player_fifa_api_id,
        player_api_id: row.player_api_id,
        date,
        overall_rating: field!(row.overall_rating),
        potential: field!(row.potential),
        preferred_foot: field!(row.preferred_foot),
        attacking_work_rate: field!(row.attacking_work_rate),
        defensive_work_rate: field!(row.defensive_work_rate),
        crossing: field!(row.crossing),
        finishing: field!(row.finishing),
        heading_accuracy: field!(row.heading_accuracy),
        short_passing: field!(row.short_passing),
        volleys: field!(row.volleys),
        dribbling: field!(row.dribbling),
        curve: field!(row.curve),
        free_kick_accuracy: field!(row.free_kick_accuracy),
        long_passing: field!(row.long_passing),
        ball_control: field!(row.ball_control),
        acceleration: field!(row.acceleration),
        sprint_speed: field!(row.sprint_speed),
        agility: field!(row.agility),
        reactions: field!(row.reactions),
        balance: field!(row.balance),
        shot_power: field!(row.shot_power),
        jumping: field!(row.jumping),
        stamina: field!(row.stamina),
        strength: field!(row.strength),
        long_shots: field!(row.long_shots),
        aggression: field!(row.aggression),
        interceptions: field!(row.interceptions),
        positioning: field!(row.positioning),
        vision: field!(row.vision),
        penalties: field!(row.penalties),
        marking: field!(row.marking),
        standing_tackle: field!(row.standing_tackle),
        sliding_tackle: field!(row.sliding_tackle),
        gk_diving: field!(row.gk_diving),
        gk_handling: field!(row.gk_handling),
        gk_kicking: field!(row.gk_kicking),
        gk_positioning: field!(row.gk_positioning),
        gk_reflexes: field!(row.gk_reflexes),
    }))
}

/// Discards every attribute row with a missing field and types up the rest.
/// The exact values behind a gap can't be recovered, so the whole row goes.
pub fn drop_nulls(rows: Vec<AttributeRow>) -> Result<Vec<AttributeSnapshot>, AnalysisError> {
    let mut snapshots = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(snapshot) = snapshot_from_row(row)? {
            snapshots.push(snapshot);
        }
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> AttributeRow {
        AttributeRow {
            id: 1,
            player_fifa_api_id: 100,
            player_api_id: 200,
            date: "2013-02-22 00:00:00".to_string(),
            overall_rating: Some(80.0),
            potential: Some(85.0),
            preferred_foot: Some("right".to_string()),
            attacking_work_rate: Some("medium".to_string()),
            defensive_work_rate: Some("medium".to_string()),
            crossing: Some(60.0),
            finishing: Some(60.0),
            heading_accuracy: Some(60.0),
            short_passing: Some(60.0),
            volleys: Some(60.0),
            dribbling: Some(60.0),
            curve: Some(60.0),
            free_kick_accuracy: Some(60.0),
            long_passing: Some(60.0),
            ball_control: Some(60.0),
            acceleration: Some(60.0),
            sprint_speed: Some(60.0),
            agility: Some(60.0),
            reactions: Some(60.0),
            balance: Some(60.0),
            shot_power: Some(60.0),
            jumping: Some(60.0),
            stamina: Some(60.0),
            strength: Some(60.0),
            long_shots: Some(60.0),
            aggression: Some(60.0),
            interceptions: Some(60.0),
            positioning: Some(60.0),
            vision: Some(60.0),
            penalties: Some(60.0),
            marking: Some(60.0),
            standing_tackle: Some(60.0),
            sliding_tackle: Some(60.0),
            gk_diving: Some(10.0),
            gk_handling: Some(10.0),
            gk_kicking: Some(10.0),
            gk_positioning: Some(10.0),
            gk_reflexes: Some(10.0),
        }
    }

    #[test]
    fn drop_nulls_removes_rows_with_any_gap() {
        let mut incomplete = full_row();
        incomplete.sliding_tackle = None;

        let snapshots = drop_nulls(vec![full_row(), incomplete]).unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].overall_rating, 80.0);
        assert_eq!(snapshots[0].date, parse_timestamp("2013-02-22 00:00:00").unwrap());
    }

    #[test]
    fn drop_nulls_rejects_malformed_timestamps() {
        let mut bad = full_row();
        bad.date = "22/02/2013".to_string();
        let err = drop_nulls(vec![bad]).unwrap_err();
        assert!(matches!(err, AnalysisError::BadTimestamp(_)));
    }

    #[test]
    fn duplicate_snapshots_are_dropped_once() {
        let snapshots = drop_nulls(vec![full_row(), full_row()]).unwrap();
        let deduped = drop_duplicates(snapshots, snapshot_key);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn differing_snapshots_survive_dedup() {
        let mut other = full_row();
        other.overall_rating = Some(81.0);
        let snapshots = drop_nulls(vec![full_row(), other]).unwrap();
        let deduped = drop_duplicates(snapshots, snapshot_key);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn coerce_players_truncates_height_and_parses_birthday() {
        let players = coerce_players(vec![PlayerRow {
            id: 1,
            player_api_id: 200,
            player_name: "Kristof van Hout".to_string(),
            player_fifa_api_id: 100,
            birthday: "1987-02-09 00:00:00".to_string(),
            height: 208.28,
            weight: 243.0,
        }])
        .unwrap();

        assert_eq!(players[0].height, 208);
        assert_eq!(players[0].birthday.format("%Y-%m-%d").to_string(), "1987-02-09");
    }
}
