use std::collections::HashMap;

use chrono::Datelike;
use tracing::debug;

use crate::data_loader::{AttributeSnapshot, Player};
use crate::error::AnalysisError;
use crate::record::PlayerRecord;

/// Inner merge of biographies with attribute snapshots on the identifier
/// pair (`player_api_id`, `player_fifa_api_id`). Snapshots without a
/// matching biography fall out, and vice versa. The observation year is
/// derived from the snapshot date here so downstream stages never touch
/// raw timestamps again.
pub fn merge(
    players: &[Player],
    snapshots: &[AttributeSnapshot],
) -> Result<Vec<PlayerRecord>, AnalysisError> {
    let index: HashMap<(u32, u32), &Player> = players
        .iter()
        .map(|p| ((p.player_api_id, p.player_fifa_api_id), p))
        .collect();

    let mut records = Vec::with_capacity(snapshots.len());
    for s in snapshots {
        let Some(player) = index.get(&(s.player_api_id, s.player_fifa_api_id)) else {
            continue;
        };

        records.push(PlayerRecord {
            player_name: player.player_name.clone(),
            birthday: player.birthday,
            height: player.height,
            weight: player.weight,
            date: s.date,
            year: s.date.year(),
            overall_rating: s.overall_rating,
            potential: s.potential,
            preferred_foot: s.preferred_foot.clone(),
            attacking_work_rate: s.attacking_work_rate.clone(),
            defensive_work_rate: s.defensive_work_rate.clone(),
            crossing: s.crossing,
            finishing: s.finishing,
            heading_accuracy: s.heading_accuracy,
            short_passing: s.short_passing,
            volleys: s.volleys,
            dribbling: s.dribbling,
            curve: s.curve,
            free_kick_accuracy: s.free_kick_accuracy,
            long_passing: s.long_passing,
            ball_control: s.ball_control,
            acceleration: s.acceleration,
            sprint_speed: s.sprint_speed,
            agility: s.agility,
            reactions: s.reactions,
            balance: s.balance,
            shot_power: s.shot_power,
            jumping: s.jumping,
            stamina: s.stamina,
            strength: s.strength,
            long_shots: s.long_shots,
            aggression: s.aggression,
            interceptions: s.interceptions,
            positioning: s.positioning,
            vision: s.vision,
            penalties: s.penalties,
            marking: s.marking,
            standing_tackle: s.standing_tackle,
            sliding_tackle: s.sliding_tackle,
            gk_diving: s.gk_diving,
            gk_handling: s.gk_handling,
            gk_kicking: s.gk_kicking,
            gk_positioning: s.gk_positioning,
            gk_reflexes: s.gk_reflexes,
        });
    }

    debug!(
        snapshots = snapshots.len(),
        joined = records.len(),
        "merged attribute snapshots with biographies"
    );

    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::parse_timestamp;

    fn player(api_id: u32, fifa_id: u32, name: &str) -> Player {
        Player {
            player_api_id: api_id,
            player_fifa_api_id: fifa_id,
            player_name: name.to_string(),
            birthday: parse_timestamp("1987-06-24 00:00:00").unwrap(),
            height: 170,
            weight: 159.0,
        }
    }

    fn snapshot(api_id: u32, fifa_id: u32, date: &str, rating: f64) -> AttributeSnapshot {
        AttributeSnapshot {
            player_fifa_api_id: fifa_id,
            player_api_id: api_id,
            date: parse_timestamp(date).unwrap(),
            overall_rating: rating,
            potential: rating,
            preferred_foot: "left".to_string(),
            attacking_work_rate: "medium".to_string(),
            defensive_work_rate: "medium".to_string(),
            crossing: rating,
            finishing: rating,
            heading_accuracy: rating,
            short_passing: rating,
            volleys: rating,
            dribbling: rating,
            curve: rating,
            free_kick_accuracy: rating,
            long_passing: rating,
            ball_control: rating,
            acceleration: rating,
            sprint_speed: rating,
            agility: rating,
            reactions: rating,
            balance: rating,
            shot_power: rating,
            jumping: rating,
            stamina: rating,
            strength: rating,
            long_shots: rating,
            aggression: rating,
            interceptions: rating,
            positioning: rating,
            vision: rating,
            penalties: rating,
            marking: rating,
            standing_tackle: rating,
            sliding_tackle: rating,
            gk_diving: rating,
            gk_handling: rating,
            gk_kicking: rating,
            gk_positioning: rating,
            gk_reflexes: rating,
        }
    }

    #[test]
    fn merge_is_inner_and_derives_year() {
        let players = vec![player(200, 100, "Lionel Messi"), player(201, 101, "Xavi Hernandez")];
        let snapshots = vec![
            snapshot(200, 100, "2013-02-22 00:00:00", 94.0),
            snapshot(200, 100, "2012-08-31 00:00:00", 93.0),
            // No biography for this one; it must fall out.
            snapshot(999, 998, "2013-02-22 00:00:00", 90.0),
        ];

        let records = merge(&players, &snapshots).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.player_name == "Lionel Messi"));
        assert_eq!(records[0].year, 2013);
        assert_eq!(records[1].year, 2012);
    }

    #[test]
    fn merge_requires_both_id_columns_to_agree() {
        let players = vec![player(200, 100, "Lionel Messi")];
        // api id matches, fifa id does not
        let snapshots = vec![snapshot(200, 999, "2013-02-22 00:00:00", 94.0)];
        assert!(matches!(
            merge(&players, &snapshots),
            Err(AnalysisError::EmptyInput)
        ));
    }

    #[test]
    fn empty_join_is_an_error() {
        let players = vec![player(200, 100, "Lionel Messi")];
        assert!(matches!(merge(&players, &[]), Err(AnalysisError::EmptyInput)));
    }
}
