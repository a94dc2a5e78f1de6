//! Record fixtures shared by the unit tests.

use chrono::NaiveDate;

use crate::record::PlayerRecord;

/// A fully populated joined record: every rating set to `rating`, the
/// snapshot dated January 1st of `year`. Tests overwrite individual fields
/// as needed.
pub fn record(name: &str, rating: f64, year: i32) -> PlayerRecord {
    let date = NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let birthday = NaiveDate::from_ymd_opt(1987, 6, 24)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    PlayerRecord {
        player_name: name.to_string(),
        birthday,
        height: 170,
        weight: 159.0,
        date,
        year,
        overall_rating: rating,
        potential: rating,
        preferred_foot: "right".to_string(),
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
