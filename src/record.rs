use chrono::NaiveDateTime;

use crate::error::AnalysisError;

/// One row of the joined table: biography plus a single attribute snapshot.
/// The identifier columns used for the merge are dropped here; what remains
/// is what the analysis questions see.
#[derive(Debug, Clone)]
pub struct PlayerRecord {
    pub player_name: String,
    pub birthday: NaiveDateTime,
    pub height: i64,
    pub weight: f64,
    pub date: NaiveDateTime,
    pub year: i32,
    pub overall_rating: f64,
    pub potential: f64,
    pub preferred_foot: String,
    pub attacking_work_rate: String,
    pub defensive_work_rate: String,
    pub crossing: f64,
    pub finishing: f64,
    pub heading_accuracy: f64,
    pub short_passing: f64,
    pub volleys: f64,
    pub dribbling: f64,
    pub curve: f64,
    pub free_kick_accuracy: f64,
    pub long_passing: f64,
    pub ball_control: f64,
    pub acceleration: f64,
    pub sprint_speed: f64,
    pub agility: f64,
    pub reactions: f64,
    pub balance: f64,
    pub shot_power: f64,
    pub jumping: f64,
    pub stamina: f64,
    pub strength: f64,
    pub long_shots: f64,
    pub aggression: f64,
    pub interceptions: f64,
    pub positioning: f64,
    pub vision: f64,
    pub penalties: f64,
    pub marking: f64,
    pub standing_tackle: f64,
    pub sliding_tackle: f64,
    pub gk_diving: f64,
    pub gk_handling: f64,
    pub gk_kicking: f64,
    pub gk_positioning: f64,
    pub gk_reflexes: f64,
}

pub type NumericAccessor = fn(&PlayerRecord) -> f64;
pub type CategoricalAccessor = fn(&PlayerRecord) -> &str;

/// Every numeric column of the joined table, in display order. Correlation
/// sweeps iterate this; anything outside it is not a rankable metric.
pub const NUMERIC_COLUMNS: &[&str] = &[
    "overall_rating",
    "potential",
    "crossing",
    "finishing",
    "heading_accuracy",
    "short_passing",
    "volleys",
    "dribbling",
    "curve",
    "free_kick_accuracy",
    "long_passing",
    "ball_control",
    "acceleration",
    "sprint_speed",
    "agility",
    "reactions",
    "balance",
    "shot_power",
    "jumping",
    "stamina",
    "strength",
    "long_shots",
    "aggression",
    "interceptions",
    "positioning",
    "vision",
    "penalties",
    "marking",
    "standing_tackle",
    "sliding_tackle",
    "gk_diving",
    "gk_handling",
    "gk_kicking",
    "gk_positioning",
    "gk_reflexes",
    "height",
    "weight",
    "year",
];

/// Looks a numeric column up by name. The schema is fixed at compile time,
/// so an unknown name is a caller mistake, not missing data.
pub fn numeric_column(name: &str) -> Result<NumericAccessor, AnalysisError> {
    let accessor: NumericAccessor = match name {
        "overall_rating" => |r| r.overall_rating,
        "potential" => |r| r.potential,
        "crossing" => |r| r.crossing,
        "finishing" => |r| r.finishing,
        "heading_accuracy" => |r| r.heading_accuracy,
        "short_passing" => |r| r.short_passing,
        "volleys" => |r| r.volleys,
        "dribbling" => |r| r.dribbling,
        "curve" => |r| r.curve,
        "free_kick_accuracy" => |r| r.free_kick_accuracy,
        "long_passing" => |r| r.long_passing,
        "ball_control" => |r| r.ball_control,
        "acceleration" => |r| r.acceleration,
        "sprint_speed" => |r| r.sprint_speed,
        "agility" => |r| r.agility,
        "reactions" => |r| r.reactions,
        "balance" => |r| r.balance,
        "shot_power" => |r| r.shot_power,
        "jumping" => |r| r.jumping,
        "stamina" => |r| r.stamina,
        "strength" => |r| r.strength,
        "long_shots" => |r| r.long_shots,
        "aggression" => |r| r.aggression,
        "interceptions" => |r| r.interceptions,
        "positioning" => |r| r.positioning,
        "vision" => |r| r.vision,
        "penalties" => |r| r.penalties,
        "marking" => |r| r.marking,
        "standing_tackle" => |r| r.standing_tackle,
        "sliding_tackle" => |r| r.sliding_tackle,
        "gk_diving" => |r| r.gk_diving,
        "gk_handling" => |r| r.gk_handling,
        "gk_kicking" => |r| r.gk_kicking,
        "gk_positioning" => |r| r.gk_positioning,
        "gk_reflexes" => |r| r.gk_reflexes,
        "height" => |r| r.height as f64,
        "weight" => |r| r.weight,
        "year" => |r| f64::from(r.year),
        _ => {
            return Err(AnalysisError::InvalidColumn {
                column: name.to_string(),
            })
        }
    };
    Ok(accessor)
}

/// Looks a categorical (string-valued) column up by name. These are the
/// columns that can serve as a grouping key or be counted.
pub fn categorical_column(name: &str) -> Result<CategoricalAccessor, AnalysisError> {
    let accessor: CategoricalAccessor = match name {
        "player_name" => |r| r.player_name.as_str(),
        "preferred_foot" => |r| r.preferred_foot.as_str(),
        "attacking_work_rate" => |r| r.attacking_work_rate.as_str(),
        "defensive_work_rate" => |r| r.defensive_work_rate.as_str(),
        _ => {
            return Err(AnalysisError::InvalidColumn {
                column: name.to_string(),
            })
        }
    };
    Ok(accessor)
}
