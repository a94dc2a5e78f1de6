use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::error::AnalysisError;

// Loads one CSV into typed rows, mapping by header name. A missing file is
// reported as its own error so the message can name the path; everything
// else the reader chokes on is a parse failure.
fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AnalysisError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Io(e),
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|source| AnalysisError::Parse {
            path: path.to_path_buf(),
            source,
        })?);
    }

    Ok(rows)
}

pub fn load_players(path: &Path) -> Result<Vec<PlayerRow>, AnalysisError> {
    load_csv(path)
}

pub fn load_attributes(path: &Path) -> Result<Vec<AttributeRow>, AnalysisError> {
    load_csv(path)
}

/// One row of the biography file, exactly as it sits on disk. Height comes
/// in as fractional centimeters and birthday as an unparsed timestamp; the
/// cleaning pass fixes both up into [`Player`].
#[derive(Deserialize, Debug, Clone)]
pub struct PlayerRow {
    pub id: u32,
    pub player_api_id: u32,
    pub player_name: String,
    pub player_fifa_api_id: u32,
    pub birthday: String,
    pub height: f64,
    pub weight: f64,
}

/// One row of the attribute snapshot file. Every rating can be empty in the
/// raw export, hence the wall of Options. Ratings occasionally arrive quoted,
/// so they go through serde_aux rather than a bare f64.
#[derive(Deserialize, Debug, Clone)]
pub struct AttributeRow {
    pub id: u32,
    pub player_fifa_api_id: u32,
    pub player_api_id: u32,
    pub date: String,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub overall_rating: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub potential: Option<f64>,
    pub preferred_foot: Option<String>,
    pub attacking_work_rate: Option<String>,
    pub defensive_work_rate: Option<String>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub crossing: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub finishing: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub heading_accuracy: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub short_passing: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub volleys: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub dribbling: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub curve: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub free_kick_accuracy: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub long_passing: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub ball_control: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub acceleration: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub sprint_speed: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub agility: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub reactions: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub balance: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub shot_power: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub jumping: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub stamina: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub strength: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub long_shots: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub aggression: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub interceptions: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub positioning: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub vision: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub penalties: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub marking: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub standing_tackle: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub sliding_tackle: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub gk_diving: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub gk_handling: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub gk_kicking: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub gk_positioning: Option<f64>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub gk_reflexes: Option<f64>,
}

/// A biography row after type fixes: birthday parsed, height truncated to
/// whole centimeters.
#[derive(Debug, Clone)]
pub struct Player {
    pub player_api_id: u32,
    pub player_fifa_api_id: u32,
    pub player_name: String,
    pub birthday: NaiveDateTime,
    pub height: i64,
    pub weight: f64,
}

/// An attribute row that survived null removal: every rating present, date
/// parsed.
#[derive(Debug, Clone)]
pub struct AttributeSnapshot {
    pub player_fifa_api_id: u32,
    pub player_api_id: u32,
    pub date: NaiveDateTime,
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

impl AttributeSnapshot {
    /// The numeric ratings in file order. Used for exact-row duplicate
    /// detection, where floats compare by bit pattern.
    pub fn numeric_values(&self) -> [f64; 35] {
        [
            self.overall_rating,
            self.potential,
            self.crossing,
            self.finishing,
            self.heading_accuracy,
            self.short_passing,
            self.volleys,
            self.dribbling,
            self.curve,
            self.free_kick_accuracy,
            self.long_passing,
            self.ball_control,
            self.acceleration,
            self.sprint_speed,
            self.agility,
            self.reactions,
            self.balance,
            self.shot_power,
            self.jumping,
            self.stamina,
            self.strength,
            self.long_shots,
            self.aggression,
            self.interceptions,
            self.positioning,
            self.vision,
            self.penalties,
            self.marking,
            self.standing_tackle,
            self.sliding_tackle,
            self.gk_diving,
            self.gk_handling,
            self.gk_kicking,
            self.gk_positioning,
            self.gk_reflexes,
        ]
    }
}
