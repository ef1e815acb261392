//! Data models for players, shots and rosters

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::court::{CourtPoint, ShotType};

/// Period assumed for shots stored without one
pub const DEFAULT_PERIOD: u32 = 1;

/// Outcome of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Made,
    Missed,
}

impl ShotResult {
    /// Stored label ("made" / "missed")
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotResult::Made => "made",
            ShotResult::Missed => "missed",
        }
    }

    /// Label used in reports and tables
    pub fn display_name(&self) -> &'static str {
        match self {
            ShotResult::Made => "Made",
            ShotResult::Missed => "Missed",
        }
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "made" => Ok(ShotResult::Made),
            "missed" => Ok(ShotResult::Missed),
            other => Err(format!("unknown shot result '{}'", other)),
        }
    }
}

/// Which team a roster belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    /// The other team
    pub fn opposite(&self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Label used in reports ("HOME" / "AWAY")
    pub fn report_label(&self) -> &'static str {
        match self {
            TeamSide::Home => "HOME",
            TeamSide::Away => "AWAY",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "home"),
            TeamSide::Away => write!(f, "away"),
        }
    }
}

impl FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" | "h" => Ok(TeamSide::Home),
            "away" | "a" => Ok(TeamSide::Away),
            other => Err(format!("unknown team '{}', use home or away", other)),
        }
    }
}

/// A single recorded shot.
///
/// Shots are never edited after creation. The shot type is derived from the
/// position when the shot is recorded and kept as stored afterwards, even if
/// classification rules change. Documents written by older versions may lack
/// `period`, `type` or `result`, or carry values this version does not
/// understand; those fields decode as `None` instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub result: Option<ShotResult>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub shot_type: Option<ShotType>,
    #[serde(default, deserialize_with = "lenient_value", skip_serializing_if = "Option::is_none")]
    pub position: Option<CourtPoint>,
    #[serde(default, deserialize_with = "lenient_period", skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A shot with every optional field resolved, as consumed by the aggregator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedShot {
    pub result: Option<ShotResult>,
    pub shot_type: Option<ShotType>,
    pub period: u32,
}

impl NormalizedShot {
    /// Whether the shot went in
    pub fn is_made(&self) -> bool {
        self.result == Some(ShotResult::Made)
    }

    /// Points scored: 3 for a made three, 2 for any other make
    pub fn points(&self) -> u32 {
        if !self.is_made() {
            return 0;
        }
        match self.shot_type {
            Some(ShotType::ThreePoint) => 3,
            _ => 2,
        }
    }
}

impl Shot {
    /// Create a new shot recorded now
    pub fn new(
        id: impl Into<String>,
        result: ShotResult,
        shot_type: ShotType,
        position: CourtPoint,
        period: u32,
    ) -> Self {
        Self {
            id: id.into(),
            result: Some(result),
            shot_type: Some(shot_type),
            position: Some(position),
            period: Some(period),
            timestamp: Some(Utc::now()),
        }
    }

    /// Period this shot belongs to, defaulting legacy shots to period 1
    pub fn period_or_default(&self) -> u32 {
        self.period.unwrap_or(DEFAULT_PERIOD)
    }

    /// Resolve defaults for aggregation
    pub fn normalized(&self) -> NormalizedShot {
        NormalizedShot {
            result: self.result,
            shot_type: self.shot_type,
            period: self.period_or_default(),
        }
    }
}

/// A player on one team's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "value_or_default")]
    pub name: String,
    pub number: u8,
    #[serde(default, deserialize_with = "lenient_list")]
    pub shots: Vec<Shot>,
    #[serde(default, deserialize_with = "value_or_default")]
    pub fouls: u32,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Player {
    /// Create a new player with no shots or fouls
    pub fn new(id: impl Into<String>, number: u8, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
            shots: Vec::new(),
            fouls: 0,
            created_at: Some(Utc::now()),
        }
    }

    /// "Name (#12)" when a name is set, otherwise "Player #12"
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Player #{}", self.number)
        } else {
            format!("{} (#{})", self.name, self.number)
        }
    }

    /// Find a shot by id
    pub fn find_shot(&self, shot_id: &str) -> Option<&Shot> {
        self.shots.iter().find(|s| s.id == shot_id)
    }
}

/// Both teams' rosters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub home: Vec<Player>,
    pub away: Vec<Player>,
}

impl Roster {
    /// Create an empty roster pair
    pub fn new() -> Self {
        Self::default()
    }

    /// Players on the given side
    pub fn side(&self, side: TeamSide) -> &[Player] {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// Mutable players on the given side
    pub fn side_mut(&mut self, side: TeamSide) -> &mut Vec<Player> {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Find a player by id on the given side
    pub fn find_player(&self, side: TeamSide, player_id: &str) -> Option<&Player> {
        self.side(side).iter().find(|p| p.id == player_id)
    }

    /// Find a player by jersey number on the given side
    pub fn find_by_number(&self, side: TeamSide, number: u8) -> Option<&Player> {
        self.side(side).iter().find(|p| p.number == number)
    }

    /// Total number of shots on both sides
    pub fn total_shots(&self) -> usize {
        self.home
            .iter()
            .chain(self.away.iter())
            .map(|p| p.shots.len())
            .sum()
    }
}

/// Decode a label-like field, mapping anything unrecognized to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// Decode an id stored as a string or as a bare number
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Decode any value, mapping one of the wrong shape to `None`
fn lenient_value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode any value, falling back to its default when it has the wrong shape
fn value_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_value(deserializer)?.unwrap_or_default())
}

/// Decode a list, dropping elements that fail to decode
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_optional_list(deserializer)?.unwrap_or_default())
}

/// Like [`lenient_list`], keeping `None` for a missing or non-list value
pub(crate) fn lenient_optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(items)) = value else {
        return Ok(None);
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if decoded.len() < total {
        tracing::warn!(
            dropped = total - decoded.len(),
            "Skipped unreadable records in stored list"
        );
    }
    Ok(Some(decoded))
}

/// Decode a period, mapping non-positive or non-integer values to `None`
fn lenient_period<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .filter(|p| *p > 0)
        .and_then(|p| u32::try_from(p).ok()))
}
