//! Stored game documents and game codes

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::roster::{lenient_optional_list, Player, Roster};

/// Number of digits in a game code
pub const GAME_CODE_LEN: usize = 6;

/// Short numeric key that identifies a shared game document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameCode(String);

impl GameCode {
    /// Parse user input: non-digits are stripped, then exactly six digits
    /// must remain
    pub fn parse(input: &str) -> Result<Self> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != GAME_CODE_LEN {
            return Err(Error::InvalidGameCode(input.to_string()));
        }
        Ok(Self(digits))
    }

    /// Generate a random code in 100000..=999999
    pub fn generate() -> Self {
        let value: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        Self(value.to_string())
    }

    /// The code as a string of digits
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GameCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GameCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<GameCode> for String {
    fn from(code: GameCode) -> Self {
        code.0
    }
}

/// A game as held by the document store.
///
/// Every field is optional so the same shape doubles as a merge patch: on
/// `set_merge`, fields that are `Some` replace the stored value and `None`
/// fields leave it untouched. Documents written before away rosters existed
/// carry a single `players` list instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    #[serde(
        default,
        deserialize_with = "lenient_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_players: Option<Vec<Player>>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub away_players: Option<Vec<Player>>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub players: Option<Vec<Player>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl GameDocument {
    /// Patch carrying a full roster snapshot and the game name
    pub fn snapshot(roster: &Roster, game_name: &str) -> Self {
        Self {
            home_players: Some(roster.home.clone()),
            away_players: Some(roster.away.clone()),
            game_name: Some(game_name.to_string()),
            ..Self::default()
        }
    }

    /// Patch carrying only a new game name
    pub fn name_only(game_name: &str) -> Self {
        Self {
            game_name: Some(game_name.to_string()),
            ..Self::default()
        }
    }

    /// The roster held by this document.
    ///
    /// Returns `None` when the document has no roster data at all (for
    /// example a game that has only been named so far). A legacy `players`
    /// list becomes the home roster with an empty away roster.
    pub fn roster(&self) -> Option<Roster> {
        if self.home_players.is_some() || self.away_players.is_some() {
            return Some(Roster {
                home: self.home_players.clone().unwrap_or_default(),
                away: self.away_players.clone().unwrap_or_default(),
            });
        }

        self.players.as_ref().map(|players| Roster {
            home: players.clone(),
            away: Vec::new(),
        })
    }

    /// Apply a patch on top of this document and stamp the update time
    pub fn merge(&mut self, patch: GameDocument, now: DateTime<Utc>) {
        if patch.home_players.is_some() || patch.away_players.is_some() {
            // A two-team write supersedes any legacy single list
            self.players = None;
        }
        if let Some(home) = patch.home_players {
            self.home_players = Some(home);
        }
        if let Some(away) = patch.away_players {
            self.away_players = Some(away);
        }
        if let Some(players) = patch.players {
            self.players = Some(players);
        }
        if let Some(name) = patch.game_name {
            self.game_name = Some(name);
        }
        self.last_updated = Some(now);
    }
}
