//! Court view filter definitions

use serde::{Deserialize, Serialize};

use crate::roster::{ShotResult, DEFAULT_PERIOD};

/// Which shots are drawn on the court view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtFilter {
    /// Only shots from this period are shown
    pub period: u32,
    /// Show made shots
    pub show_made: bool,
    /// Show missed shots
    pub show_missed: bool,
    /// Restrict to one player (None = all players)
    pub player_id: Option<String>,
}

impl Default for CourtFilter {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            show_made: true,
            show_missed: true,
            player_id: None,
        }
    }
}

impl CourtFilter {
    /// Create a filter showing every player's shots in period 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the period
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period.max(1);
        self
    }

    /// Restrict to one player
    pub fn with_player(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    /// Show or hide made shots
    pub fn with_made(mut self, show: bool) -> Self {
        self.show_made = show;
        self
    }

    /// Show or hide missed shots
    pub fn with_missed(mut self, show: bool) -> Self {
        self.show_missed = show;
        self
    }

    /// Toggle visibility of one result
    pub fn toggle_result(&mut self, result: ShotResult) {
        match result {
            ShotResult::Made => self.show_made = !self.show_made,
            ShotResult::Missed => self.show_missed = !self.show_missed,
        }
    }

    /// Clear the player restriction
    pub fn clear_player(&mut self) {
        self.player_id = None;
    }

    /// Whether shots with this result pass the made/missed toggles.
    /// Shots with an unknown result never pass.
    pub fn is_result_enabled(&self, result: Option<ShotResult>) -> bool {
        match result {
            Some(ShotResult::Made) => self.show_made,
            Some(ShotResult::Missed) => self.show_missed,
            None => false,
        }
    }

    /// Get a human-readable summary of the filter
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("Period {}", self.period)];

        match (self.show_made, self.show_missed) {
            (true, true) => {}
            (true, false) => parts.push("made only".to_string()),
            (false, true) => parts.push("missed only".to_string()),
            (false, false) => parts.push("no results".to_string()),
        }

        if let Some(ref player_id) = self.player_id {
            parts.push(format!("player:{}", player_id));
        }

        parts.join(", ")
    }
}
