//! Data models for shot statistics
//!
//! Two percentage contracts coexist: the basic per-player summary keeps full
//! precision (shown with one decimal), while the detailed and team breakdowns
//! round to a whole percent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::court::ShotType;
use crate::roster::{NormalizedShot, ShotResult};

/// Field-goal percentage with full precision; 0 when there are no attempts
pub fn fg_percentage(made: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    made as f64 / total as f64 * 100.0
}

/// Field-goal percentage rounded to the nearest whole percent
pub fn fg_percentage_rounded(made: usize, total: usize) -> u32 {
    fg_percentage(made, total).round() as u32
}

/// Format a percentage with one decimal ("66.7%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Running counts over a set of shots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTally {
    pub total: usize,
    pub made: usize,
    pub missed: usize,
    pub points: u32,
}

impl ShotTally {
    /// Count one shot. Shots with an unknown result still count toward the
    /// total but neither `made` nor `missed`.
    pub fn add(&mut self, shot: &NormalizedShot) {
        self.total += 1;
        match shot.result {
            Some(ShotResult::Made) => self.made += 1,
            Some(ShotResult::Missed) => self.missed += 1,
            None => {}
        }
        self.points += shot.points();
    }

    /// Combine another tally into this one
    pub fn merge(&mut self, other: &ShotTally) {
        self.total += other.total;
        self.made += other.made;
        self.missed += other.missed;
        self.points += other.points;
    }

    /// Percentage with full precision
    pub fn fg_percentage(&self) -> f64 {
        fg_percentage(self.made, self.total)
    }

    /// Percentage rounded to a whole number
    pub fn fg_percentage_rounded(&self) -> u32 {
        fg_percentage_rounded(self.made, self.total)
    }
}

/// Every dimension the aggregator partitions shots by.
///
/// All summaries are projections of this one fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    pub overall: ShotTally,
    pub by_period: BTreeMap<u32, ShotTally>,
    pub by_type: BTreeMap<ShotType, ShotTally>,
    pub by_result: BTreeMap<ShotResult, usize>,
}

impl Breakdown {
    /// Fold one shot into every dimension
    pub fn add(&mut self, shot: &NormalizedShot) {
        self.overall.add(shot);
        self.by_period.entry(shot.period).or_default().add(shot);
        if let Some(shot_type) = shot.shot_type {
            self.by_type.entry(shot_type).or_default().add(shot);
        }
        if let Some(result) = shot.result {
            *self.by_result.entry(result).or_insert(0) += 1;
        }
    }
}

/// Attempts of one shot type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub total: usize,
    pub made: usize,
    pub missed: usize,
}

impl From<&ShotTally> for TypeCounts {
    fn from(tally: &ShotTally) -> Self {
        Self {
            total: tally.total,
            made: tally.made,
            missed: tally.missed,
        }
    }
}

/// Basic per-player summary, used by player cards and the text report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub total_shots: usize,
    pub made: usize,
    pub missed: usize,
    pub points: u32,
    /// Unrounded; display with one decimal
    pub fg_percentage: f64,
    /// Always holds an entry for every [`ShotType`]
    pub shot_type_counts: BTreeMap<ShotType, TypeCounts>,
}

impl PlayerSummary {
    /// Counts for one shot type
    pub fn type_counts(&self, shot_type: ShotType) -> TypeCounts {
        self.shot_type_counts
            .get(&shot_type)
            .copied()
            .unwrap_or_default()
    }

    /// Percentage formatted for display ("66.7%")
    pub fn fg_display(&self) -> String {
        format_percentage(self.fg_percentage)
    }
}

/// One period or shot-type bucket of a detailed breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub total: usize,
    pub made: usize,
    pub missed: usize,
    pub points: u32,
    /// Rounded to a whole percent
    pub fg_percentage: u32,
}

impl From<&ShotTally> for BucketStats {
    fn from(tally: &ShotTally) -> Self {
        Self {
            total: tally.total,
            made: tally.made,
            missed: tally.missed,
            points: tally.points,
            fg_percentage: tally.fg_percentage_rounded(),
        }
    }
}

/// Maximum number of entries returned by `top_results`
pub const TOP_RESULTS_LIMIT: usize = 8;

fn rank_results(by_result: &BTreeMap<ShotResult, usize>) -> Vec<(ShotResult, usize)> {
    let mut ranked: Vec<(ShotResult, usize)> =
        by_result.iter().map(|(r, c)| (*r, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_RESULTS_LIMIT);
    ranked
}

/// Detailed per-player breakdown shown in the player stats view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedStats {
    pub total: usize,
    pub made: usize,
    pub missed: usize,
    pub points: u32,
    /// Rounded to a whole percent
    pub fg_percentage: u32,
    pub by_period: BTreeMap<u32, BucketStats>,
    pub by_shot_type: BTreeMap<ShotType, BucketStats>,
    pub by_result: BTreeMap<ShotResult, usize>,
}

impl DetailedStats {
    /// Result labels ranked by how often they occur, most frequent first
    pub fn top_results(&self) -> Vec<(ShotResult, usize)> {
        rank_results(&self.by_result)
    }
}

/// A player's row in the team table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub name: String,
    pub number: u8,
    pub total: usize,
    pub made: usize,
    pub missed: usize,
    pub points: u32,
    /// Unrounded, taken from the player's basic summary
    pub fg_percentage: f64,
}

/// Whole-team breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub total: usize,
    pub made: usize,
    pub missed: usize,
    pub points: u32,
    /// Rounded to a whole percent
    pub fg_percentage: u32,
    pub by_period: BTreeMap<u32, BucketStats>,
    pub by_shot_type: BTreeMap<ShotType, BucketStats>,
    pub by_result: BTreeMap<ShotResult, usize>,
    /// Keyed by player id; players without shots are omitted
    pub by_player: BTreeMap<String, PlayerLine>,
}

impl TeamStats {
    /// Result labels ranked by how often they occur, most frequent first
    pub fn top_results(&self) -> Vec<(ShotResult, usize)> {
        rank_results(&self.by_result)
    }

    /// Player rows ordered by jersey number, for leaderboards
    pub fn players_by_number(&self) -> Vec<&PlayerLine> {
        let mut lines: Vec<&PlayerLine> = self.by_player.values().collect();
        lines.sort_by_key(|line| line.number);
        lines
    }
}
