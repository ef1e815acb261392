//! Filter engine for selecting the shots drawn on the court

use super::CourtFilter;
use crate::roster::{Player, Shot};

/// Engine for matching shots against a [`CourtFilter`]
pub struct FilterEngine;

impl FilterEngine {
    /// Check if a single shot passes the period and result filters
    pub fn matches(shot: &Shot, filter: &CourtFilter) -> bool {
        shot.period_or_default() == filter.period && filter.is_result_enabled(shot.result)
    }

    /// Players the filter applies to
    pub fn players<'a>(players: &'a [Player], filter: &CourtFilter) -> Vec<&'a Player> {
        match filter.player_id {
            Some(ref id) => players.iter().filter(|p| &p.id == id).collect(),
            None => players.iter().collect(),
        }
    }

    /// Shots to draw, paired with their owner, in roster order.
    ///
    /// Never modifies the records; shots without a stored position are
    /// matched but cannot be drawn, so they are left out.
    pub fn visible_shots<'a>(
        players: &'a [Player],
        filter: &CourtFilter,
    ) -> Vec<(&'a Player, &'a Shot)> {
        Self::players(players, filter)
            .into_iter()
            .flat_map(|player| {
                player
                    .shots
                    .iter()
                    .filter(move |shot| shot.position.is_some() && Self::matches(shot, filter))
                    .map(move |shot| (player, shot))
            })
            .collect()
    }

    /// Number of shots matching the filter, including ones without a position
    pub fn count_matching(players: &[Player], filter: &CourtFilter) -> usize {
        Self::players(players, filter)
            .iter()
            .flat_map(|p| p.shots.iter())
            .filter(|shot| Self::matches(shot, filter))
            .count()
    }
}
