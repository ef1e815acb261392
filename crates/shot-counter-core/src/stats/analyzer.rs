//! Statistics aggregation over shot records

use crate::court::ShotType;
use crate::roster::{Player, Shot};

use super::model::{
    BucketStats, Breakdown, DetailedStats, PlayerLine, PlayerSummary, TeamStats, TypeCounts,
};

/// Aggregates shot records into player and team summaries.
///
/// Every method is a pure function of its input: nothing is cached and the
/// input is never modified, so recomputing after a roster snapshot has been
/// replaced is always safe.
pub struct StatsAnalyzer;

impl StatsAnalyzer {
    /// Fold shots into every breakdown dimension
    pub fn breakdown<'a>(shots: impl IntoIterator<Item = &'a Shot>) -> Breakdown {
        let mut breakdown = Breakdown::default();
        for shot in shots {
            breakdown.add(&shot.normalized());
        }
        breakdown
    }

    /// Basic summary for a list of shots
    pub fn summarize(shots: &[Shot]) -> PlayerSummary {
        let breakdown = Self::breakdown(shots);

        let shot_type_counts = ShotType::ALL
            .iter()
            .map(|shot_type| {
                let counts = breakdown
                    .by_type
                    .get(shot_type)
                    .map(TypeCounts::from)
                    .unwrap_or_default();
                (*shot_type, counts)
            })
            .collect();

        PlayerSummary {
            total_shots: breakdown.overall.total,
            made: breakdown.overall.made,
            missed: breakdown.overall.missed,
            points: breakdown.overall.points,
            fg_percentage: breakdown.overall.fg_percentage(),
            shot_type_counts,
        }
    }

    /// Basic summary for one player
    pub fn player_summary(player: &Player) -> PlayerSummary {
        Self::summarize(&player.shots)
    }

    /// Detailed breakdown for one player
    pub fn player_detailed(player: &Player) -> DetailedStats {
        let breakdown = Self::breakdown(&player.shots);

        DetailedStats {
            total: breakdown.overall.total,
            made: breakdown.overall.made,
            missed: breakdown.overall.missed,
            points: breakdown.overall.points,
            fg_percentage: breakdown.overall.fg_percentage_rounded(),
            by_period: breakdown
                .by_period
                .iter()
                .map(|(period, tally)| (*period, BucketStats::from(tally)))
                .collect(),
            by_shot_type: breakdown
                .by_type
                .iter()
                .map(|(shot_type, tally)| (*shot_type, BucketStats::from(tally)))
                .collect(),
            by_result: breakdown.by_result,
        }
    }

    /// Breakdown for a whole roster, with a row per player who has shots
    pub fn team(players: &[Player]) -> TeamStats {
        let breakdown = Self::breakdown(players.iter().flat_map(|p| p.shots.iter()));

        let by_player = players
            .iter()
            .filter(|p| !p.shots.is_empty())
            .map(|player| {
                let summary = Self::player_summary(player);
                let line = PlayerLine {
                    name: player.name.clone(),
                    number: player.number,
                    total: summary.total_shots,
                    made: summary.made,
                    missed: summary.missed,
                    points: summary.points,
                    fg_percentage: summary.fg_percentage,
                };
                (player.id.clone(), line)
            })
            .collect();

        tracing::trace!(
            players = players.len(),
            shots = breakdown.overall.total,
            "Aggregated team stats"
        );

        TeamStats {
            total: breakdown.overall.total,
            made: breakdown.overall.made,
            missed: breakdown.overall.missed,
            points: breakdown.overall.points,
            fg_percentage: breakdown.overall.fg_percentage_rounded(),
            by_period: breakdown
                .by_period
                .iter()
                .map(|(period, tally)| (*period, BucketStats::from(tally)))
                .collect(),
            by_shot_type: breakdown
                .by_type
                .iter()
                .map(|(shot_type, tally)| (*shot_type, BucketStats::from(tally)))
                .collect(),
            by_result: breakdown.by_result,
            by_player,
        }
    }
}
