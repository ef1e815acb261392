//! Roster mutations: players, fouls and shots

use chrono::Utc;

use crate::court::{ArcSolver, CourtPoint, ShotClassifier};
use crate::error::{Error, Result};

use super::model::{Player, Roster, Shot, ShotResult, TeamSide};

/// Highest jersey number a player may wear
pub const MAX_PLAYER_NUMBER: i64 = 99;

/// Generate an id from the current time in milliseconds, bumped until it
/// does not collide with any of `existing`
pub(crate) fn fresh_id<'a>(existing: impl Iterator<Item = &'a str> + Clone) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !existing.clone().any(|e| e == id) {
            return id;
        }
        candidate += 1;
    }
}

impl Roster {
    /// Add a player to one side.
    ///
    /// The number must be 0-99 and not already worn on that side. The name is
    /// trimmed and may be empty. On failure the roster is left unchanged.
    pub fn add_player(&mut self, side: TeamSide, number: i64, name: &str) -> Result<&Player> {
        if !(0..=MAX_PLAYER_NUMBER).contains(&number) {
            return Err(Error::InvalidPlayerNumber(number));
        }
        let number = number as u8;

        if self.find_by_number(side, number).is_some() {
            return Err(Error::DuplicatePlayerNumber { side, number });
        }

        // Ids are unique across both sides so a player filter can never match
        // someone on the other team
        let id = fresh_id(
            self.home
                .iter()
                .chain(self.away.iter())
                .map(|p| p.id.as_str()),
        );
        tracing::debug!(%side, number, id = %id, "Adding player");

        let players = self.side_mut(side);
        players.push(Player::new(id, number, name.trim()));
        Ok(&players[players.len() - 1])
    }

    /// Remove a player and every shot they own
    pub fn remove_player(&mut self, side: TeamSide, player_id: &str) -> Result<Player> {
        let players = self.side_mut(side);
        let index = players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| Error::PlayerNotFound(player_id.to_string()))?;

        let removed = players.remove(index);
        tracing::debug!(
            %side,
            number = removed.number,
            shots = removed.shots.len(),
            "Removed player"
        );
        Ok(removed)
    }

    /// Add one foul to a player, returning the new count
    pub fn add_foul(&mut self, side: TeamSide, player_id: &str) -> Result<u32> {
        let player = self.player_mut(side, player_id)?;
        player.fouls += 1;
        Ok(player.fouls)
    }

    /// Record a shot with the standard classifier
    pub fn record_shot(
        &mut self,
        side: TeamSide,
        player_id: &str,
        position: CourtPoint,
        result: ShotResult,
        period: u32,
    ) -> Result<&Shot> {
        self.record_shot_with(&ShotClassifier::new(), side, player_id, position, result, period)
    }

    /// Record a shot, deriving its type from `position` with `classifier`.
    ///
    /// The type is fixed at this point and stored with the shot.
    pub fn record_shot_with<S: ArcSolver>(
        &mut self,
        classifier: &ShotClassifier<S>,
        side: TeamSide,
        player_id: &str,
        position: CourtPoint,
        result: ShotResult,
        period: u32,
    ) -> Result<&Shot> {
        if !position.in_bounds() {
            tracing::warn!(x = position.x, y = position.y, "Shot position outside the court");
        }

        let shot_type = classifier.classify_point(position);
        let period = period.max(1);

        let player = self.player_mut(side, player_id)?;
        let id = fresh_id(player.shots.iter().map(|s| s.id.as_str()));
        tracing::debug!(
            number = player.number,
            %result,
            %shot_type,
            period,
            "Recording shot"
        );

        player
            .shots
            .push(Shot::new(id, result, shot_type, position, period));
        Ok(&player.shots[player.shots.len() - 1])
    }

    /// Delete one shot by id
    pub fn delete_shot(&mut self, side: TeamSide, player_id: &str, shot_id: &str) -> Result<Shot> {
        let player = self.player_mut(side, player_id)?;
        let index = player
            .shots
            .iter()
            .position(|s| s.id == shot_id)
            .ok_or_else(|| Error::ShotNotFound {
                player_id: player_id.to_string(),
                shot_id: shot_id.to_string(),
            })?;
        Ok(player.shots.remove(index))
    }

    /// Empty every player's shot list on one side, keeping the players.
    /// Returns how many shots were removed.
    pub fn clear_shots(&mut self, side: TeamSide) -> usize {
        let mut cleared = 0;
        for player in self.side_mut(side).iter_mut() {
            cleared += player.shots.len();
            player.shots.clear();
        }
        cleared
    }

    /// Players on one side ordered by jersey number
    pub fn sorted_by_number(&self, side: TeamSide) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.side(side).iter().collect();
        players.sort_by_key(|p| p.number);
        players
    }

    fn player_mut(&mut self, side: TeamSide, player_id: &str) -> Result<&mut Player> {
        self.side_mut(side)
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| Error::PlayerNotFound(player_id.to_string()))
    }
}
