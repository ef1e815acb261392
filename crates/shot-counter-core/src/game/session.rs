//! A live game: roster, court view state and its stored document

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use crate::court::{BisectionSolver, CourtPoint, ShotClassifier};
use crate::error::{Error, Result};
use crate::filter::{CourtFilter, FilterEngine};
use crate::roster::{Player, Roster, Shot, ShotResult, TeamSide};
use crate::stats::{DetailedStats, GameReport, PlayerSummary, StatsAnalyzer, TeamStats};
use crate::store::{DocumentStore, GameCode, GameDocument};

/// One game being tracked, backed by a [`DocumentStore`].
///
/// Every mutation writes a full roster snapshot back to the store. When that
/// write fails the mutation is rolled back, so the session never holds a
/// change the store did not accept. The current period drives both new shots
/// and the court filter.
pub struct GameSession {
    code: GameCode,
    game_name: String,
    roster: Roster,
    active_side: TeamSide,
    filter: CourtFilter,
    classifier: ShotClassifier<BisectionSolver>,
    store: Arc<dyn DocumentStore>,
}

impl GameSession {
    /// Open the game stored under `code`, starting empty if nothing is
    /// stored yet. Nothing is written until the first mutation.
    pub fn open(store: Arc<dyn DocumentStore>, code: GameCode) -> Result<Self> {
        let mut session = Self {
            code,
            game_name: String::new(),
            roster: Roster::new(),
            active_side: TeamSide::Home,
            filter: CourtFilter::new(),
            classifier: ShotClassifier::new(),
            store,
        };

        if let Some(doc) = session.store.get(&session.code)? {
            session.apply_remote(&doc);
        }
        tracing::info!(
            code = %session.code,
            store = session.store.name(),
            players = session.roster.home.len() + session.roster.away.len(),
            "Opened game"
        );
        Ok(session)
    }

    /// Use a classifier with a different solver precision
    pub fn with_classifier(mut self, classifier: ShotClassifier<BisectionSolver>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn code(&self) -> &GameCode {
        &self.code
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn active_side(&self) -> TeamSide {
        self.active_side
    }

    /// Players of the active side
    pub fn players(&self) -> &[Player] {
        self.roster.side(self.active_side)
    }

    pub fn period(&self) -> u32 {
        self.filter.period
    }

    pub fn filter(&self) -> &CourtFilter {
        &self.filter
    }

    /// Make `side` the active team. The player filter belongs to the old
    /// team, so it is cleared.
    pub fn set_active_side(&mut self, side: TeamSide) {
        if side != self.active_side {
            self.active_side = side;
            self.filter.clear_player();
            tracing::debug!(%side, "Switched team");
        }
    }

    /// Flip between home and away
    pub fn switch_team(&mut self) -> TeamSide {
        self.set_active_side(self.active_side.opposite());
        self.active_side
    }

    /// Select the period used for new shots and for the court view
    pub fn select_period(&mut self, period: u32) {
        self.filter.period = period.max(1);
    }

    /// Restrict the court view to one player of the active side, or show all
    pub fn select_player(&mut self, player_id: Option<&str>) -> Result<()> {
        match player_id {
            Some(id) => {
                if self.roster.find_player(self.active_side, id).is_none() {
                    return Err(Error::PlayerNotFound(id.to_string()));
                }
                self.filter.player_id = Some(id.to_string());
            }
            None => self.filter.clear_player(),
        }
        Ok(())
    }

    /// Toggle visibility of made or missed shots on the court
    pub fn toggle_result(&mut self, result: ShotResult) {
        self.filter.toggle_result(result);
    }

    /// Player of the active side wearing `number`
    pub fn player_by_number(&self, number: u8) -> Result<&Player> {
        self.roster
            .find_by_number(self.active_side, number)
            .ok_or_else(|| Error::PlayerNotFound(format!("#{}", number)))
    }

    pub fn add_player(&mut self, number: i64, name: &str) -> Result<Player> {
        let side = self.active_side;
        self.commit(|roster| Ok(roster.add_player(side, number, name)?.clone()))
    }

    /// Remove a player and their shots. A player filter pointing at them is
    /// cleared.
    pub fn remove_player(&mut self, player_id: &str) -> Result<Player> {
        let side = self.active_side;
        let removed = self.commit(|roster| roster.remove_player(side, player_id))?;
        if self.filter.player_id.as_deref() == Some(player_id) {
            self.filter.clear_player();
        }
        Ok(removed)
    }

    pub fn add_foul(&mut self, player_id: &str) -> Result<u32> {
        let side = self.active_side;
        self.commit(|roster| roster.add_foul(side, player_id))
    }

    /// Record a shot in the current period
    pub fn record_shot(
        &mut self,
        player_id: &str,
        position: CourtPoint,
        result: ShotResult,
    ) -> Result<Shot> {
        let side = self.active_side;
        let period = self.filter.period;
        let classifier = self.classifier.clone();
        self.commit(|roster| {
            Ok(roster
                .record_shot_with(&classifier, side, player_id, position, result, period)?
                .clone())
        })
    }

    pub fn delete_shot(&mut self, player_id: &str, shot_id: &str) -> Result<Shot> {
        let side = self.active_side;
        self.commit(|roster| roster.delete_shot(side, player_id, shot_id))
    }

    /// Remove every shot of the active side, keeping its players
    pub fn clear_shots(&mut self) -> Result<usize> {
        let side = self.active_side;
        let cleared = self.commit(|roster| Ok(roster.clear_shots(side)))?;
        tracing::info!(side = %side, cleared, "Cleared shots");
        Ok(cleared)
    }

    pub fn set_game_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim().to_string();
        self.store
            .set_merge(&self.code, GameDocument::name_only(&name))?;
        self.game_name = name;
        tracing::debug!(name = %self.game_name, "Saved game name");
        Ok(())
    }

    /// Replace local state with a document received from the store.
    ///
    /// The roster is replaced wholesale when the document carries one; the
    /// name only when it is non-empty. Applying the same document twice
    /// leaves the session unchanged.
    pub fn apply_remote(&mut self, doc: &GameDocument) {
        if let Some(name) = doc.game_name.as_deref().filter(|n| !n.is_empty()) {
            self.game_name = name.to_string();
        }
        if let Some(roster) = doc.roster() {
            self.roster = roster;
            if let Some(id) = self.filter.player_id.clone() {
                if self.roster.find_player(self.active_side, &id).is_none() {
                    self.filter.clear_player();
                }
            }
            tracing::debug!(code = %self.code, "Applied remote update");
        }
    }

    /// Listen for documents written to this game
    pub fn subscribe(&self) -> Result<Receiver<GameDocument>> {
        self.store.subscribe(&self.code)
    }

    /// Start a fresh game under a new random code, clearing both teams and
    /// the name
    pub fn new_game(&mut self) -> Result<&GameCode> {
        let code = GameCode::generate();
        self.store
            .set_merge(&code, GameDocument::snapshot(&Roster::new(), ""))?;

        self.code = code;
        self.roster = Roster::new();
        self.game_name.clear();
        self.filter.clear_player();
        tracing::info!(code = %self.code, "Created new game");
        Ok(&self.code)
    }

    /// Switch to the game stored under `code`
    pub fn join_game(&mut self, code: &str) -> Result<&GameCode> {
        let code = GameCode::parse(code)?;
        let doc = self
            .store
            .get(&code)?
            .ok_or_else(|| Error::GameNotFound(code.to_string()))?;

        self.code = code;
        self.roster = Roster::new();
        self.game_name.clear();
        self.filter.clear_player();
        self.apply_remote(&doc);
        tracing::info!(code = %self.code, "Joined game");
        Ok(&self.code)
    }

    /// Shots drawn on the court for the active side under the current filter
    pub fn visible_shots(&self) -> Vec<(&Player, &Shot)> {
        FilterEngine::visible_shots(self.players(), &self.filter)
    }

    pub fn player_summary(&self, player_id: &str) -> Result<PlayerSummary> {
        self.find(player_id).map(StatsAnalyzer::player_summary)
    }

    pub fn player_detailed(&self, player_id: &str) -> Result<DetailedStats> {
        self.find(player_id).map(StatsAnalyzer::player_detailed)
    }

    /// Team statistics for the active side
    pub fn team_stats(&self) -> TeamStats {
        StatsAnalyzer::team(self.players())
    }

    /// Report over both teams
    pub fn report(&self) -> GameReport<'_> {
        GameReport::new(&self.game_name, &self.roster)
    }

    fn find(&self, player_id: &str) -> Result<&Player> {
        self.roster
            .find_player(self.active_side, player_id)
            .ok_or_else(|| Error::PlayerNotFound(player_id.to_string()))
    }

    /// Apply `change` to the roster and write the result, restoring the
    /// previous roster if either step fails
    fn commit<T>(&mut self, change: impl FnOnce(&mut Roster) -> Result<T>) -> Result<T> {
        let before = self.roster.clone();
        let outcome = change(&mut self.roster).and_then(|value| {
            let snapshot = GameDocument::snapshot(&self.roster, &self.game_name);
            self.store.set_merge(&self.code, snapshot)?;
            Ok(value)
        });
        if outcome.is_err() {
            self.roster = before;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::ShotType;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn create_session() -> GameSession {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        GameSession::open(store, GameCode::parse("100200").unwrap()).unwrap()
    }

    #[test]
    fn test_record_shot_uses_period_and_classifier() {
        let mut session = create_session();
        let id = session.add_player(23, "Jordan").unwrap().id;
        session.select_period(3);

        let shot = session
            .record_shot(&id, CourtPoint::new(250.0, 10.0), ShotResult::Made)
            .unwrap();
        assert_eq!(shot.period, Some(3));
        assert_eq!(shot.shot_type, Some(ShotType::TwoPoint));

        let shot = session
            .record_shot(&id, CourtPoint::new(10.0, 200.0), ShotResult::Missed)
            .unwrap();
        assert_eq!(shot.shot_type, Some(ShotType::ThreePoint));
        assert_eq!(session.player_summary(&id).unwrap().points, 2);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let code = GameCode::parse("100200").unwrap();
        let mut session = GameSession::open(store.clone(), code.clone()).unwrap();
        let id = session.add_player(5, "").unwrap().id;
        session.add_foul(&id).unwrap();

        let doc = store.get(&code).unwrap().unwrap();
        let roster = doc.roster().unwrap();
        assert_eq!(roster.home[0].fouls, 1);
        assert!(roster.away.is_empty());
    }

    #[test]
    fn test_switch_team_resets_player_filter() {
        let mut session = create_session();
        let id = session.add_player(1, "").unwrap().id;
        session.select_player(Some(&id)).unwrap();
        assert_eq!(session.filter().player_id.as_deref(), Some(id.as_str()));

        assert_eq!(session.switch_team(), TeamSide::Away);
        assert!(session.filter().player_id.is_none());
        assert!(session.players().is_empty());
    }

    #[test]
    fn test_remove_player_clears_filter() {
        let mut session = create_session();
        let id = session.add_player(1, "").unwrap().id;
        session.select_player(Some(&id)).unwrap();
        session.remove_player(&id).unwrap();
        assert!(session.filter().player_id.is_none());
    }

    #[test]
    fn test_select_unknown_player() {
        let mut session = create_session();
        assert!(matches!(
            session.select_player(Some("nobody")),
            Err(Error::PlayerNotFound(_))
        ));
    }

    #[test]
    fn test_apply_remote_is_idempotent() {
        let mut session = create_session();
        let mut roster = Roster::new();
        roster.add_player(TeamSide::Away, 9, "Remote").unwrap();
        let doc = GameDocument::snapshot(&roster, "Synced");

        session.apply_remote(&doc);
        let once = session.roster().clone();
        session.apply_remote(&doc);
        assert_eq!(session.roster(), &once);
        assert_eq!(session.roster(), &roster);
        assert_eq!(session.game_name(), "Synced");
    }

    #[test]
    fn test_apply_remote_keeps_name_when_empty() {
        let mut session = create_session();
        session.set_game_name("Local").unwrap();
        session.apply_remote(&GameDocument::snapshot(&Roster::new(), ""));
        assert_eq!(session.game_name(), "Local");
    }

    #[test]
    fn test_new_game_clears_everything() {
        let mut session = create_session();
        session.add_player(1, "").unwrap();
        session.set_game_name("Old").unwrap();
        let old = session.code().clone();

        session.new_game().unwrap();
        assert_ne!(session.code(), &old);
        assert_eq!(session.roster(), &Roster::new());
        assert_eq!(session.game_name(), "");
    }

    #[test]
    fn test_join_game() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let mut host = GameSession::open(store.clone(), GameCode::parse("555000").unwrap()).unwrap();
        host.add_player(7, "Host").unwrap();

        let mut guest = GameSession::open(store, GameCode::parse("000111").unwrap()).unwrap();
        guest.join_game("555-000").unwrap();
        assert_eq!(guest.code().as_str(), "555000");
        assert_eq!(guest.players().len(), 1);

        assert!(matches!(guest.join_game("12"), Err(Error::InvalidGameCode(_))));
        assert!(matches!(guest.join_game("999999"), Err(Error::GameNotFound(_))));
        assert_eq!(guest.code().as_str(), "555000");
    }

    #[test]
    fn test_subscription_delivers_other_writers() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let code = GameCode::parse("321321").unwrap();
        let mut a = GameSession::open(store.clone(), code.clone()).unwrap();
        let mut b = GameSession::open(store, code).unwrap();
        let rx = b.subscribe().unwrap();

        a.add_player(4, "Shared").unwrap();
        let doc = rx.try_recv().unwrap();
        b.apply_remote(&doc);
        assert_eq!(b.players()[0].name, "Shared");
    }

    /// Memory store whose writes can be switched off
    struct FlakyStore {
        inner: MemoryStore,
        offline: AtomicBool,
    }

    impl DocumentStore for FlakyStore {
        fn get(&self, code: &GameCode) -> Result<Option<GameDocument>> {
            self.inner.get(code)
        }

        fn set_merge(&self, code: &GameCode, patch: GameDocument) -> Result<GameDocument> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(Error::Other("Store is offline".into()));
            }
            self.inner.set_merge(code, patch)
        }

        fn subscribe(&self, code: &GameCode) -> Result<Receiver<GameDocument>> {
            self.inner.subscribe(code)
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            offline: AtomicBool::new(false),
        });
        let code = GameCode::parse("246810").unwrap();
        let mut session = GameSession::open(store.clone(), code.clone()).unwrap();
        let id = session.add_player(12, "Center").unwrap().id;
        session.set_game_name("Kept").unwrap();
        let before = session.roster().clone();

        store.offline.store(true, Ordering::SeqCst);
        assert!(session.add_player(9, "Late").is_err());
        assert!(session
            .record_shot(&id, CourtPoint::new(250.0, 10.0), ShotResult::Made)
            .is_err());
        assert!(session.add_foul(&id).is_err());
        assert!(session.remove_player(&id).is_err());
        assert!(session.clear_shots().is_err());
        assert!(session.set_game_name("Lost").is_err());
        assert!(session.new_game().is_err());

        assert_eq!(session.roster(), &before);
        assert_eq!(session.game_name(), "Kept");
        assert_eq!(session.code(), &code);

        // Local state still matches what the store holds
        store.offline.store(false, Ordering::SeqCst);
        let stored = store.get(&code).unwrap().unwrap();
        assert_eq!(stored.roster().unwrap(), before);
    }
}
