//! Integration tests for game sessions backed by on-disk stores.
//!
//! These tests drive complete workflows through `GameSession` and
//! `LocalStore`: recording a game, sharing it between two sessions, loading
//! documents written by older versions, and exporting reports.

use std::fs;
use std::sync::Arc;

use shot_counter_core::{
    Config, CourtPoint, DocumentStore, Error, ExportFormat, GameCode, GameSession, LocalStore,
    ShotResult, ShotType, StatsAnalyzer, TeamSide,
};
use tempfile::TempDir;

/// Test fixture holding a temporary game directory
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::new(LocalStore::open(self.temp_dir.path().join("games")).expect("Failed to open store"))
    }

    fn session(&self, code: &str) -> GameSession {
        GameSession::open(self.store(), GameCode::parse(code).expect("valid code"))
            .expect("Failed to open session")
    }

    fn write_raw(&self, code: &str, json: &str) {
        let dir = self.temp_dir.path().join("games");
        fs::create_dir_all(&dir).expect("Failed to create games dir");
        fs::write(dir.join(format!("{}.json", code)), json).expect("Failed to write game");
    }
}

#[test]
fn test_scenario_from_first_period() {
    let fixture = TestFixture::new();
    let mut game = fixture.session("100001");

    let p1 = game.add_player(1, "One").unwrap().id;
    let p2 = game.add_player(2, "Two").unwrap().id;

    game.record_shot(&p1, CourtPoint::new(250.0, 10.0), ShotResult::Made)
        .unwrap();
    game.record_shot(&p1, CourtPoint::new(10.0, 200.0), ShotResult::Missed)
        .unwrap();
    game.record_shot(&p2, CourtPoint::new(250.0, 300.0), ShotResult::Made)
        .unwrap();

    let team = game.team_stats();
    assert_eq!(team.total, 3);
    assert_eq!(team.made, 2);
    assert_eq!(team.missed, 1);
    assert_eq!(team.points, 5);
    assert_eq!(team.fg_percentage, 67);
    assert_eq!(team.by_shot_type[&ShotType::ThreePoint].total, 2);

    let all_shots: Vec<_> = game
        .players()
        .iter()
        .flat_map(|p| p.shots.iter().cloned())
        .collect();
    assert_eq!(StatsAnalyzer::summarize(&all_shots).fg_display(), "66.7%");
}

#[test]
fn test_game_survives_reopen() {
    let fixture = TestFixture::new();
    {
        let mut game = fixture.session("200002");
        game.set_game_name("League Night").unwrap();
        game.set_active_side(TeamSide::Away);
        let id = game.add_player(11, "Visitor").unwrap().id;
        game.select_period(2);
        game.record_shot(&id, CourtPoint::new(30.0, 20.0), ShotResult::Made)
            .unwrap();
        game.add_foul(&id).unwrap();
    }

    let game = fixture.session("200002");
    assert_eq!(game.game_name(), "League Night");
    assert!(game.roster().home.is_empty());
    let visitor = &game.roster().away[0];
    assert_eq!(visitor.fouls, 1);
    assert_eq!(visitor.shots[0].period, Some(2));
    assert_eq!(visitor.shots[0].shot_type, Some(ShotType::ThreePoint));
}

#[test]
fn test_two_sessions_share_a_game() {
    let fixture = TestFixture::new();
    let store = fixture.store();
    let code = GameCode::parse("300003").unwrap();

    let mut scorer = GameSession::open(store.clone(), code.clone()).unwrap();
    let mut viewer = GameSession::open(store, code).unwrap();
    let updates = viewer.subscribe().unwrap();

    let id = scorer.add_player(5, "Guard").unwrap().id;
    scorer
        .record_shot(&id, CourtPoint::new(240.0, 60.0), ShotResult::Made)
        .unwrap();

    for doc in updates.try_iter() {
        viewer.apply_remote(&doc);
    }
    assert_eq!(viewer.roster(), scorer.roster());
    assert_eq!(viewer.team_stats(), scorer.team_stats());
}

#[test]
fn test_last_write_wins() {
    let fixture = TestFixture::new();
    let mut a = fixture.session("400004");
    let mut b = fixture.session("400004");

    a.add_player(1, "From A").unwrap();
    b.add_player(2, "From B").unwrap();

    let reopened = fixture.session("400004");
    assert_eq!(reopened.players().len(), 1);
    assert_eq!(reopened.players()[0].name, "From B");
}

#[test]
fn test_legacy_document_loads_as_home() {
    let fixture = TestFixture::new();
    fixture.write_raw(
        "500005",
        r#"{
            "gameName": "Old Save",
            "players": [
                {
                    "id": "1700000000000",
                    "name": "Legacy",
                    "number": 8,
                    "shots": [
                        {"id": "1", "result": "made", "type": "3pt", "position": {"x": 20, "y": 30}},
                        {"id": "2", "result": "made", "position": {"x": 250, "y": 10}, "period": 2},
                        {"id": "3", "result": "blocked", "type": "4pt"}
                    ]
                }
            ]
        }"#,
    );

    let mut game = fixture.session("500005");
    assert_eq!(game.game_name(), "Old Save");
    assert!(game.roster().away.is_empty());

    let legacy = game.player_by_number(8).unwrap().id.clone();
    let summary = game.player_summary(&legacy).unwrap();
    assert_eq!(summary.total_shots, 3);
    assert_eq!(summary.made, 2);
    assert_eq!(summary.missed, 0);
    assert_eq!(summary.points, 5);

    let detailed = game.player_detailed(&legacy).unwrap();
    assert_eq!(detailed.by_period[&1].total, 2);
    assert_eq!(detailed.by_period[&2].total, 1);

    // Only the shot with a known result and a position in period 1 is drawn
    assert_eq!(game.visible_shots().len(), 1);

    // The first write upgrades the document to the two-team layout
    game.add_foul(&legacy).unwrap();
    let raw = fs::read_to_string(fixture.temp_dir.path().join("games/500005.json")).unwrap();
    assert!(raw.contains("homePlayers"));
    assert!(!raw.contains("\"players\""));
}

#[test]
fn test_damaged_shot_does_not_lose_the_roster() {
    let fixture = TestFixture::new();
    fixture.write_raw(
        "510005",
        r#"{
            "homePlayers": [
                {"id": "a", "number": 1, "shots": [
                    {"id": "s1", "result": "made", "type": "3pt", "position": {"x": 20, "y": 30}}
                ]},
                {"id": "b", "number": 2, "shots": [
                    {"result": "missed", "type": "2pt", "position": {"x": 250, "y": 100}}
                ]}
            ],
            "awayPlayers": []
        }"#,
    );

    let mut game = fixture.session("510005");
    assert_eq!(game.roster().home.len(), 2);
    game.add_player(9, "New").unwrap();

    let reopened = fixture.session("510005");
    let home = &reopened.roster().home;
    assert_eq!(home.len(), 3);
    let a = reopened.player_by_number(1).unwrap();
    assert_eq!(a.id, "a");
    assert_eq!(a.shots.len(), 1);
    assert_eq!(reopened.player_by_number(2).unwrap().shots.len(), 1);
}

#[test]
fn test_duplicate_number_leaves_store_untouched() {
    let fixture = TestFixture::new();
    let mut game = fixture.session("600006");
    game.add_player(4, "First").unwrap();

    let result = game.add_player(4, "Second");
    assert!(matches!(
        result,
        Err(Error::DuplicatePlayerNumber {
            side: TeamSide::Home,
            number: 4
        })
    ));

    // Same number on the other side is fine
    game.switch_team();
    game.add_player(4, "Away Four").unwrap();

    let reopened = fixture.session("600006");
    assert_eq!(reopened.roster().home.len(), 1);
    assert_eq!(reopened.roster().away.len(), 1);
}

#[test]
fn test_export_all_formats() {
    let fixture = TestFixture::new();
    let mut game = fixture.session("700007");
    game.set_game_name("Cup Final").unwrap();
    let id = game.add_player(23, "Jordan").unwrap().id;
    game.record_shot(&id, CourtPoint::new(250.0, 10.0), ShotResult::Made)
        .unwrap();

    let report = game.report();
    assert!(report.file_name().starts_with("Basketball_Stats_Cup_Final_"));

    for format in [ExportFormat::Text, ExportFormat::Json, ExportFormat::Csv] {
        let path = fixture
            .temp_dir
            .path()
            .join(format!("report.{}", format.extension()));
        format.export(&report, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());
    }

    let text = fs::read_to_string(fixture.temp_dir.path().join("report.txt")).unwrap();
    assert!(text.contains("Game: Cup Final"));
    assert!(text.contains("1. Jordan (#23)"));
    assert!(text.contains("AWAY TEAM STATISTICS\n====================\n\nNo players added.\n"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixture.temp_dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(json["gameName"], "Cup Final");
}

#[test]
fn test_join_and_new_game() {
    let fixture = TestFixture::new();
    let mut host = fixture.session("800008");
    host.add_player(3, "").unwrap();

    let mut other = fixture.session("900009");
    other.join_game("800008").unwrap();
    assert_eq!(other.players().len(), 1);

    let old = other.code().clone();
    other.new_game().unwrap();
    assert_ne!(other.code(), &old);
    assert!(other.players().is_empty());

    // The old game is untouched
    let host_again = fixture.session("800008");
    assert_eq!(host_again.players().len(), 1);
}

#[test]
fn test_config_classifier_drives_session() {
    let fixture = TestFixture::new();
    let config = Config {
        data_dir: fixture.temp_dir.path().join("games"),
        arc_iterations: 40,
        ..Config::default()
    };
    let path = fixture.temp_dir.path().join("config.json");
    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    let store: Arc<dyn DocumentStore> = Arc::new(LocalStore::open(&loaded.data_dir).unwrap());
    let mut game = GameSession::open(store, GameCode::generate())
        .unwrap()
        .with_classifier(loaded.classifier());
    let id = game.add_player(0, "").unwrap().id;
    let shot = game
        .record_shot(&id, CourtPoint::new(250.0, 300.0), ShotResult::Missed)
        .unwrap();
    assert_eq!(shot.shot_type, Some(ShotType::ThreePoint));
}
