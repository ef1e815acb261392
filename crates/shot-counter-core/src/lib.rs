//! # shot-counter-core
//!
//! Core library for charting basketball shots and summarizing them.
//!
//! This crate provides the foundational functionality for:
//! - Classifying court positions as two- or three-point attempts
//! - Managing home and away rosters, shots and fouls
//! - Aggregating shooting statistics per player, period, type and team
//! - Filtering the shots drawn on the court view
//! - Storing game documents under shareable six-digit codes
//! - Exporting game reports as text, JSON or CSV
//!
//! ## Modules
//!
//! - [`config`] - Configuration persisted between runs
//! - [`court`] - Court geometry and shot classification
//! - [`error`] - Error types and Result alias
//! - [`filter`] - Court view filtering
//! - [`game`] - Game session state
//! - [`roster`] - Players, shots and roster lifecycle
//! - [`stats`] - Statistics aggregation and report export
//! - [`store`] - Game document storage
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use shot_counter_core::{CourtPoint, GameCode, GameSession, MemoryStore, ShotResult};
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut game = GameSession::open(store, GameCode::generate()).unwrap();
//! let player = game.add_player(23, "Jordan").unwrap();
//! game.record_shot(&player.id, CourtPoint::new(250.0, 10.0), ShotResult::Made)
//!     .unwrap();
//!
//! let summary = game.player_summary(&player.id).unwrap();
//! assert_eq!(summary.points, 2);
//! assert_eq!(summary.fg_display(), "100.0%");
//! ```

// Module declarations
pub mod config;
pub mod court;
pub mod error;
pub mod filter;
pub mod game;
pub mod roster;
pub mod stats;
pub mod store;

// Re-export key types for convenience

// Error types
pub use error::{Error, Result};

// Court types
pub use court::{
    classify, classify_point, ArcSolver, BisectionSolver, CourtPoint, ShotClassifier, ShotType,
    ThreePointArc, COURT_HEIGHT, COURT_WIDTH,
};

// Roster types
pub use roster::{Player, Roster, Shot, ShotResult, TeamSide, DEFAULT_PERIOD, MAX_PLAYER_NUMBER};

// Stats types
pub use stats::{
    DetailedStats, ExportFormat, GameReport, PlayerSummary, StatsAnalyzer, TeamStats,
};

// Filter types
pub use filter::{CourtFilter, FilterEngine};

// Store types
pub use store::{DocumentStore, GameCode, GameDocument, LocalStore, MemoryStore};

// Game types
pub use game::GameSession;

// Config types
pub use config::Config;
