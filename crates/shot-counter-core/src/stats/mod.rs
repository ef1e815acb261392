//! Statistics aggregation and report export
//!
//! Rolls shot records up into per-player, per-period, per-type and per-team
//! summaries, and renders them as text, JSON or CSV reports.

mod analyzer;
mod export;
mod model;

pub use analyzer::StatsAnalyzer;
pub use export::{
    export_csv, export_json, export_text, render_csv, render_json, report_file_name,
    ExportFormat, GameReport, UNTITLED_GAME,
};
pub use model::*;
