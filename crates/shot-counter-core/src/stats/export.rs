//! Report export for game statistics

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use super::analyzer::StatsAnalyzer;
use super::model::{PlayerSummary, TeamStats};
use crate::court::ShotType;
use crate::error::{Error, Result};
use crate::roster::{Player, Roster, TeamSide};

/// Name used when a game has not been named
pub const UNTITLED_GAME: &str = "Untitled Game";

/// A snapshot of a game ready to be exported
#[derive(Debug, Clone)]
pub struct GameReport<'a> {
    pub game_name: &'a str,
    pub roster: &'a Roster,
    pub generated_at: DateTime<Local>,
}

impl<'a> GameReport<'a> {
    /// Create a report stamped with the current local time
    pub fn new(game_name: &'a str, roster: &'a Roster) -> Self {
        Self {
            game_name,
            roster,
            generated_at: Local::now(),
        }
    }

    /// The game name, or "Untitled Game"
    pub fn display_name(&self) -> &str {
        if self.game_name.trim().is_empty() {
            UNTITLED_GAME
        } else {
            self.game_name
        }
    }

    /// Plain-text report covering both teams
    pub fn render_text(&self) -> String {
        let mut report = String::new();
        report.push_str("BASKETBALL SHOT COUNTER REPORT\n");
        report.push_str("================================\n\n");
        let _ = writeln!(report, "Game: {}", self.display_name());
        let _ = writeln!(
            report,
            "Date: {} {}\n",
            self.generated_at.format("%-m/%-d/%Y"),
            self.generated_at.format("%-I:%M:%S %p")
        );

        render_team(&mut report, TeamSide::Home, &self.roster.sorted_by_number(TeamSide::Home));
        report.push('\n');
        render_team(&mut report, TeamSide::Away, &self.roster.sorted_by_number(TeamSide::Away));

        report
    }

    /// Suggested file name for the text report
    pub fn file_name(&self) -> String {
        report_file_name(self.display_name(), self.generated_at.date_naive())
    }
}

/// Players are listed by jersey number, as on the roster view
fn render_team(report: &mut String, side: TeamSide, players: &[&Player]) {
    let _ = writeln!(report, "{} TEAM STATISTICS", side.report_label());
    report.push_str("====================\n\n");

    if players.is_empty() {
        report.push_str("No players added.\n\n");
        return;
    }

    for (index, player) in players.iter().enumerate() {
        let stats = StatsAnalyzer::player_summary(player);
        let _ = writeln!(report, "{}. {}", index + 1, player.display_name());
        render_player_lines(report, player, &stats);
        report.push('\n');
    }
}

fn render_player_lines(report: &mut String, player: &Player, stats: &PlayerSummary) {
    let _ = writeln!(report, "   Total Shots: {}", stats.total_shots);
    let _ = writeln!(report, "   Made: {}", stats.made);
    let _ = writeln!(report, "   Missed: {}", stats.missed);
    let _ = writeln!(report, "   Field Goal %: {}", stats.fg_display());
    let _ = writeln!(report, "   Points: {}", stats.points);

    for shot_type in ShotType::ALL {
        let counts = stats.type_counts(shot_type);
        let _ = writeln!(
            report,
            "   {} Shots: {} ({} made, {} missed)",
            shot_type.display_name(),
            counts.total,
            counts.made,
            counts.missed
        );
    }

    let _ = writeln!(report, "   Fouls: {}", player.fouls);
}

/// `Basketball_Stats_<name>_<YYYY-MM-DD>.txt`, with every character of the
/// name that is not an ASCII letter or digit replaced by `_`
pub fn report_file_name(game_name: &str, date: NaiveDate) -> String {
    let safe_name: String = game_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!(
        "Basketball_Stats_{}_{}.txt",
        safe_name,
        date.format("%Y-%m-%d")
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportPlayer<'a> {
    id: &'a str,
    name: &'a str,
    number: u8,
    fouls: u32,
    stats: PlayerSummary,
}

#[derive(Serialize)]
struct ExportTeam<'a> {
    totals: TeamStats,
    players: Vec<ExportPlayer<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportData<'a> {
    game_name: &'a str,
    generated_at: String,
    home: ExportTeam<'a>,
    away: ExportTeam<'a>,
}

fn export_team(roster: &Roster, side: TeamSide) -> ExportTeam<'_> {
    ExportTeam {
        totals: StatsAnalyzer::team(roster.side(side)),
        players: roster
            .sorted_by_number(side)
            .into_iter()
            .map(|p| ExportPlayer {
                id: &p.id,
                name: &p.name,
                number: p.number,
                fouls: p.fouls,
                stats: StatsAnalyzer::player_summary(p),
            })
            .collect(),
    }
}

/// Serialize both teams' statistics as pretty JSON
pub fn render_json(report: &GameReport<'_>) -> Result<String> {
    let data = ExportData {
        game_name: report.display_name(),
        generated_at: report.generated_at.to_rfc3339(),
        home: export_team(report.roster, TeamSide::Home),
        away: export_team(report.roster, TeamSide::Away),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Export the plain-text report
pub fn export_text(report: &GameReport<'_>, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(report.render_text().as_bytes())?;
    Ok(())
}

/// Export statistics to JSON format
pub fn export_json(report: &GameReport<'_>, path: &Path) -> Result<()> {
    let json = render_json(report)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Export one row per player to CSV format
pub fn export_csv(report: &GameReport<'_>, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_csv(report, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(report: &GameReport<'_>, writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record([
        "Team",
        "Number",
        "Name",
        "Total Shots",
        "Made",
        "Missed",
        "FG%",
        "Points",
        "2PT Made",
        "2PT Attempts",
        "3PT Made",
        "3PT Attempts",
        "Fouls",
    ])?;

    for side in [TeamSide::Home, TeamSide::Away] {
        for player in report.roster.sorted_by_number(side) {
            let stats = StatsAnalyzer::player_summary(player);
            let two = stats.type_counts(ShotType::TwoPoint);
            let three = stats.type_counts(ShotType::ThreePoint);
            writer.write_record([
                side.to_string(),
                player.number.to_string(),
                player.name.clone(),
                stats.total_shots.to_string(),
                stats.made.to_string(),
                stats.missed.to_string(),
                format!("{:.1}", stats.fg_percentage),
                stats.points.to_string(),
                two.made.to_string(),
                two.total.to_string(),
                three.made.to_string(),
                three.total.to_string(),
                player.fouls.to_string(),
            ])?;
        }
    }

    Ok(())
}

/// Render the CSV table into a string
pub fn render_csv(report: &GameReport<'_>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_csv(report, &mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Other(format!("Failed to finish CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV is not UTF-8: {}", e)))
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "Text"),
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "Invalid format '{}'. Use: text, json, or csv",
                other
            )),
        }
    }
}

impl ExportFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Render the report in this format
    pub fn render(&self, report: &GameReport<'_>) -> Result<String> {
        match self {
            ExportFormat::Text => Ok(report.render_text()),
            ExportFormat::Json => render_json(report),
            ExportFormat::Csv => render_csv(report),
        }
    }

    /// Export the report using this format
    pub fn export(&self, report: &GameReport<'_>, path: &Path) -> Result<()> {
        match self {
            ExportFormat::Text => export_text(report, path),
            ExportFormat::Json => export_json(report, path),
            ExportFormat::Csv => export_csv(report, path),
        }
    }
}
