//! Command-line front end for scripting and quick stat checks
//!
//! Usage:
//!   shot-counter classify <x> <y>                  Classify a court position
//!   shot-counter shot <side> <number> <x> <y> <made|missed>
//!   shot-counter team <side>                       Team statistics
//!   shot-counter export --format csv --out stats.csv
//!
//! Sides: home, away
//!
//! Options:
//!   --game <code>      Game to operate on
//!   --data-dir <dir>   Directory holding game files
//!   --json             Output in JSON format

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use shot_counter_core::config::Config;
use shot_counter_core::{
    CourtPoint, DocumentStore, ExportFormat, GameCode, GameSession, LocalStore, Player,
    ShotResult, ShotType, StatsAnalyzer, TeamSide,
};

/// CLI command to execute
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Classify {
        x: f64,
        y: f64,
    },
    AddPlayer {
        side: TeamSide,
        number: i64,
        name: String,
    },
    RemovePlayer {
        side: TeamSide,
        number: u8,
    },
    Foul {
        side: TeamSide,
        number: u8,
    },
    Shot {
        side: TeamSide,
        number: u8,
        position: CourtPoint,
        result: ShotResult,
        period: Option<u32>,
    },
    DeleteShot {
        side: TeamSide,
        number: u8,
        shot_id: String,
    },
    ClearShots {
        side: TeamSide,
    },
    Player {
        side: TeamSide,
        number: u8,
    },
    Team {
        side: TeamSide,
    },
    Court {
        side: TeamSide,
        period: Option<u32>,
        show_made: bool,
        show_missed: bool,
        player: Option<u8>,
    },
    Export {
        format: ExportFormat,
        out: Option<PathBuf>,
    },
    Game(GameAction),
}

/// `game` subcommands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    Show,
    Rename(String),
    New,
    Join(String),
}

/// CLI options
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub json: bool,
    pub verbose: bool,
    pub game: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Flags that only some commands read
#[derive(Debug, Default)]
struct CommandFlags {
    period: Option<u32>,
    no_made: bool,
    no_missed: bool,
    player: Option<u8>,
    format: Option<ExportFormat>,
    out: Option<PathBuf>,
}

/// Parse CLI arguments and return command + options
pub fn parse_args(args: &[String]) -> Result<(CliCommand, CliOptions), String> {
    let mut options = CliOptions::default();
    let mut flags = CommandFlags::default();
    let mut positional: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--json" => options.json = true,
            "--verbose" | "-v" => options.verbose = true,
            "--no-made" => flags.no_made = true,
            "--no-missed" => flags.no_missed = true,
            "--game" | "--data-dir" | "--period" | "--player" | "--format" | "--out" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", arg))?;
                match arg {
                    "--game" => options.game = Some(value.clone()),
                    "--data-dir" => options.data_dir = Some(PathBuf::from(value)),
                    "--period" => flags.period = Some(parse_period(value)?),
                    "--player" => flags.player = Some(parse_number(value)?),
                    "--format" => flags.format = Some(value.parse()?),
                    _ => flags.out = Some(PathBuf::from(value)),
                }
            }
            _ => {
                // Negative coordinates are values, not flags
                if arg.starts_with('-') && arg.parse::<f64>().is_err() {
                    return Err(format!("Unknown option: {}", arg));
                }
                positional.push(arg);
            }
        }
        i += 1;
    }

    let command = parse_command(&positional, flags)?;
    Ok((command, options))
}

fn parse_command(args: &[&str], flags: CommandFlags) -> Result<CliCommand, String> {
    let (name, rest) = args
        .split_first()
        .ok_or_else(|| "No command specified. Use --help to list commands".to_string())?;

    let arg = |index: usize, what: &str| required(name, rest, index, what);

    let command = match *name {
        "classify" => CliCommand::Classify {
            x: parse_coordinate(arg(0, "<x> <y>")?)?,
            y: parse_coordinate(arg(1, "<x> <y>")?)?,
        },
        "add-player" => CliCommand::AddPlayer {
            side: parse_side(arg(0, "a side")?)?,
            number: arg(1, "a player number")?
                .parse()
                .map_err(|_| format!("Invalid player number: {}", rest[1]))?,
            name: rest.get(2..).unwrap_or_default().join(" "),
        },
        "remove-player" => CliCommand::RemovePlayer {
            side: parse_side(arg(0, "a side")?)?,
            number: parse_number(arg(1, "a player number")?)?,
        },
        "foul" => CliCommand::Foul {
            side: parse_side(arg(0, "a side")?)?,
            number: parse_number(arg(1, "a player number")?)?,
        },
        "shot" => {
            let usage = "<side> <number> <x> <y> <made|missed>";
            CliCommand::Shot {
                side: parse_side(arg(0, usage)?)?,
                number: parse_number(arg(1, usage)?)?,
                position: CourtPoint::new(
                    parse_coordinate(arg(2, usage)?)?,
                    parse_coordinate(arg(3, usage)?)?,
                ),
                result: arg(4, usage)?.parse()?,
                period: flags.period,
            }
        }
        "delete-shot" => {
            let usage = "<side> <number> <shot-id>";
            CliCommand::DeleteShot {
                side: parse_side(arg(0, usage)?)?,
                number: parse_number(arg(1, usage)?)?,
                shot_id: arg(2, usage)?.to_string(),
            }
        }
        "clear-shots" => CliCommand::ClearShots {
            side: parse_side(arg(0, "a side")?)?,
        },
        "player" => CliCommand::Player {
            side: parse_side(arg(0, "a side")?)?,
            number: parse_number(arg(1, "a player number")?)?,
        },
        "team" => CliCommand::Team {
            side: parse_side(arg(0, "a side")?)?,
        },
        "court" => CliCommand::Court {
            side: parse_side(arg(0, "a side")?)?,
            period: flags.period,
            show_made: !flags.no_made,
            show_missed: !flags.no_missed,
            player: flags.player,
        },
        "export" => CliCommand::Export {
            format: flags.format.unwrap_or_default(),
            out: flags.out,
        },
        "game" => CliCommand::Game(match rest.first().copied() {
            None | Some("show") => GameAction::Show,
            Some("name") => {
                let name = rest[1..].join(" ");
                if name.trim().is_empty() {
                    return Err("game name requires a name".to_string());
                }
                GameAction::Rename(name)
            }
            Some("new") => GameAction::New,
            Some("join") => GameAction::Join(arg(1, "a game code")?.to_string()),
            Some(other) => return Err(format!("Unknown game action: {}", other)),
        }),
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(command)
}

fn required<'a>(command: &str, rest: &[&'a str], index: usize, what: &str) -> Result<&'a str, String> {
    rest.get(index)
        .copied()
        .ok_or_else(|| format!("{} requires {}", command, what))
}

fn parse_side(s: &str) -> Result<TeamSide, String> {
    s.parse()
        .map_err(|_| format!("Invalid side '{}'. Use: home or away", s))
}

fn parse_number(s: &str) -> Result<u8, String> {
    s.trim_start_matches('#')
        .parse::<u8>()
        .ok()
        .filter(|n| i64::from(*n) <= shot_counter_core::MAX_PLAYER_NUMBER)
        .ok_or_else(|| format!("Invalid player number: {}", s))
}

fn parse_period(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(period) if period >= 1 => Ok(period),
        _ => Err(format!("Invalid period: {}", s)),
    }
}

fn parse_coordinate(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid coordinate: {}", s))
}

/// Run CLI command
pub fn run(command: CliCommand, options: CliOptions) -> anyhow::Result<()> {
    let config = Config::load();
    if let CliCommand::Classify { x, y } = command {
        run_classify(x, y, &config, &options);
        return Ok(());
    }

    let mut session = open_session(&config, &options)?;

    match command {
        CliCommand::Classify { .. } => {}
        CliCommand::AddPlayer { side, number, name } => {
            session.set_active_side(side);
            let player = session.add_player(number, &name)?;
            print_player_change("Added", side, &player, &options);
        }
        CliCommand::RemovePlayer { side, number } => {
            session.set_active_side(side);
            let id = session.player_by_number(number)?.id.clone();
            let player = session.remove_player(&id)?;
            print_player_change("Removed", side, &player, &options);
        }
        CliCommand::Foul { side, number } => {
            session.set_active_side(side);
            let id = session.player_by_number(number)?.id.clone();
            let fouls = session.add_foul(&id)?;
            if options.json {
                println!("{}", serde_json::json!({ "number": number, "fouls": fouls }));
            } else {
                println!("#{} now has {} foul(s)", number, fouls);
            }
        }
        CliCommand::Shot {
            side,
            number,
            position,
            result,
            period,
        } => {
            session.set_active_side(side);
            session.select_period(period.unwrap_or(config.default_period));
            let id = session.player_by_number(number)?.id.clone();
            let shot = session.record_shot(&id, position, result)?;
            if options.json {
                println!("{}", serde_json::to_string(&shot)?);
            } else {
                let label = shot.shot_type.map(|t| t.display_name()).unwrap_or("Unknown");
                println!(
                    "Recorded {} {} shot for #{} in period {} (id {})",
                    label,
                    result,
                    number,
                    session.period(),
                    shot.id
                );
            }
        }
        CliCommand::DeleteShot {
            side,
            number,
            shot_id,
        } => {
            session.set_active_side(side);
            let id = session.player_by_number(number)?.id.clone();
            let shot = session.delete_shot(&id, &shot_id)?;
            if options.json {
                println!("{}", serde_json::to_string(&shot)?);
            } else {
                println!("Deleted shot {} for #{}", shot.id, number);
            }
        }
        CliCommand::ClearShots { side } => {
            session.set_active_side(side);
            let cleared = session.clear_shots()?;
            if options.json {
                println!("{}", serde_json::json!({ "side": side, "cleared": cleared }));
            } else {
                println!("Cleared {} shot(s) from the {} team", cleared, side);
            }
        }
        CliCommand::Player { side, number } => {
            session.set_active_side(side);
            let player = session.player_by_number(number)?;
            print_player_stats(player, &options)?;
        }
        CliCommand::Team { side } => {
            session.set_active_side(side);
            print_team_stats(&session, &options)?;
        }
        CliCommand::Court {
            side,
            period,
            show_made,
            show_missed,
            player,
        } => {
            session.set_active_side(side);
            session.select_period(period.unwrap_or(config.default_period));
            if !show_made {
                session.toggle_result(ShotResult::Made);
            }
            if !show_missed {
                session.toggle_result(ShotResult::Missed);
            }
            if let Some(number) = player {
                let id = session.player_by_number(number)?.id.clone();
                session.select_player(Some(&id))?;
            }
            print_court(&session, &options)?;
        }
        CliCommand::Export { format, out } => {
            let report = session.report();
            match out {
                Some(path) => {
                    format
                        .export(&report, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !options.json {
                        println!("Exported {} report to {}", format, path.display());
                    }
                }
                None => print!("{}", format.render(&report)?),
            }
        }
        CliCommand::Game(action) => run_game(action, session, config, &options)?,
    }

    Ok(())
}

fn open_session(config: &Config, options: &CliOptions) -> anyhow::Result<GameSession> {
    let data_dir = options
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data_dir.clone());
    let store: Arc<dyn DocumentStore> = Arc::new(LocalStore::open(&data_dir)?);

    let code = match (&options.game, &config.game_code) {
        (Some(code), _) => GameCode::parse(code)?,
        (None, Some(code)) => code.clone(),
        (None, None) => {
            let code = GameCode::generate();
            remember_game(config, &code);
            code
        }
    };

    Ok(GameSession::open(store, code)?.with_classifier(config.classifier()))
}

/// Store `code` as the default game. Failing to save only costs the default.
fn remember_game(config: &Config, code: &GameCode) {
    let mut config = config.clone();
    config.game_code = Some(code.clone());
    if let Err(e) = config.save() {
        tracing::warn!("Failed to save config: {}", e);
    }
}

/// Classify with the configured solver precision and print the result
fn run_classify(x: f64, y: f64, config: &Config, options: &CliOptions) -> ShotType {
    let shot_type = config.classifier().classify(x, y);
    if options.json {
        println!(
            "{}",
            serde_json::json!({
                "x": x,
                "y": y,
                "type": shot_type,
                "points": shot_type.points(),
            })
        );
    } else {
        println!("{} ({} points)", shot_type.display_name(), shot_type.points());
    }
    shot_type
}

fn run_game(
    action: GameAction,
    mut session: GameSession,
    config: Config,
    options: &CliOptions,
) -> anyhow::Result<()> {
    match action {
        GameAction::Show => {}
        GameAction::Rename(name) => session.set_game_name(&name)?,
        GameAction::New => {
            session.new_game()?;
            remember_game(&config, session.code());
        }
        GameAction::Join(code) => {
            session.join_game(&code)?;
            remember_game(&config, session.code());
        }
    }

    let roster = session.roster();
    if options.json {
        println!(
            "{}",
            serde_json::json!({
                "code": session.code(),
                "name": session.game_name(),
                "home_players": roster.home.len(),
                "away_players": roster.away.len(),
                "shots": roster.total_shots(),
            })
        );
    } else {
        println!("Game Code: {}", session.code());
        println!("Game: {}", session.report().display_name());
        println!(
            "Players: {} home, {} away ({} shots)",
            roster.home.len(),
            roster.away.len(),
            roster.total_shots()
        );
    }
    Ok(())
}

fn print_player_change(action: &str, side: TeamSide, player: &Player, options: &CliOptions) {
    if options.json {
        println!(
            "{}",
            serde_json::json!({
                "action": action.to_lowercase(),
                "side": side,
                "id": player.id,
                "number": player.number,
                "name": player.name,
            })
        );
    } else {
        println!("{} {} to the {} team", action, player.display_name(), side);
    }
}

fn print_player_stats(player: &Player, options: &CliOptions) -> anyhow::Result<()> {
    let summary = StatsAnalyzer::player_summary(player);
    let detailed = StatsAnalyzer::player_detailed(player);

    if options.json {
        println!(
            "{}",
            serde_json::json!({
                "id": player.id,
                "number": player.number,
                "name": player.name,
                "fouls": player.fouls,
                "summary": summary,
                "detailed": detailed,
            })
        );
        return Ok(());
    }

    println!("{}", player.display_name());
    println!("  Total Shots: {}", summary.total_shots);
    println!("  Made: {}", summary.made);
    println!("  Missed: {}", summary.missed);
    println!("  Field Goal %: {}", summary.fg_display());
    println!("  Points: {}", summary.points);
    println!("  Fouls: {}", player.fouls);

    if !detailed.by_period.is_empty() {
        println!();
        println!("  By Period");
        for (period, bucket) in &detailed.by_period {
            println!(
                "    Period {}: T:{} M:{} X:{} {}% {}pts",
                period, bucket.total, bucket.made, bucket.missed, bucket.fg_percentage, bucket.points
            );
        }
    }
    if !detailed.by_shot_type.is_empty() {
        println!();
        println!("  By Shot Type");
        for (shot_type, bucket) in &detailed.by_shot_type {
            println!(
                "    {}: T:{} M:{} X:{} {}% {}pts",
                shot_type.display_name(),
                bucket.total,
                bucket.made,
                bucket.missed,
                bucket.fg_percentage,
                bucket.points
            );
        }
    }
    Ok(())
}

fn print_team_stats(session: &GameSession, options: &CliOptions) -> anyhow::Result<()> {
    let stats = session.team_stats();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} TEAM", session.active_side().report_label());
    println!(
        "  Shots: {}  Made: {}  Missed: {}  FG: {}%  Points: {}",
        stats.total, stats.made, stats.missed, stats.fg_percentage, stats.points
    );
    for shot_type in ShotType::ALL {
        if let Some(bucket) = stats.by_shot_type.get(&shot_type) {
            println!(
                "  {}: {}/{} ({}%)",
                shot_type.display_name(),
                bucket.made,
                bucket.total,
                bucket.fg_percentage
            );
        }
    }
    if !stats.by_player.is_empty() {
        println!();
        for line in stats.players_by_number() {
            let name = if line.name.is_empty() {
                format!("#{}", line.number)
            } else {
                format!("#{} {}", line.number, line.name)
            };
            println!(
                "  {:<20} {:>2}/{:<2} {:>6.1}% {:>3} pts",
                name, line.made, line.total, line.fg_percentage, line.points
            );
        }
    }
    Ok(())
}

fn print_court(session: &GameSession, options: &CliOptions) -> anyhow::Result<()> {
    let shots = session.visible_shots();

    if options.json {
        let items: Vec<_> = shots
            .iter()
            .map(|(player, shot)| {
                serde_json::json!({
                    "player": player.number,
                    "id": shot.id,
                    "position": shot.position,
                    "type": shot.shot_type,
                    "result": shot.result,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "filter": session.filter(),
                "shots": items,
            })
        );
        return Ok(());
    }

    println!("{} ({} shots)", session.filter().summary(), shots.len());
    for (player, shot) in shots {
        let Some(position) = shot.position else {
            continue;
        };
        println!(
            "  #{:<3} ({:>5.1}, {:>5.1})  {:<8} {}",
            player.number,
            position.x,
            position.y,
            shot.shot_type.map(|t| t.display_name()).unwrap_or("-"),
            shot.result.map(|r| r.display_name()).unwrap_or("-"),
        );
    }
    Ok(())
}

pub fn print_help() {
    println!("shot-counter v{}", env!("CARGO_PKG_VERSION"));
    println!("Chart basketball shots and track shooting stats");
    println!();
    println!("USAGE:");
    println!("    shot-counter [options] <command>");
    println!();
    println!("COMMANDS:");
    println!("    classify <x> <y>                       Classify a court position");
    println!("    add-player <side> <number> [name]      Add a player");
    println!("    remove-player <side> <number>          Remove a player and their shots");
    println!("    foul <side> <number>                   Add a foul");
    println!("    shot <side> <number> <x> <y> <made|missed>");
    println!("                                           Record a shot");
    println!("    delete-shot <side> <number> <shot-id>  Delete one shot");
    println!("    clear-shots <side>                     Delete every shot of a team");
    println!("    player <side> <number>                 Player statistics");
    println!("    team <side>                            Team statistics");
    println!("    court <side>                           Shots drawn on the court");
    println!("    export                                 Game report for both teams");
    println!("    game [name <name>|new|join <code>]     Show or change the game");
    println!();
    println!("SIDES:");
    println!("    home, h                                Home team");
    println!("    away, a                                Away team");
    println!();
    println!("OPTIONS:");
    println!("    --game <code>                          Six-digit game code");
    println!("    --data-dir <dir>                       Directory holding game files");
    println!("    --period <n>                           Period for shot and court");
    println!("    --no-made, --no-missed                 Hide results on the court");
    println!("    --player <number>                      Show one player on the court");
    println!("    --format <text|json|csv>               Export format");
    println!("    --out <path>                           Write the export to a file");
    println!("    --json                                 Output in JSON format");
    println!("    --verbose, -v                          Debug logging on stderr");
    println!();
    println!("EXAMPLES:");
    println!("    shot-counter add-player home 23 Jordan");
    println!("    shot-counter shot home 23 250 10 made --period 2");
    println!("    shot-counter team home --json");
    println!("    shot-counter export --format csv --out stats.csv");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_side() {
        assert_eq!(parse_side("home"), Ok(TeamSide::Home));
        assert_eq!(parse_side("a"), Ok(TeamSide::Away));
        assert!(parse_side("visitors").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("23"), Ok(23));
        assert_eq!(parse_number("#0"), Ok(0));
        assert!(parse_number("100").is_err());
        assert!(parse_number("-1").is_err());
    }

    #[test]
    fn test_parse_args_classify() {
        let (cmd, _) = parse_args(&args(&["classify", "250", "10"])).unwrap();
        assert_eq!(cmd, CliCommand::Classify { x: 250.0, y: 10.0 });

        let (cmd, _) = parse_args(&args(&["classify", "-5", "10"])).unwrap();
        assert_eq!(cmd, CliCommand::Classify { x: -5.0, y: 10.0 });

        assert!(parse_args(&args(&["classify", "250"])).is_err());
    }

    #[test]
    fn test_parse_args_add_player_joins_name() {
        let (cmd, _) = parse_args(&args(&["add-player", "away", "7", "Big", "Ben"])).unwrap();
        assert_eq!(
            cmd,
            CliCommand::AddPlayer {
                side: TeamSide::Away,
                number: 7,
                name: "Big Ben".to_string()
            }
        );
    }

    #[test]
    fn test_parse_args_shot_with_period() {
        let (cmd, options) = parse_args(&args(&[
            "--game", "123456", "shot", "home", "23", "250", "10", "made", "--period", "3",
        ]))
        .unwrap();
        assert_eq!(options.game.as_deref(), Some("123456"));
        assert_eq!(
            cmd,
            CliCommand::Shot {
                side: TeamSide::Home,
                number: 23,
                position: CourtPoint::new(250.0, 10.0),
                result: ShotResult::Made,
                period: Some(3),
            }
        );
        assert!(parse_args(&args(&["shot", "home", "23", "1", "1", "swish"])).is_err());
    }

    #[test]
    fn test_parse_args_court_flags() {
        let (cmd, _) =
            parse_args(&args(&["court", "home", "--no-missed", "--player", "5"])).unwrap();
        assert_eq!(
            cmd,
            CliCommand::Court {
                side: TeamSide::Home,
                period: None,
                show_made: true,
                show_missed: false,
                player: Some(5),
            }
        );
    }

    #[test]
    fn test_parse_args_export() {
        let (cmd, options) =
            parse_args(&args(&["export", "--format", "csv", "--out", "x.csv", "--json"])).unwrap();
        assert!(options.json);
        assert_eq!(
            cmd,
            CliCommand::Export {
                format: ExportFormat::Csv,
                out: Some(PathBuf::from("x.csv"))
            }
        );
        assert!(parse_args(&args(&["export", "--format", "pdf"])).is_err());
    }

    #[test]
    fn test_parse_args_game_actions() {
        let (cmd, _) = parse_args(&args(&["game"])).unwrap();
        assert_eq!(cmd, CliCommand::Game(GameAction::Show));
        let (cmd, _) = parse_args(&args(&["game", "name", "Cup", "Final"])).unwrap();
        assert_eq!(cmd, CliCommand::Game(GameAction::Rename("Cup Final".into())));
        let (cmd, _) = parse_args(&args(&["game", "join", "123456"])).unwrap();
        assert_eq!(cmd, CliCommand::Game(GameAction::Join("123456".into())));
        assert!(parse_args(&args(&["game", "join"])).is_err());
        assert!(parse_args(&args(&["game", "name"])).is_err());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["dunk"])).is_err());
        assert!(parse_args(&args(&["team", "home", "--bogus"])).is_err());
        assert!(parse_args(&args(&["team", "home", "--game"])).is_err());
    }

    #[test]
    fn test_classify_uses_configured_iterations() {
        let options = CliOptions::default();
        assert_eq!(
            run_classify(60.0, 100.0, &Config::default(), &options),
            ShotType::ThreePoint
        );

        // One bisection step lands far from x = 60 and overestimates the arc
        let coarse = Config {
            arc_iterations: 1,
            ..Config::default()
        };
        assert_eq!(
            run_classify(60.0, 100.0, &coarse, &options),
            ShotType::TwoPoint
        );
    }

    #[test]
    fn test_run_against_temp_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = CliOptions {
            game: Some("777777".into()),
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        run(
            CliCommand::AddPlayer {
                side: TeamSide::Home,
                number: 23,
                name: "Jordan".into(),
            },
            options.clone(),
        )
        .unwrap();
        run(
            CliCommand::Shot {
                side: TeamSide::Home,
                number: 23,
                position: CourtPoint::new(250.0, 10.0),
                result: ShotResult::Made,
                period: Some(2),
            },
            options.clone(),
        )
        .unwrap();

        let store = LocalStore::open(dir.path()).unwrap();
        let doc = store
            .get(&GameCode::parse("777777").unwrap())
            .unwrap()
            .unwrap();
        let roster = doc.roster().unwrap();
        assert_eq!(roster.home[0].shots.len(), 1);
        assert_eq!(roster.home[0].shots[0].period, Some(2));

        let missing = run(
            CliCommand::Foul {
                side: TeamSide::Away,
                number: 23,
            },
            options,
        );
        assert!(missing.is_err());
    }
}
