// main.rs - command line front end: self-play batches and move suggestions
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tilewords::game::turn_manager::winner;
use tilewords::logging::setup_logging;
use tilewords::recording::{load_game, save_game, write_move_history_csv};
use tilewords::services::simulation::{simulate_batch, summarize, SimulationResult};
use tilewords::{find_all_moves, Dictionary, Difficulty, PlayerSetup, TilewordsError, WordList};

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// AI against AI, many seeded games in parallel
    Simulate,
    /// Best plays for the player to move in a saved game
    Suggest,
}

#[derive(Parser, Debug)]
#[command(name = "tilewords", version, about = "Crossword tile game engine")]
struct Config {
    /// Word list, one word per line
    #[arg(short = 'd', long)]
    dictionary: PathBuf,

    #[arg(long, value_enum, default_value = "simulate")]
    mode: Mode,

    /// Number of games to simulate
    #[arg(short = 'g', long, default_value_t = 10)]
    games: usize,

    /// First seed; game i uses seed + i
    #[arg(short = 's', long, default_value_t = 0)]
    seed: u64,

    /// One AI seat per entry (easy, medium, hard)
    #[arg(long, value_delimiter = ',', default_value = "hard,medium")]
    difficulties: Vec<String>,

    /// How many suggestions to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Saved game: read in suggest mode, written (last game) in simulate mode
    #[arg(long)]
    game: Option<PathBuf>,

    /// Write the move history of the last game here
    #[arg(long)]
    csv: Option<PathBuf>,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    let _logger = setup_logging(&config.log_dir, &config.log_level)?;

    let words = WordList::load(&config.dictionary)?;
    if words.is_empty() {
        return Err(TilewordsError::EmptyDictionary(config.dictionary.display().to_string()).into());
    }
    let dictionary: Arc<dyn Dictionary> = Arc::new(words);

    match config.mode {
        Mode::Simulate => run_simulation(&config, dictionary),
        Mode::Suggest => run_suggestions(&config, dictionary.as_ref()),
    }
}

// ============================================================================
// SIMULATION
// ============================================================================

fn run_simulation(config: &Config, dictionary: Arc<dyn Dictionary>) -> Result<(), Box<dyn Error>> {
    let setups: Vec<PlayerSetup> = config
        .difficulties
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let difficulty = Difficulty::from(name.as_str());
            PlayerSetup::ai(format!("ai{}", i + 1), format!("AI {} ({})", i + 1, difficulty), difficulty)
        })
        .collect();

    let seeds: Vec<u64> = (0..config.games as u64).map(|i| config.seed + i).collect();
    let results = simulate_batch(&setups, dictionary, &seeds)
        .into_iter()
        .collect::<Result<Vec<SimulationResult>, _>>()
        .map_err(TilewordsError::from)?;

    let summary = summarize(&results);
    println!("🎮 {} games, {} finished", summary.games, summary.completed);
    println!("   average turns: {:.1}", summary.average_turns);
    for setup in &setups {
        println!(
            "   {:<20} wins {:>4}  average score {:>7.1}",
            setup.name,
            summary.wins.get(&setup.id).copied().unwrap_or(0),
            summary.average_scores.get(&setup.id).copied().unwrap_or(0.0)
        );
    }

    if let Some(last) = results.last() {
        if let Some(path) = &config.game {
            save_game(path, &last.state)?;
        }
        if let Some(path) = &config.csv {
            write_move_history_csv(path, &last.state)?;
        }
    }
    Ok(())
}

// ============================================================================
// SUGGESTIONS
// ============================================================================

fn run_suggestions(config: &Config, dictionary: &dyn Dictionary) -> Result<(), Box<dyn Error>> {
    let Some(path) = &config.game else {
        return Err("suggest mode needs --game <saved game>".into());
    };
    let state = load_game(path)?;

    print!("{}", state.board.render());
    if state.is_over() {
        if let Some(reason) = &state.end_reason {
            println!("{}", reason);
        }
        if let Some(best) = winner(&state.players) {
            println!("🏆 {} with {}", best.name, best.score);
        }
        return Ok(());
    }

    let Some(player) = state.current_player() else {
        return Err("saved game has no players".into());
    };
    let mut moves = find_all_moves(&state.board, &player.rack, dictionary);
    moves.sort_by(|a, b| b.score.cmp(&a.score));

    let rack: String = player
        .rack
        .iter()
        .map(|t| t.effective_letter().unwrap_or('?'))
        .collect();
    println!("{} to play, rack {} ({} candidates)", player.name, rack, moves.len());

    for candidate in moves.iter().take(config.top) {
        let cells: Vec<String> = candidate
            .placements
            .iter()
            .map(|p| format!("{}{}", p.tile.effective_letter().unwrap_or('?'), p.position))
            .collect();
        println!(
            "{:>5}  {:<30} {}",
            candidate.score,
            candidate.words.join(", "),
            cells.join(" ")
        );
    }
    Ok(())
}
