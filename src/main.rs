use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use env_logger::Env;
use game_2048::config::Config;
use game_2048::engine::Move;
use game_2048::game::{Feedback, Game, MoveOutcome};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "game-2048", version, about = "Play 2048 in the terminal")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive play from stdin (default)
    Play,
    /// Play random moves until the game ends
    Auto {
        /// Stop after this many moves
        #[arg(long)]
        steps: Option<u64>,
        /// Print the board after every move
        #[arg(short, long)]
        verbose: bool,
    },
}

/// One line of interactive input.
#[derive(Debug, PartialEq)]
enum Input {
    Move(Move),
    Drag(f64, f64),
    New,
    Quit,
}

fn parse_input(line: &str) -> anyhow::Result<Input> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else { bail!("empty input") };
    match head.to_ascii_lowercase().as_str() {
        "new" | "n" => Ok(Input::New),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        "drag" => {
            let dx: f64 = parts.next().context("drag needs <dx> <dy>")?.parse()?;
            let dy: f64 = parts.next().context("drag needs <dx> <dy>")?.parse()?;
            Ok(Input::Drag(dx, dy))
        }
        _ => Ok(Input::Move(head.parse()?)),
    }
}

fn print_state(game: &Game<StdRng>) {
    println!("{}", game.board());
    println!("score: {}", game.score());
}

fn describe(out: &MoveOutcome) -> &'static str {
    match out.feedback() {
        Feedback::None => "no move",
        Feedback::Slide => "slide",
        Feedback::Merge => "merge",
        Feedback::Won => "2048!",
        Feedback::GameOver => "game over",
    }
}

fn play(game: &mut Game<StdRng>, cfg: &Config) -> anyhow::Result<()> {
    let drag = cfg.drag();
    print_state(game);
    println!("moves: w/a/s/d, up/down/left/right, drag <dx> <dy>, new, quit");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let dir = match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::New) => {
                game.reset();
                print_state(game);
                continue;
            }
            Ok(Input::Move(dir)) => dir,
            Ok(Input::Drag(dx, dy)) => match drag.direction(dx, dy) {
                Some(dir) => dir,
                None => {
                    println!("drag too short");
                    continue;
                }
            },
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if game.is_game_over() {
            println!("game over, type `new` to restart");
            continue;
        }
        let out = game.apply_move(dir);
        print_state(game);
        if cfg.show_feedback {
            println!("{dir}: {} (+{})", describe(&out), out.score_delta);
        }
        if out.game_over {
            println!("Final score: {}", game.score());
        }
        stdout.flush()?;
    }
    Ok(())
}

fn autoplay(game: &mut Game<StdRng>, steps: Option<u64>, verbose: bool, rng: &mut StdRng) {
    let mut move_count: u64 = 0;
    while !game.is_game_over() {
        if steps.is_some_and(|limit| move_count >= limit) {
            break;
        }
        let Some(&dir) = Move::ALL.choose(rng) else { break };
        let out = game.apply_move(dir);
        if !out.moved {
            continue;
        }
        move_count += 1;
        if verbose {
            println!("{dir}\n{}", game.board());
        }
    }
    println!(
        "Moves made: {}, score: {}, highest tile: {}, game over: {}",
        move_count,
        game.score(),
        game.highest_tile(),
        game.is_game_over()
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let seed = cli.seed.or(cfg.seed);
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    info!("seed: {}", seed.map_or_else(|| "entropy".to_string(), |s| s.to_string()));
    let mut game = Game::new(rng);

    match cli.cmd.unwrap_or(Command::Play) {
        Command::Play => play(&mut game, &cfg)?,
        Command::Auto { steps, verbose } => {
            let mut policy_rng = match seed {
                Some(s) => StdRng::seed_from_u64(s.wrapping_add(1)),
                None => StdRng::from_entropy(),
            };
            let steps = steps.or(cfg.autoplay.max_steps);
            autoplay(&mut game, steps, verbose || cfg.autoplay.verbose, &mut policy_rng);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input("a").unwrap(), Input::Move(Move::Left));
        assert_eq!(parse_input("UP").unwrap(), Input::Move(Move::Up));
        assert_eq!(parse_input("drag -50 10").unwrap(), Input::Drag(-50.0, 10.0));
        assert_eq!(parse_input("new").unwrap(), Input::New);
        assert_eq!(parse_input("q").unwrap(), Input::Quit);
        assert!(parse_input("drag 5").is_err());
        assert!(parse_input("jump").is_err());
    }

    #[test]
    fn autoplay_respects_step_cap() {
        let mut game = Game::from_seed(3);
        let mut rng = StdRng::seed_from_u64(4);
        autoplay(&mut game, Some(0), false, &mut rng);
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn autoplay_runs_to_game_over() {
        let mut game = Game::from_seed(5);
        let mut rng = StdRng::seed_from_u64(6);
        autoplay(&mut game, None, false, &mut rng);
        assert!(game.is_game_over());
    }
}
