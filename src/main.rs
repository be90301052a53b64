use minefield::{
    format_counter, CellState, Difficulty, FlagStatus, Game, GameConfig, GameError, GameState,
    Position, RevealStatus,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::io::{self, BufRead, Write};

const LOG_ENV: &str = "MINEFIELD_LOG";

enum Command {
    Reveal(Position),
    Flag(Position),
    NewGame,
    Configure(u32, u32, u32),
    Preset(Difficulty),
    Quit,
}

fn main() {
    init_log();
    match run_game() {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn init_log() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let config = ConfigBuilder::new()
        .add_filter_allow_str("minefield")
        .build();
    // A second logger cannot be installed; keep playing without one.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn run_game() -> Result<(), GameError> {
    let config = match env::args().nth(1) {
        Some(name) => name.parse::<Difficulty>()?.config(),
        None => GameConfig::default(),
    };
    let mut game = Game::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_board(&game);
        print!("Enter command (r x y | f x y | n | c w h m | d level | q): ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            return Ok(());
        };
        let command = match parse_command(&line) {
            Some(command) => command,
            None => {
                println!("Unrecognised command");
                continue;
            }
        };

        match command {
            Command::Reveal(pos) => {
                let outcome = game.reveal(pos);
                match outcome.status {
                    RevealStatus::Won => println!("Congratulations! You won!"),
                    RevealStatus::Exploded(at) => println!("Boom at {},{}. Game over!", at.x, at.y),
                    RevealStatus::GameOver => println!("Game is over, press n for a new one"),
                    RevealStatus::Opened | RevealStatus::NoChange => {}
                }
            }
            Command::Flag(pos) => {
                if game.toggle_flag(pos).status == FlagStatus::GameOver {
                    println!("Game is over, press n for a new one");
                }
            }
            Command::NewGame => game.new_game(),
            Command::Configure(width, height, mines) => game.configure(width, height, mines),
            Command::Preset(difficulty) => game.reconfigure(difficulty.config()),
            Command::Quit => return Ok(()),
        }
    }
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let keyword = parts.next()?;
    let command = match keyword {
        "r" | "f" => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            let pos = Position::new(x, y);
            if keyword == "r" {
                Command::Reveal(pos)
            } else {
                Command::Flag(pos)
            }
        }
        "n" => Command::NewGame,
        "c" => {
            let width = parts.next()?.parse().ok()?;
            let height = parts.next()?.parse().ok()?;
            let mines = parts.next()?.parse().ok()?;
            Command::Configure(width, height, mines)
        }
        "d" => Command::Preset(parts.next()?.parse().ok()?),
        "q" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn print_board(game: &Game) {
    let (width, height) = game.dimensions();
    let face = match game.state() {
        GameState::Won => "B)",
        GameState::Lost => "X(",
        GameState::Pending | GameState::Running => ":)",
    };
    println!(
        "[{}]  {}  [{}]",
        format_counter(game.mines_remaining() as i64),
        face,
        format_counter(game.elapsed_seconds() as i64)
    );

    print!("    ");
    for x in 0..width {
        print!("{:>2}", x % 100);
    }
    println!();

    for y in 0..height {
        print!("{:>3} ", y);
        for x in 0..width {
            let symbol = match game.cell_state(Position::new(x as i32, y as i32)) {
                Ok(CellState::Hidden) => "□".to_string(),
                Ok(CellState::Flagged) => "⚑".to_string(),
                Ok(CellState::Opened(0)) => " ".to_string(),
                Ok(CellState::Opened(n)) => n.to_string(),
                Ok(CellState::Exploded) => "✸".to_string(),
                Ok(CellState::Mine) => "*".to_string(),
                Ok(CellState::Misflagged) => "✗".to_string(),
                Err(_) => "?".to_string(),
            };
            print!("{:>2}", symbol);
        }
        println!();
    }
}
