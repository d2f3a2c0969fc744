use std::io::{self, BufRead, Write};

use anyhow::Context;
use chess_rules::{
    Board, Color, EngineState, FigureKind, GameEngine, GameObserver, Move, MoveError, Outcome, Player,
    Position, ScoreLog,
};
use log::info;

/// Terminal stand-in for the rendering and score collaborators.
#[derive(Default)]
struct Console {
    log: ScoreLog,
}

impl GameObserver for Console {
    fn initialize(&mut self, players: &[Player], _board: &Board) {
        for player in players {
            println!("{} plays {}", player.name, player.color);
        }
    }

    fn render_board(&mut self, board: &Board) {
        println!("\n{board}");
    }

    fn record_move(&mut self, mv: &Move, mover: &Player, next: Option<&Player>) {
        self.log.record_move(mv, mover, next);
        println!("{} played {mv}", mover.name);
        if let Some(next) = next {
            println!("{} to move", next.name);
        }
    }

    fn record_rejection(&mut self, player: &Player, error: &MoveError) {
        self.log.record_rejection(player, error);
        println!("{}: {error}", player.name);
    }

    fn request_promotion(&mut self, player: &Player, position: Position, choices: &[FigureKind]) {
        let letters: String = choices.iter().map(|kind| kind.letter()).collect();
        println!("{}: promote the pawn on {position}, pick one of [{letters}]", player.name);
    }
}

const HELP: &str = "\
Commands:
  <square>      select a figure, then its destination (e.g. e2, then e4)
  <from> <to>   both squares at once
  q|r|b|n       promotion choice
  moves <sq>    legal destinations of a figure
  menu          open or close the menu
  log           print the score sheet
  quit";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let white = args.next().unwrap_or_else(|| "White".to_string());
    let black = args.next().unwrap_or_else(|| "Black".to_string());
    let mut game = GameEngine::new(
        [Player::new(white, Color::White), Player::new(black, Color::Black)],
        Console::default(),
    );
    println!("{HELP}");

    let stdin = io::stdin();
    loop {
        print!("{} > ", game.current_player().name);
        io::stdout().flush().context("failed to flush stdout")?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] => break,
            ["log"] => print!("{}", game.observer().log),
            ["menu"] => {
                if matches!(game.state(), EngineState::MenuOpen { .. }) {
                    game.close_menu();
                    println!("menu closed");
                } else {
                    game.open_menu();
                    println!("menu open");
                }
            }
            ["moves", square] => match square.parse::<Position>() {
                Ok(from) => {
                    let targets: Vec<String> = game
                        .legal_destinations(from)
                        .iter()
                        .map(Position::to_string)
                        .collect();
                    println!("{from}: {}", targets.join(" "));
                }
                Err(err) => println!("{err}"),
            },
            [letter] if letter.len() == 1 && !letter.starts_with(char::is_numeric) => {
                let kind = letter.chars().next().and_then(FigureKind::from_letter);
                match kind {
                    Some(kind) => {
                        report(game.resolve_promotion(kind));
                    }
                    None => println!("{HELP}"),
                }
            }
            squares @ ([_] | [_, _]) => {
                for square in squares {
                    match square.parse::<Position>() {
                        Ok(position) => {
                            if !report(game.select(position)) {
                                break;
                            }
                        }
                        Err(err) => {
                            println!("{err}");
                            break;
                        }
                    }
                }
            }
            _ => println!("{HELP}"),
        }
        if game.in_check() {
            println!("{} is in check", game.current_player().color);
        }
    }

    info!("Session finished");
    print!("{}", game.observer().log);
    Ok(())
}

/// Prints engine errors that the observer doesn't see. Returns whether the
/// input was accepted.
fn report(result: Result<Outcome, MoveError>) -> bool {
    match result {
        Ok(Outcome::Selected(position)) => {
            println!("selected {position}");
            true
        }
        Ok(_) => true,
        Err(
            err @ (MoveError::MenuOpen
            | MoveError::PromotionPending(_)
            | MoveError::NoPromotionPending
            | MoveError::InvalidPromotion(_)),
        ) => {
            println!("{err}");
            false
        }
        Err(_) => false,
    }
}
