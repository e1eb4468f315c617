use tictactoe_engine::tictactoe::{CELL_COUNT, Difficulty, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start { mode: Option<GameMode>, difficulty: Option<Difficulty> },
    Place(usize),
    Mode(GameMode),
    Difficulty(Difficulty),
    Reset,
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  start [pvp|bot] [easy|medium|hard]  start a game
  0-8                                 mark a cell (row-major, 0 is top-left)
  mode pvp|bot                        switch mode (resets the current game)
  difficulty easy|medium|hard         bot level for the next game
  reset                               abandon the current game
  stats                               show wins/losses/draws against the bot
  help                                show this text
  quit                                exit";

fn parse_mode(word: &str) -> Option<GameMode> {
    match word {
        "pvp" => Some(GameMode::PlayerVsPlayer),
        "bot" | "pvb" => Some(GameMode::PlayerVsBot),
        _ => None,
    }
}

fn parse_difficulty(word: &str) -> Option<Difficulty> {
    match word {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let lowered = line.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    match words.as_slice() {
        [] => Err("Empty command".to_string()),
        [cell] if cell.chars().all(|c| c.is_ascii_digit()) => {
            let index: usize = cell.parse().map_err(|_| format!("Bad cell: {}", cell))?;
            if index >= CELL_COUNT {
                return Err(format!("Cell must be 0-{}", CELL_COUNT - 1));
            }
            Ok(Command::Place(index))
        }
        ["start", rest @ ..] => {
            let mut mode = None;
            let mut difficulty = None;
            for word in rest {
                if let Some(m) = parse_mode(word) {
                    mode = Some(m);
                } else if let Some(d) = parse_difficulty(word) {
                    difficulty = Some(d);
                } else {
                    return Err(format!("Unknown start option: {}", word));
                }
            }
            Ok(Command::Start { mode, difficulty })
        }
        ["mode", word] => parse_mode(word)
            .map(Command::Mode)
            .ok_or_else(|| format!("Unknown mode: {}", word)),
        ["difficulty", word] => parse_difficulty(word)
            .map(Command::Difficulty)
            .ok_or_else(|| format!("Unknown difficulty: {}", word)),
        ["reset"] => Ok(Command::Reset),
        ["stats"] => Ok(Command::Stats),
        ["help" | "?"] => Ok(Command::Help),
        ["quit" | "exit" | "q"] => Ok(Command::Quit),
        _ => Err(format!("Unknown command: {}", line.trim())),
    }
}
