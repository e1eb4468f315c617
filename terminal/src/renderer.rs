use std::io::Write;

use tictactoe_engine::stats::Stats;
use tictactoe_engine::tictactoe::{
    BOARD_SIDE, CELL_COUNT, GameOverNotification, LineKind, Mark, Outcome, SessionObserver,
    SessionSnapshot, SoundCue,
};

pub fn render_board(cells: &[Mark; CELL_COUNT], highlight: &[usize]) -> String {
    let rows: Vec<String> = cells
        .chunks(BOARD_SIDE)
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, mark)| {
                    let index = y * BOARD_SIDE + x;
                    match (mark, highlight.contains(&index)) {
                        (Mark::Empty, _) => format!(" {} ", index),
                        (mark, true) => format!("[{}]", mark.symbol()),
                        (mark, false) => format!(" {} ", mark.symbol()),
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

pub fn describe_line(kind: LineKind) -> String {
    match kind {
        LineKind::Horizontal(row) => format!("row {}", row + 1),
        LineKind::Vertical(column) => format!("column {}", column + 1),
        LineKind::Diagonal => "diagonal".to_string(),
        LineKind::AntiDiagonal => "anti-diagonal".to_string(),
    }
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Games: {}  Wins: {}  Losses: {}  Draws: {}",
        stats.games_played(),
        stats.wins,
        stats.losses,
        stats.draws
    )
}

/// The terminal's rendition of a sound cue: one bell for a win, two for a draw.
/// Clicks stay silent so the bell only ever means the game ended.
pub fn cue_signal(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Click => "",
        SoundCue::Win => "\x07",
        SoundCue::Draw => "\x07\x07",
    }
}

#[derive(Clone)]
pub struct TerminalObserver {
    bell_on_game_over: bool,
}

impl TerminalObserver {
    pub fn new(bell_on_game_over: bool) -> Self {
        Self { bell_on_game_over }
    }

    fn print(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

impl SessionObserver for TerminalObserver {
    async fn on_state(&self, snapshot: SessionSnapshot) {
        // The final board is drawn by on_game_over, with the line highlighted.
        if !matches!(snapshot.cue, Some(SoundCue::Win | SoundCue::Draw)) {
            self.print(&format!("\n{}\n{}", render_board(&snapshot.cells, &[]), snapshot.status));
        }
    }

    async fn on_game_over(&self, notification: GameOverNotification) {
        let highlight: Vec<usize> = match notification.outcome {
            Outcome::Win(line) => line.cells.to_vec(),
            _ => Vec::new(),
        };
        let mut text = format!("\n{}\n{}", render_board(&notification.cells, &highlight), notification.status);
        if let Some(kind) = notification.line_kind {
            text.push_str(&format!(" ({})", describe_line(kind)));
        }
        text.push_str(&format!("\n{}", render_stats(&notification.stats)));
        if self.bell_on_game_over {
            text.push_str(cue_signal(notification.cue));
        }
        self.print(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_board_shows_indices() {
        let rendered = render_board(&[Mark::Empty; CELL_COUNT], &[]);
        assert_eq!(rendered, " 0 | 1 | 2 \n---+---+---\n 3 | 4 | 5 \n---+---+---\n 6 | 7 | 8 ");
    }

    #[test]
    fn test_render_highlights_winning_cells() {
        let mut cells = [Mark::Empty; CELL_COUNT];
        for index in [0, 4, 8] {
            cells[index] = Mark::X;
        }
        cells[1] = Mark::O;
        let rendered = render_board(&cells, &[0, 4, 8]);
        assert!(rendered.starts_with("[X]| O | 2 "));
        assert!(rendered.ends_with(" 6 | 7 |[X]"));
    }

    #[test]
    fn test_describe_line() {
        assert_eq!(describe_line(LineKind::Horizontal(0)), "row 1");
        assert_eq!(describe_line(LineKind::Vertical(2)), "column 3");
        assert_eq!(describe_line(LineKind::AntiDiagonal), "anti-diagonal");
    }

    #[test]
    fn test_render_stats_includes_games_played() {
        let stats = Stats { wins: 2, losses: 1, draws: 3 };
        assert_eq!(render_stats(&stats), "Games: 6  Wins: 2  Losses: 1  Draws: 3");
    }

    #[test]
    fn test_each_cue_has_its_own_signal() {
        assert_eq!(cue_signal(SoundCue::Click), "");
        assert_eq!(cue_signal(SoundCue::Win), "\x07");
        assert_eq!(cue_signal(SoundCue::Draw), "\x07\x07");
    }
}
