use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tictactoe_engine::SessionRng;
use tictactoe_engine::tictactoe::{
    Board, BotInput, Difficulty, Mark, calculate_minimax_move, calculate_move, evaluate,
};

fn bench_minimax_empty_board() {
    let input = BotInput::new(Board::new(), Mark::X);
    let _ = black_box(calculate_minimax_move(&input));
}

fn bench_minimax_after_corner_opening() {
    let mut board = Board::new();
    let _ = board.apply_move(0, Mark::X);
    let input = BotInput::new(board, Mark::O);
    let _ = black_box(calculate_minimax_move(&input));
}

fn bench_hard_vs_hard_full_game() {
    let mut board = Board::new();
    let mut current_mark = Mark::X;
    while !evaluate(&board).is_terminal() {
        let Ok(index) = calculate_minimax_move(&BotInput::new(board, current_mark)) else {
            break;
        };
        let _ = board.apply_move(index, current_mark);
        current_mark = current_mark.opponent().unwrap_or(Mark::X);
    }
    black_box(board);
}

fn bench_medium_full_game(rng: &mut SessionRng) {
    let mut board = Board::new();
    let mut current_mark = Mark::X;
    while !evaluate(&board).is_terminal() {
        let Ok(index) = calculate_move(Difficulty::Medium, &BotInput::new(board, current_mark), rng) else {
            break;
        };
        let _ = board.apply_move(index, current_mark);
        current_mark = current_mark.opponent().unwrap_or(Mark::X);
    }
    black_box(board);
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group.sample_size(10);

    group.bench_function("single_move_empty", |b| b.iter(bench_minimax_empty_board));

    group.bench_function("single_move_after_corner", |b| {
        b.iter(bench_minimax_after_corner_opening)
    });

    group.bench_function("hard_vs_hard", |b| b.iter(bench_hard_vs_hard_full_game));

    let mut rng = SessionRng::new(17);
    group.bench_function("medium_vs_medium", |b| b.iter(|| bench_medium_full_game(&mut rng)));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
