use criterion::{black_box, criterion_group, criterion_main, Criterion};
use duel_tetris::ai::HeuristicController;
use duel_tetris::core::{Board, GameEngine};
use duel_tetris::types::{PieceKind, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            engine.tick(black_box(FRAME_MS));
            if engine.game_over() {
                engine.start();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            engine.spawn_kind(black_box(PieceKind::T));
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start();

    c.bench_function("move_horizontal", |b| {
        let mut dir = 1;
        b.iter(|| {
            if !engine.move_horizontal(black_box(dir)) {
                dir = -dir;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            engine.rotate();
        })
    });
}

fn bench_opponent_frame(c: &mut Criterion) {
    let mut ai = HeuristicController::new(GameEngine::new(12345), 7);
    ai.start();

    c.bench_function("opponent_tick_16ms", |b| {
        b.iter(|| {
            ai.tick(black_box(FRAME_MS));
            if ai.engine().game_over() {
                ai.start();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_opponent_frame
);
criterion_main!(benches);
