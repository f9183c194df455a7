use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_drop::core::{definition, ActivePiece, Grid, PieceTiming, Session, SessionConfig};
use block_drop::types::{Intent, Shape, Spin, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::seeded(12345)).unwrap();
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.restart_game();
            }
            session.tick(black_box(TICK_MS), &[]);
        })
    });
}

fn bench_tick_with_intents(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::seeded(12345)).unwrap();
    session.start();
    let intents = [Intent::MoveLeft, Intent::RotateCw, Intent::MoveRight];

    c.bench_function("session_tick_intents", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.restart_game();
            }
            session.tick(black_box(TICK_MS), black_box(&intents));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            // Fill bottom 4 rows
            for y in -10..-6 {
                for x in -5..5 {
                    grid.set((x, y), Some(Shape::I));
                }
            }
            grid.clear_full_rows()
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::seeded(12345)).unwrap();
    session.start();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            session.restart_game();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let grid = Grid::new(10, 20);
    let mut piece = ActivePiece::new(definition(Shape::T), (0, 0), PieceTiming::default());

    c.bench_function("rotate", |b| {
        b.iter(|| {
            piece.rotate(&grid, black_box(Spin::Cw));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_tick_with_intents,
    bench_line_clear,
    bench_piece_spawn,
    bench_rotate
);
criterion_main!(benches);
