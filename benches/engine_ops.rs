use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_2048::engine::{slide_line, Board, Move};
use game_2048::game::Game;
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn edge_boards() -> Vec<Board> {
    vec![
        Board::EMPTY,
        // Dead board: full, no equal neighbours.
        Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]),
        // Full, and every row can merge.
        Board::from_rows([[2, 2, 2, 2], [4, 4, 4, 4], [8, 8, 8, 8], [16, 16, 16, 16]]),
        // Chain-merge edge in every line.
        Board::from_rows([[2, 2, 4, 0], [0, 4, 4, 8], [8, 0, 8, 16], [2, 2, 2, 2]]),
    ]
}

/// Edge boards plus snapshots from a few seeded games cycling through directions.
fn corpus() -> Vec<Board> {
    let mut boards = edge_boards();
    for seed in 0..4 {
        let mut game = Game::from_seed(seed);
        for dir in Move::ALL.iter().cycle().take(200) {
            if game.is_game_over() {
                break;
            }
            if game.apply_move(*dir).moved {
                boards.push(*game.board());
            }
        }
    }
    boards
}

fn bench_shift(c: &mut Criterion) {
    let boards = corpus();
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{dir}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards {
                    acc = acc.wrapping_add(bd.shift(dir).score);
                }
                black_box(acc)
            })
        });
    }
    c.bench_function("slide_line", |bch| {
        let lines = [[2, 2, 2, 2], [0, 2, 0, 2], [2, 4, 8, 16], [0, 0, 0, 4]];
        bch.iter(|| {
            for &l in &lines {
                black_box(slide_line(black_box(l)));
            }
        })
    });
}

fn bench_game(c: &mut Criterion) {
    c.bench_function("board/with_random_tile", |bch| {
        bch.iter_batched(
            || (Board::EMPTY, StdRng::seed_from_u64(7)),
            |(mut bd, mut rng)| {
                for _ in 0..16 {
                    bd = bd.with_random_tile(&mut rng);
                }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("game/apply_move_cycle", |bch| {
        bch.iter_batched(
            || Game::from_seed(9),
            |mut game| {
                for i in 0..64 {
                    game.apply_move(Move::ALL[i % 4]);
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("query/is_game_over", |bch| {
        let boards = corpus();
        bch.iter(|| boards.iter().filter(|b| b.is_game_over()).count())
    });
}

criterion_group!(engine_ops, bench_shift, bench_game);
criterion_main!(engine_ops);
